//! Command-line interface for gitload

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod summarize;

/// Fetch a repository and condense it into one bounded summary document
#[derive(Parser)]
#[command(name = "gitload")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// GitHub repository URL (or user/repo slug) to fetch and summarize
    #[arg(value_name = "URL", required_unless_present = "path")]
    url: Option<String>,

    /// Local directory to summarize instead of fetching
    #[arg(short, long, value_name = "PATH")]
    path: Option<PathBuf>,

    /// Git ref (branch/tag) to fetch when using a URL
    #[arg(long, value_name = "REF")]
    ref_: Option<String>,

    /// Path to config file (gitload.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for the output file
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    summarize::run(cli)
}
