//! gitload: condense a repository into a single bounded summary document
//!
//! This tool downloads a repository and concatenates its textual files into
//! one budget-limited summary, for pasting into large language model prompts.

use anyhow::Result;

mod cli;
mod config;
mod domain;
mod fetch;
mod summarize;
mod utils;

fn main() -> Result<()> {
    cli::run()
}
