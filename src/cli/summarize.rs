//! Summarize command implementation

use anyhow::{Context, Result};
use chrono::Utc;
use console::style;
use std::fs;

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::Summary;
use crate::fetch::{fetch_repository, RepoLocator};
use crate::summarize::{ContentDetector, Summarizer};

pub fn run(cli: super::Cli) -> Result<()> {
    if cli.url.is_some() && cli.path.is_some() {
        anyhow::bail!("Cannot specify both a repository URL and --path");
    }

    let file_config = load_config(cli.config.as_deref())?;
    let merged = merge_cli_with_config(
        file_config,
        CliOverrides { output_dir: cli.output_dir.clone(), ref_: cli.ref_.clone() },
    );

    let summarizer = Summarizer::new(merged.max_characters);
    let detector = ContentDetector;

    let (summary, repo_name) = match (cli.url.as_deref(), cli.path.as_deref()) {
        (Some(url), None) => {
            let locator = RepoLocator::parse(url)
                .with_context(|| format!("failed to fetch repository '{url}'"))?;
            // The checkout lives in a scoped temporary directory that is
            // removed when `fetched` drops, on success and failure alike.
            let fetched = fetch_repository(&locator, merged.ref_.as_deref())
                .with_context(|| format!("failed to fetch repository '{url}'"))?;
            println!("Repository downloaded successfully");
            let summary = summarizer.summarize(fetched.root(), url, &detector)?;
            (summary, locator.name)
        }
        (None, Some(path)) => {
            let label = path.display().to_string();
            let summary = summarizer.summarize(path, &label, &detector)?;
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("repo").to_string();
            (summary, name)
        }
        _ => anyhow::bail!("a repository URL or --path is required"),
    };

    fs::create_dir_all(&merged.output_dir).with_context(|| {
        format!("failed to create output directory {}", merged.output_dir.display())
    })?;

    let output_path =
        merged.output_dir.join(output_file_name(&repo_name, Utc::now().timestamp_millis()));
    fs::write(&output_path, &summary.content)
        .with_context(|| format!("failed to write summary to {}", output_path.display()))?;

    println!("{}", summary.content);
    println!("Repository summary saved to: {}", output_path.display());
    print_stats(&summary);

    Ok(())
}

fn print_stats(summary: &Summary) {
    println!();
    println!("{}", style("Summary complete!").green());
    println!();
    println!("Statistics:");
    println!("  Repository:      {}", summary.label);
    println!("  Files included:  {}", summary.stats.files_included);

    let any_skipped =
        summary.stats.files_skipped_binary > 0 || summary.stats.files_skipped_error > 0;
    if any_skipped {
        println!("  Files skipped:");
        if summary.stats.files_skipped_binary > 0 {
            println!("    binary:  {}", summary.stats.files_skipped_binary);
        }
        if summary.stats.files_skipped_error > 0 {
            println!("    error:   {}", summary.stats.files_skipped_error);
        }
    }
    if summary.stats.dirs_pruned > 0 {
        println!("  Directories pruned: {}", summary.stats.dirs_pruned);
    }
    println!("  Characters used: {}", summary.char_count);
    if summary.stats.truncated {
        println!("  Content truncated at the character limit");
    }
}

fn output_file_name(repo_name: &str, timestamp_millis: i64) -> String {
    format!("{repo_name}_{timestamp_millis}.txt")
}
