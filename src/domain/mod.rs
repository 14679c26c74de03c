//! Core domain types and models

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Total character budget for one summary document.
pub const MAX_CHARACTERS: usize = 150_000;

/// Directory names never descended into (case-sensitive).
pub const EXCLUDED_DIRS: &[&str] = &[".git", "node_modules"];

/// Appended after a truncated tail file. Not counted against the budget.
pub const TRUNCATION_NOTICE: &str = "\n\n--- Content truncated due to character limit ---";

/// Main configuration for gitload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the summary file is written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Character budget for the whole document, fixed for the run
    #[serde(default = "default_max_characters")]
    pub max_characters: usize,

    /// Git ref (branch/tag) to fetch
    #[serde(default, alias = "ref")]
    pub ref_: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            max_characters: default_max_characters(),
            ref_: None,
        }
    }
}

// Default value functions for serde
fn default_output_dir() -> PathBuf {
    PathBuf::from("repos")
}

fn default_max_characters() -> usize {
    MAX_CHARACTERS
}

/// Statistics from one summarization run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Files whose full section made it into the document
    pub files_included: usize,

    /// Files skipped due to binary detection
    #[serde(default)]
    pub files_skipped_binary: usize,

    /// Files skipped due to a read or classification error
    #[serde(default)]
    pub files_skipped_error: usize,

    /// Directories pruned by the fixed exclusion set
    #[serde(default)]
    pub dirs_pruned: usize,

    /// Whether the document ends in a truncated file
    #[serde(default)]
    pub truncated: bool,
}

/// The assembled summary document plus its accounting
#[derive(Debug, Clone)]
pub struct Summary {
    /// Label the document was generated for (URL or local path)
    pub label: String,

    /// The full document text
    pub content: String,

    /// Characters counted against the budget. The raw document can exceed
    /// this by the truncation notice, which is uncounted.
    pub char_count: usize,

    /// Run statistics
    pub stats: SummaryStats,
}
