//! Bounded tree summarization
//!
//! Walks an already-materialized repository checkout depth-first, pre-order,
//! and concatenates file contents into one document under a fixed character
//! budget. Within each directory an entry literally named `readme.md` (any
//! case) sorts first; everything else keeps its listing order. The walk stops
//! as soon as the budget is exhausted, truncating at most the one tail file
//! that no longer fits whole.
//!
//! Recursion depth is bounded only by the call stack; pathologically deep
//! trees are not guarded against.

use crate::domain::{Summary, SummaryStats, EXCLUDED_DIRS, TRUNCATION_NOTICE};
use crate::utils::{is_binary_file, read_file_safe};
use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::fs::{self, DirEntry};
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Classifies a file as binary vs text.
///
/// Classification may itself fail (I/O error); the summarizer treats that the
/// same as a failed read and skips the file.
pub trait BinaryDetector {
    fn is_binary(&self, path: &Path) -> io::Result<bool>;
}

/// Default detector backed by content sniffing.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentDetector;

impl BinaryDetector for ContentDetector {
    fn is_binary(&self, path: &Path) -> io::Result<bool> {
        is_binary_file(path)
    }
}

/// Outcome of visiting one directory or file: either there is budget left,
/// or the walk is over for good.
enum Walk {
    Continue,
    Exhausted,
}

/// Running output state: the document so far and the characters counted
/// against the budget. The truncation notice is never counted.
struct Accumulator {
    content: String,
    char_count: usize,
}

pub struct Summarizer {
    max_characters: usize,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(crate::domain::MAX_CHARACTERS)
    }
}

impl Summarizer {
    pub fn new(max_characters: usize) -> Self {
        Self { max_characters }
    }

    /// Produce the bounded summary document for the tree rooted at `root`.
    ///
    /// `label` only names the document; it is not interpreted.
    pub fn summarize(
        &self,
        root: &Path,
        label: &str,
        detector: &dyn BinaryDetector,
    ) -> Result<Summary> {
        let preamble = format!("Repository: {label}\n\n");
        let mut acc = Accumulator { char_count: preamble.chars().count(), content: preamble };
        let mut stats = SummaryStats::default();

        self.walk_directory(root, "", &mut acc, &mut stats, detector)?;

        Ok(Summary {
            label: label.to_string(),
            content: acc.content,
            char_count: acc.char_count,
            stats,
        })
    }

    fn walk_directory(
        &self,
        dir: &Path,
        relative: &str,
        acc: &mut Accumulator,
        stats: &mut SummaryStats,
        detector: &dyn BinaryDetector,
    ) -> Result<Walk> {
        let mut entries: Vec<DirEntry> = fs::read_dir(dir)
            .and_then(|iter| iter.collect::<io::Result<Vec<_>>>())
            .with_context(|| format!("failed to list directory {}", dir.display()))?;
        // Stable sort with a partial comparator: readme.md floats to the
        // front, all other entries keep their listing order.
        entries.sort_by(readme_first);

        for entry in entries {
            if acc.char_count >= self.max_characters {
                return Ok(Walk::Exhausted);
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let entry_relative = if relative.is_empty() {
                name.clone()
            } else {
                format!("{relative}/{name}")
            };
            let file_type = entry
                .file_type()
                .with_context(|| format!("failed to stat {}", entry.path().display()))?;

            if file_type.is_dir() {
                if EXCLUDED_DIRS.contains(&name.as_str()) {
                    stats.dirs_pruned += 1;
                    debug!(path = %entry_relative, "pruned excluded directory");
                    continue;
                }
                if let Walk::Exhausted =
                    self.walk_directory(&entry.path(), &entry_relative, acc, stats, detector)?
                {
                    return Ok(Walk::Exhausted);
                }
            } else if let Walk::Exhausted =
                self.append_file(&entry.path(), &entry_relative, acc, stats, detector)
            {
                return Ok(Walk::Exhausted);
            }
        }

        Ok(Walk::Continue)
    }

    /// Append one file's section to the document, truncating it when it is
    /// the first file that no longer fits whole. Read and classification
    /// failures skip the file and keep the walk going.
    fn append_file(
        &self,
        path: &Path,
        relative: &str,
        acc: &mut Accumulator,
        stats: &mut SummaryStats,
        detector: &dyn BinaryDetector,
    ) -> Walk {
        let is_binary = match detector.is_binary(path) {
            Ok(is_binary) => is_binary,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping file: classification failed");
                stats.files_skipped_error += 1;
                return Walk::Continue;
            }
        };
        if is_binary {
            stats.files_skipped_binary += 1;
            return Walk::Continue;
        }

        let (content, encoding) = match read_file_safe(path) {
            Ok(read) => read,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping file: read failed");
                stats.files_skipped_error += 1;
                return Walk::Continue;
            }
        };
        if encoding != "utf-8" {
            debug!(path = %relative, encoding, "decoded non-UTF-8 file");
        }

        let header = format!("\n--- File: {relative} ---\n\n");
        let header_chars = header.chars().count();
        let section_chars = header_chars + content.chars().count() + 2;

        if acc.char_count + section_chars <= self.max_characters {
            acc.content.push_str(&header);
            acc.content.push_str(&content);
            acc.content.push_str("\n\n");
            acc.char_count += section_chars;
            stats.files_included += 1;
            return Walk::Continue;
        }

        // The section overflows. Give the tail file whatever room is left,
        // unless even the header alone would not fit.
        let remaining = self.max_characters - acc.char_count;
        if remaining > header_chars {
            acc.content.push_str(&header);
            acc.content.push_str(truncate_chars(&content, remaining - header_chars));
            acc.content.push_str(TRUNCATION_NOTICE);
            acc.char_count = self.max_characters;
            stats.files_included += 1;
            stats.truncated = true;
        }
        Walk::Exhausted
    }
}

fn readme_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    match (is_readme(a), is_readme(b)) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn is_readme(entry: &DirEntry) -> bool {
    entry.file_name().eq_ignore_ascii_case("readme.md")
}

/// Slice to at most `max_chars` characters, on a char boundary.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
