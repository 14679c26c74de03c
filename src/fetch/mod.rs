//! Repository fetching
//!
//! Turns a repository locator into a local checkout inside a scoped
//! temporary directory. The directory lives exactly as long as the returned
//! handle: dropping it removes the checkout on success and failure alike.

use git2::build::RepoBuilder;
use git2::{FetchOptions, RemoteCallbacks};
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use thiserror::Error;
use tracing::debug;

/// Accepted locator shapes: a GitHub URL with optional `.git` suffix or
/// trailing slash, or a bare `user/repo` slug.
static LOCATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://github\.com/)?([A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+?)(?:\.git)?/?$")
        .expect("locator pattern is valid")
});

/// Errors from locator parsing and repository materialization.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unrecognized repository locator '{0}'")]
    InvalidLocator(String),

    #[error("failed to create working directory: {0}")]
    Workspace(#[from] std::io::Error),

    #[error(transparent)]
    Git(#[from] git2::Error),
}

/// A parsed repository locator: the `user/repo` slug plus the repo name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocator {
    pub slug: String,
    pub name: String,
}

impl RepoLocator {
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        let captures = LOCATOR
            .captures(raw.trim())
            .ok_or_else(|| FetchError::InvalidLocator(raw.to_string()))?;
        let slug = captures[1].to_string();
        let name = slug.rsplit('/').next().unwrap_or(&slug).to_string();
        Ok(Self { slug, name })
    }

    pub fn clone_url(&self) -> String {
        format!("https://github.com/{}.git", self.slug)
    }
}

/// A materialized checkout, removed from disk when dropped.
pub struct FetchedRepo {
    workdir: TempDir,
}

impl FetchedRepo {
    pub fn root(&self) -> &Path {
        self.workdir.path()
    }
}

/// Clone the repository shallowly into a fresh temporary directory.
pub fn fetch_repository(
    locator: &RepoLocator,
    ref_: Option<&str>,
) -> Result<FetchedRepo, FetchError> {
    let workdir = TempDir::new()?;

    let progress = ProgressBar::new_spinner();
    progress.set_style(ProgressStyle::default_spinner());
    progress.set_message(format!("Cloning {}", locator.slug));
    progress.enable_steady_tick(Duration::from_millis(100));

    let mut callbacks = RemoteCallbacks::new();
    let ticker = progress.clone();
    callbacks.transfer_progress(move |transfer| {
        ticker.set_message(format!(
            "Cloning: {}/{} objects",
            transfer.received_objects(),
            transfer.total_objects()
        ));
        true
    });

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);
    fetch_options.depth(1);

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);
    if let Some(ref_) = ref_ {
        builder.branch(ref_);
    }

    let cloned = builder.clone(&locator.clone_url(), workdir.path());
    progress.finish_and_clear();
    cloned?;

    debug!(slug = %locator.slug, path = %workdir.path().display(), "repository materialized");
    Ok(FetchedRepo { workdir })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_github_url() {
        let locator = RepoLocator::parse("https://github.com/user/repo").expect("parse");
        assert_eq!(locator.slug, "user/repo");
        assert_eq!(locator.name, "repo");
    }

    #[test]
    fn strips_git_suffix_and_trailing_slash() {
        let locator = RepoLocator::parse("https://github.com/user/repo.git").expect("parse");
        assert_eq!(locator.slug, "user/repo");

        let locator = RepoLocator::parse("https://github.com/user/repo/").expect("parse");
        assert_eq!(locator.slug, "user/repo");
    }

    #[test]
    fn accepts_bare_slug() {
        let locator = RepoLocator::parse("rust-lang/cargo").expect("parse");
        assert_eq!(locator.slug, "rust-lang/cargo");
        assert_eq!(locator.name, "cargo");
    }

    #[test]
    fn keeps_dots_and_dashes_in_repo_name() {
        let locator = RepoLocator::parse("user/my-repo.js").expect("parse");
        assert_eq!(locator.name, "my-repo.js");
    }

    #[test]
    fn rejects_unrecognized_locators() {
        for raw in ["", "just-a-name", "https://example.com/user/repo", "a/b/c"] {
            let err = RepoLocator::parse(raw).expect_err("should reject");
            assert!(matches!(err, FetchError::InvalidLocator(_)), "accepted {raw:?}");
        }
    }

    #[test]
    fn clone_url_targets_github() {
        let locator = RepoLocator::parse("user/repo").expect("parse");
        assert_eq!(locator.clone_url(), "https://github.com/user/repo.git");
    }
}
