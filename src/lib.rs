//! Gitload: condense a repository into a single bounded summary document
//!
//! This library fetches a repository, walks its file tree, and concatenates
//! the textual contents of its files into one document whose size stays under
//! a fixed character budget.

pub mod cli;
pub mod config;
pub mod domain;
pub mod fetch;
pub mod summarize;
pub mod utils;
