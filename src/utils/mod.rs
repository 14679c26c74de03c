//! Utility functions

pub mod encoding;

pub use encoding::{is_binary_file, read_file_safe};
