//! Utility functions for string formatting.

pub mod format;

pub use format::{format_count, or_dash, truncate_string};
