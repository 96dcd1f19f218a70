//! Utility functions for string formatting and matching.

pub mod format;

pub use format::{today_string, truncate};
