//! Output writers for trace reports.

pub mod json;

// Re-export main functions
pub use json::{validate_path, write_json, write_report};
