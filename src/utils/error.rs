//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::reader::EdgeKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding a trace file
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Cannot open trace file {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported trace format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid function number {function_nr} (file has {function_count} functions)")]
    InvalidFunctionNumber {
        function_nr: usize,
        function_count: usize,
    },

    #[error(
        "Invalid {kind} edge index {edge_index} for function {function_nr} ({edge_count} edges)"
    )]
    InvalidEdgeIndex {
        kind: EdgeKind,
        function_nr: usize,
        edge_index: usize,
        edge_count: usize,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
