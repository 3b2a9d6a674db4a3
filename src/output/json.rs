//! JSON report output writer.
//!
//! Reports go to a file (`top --output`); single function details go to
//! stdout (`function --json`). Both share one serializer that flushes
//! before returning, so a short write is reported instead of lost.

use crate::analysis::TraceReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write or flush
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &TraceReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!(
        "Writing report of {} functions ({}) to: {}",
        report.functions.len(),
        report.cost_unit,
        output_path.display()
    );

    validate_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);
    write_json(report, &mut writer)?;

    // Already flushed; sync so the size below is final
    let file = writer
        .into_inner()
        .map_err(|e| OutputError::WriteFailed(e.into_error()))?;
    file.sync_all().map_err(OutputError::WriteFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        file.metadata().map(|m| m.len()).unwrap_or(0)
    );

    Ok(())
}

/// Serialize `value` as pretty JSON plus a trailing newline, then flush
///
/// **Public** - used for `--json` output on stdout
pub fn write_json<T: Serialize, W: Write>(value: &T, mut writer: W) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut writer, value).map_err(OutputError::SerializationFailed)?;
    writer.write_all(b"\n").map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)
}

fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }

    debug!("Creating parent directories: {}", parent.display());
    std::fs::create_dir_all(parent).map_err(|e| {
        OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
    })
}

/// Validate that output path is writable
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Refuse to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
