//! Print file-level information: format version, function count, headers.

use crate::format::CostUnit;
use crate::reader::TraceReader;
use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

/// Execute the info command
pub fn execute_info(path: &Path) -> Result<()> {
    let mut reader = TraceReader::open(path, CostUnit::Usec)
        .with_context(|| format!("Failed to open trace file {}", path.display()))?;

    println!("Trace file: {}", path.display());
    println!("  Format version: {}", reader.version());
    println!("  Functions:      {}", reader.function_count());

    let headers = reader.headers().context("Failed to read header block")?;
    debug!("{} header entries", headers.len());

    println!("  Runs:           {}", headers.runs());
    println!("  Total cost:     {} us", headers.summary());
    println!();
    println!("Headers:");
    for (key, value) in headers.iter() {
        println!("  {}: {}", key, value);
    }

    Ok(())
}
