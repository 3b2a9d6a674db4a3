//! Decode every record in a trace file and report inconsistencies.

use crate::analysis::validate_trace;
use crate::format::CostUnit;
use crate::reader::TraceReader;
use anyhow::{Context, Result};
use std::path::Path;

/// Execute the validate command
///
/// Fails when any record cannot be decoded or any edge dangles.
pub fn execute_validate(path: &Path) -> Result<()> {
    println!("Validating trace: {}", path.display());

    let mut reader = TraceReader::open(path, CostUnit::Usec)
        .with_context(|| format!("Failed to open trace file {}", path.display()))?;
    let report = validate_trace(&mut reader).context("Trace file is corrupt")?;

    println!("  Functions:          {}", report.function_count);
    println!("  Called-from edges:  {}", report.called_from_edges);
    println!("  Sub-call edges:     {}", report.sub_call_edges);

    if !report.is_valid() {
        for edge in &report.dangling {
            println!(
                "  ✗ function {} {} edge {} -> missing function {}",
                edge.function_nr, edge.kind, edge.edge_index, edge.target
            );
        }
        anyhow::bail!("{} dangling call edges", report.dangling.len());
    }

    println!("✓ Valid trace file");
    Ok(())
}
