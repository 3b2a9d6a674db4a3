//! List the most expensive functions.

use crate::analysis::{build_report, SortKey};
use crate::format::CostUnit;
use crate::output::write_report;
use crate::reader::TraceReader;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the top command
#[derive(Debug, Clone)]
pub struct TopArgs {
    pub trace: PathBuf,
    pub limit: usize,
    pub sort: SortKey,
    pub unit: CostUnit,
    pub output: Option<PathBuf>,
}

/// Execute the top command
pub fn execute_top(args: TopArgs) -> Result<()> {
    let start_time = Instant::now();

    if args.limit == 0 {
        anyhow::bail!("limit must be greater than 0");
    }

    let mut reader = TraceReader::open(&args.trace, args.unit)
        .with_context(|| format!("Failed to open trace file {}", args.trace.display()))?;

    info!(
        "Ranking {} functions by {:?}...",
        reader.function_count(),
        args.sort
    );
    let report = build_report(&mut reader, args.sort, args.limit)
        .context("Failed to build function ranking")?;

    println!(
        "{:>4}  {:<7} {:>14} {:>14} {:>8}  {}",
        "rank", "nr", "self", "inclusive", "calls", "function"
    );
    for (rank, function) in report.functions.iter().enumerate() {
        let record = &function.record;
        println!(
            "{:>4}  #{:<6} {:>14} {:>14} {:>8}  {} ({}:{})",
            rank + 1,
            function.function_nr,
            record.summed_self_cost.to_string(),
            record.summed_inclusive_cost.to_string(),
            record.invocation_count,
            record.function_name,
            record.file,
            record.line
        );
    }

    if let Some(path) = &args.output {
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    info!("Ranking completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}
