//! Print one function with its callers and callees.

use crate::format::{CostUnit, FormattedCost};
use crate::output::write_json;
use crate::reader::{CallEdge, FunctionRecord, TraceReader};
use crate::utils::error::TraceError;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{Read, Seek};
use std::path::PathBuf;

/// Arguments for the function command
#[derive(Debug, Clone)]
pub struct FunctionArgs {
    pub trace: PathBuf,
    pub function_nr: usize,
    pub unit: CostUnit,
    pub json: bool,
}

/// A function together with both edge lists
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDetail {
    pub function_nr: usize,

    #[serde(flatten)]
    pub record: FunctionRecord<FormattedCost>,

    pub called_from: Vec<CallEdge<FormattedCost>>,
    pub sub_calls: Vec<CallEdge<FormattedCost>>,
}

/// Execute the function command
pub fn execute_function(args: FunctionArgs) -> Result<()> {
    let mut reader = TraceReader::open(&args.trace, args.unit)
        .with_context(|| format!("Failed to open trace file {}", args.trace.display()))?;

    let detail = load_function_detail(&mut reader, args.function_nr)
        .with_context(|| format!("Failed to decode function {}", args.function_nr))?;

    if args.json {
        write_json(&detail, std::io::stdout().lock())?;
        return Ok(());
    }

    let record = &detail.record;
    println!("#{} {}", detail.function_nr, record.function_name);
    println!("  File:        {}:{}", record.file, record.line);
    println!("  Invocations: {}", record.invocation_count);
    println!("  Self:        {}", record.summed_self_cost);
    println!("  Inclusive:   {}", record.summed_inclusive_cost);

    print_edges(&mut reader, "Called from", &detail.called_from)?;
    print_edges(&mut reader, "Calls", &detail.sub_calls)?;

    Ok(())
}

/// Decode a function and every edge it stores, costs in the reader's unit
pub fn load_function_detail<R: Read + Seek>(
    reader: &mut TraceReader<R>,
    function_nr: usize,
) -> Result<FunctionDetail> {
    let record = reader.function_info(function_nr)?;

    let called_from = (0..record.called_from_count as usize)
        .map(|i| reader.called_from_info(function_nr, i))
        .collect::<Result<Vec<_>, _>>()?;
    let sub_calls = (0..record.sub_call_count as usize)
        .map(|i| reader.sub_call_info(function_nr, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FunctionDetail {
        function_nr,
        record,
        called_from,
        sub_calls,
    })
}

fn print_edges<R: Read + Seek>(
    reader: &mut TraceReader<R>,
    title: &str,
    edges: &[CallEdge<FormattedCost>],
) -> Result<()> {
    println!();
    println!("{} ({}):", title, edges.len());
    for edge in edges {
        let name = edge_target_name(reader, edge.function_nr)
            .with_context(|| format!("Failed to decode edge target {}", edge.function_nr))?;
        println!(
            "  #{:<6} {:<40} line {:<6} {:>6} calls  {}",
            edge.function_nr, name, edge.line, edge.call_count, edge.summed_cost
        );
    }
    Ok(())
}

/// Name of the function on the far end of an edge
///
/// A target outside the function table is shown as a placeholder; any other
/// decode failure is returned.
fn edge_target_name<R: Read + Seek>(
    reader: &mut TraceReader<R>,
    target: u32,
) -> Result<String, TraceError> {
    match reader.function_record(target as usize) {
        Ok(record) => Ok(record.function_name),
        Err(TraceError::InvalidFunctionNumber { .. }) => Ok(format!("<missing #{}>", target)),
        Err(e) => Err(e),
    }
}
