//! Serializable summary of a trace file.

use super::ranking::{top_functions, SortKey};
use crate::format::{format_cost, CostUnit, FormattedCost};
use crate::reader::{FunctionRecord, TraceReader};
use crate::utils::config::REPORT_VERSION;
use crate::utils::error::TraceError;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{Read, Seek};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize)]
pub struct TraceReport {
    /// Report schema version
    pub version: String,

    /// Trace file format version
    pub format_version: u32,

    /// Number of functions in the trace
    pub function_count: usize,

    /// Number of merged profiling runs
    pub runs: u32,

    /// Unit every cost in this report is expressed in
    pub cost_unit: CostUnit,

    /// Ranking used for `functions`
    pub sort: SortKey,

    /// Header block contents
    pub headers: BTreeMap<String, String>,

    /// Most expensive functions
    pub functions: Vec<ReportedFunction>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// One ranked function in a report
#[derive(Debug, Clone, Serialize)]
pub struct ReportedFunction {
    pub function_nr: usize,

    #[serde(flatten)]
    pub record: FunctionRecord<FormattedCost>,
}

/// Build a report of the `limit` most expensive functions
pub fn build_report<R: Read + Seek>(
    reader: &mut TraceReader<R>,
    sort: SortKey,
    limit: usize,
) -> Result<TraceReport, TraceError> {
    let unit = reader.cost_unit();
    let ranked = top_functions(reader, sort, limit)?;

    let header_set = reader.headers()?;
    let total = header_set.summary();
    let runs = header_set.runs();
    let headers = header_set
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let functions = ranked
        .into_iter()
        .map(|ranked| ReportedFunction {
            function_nr: ranked.function_nr,
            record: ranked.record.map_costs(|cost| format_cost(cost, unit, total)),
        })
        .collect();

    Ok(TraceReport {
        version: REPORT_VERSION.to_string(),
        format_version: reader.version(),
        function_count: reader.function_count(),
        runs,
        cost_unit: unit,
        sort,
        headers,
        functions,
        generated_at: Utc::now().to_rfc3339(),
    })
}
