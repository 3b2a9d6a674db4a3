//! Full-file consistency check.

use crate::reader::{EdgeKind, TraceReader};
use crate::utils::error::TraceError;
use log::{debug, warn};
use serde::Serialize;
use std::io::{Read, Seek};

/// An edge whose target is not in the function table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingEdge {
    pub function_nr: usize,
    pub kind: EdgeKind,
    pub edge_index: usize,
    pub target: u32,
}

/// Outcome of [`validate_trace`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub function_count: usize,
    pub called_from_edges: u64,
    pub sub_call_edges: u64,
    pub dangling: Vec<DanglingEdge>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.dangling.is_empty()
    }
}

/// Decode every function and every edge
///
/// Decode failures abort with the underlying error; edges pointing outside
/// the function table are collected in the report.
pub fn validate_trace<R: Read + Seek>(
    reader: &mut TraceReader<R>,
) -> Result<ValidationReport, TraceError> {
    let function_count = reader.function_count();
    let mut report = ValidationReport {
        function_count,
        ..Default::default()
    };

    for function_nr in 0..function_count {
        let record = reader.function_record(function_nr)?;
        debug!("Validating function {} ({})", function_nr, record.function_name);

        for kind in [EdgeKind::CalledFrom, EdgeKind::SubCall] {
            let edges = reader.edges(kind, function_nr)?;
            match kind {
                EdgeKind::CalledFrom => report.called_from_edges += edges.len() as u64,
                EdgeKind::SubCall => report.sub_call_edges += edges.len() as u64,
            }

            for (edge_index, edge) in edges.iter().enumerate() {
                if edge.function_nr as usize >= function_count {
                    warn!(
                        "Function {} {} edge {} points at missing function {}",
                        function_nr, kind, edge_index, edge.function_nr
                    );
                    report.dangling.push(DanglingEdge {
                        function_nr,
                        kind,
                        edge_index,
                        target: edge.function_nr,
                    });
                }
            }
        }
    }

    Ok(report)
}
