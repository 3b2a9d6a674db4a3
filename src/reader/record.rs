//! Function record decoding.

use super::layout;
use super::source::TraceSource;
use crate::utils::error::TraceError;
use log::debug;
use serde::Serialize;
use std::io::{Read, Seek};

/// One profiled function
///
/// `C` is the cost representation: raw microseconds (`u64`) straight from
/// the file, or a display cost once formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord<C = u64> {
    /// Source line the function is defined on
    pub line: u32,

    /// Time spent in the function itself
    pub summed_self_cost: C,

    /// Time spent in the function and everything it called
    pub summed_inclusive_cost: C,

    /// Number of times the function was invoked
    pub invocation_count: u32,

    /// Number of incoming call edges
    pub called_from_count: u32,

    /// Number of outgoing call edges
    pub sub_call_count: u32,

    /// Source file path
    pub file: String,

    /// Function name
    pub function_name: String,
}

impl<C> FunctionRecord<C> {
    /// Convert both cost fields, keeping everything else
    pub fn map_costs<D>(self, mut f: impl FnMut(C) -> D) -> FunctionRecord<D> {
        FunctionRecord {
            line: self.line,
            summed_self_cost: f(self.summed_self_cost),
            summed_inclusive_cost: f(self.summed_inclusive_cost),
            invocation_count: self.invocation_count,
            called_from_count: self.called_from_count,
            sub_call_count: self.sub_call_count,
            file: self.file,
            function_name: self.function_name,
        }
    }

    /// Total number of edge blocks stored in the record
    pub fn edge_count(&self) -> u64 {
        u64::from(self.called_from_count) + u64::from(self.sub_call_count)
    }
}

/// Decode the function record at `function_offset`
///
/// Edge blocks are skipped, not decoded; only the counts are kept.
///
/// # Errors
/// * `TraceError::Io` - Record truncated or unreadable
pub fn read_function_record<R: Read + Seek>(
    source: &mut TraceSource<R>,
    function_offset: u64,
) -> Result<FunctionRecord<u64>, TraceError> {
    source.seek_to(function_offset)?;
    let [line, self_cost, inclusive_cost, invocation_count, called_from_count, sub_call_count] =
        source.read_ints::<6>()?;

    let edges = u64::from(called_from_count) + u64::from(sub_call_count);
    let skip = i64::try_from(layout::edge_blocks_len(edges)).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("edge block region too large ({} edges)", edges),
        )
    })?;
    source.skip(skip)?;

    let file = source.read_required_line("function file")?;
    let function_name = source.read_required_line("function name")?;

    debug!(
        "Decoded function '{}' at offset {} ({} callers, {} callees)",
        function_name, function_offset, called_from_count, sub_call_count
    );

    Ok(FunctionRecord {
        line,
        summed_self_cost: u64::from(self_cost),
        summed_inclusive_cost: u64::from(inclusive_cost),
        invocation_count,
        called_from_count,
        sub_call_count,
        file,
        function_name,
    })
}
