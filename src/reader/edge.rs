//! Call edge decoding.
//!
//! Called-from and sub-call edges share one block shape; they differ only in
//! which slot of the function record they occupy. Called-from edges fill the
//! first `called_from_count` slots, sub-call edges the ones after.

use super::layout;
use super::source::TraceSource;
use crate::utils::error::TraceError;
use log::debug;
use serde::Serialize;
use std::fmt;
use std::io::{Read, Seek};

/// Direction of a call edge relative to the function that stores it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Incoming call: `function_nr` is the caller
    CalledFrom,
    /// Outgoing call: `function_nr` is the callee
    SubCall,
}

impl EdgeKind {
    /// Number of edges of this kind in a record
    pub fn count(&self, counts: &EdgeCounts) -> u32 {
        match self {
            EdgeKind::CalledFrom => counts.called_from,
            EdgeKind::SubCall => counts.sub_calls,
        }
    }

    /// Slot of the `edge_index`-th edge of this kind among all edge blocks
    pub fn slot(&self, counts: &EdgeCounts, edge_index: u64) -> u64 {
        match self {
            EdgeKind::CalledFrom => edge_index,
            EdgeKind::SubCall => u64::from(counts.called_from) + edge_index,
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::CalledFrom => f.write_str("called-from"),
            EdgeKind::SubCall => f.write_str("sub-call"),
        }
    }
}

/// Edge counts from a function record's fixed header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeCounts {
    pub called_from: u32,
    pub sub_calls: u32,
}

/// A call between two functions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallEdge<C = u64> {
    /// The function on the other end of the edge
    pub function_nr: u32,

    /// Line of the call site
    pub line: u32,

    /// Number of calls along this edge
    pub call_count: u32,

    /// Time spent in calls along this edge
    pub summed_cost: C,
}

impl<C> CallEdge<C> {
    pub fn map_cost<D>(self, f: impl FnOnce(C) -> D) -> CallEdge<D> {
        CallEdge {
            function_nr: self.function_nr,
            line: self.line,
            call_count: self.call_count,
            summed_cost: f(self.summed_cost),
        }
    }
}

/// Read only the two edge counts of a function record
pub fn read_edge_counts<R: Read + Seek>(
    source: &mut TraceSource<R>,
    function_offset: u64,
) -> Result<EdgeCounts, TraceError> {
    source.seek_to(layout::edge_counts_offset(function_offset))?;
    let [called_from, sub_calls] = source.read_ints::<2>()?;
    Ok(EdgeCounts {
        called_from,
        sub_calls,
    })
}

/// Decode one edge of `kind` from the record at `function_offset`
///
/// # Errors
/// * `TraceError::InvalidEdgeIndex` - `edge_index` not below the record's count
/// * `TraceError::Io` - Record truncated or unreadable
pub fn read_call_edge<R: Read + Seek>(
    source: &mut TraceSource<R>,
    function_offset: u64,
    function_nr: usize,
    kind: EdgeKind,
    edge_index: usize,
) -> Result<CallEdge<u64>, TraceError> {
    let counts = read_edge_counts(source, function_offset)?;
    let edge_count = kind.count(&counts) as usize;
    if edge_index >= edge_count {
        return Err(TraceError::InvalidEdgeIndex {
            kind,
            function_nr,
            edge_index,
            edge_count,
        });
    }

    let slot = kind.slot(&counts, edge_index as u64);
    source.seek_to(layout::edge_offset(function_offset, slot))?;
    let edge = decode_edge(source)?;

    debug!(
        "Decoded {} edge {} of function {} -> {}",
        kind, edge_index, function_nr, edge.function_nr
    );

    Ok(edge)
}

/// Decode every edge of `kind` from the record at `function_offset`
pub fn read_call_edges<R: Read + Seek>(
    source: &mut TraceSource<R>,
    function_offset: u64,
    kind: EdgeKind,
) -> Result<Vec<CallEdge<u64>>, TraceError> {
    let counts = read_edge_counts(source, function_offset)?;
    let edge_count = kind.count(&counts);

    // Blocks of one kind are contiguous, so a single seek covers them all
    source.seek_to(layout::edge_offset(function_offset, kind.slot(&counts, 0)))?;
    let mut edges = Vec::with_capacity((edge_count as usize).min(1 << 12));
    for _ in 0..edge_count {
        edges.push(decode_edge(source)?);
    }
    Ok(edges)
}

/// Decode the edge block at the current position
fn decode_edge<R: Read + Seek>(source: &mut TraceSource<R>) -> Result<CallEdge<u64>, TraceError> {
    let [function_nr, line, call_count, summed_cost] = source.read_ints::<4>()?;
    Ok(CallEdge {
        function_nr,
        line,
        call_count,
        summed_cost: u64::from(summed_cost),
    })
}
