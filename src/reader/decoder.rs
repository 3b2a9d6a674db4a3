//! Consumer-facing trace decoder.
//!
//! A `TraceReader` owns one file handle, the offset index, and a lazily
//! built header cache. Every query seeks to what it needs and decodes only
//! that; nothing else is retained between calls.

use super::edge::{read_call_edge, read_call_edges, CallEdge, EdgeKind};
use super::headers::{read_headers, HeaderSet};
use super::index::TraceIndex;
use super::record::{read_function_record, FunctionRecord};
use super::source::TraceSource;
use crate::format::{format_cost, CostUnit, FormattedCost};
use crate::utils::error::TraceError;
use log::info;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

/// Random-access reader over one trace file
pub struct TraceReader<R = File> {
    source: TraceSource<R>,
    index: TraceIndex,
    unit: CostUnit,
    headers: Option<HeaderSet>,
}

impl TraceReader<File> {
    /// Open a trace file and read its index
    ///
    /// **Public** - main entry point for consumers
    ///
    /// # Arguments
    /// * `path` - Trace file produced by the preprocessor
    /// * `unit` - Display unit for every cost this reader returns
    ///
    /// # Errors
    /// * `TraceError::FileOpen` - Path cannot be opened
    /// * `TraceError::UnsupportedVersion` - Not a version 7 trace
    /// * `TraceError::Io` - Prologue or offset table truncated
    pub fn open(path: impl AsRef<Path>, unit: CostUnit) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let reader = Self::with_source(TraceSource::open(path)?, unit)?;
        info!(
            "Opened trace {} ({} functions)",
            path.display(),
            reader.function_count()
        );
        Ok(reader)
    }
}

impl<R: Read + Seek> TraceReader<R> {
    /// Build a reader over any seekable byte stream
    pub fn from_reader(reader: R, unit: CostUnit) -> Result<Self, TraceError> {
        Self::with_source(TraceSource::new(reader), unit)
    }

    fn with_source(mut source: TraceSource<R>, unit: CostUnit) -> Result<Self, TraceError> {
        let index = TraceIndex::read(&mut source)?;
        Ok(Self {
            source,
            index,
            unit,
            headers: None,
        })
    }

    pub fn version(&self) -> u32 {
        self.index.version()
    }

    pub fn function_count(&self) -> usize {
        self.index.function_count()
    }

    pub fn cost_unit(&self) -> CostUnit {
        self.unit
    }

    /// Decode a function with raw microsecond costs
    pub fn function_record(&mut self, function_nr: usize) -> Result<FunctionRecord<u64>, TraceError> {
        let offset = self.index.function_offset(function_nr)?;
        read_function_record(&mut self.source, offset)
    }

    /// Decode a function with costs in the reader's display unit
    ///
    /// # Errors
    /// * `TraceError::InvalidFunctionNumber` - `function_nr` not in the index
    /// * `TraceError::Io` - Record truncated or unreadable
    pub fn function_info(
        &mut self,
        function_nr: usize,
    ) -> Result<FunctionRecord<FormattedCost>, TraceError> {
        let record = self.function_record(function_nr)?;
        let (unit, total) = self.display_unit(None)?;
        Ok(record.map_costs(|cost| format_cost(cost, unit, total)))
    }

    /// Decode the `edge_index`-th incoming edge with a raw cost
    pub fn called_from_edge(
        &mut self,
        function_nr: usize,
        edge_index: usize,
    ) -> Result<CallEdge<u64>, TraceError> {
        self.edge(EdgeKind::CalledFrom, function_nr, edge_index)
    }

    /// Decode the `edge_index`-th outgoing edge with a raw cost
    pub fn sub_call_edge(
        &mut self,
        function_nr: usize,
        edge_index: usize,
    ) -> Result<CallEdge<u64>, TraceError> {
        self.edge(EdgeKind::SubCall, function_nr, edge_index)
    }

    /// Incoming edge with its cost in the display unit
    pub fn called_from_info(
        &mut self,
        function_nr: usize,
        edge_index: usize,
    ) -> Result<CallEdge<FormattedCost>, TraceError> {
        self.edge_info(EdgeKind::CalledFrom, function_nr, edge_index)
    }

    /// Outgoing edge with its cost in the display unit
    pub fn sub_call_info(
        &mut self,
        function_nr: usize,
        edge_index: usize,
    ) -> Result<CallEdge<FormattedCost>, TraceError> {
        self.edge_info(EdgeKind::SubCall, function_nr, edge_index)
    }

    /// Decode one edge of either kind with a raw cost
    ///
    /// # Errors
    /// * `TraceError::InvalidFunctionNumber` - `function_nr` not in the index
    /// * `TraceError::InvalidEdgeIndex` - `edge_index` beyond the record's count
    /// * `TraceError::Io` - Record truncated or unreadable
    pub fn edge(
        &mut self,
        kind: EdgeKind,
        function_nr: usize,
        edge_index: usize,
    ) -> Result<CallEdge<u64>, TraceError> {
        let offset = self.index.function_offset(function_nr)?;
        read_call_edge(&mut self.source, offset, function_nr, kind, edge_index)
    }

    /// Decode every edge of `kind` for a function, raw costs
    pub fn edges(
        &mut self,
        kind: EdgeKind,
        function_nr: usize,
    ) -> Result<Vec<CallEdge<u64>>, TraceError> {
        let offset = self.index.function_offset(function_nr)?;
        read_call_edges(&mut self.source, offset, kind)
    }

    fn edge_info(
        &mut self,
        kind: EdgeKind,
        function_nr: usize,
        edge_index: usize,
    ) -> Result<CallEdge<FormattedCost>, TraceError> {
        let edge = self.edge(kind, function_nr, edge_index)?;
        let (unit, total) = self.display_unit(None)?;
        Ok(edge.map_cost(|cost| format_cost(cost, unit, total)))
    }

    /// Header block, parsed on first access and cached afterwards
    pub fn headers(&mut self) -> Result<&HeaderSet, TraceError> {
        let headers = match self.headers.take() {
            Some(headers) => headers,
            None => read_headers(&mut self.source, self.index.header_offset())?,
        };
        Ok(self.headers.insert(headers))
    }

    /// Value of one header, empty when the file does not carry it
    pub fn header(&mut self, name: &str) -> Result<&str, TraceError> {
        Ok(self.headers()?.get(name))
    }

    /// Render a raw cost in `unit`, or in the reader's unit when `None`
    ///
    /// Only percentages touch the file, to load the `summary` total.
    pub fn format_cost(
        &mut self,
        raw_cost: u64,
        unit: Option<CostUnit>,
    ) -> Result<FormattedCost, TraceError> {
        let (unit, total) = self.display_unit(unit)?;
        Ok(format_cost(raw_cost, unit, total))
    }

    fn display_unit(&mut self, unit: Option<CostUnit>) -> Result<(CostUnit, u64), TraceError> {
        let unit = unit.unwrap_or(self.unit);
        let total = if unit.needs_total() {
            self.headers()?.summary()
        } else {
            0
        };
        Ok((unit, total))
    }
}
