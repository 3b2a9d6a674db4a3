//! File prologue and function offset table.

use super::source::TraceSource;
use crate::utils::config::{PROLOGUE_INTS, SUPPORTED_VERSION};
use crate::utils::error::TraceError;
use log::debug;
use std::io::{Read, Seek};

/// Immutable index built once when a trace file is opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceIndex {
    version: u32,
    header_offset: u64,
    function_offsets: Vec<u64>,
}

impl TraceIndex {
    /// Read the prologue and offset table from the start of the file
    ///
    /// # Errors
    /// * `TraceError::UnsupportedVersion` - Prologue version is not 7
    /// * `TraceError::Io` - File shorter than the declared table
    pub fn read<R: Read + Seek>(source: &mut TraceSource<R>) -> Result<Self, TraceError> {
        source.seek_to(0)?;
        let [version, header_offset, function_count] = source.read_ints::<PROLOGUE_INTS>()?;

        if version != SUPPORTED_VERSION {
            return Err(TraceError::UnsupportedVersion {
                found: version,
                expected: SUPPORTED_VERSION,
            });
        }

        let function_offsets = source
            .read_int_vec(function_count as usize)?
            .into_iter()
            .map(u64::from)
            .collect::<Vec<_>>();

        debug!(
            "Trace index: version {}, {} functions, headers at {}",
            version,
            function_offsets.len(),
            header_offset
        );

        Ok(Self {
            version,
            header_offset: u64::from(header_offset),
            function_offsets,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn header_offset(&self) -> u64 {
        self.header_offset
    }

    pub fn function_count(&self) -> usize {
        self.function_offsets.len()
    }

    /// Byte offset of a function's record
    ///
    /// # Errors
    /// * `TraceError::InvalidFunctionNumber` - `function_nr` outside the table
    pub fn function_offset(&self, function_nr: usize) -> Result<u64, TraceError> {
        self.function_offsets
            .get(function_nr)
            .copied()
            .ok_or(TraceError::InvalidFunctionNumber {
                function_nr,
                function_count: self.function_offsets.len(),
            })
    }
}
