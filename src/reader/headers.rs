//! Trailing `key: value` header block.
//!
//! A trace file may merge several profiling runs. Each run contributes a
//! `summary` line; those are summed and counted rather than overwritten.

use super::source::TraceSource;
use crate::utils::config::{HEADER_SEPARATOR, RUNS_HEADER, SUMMARY_HEADER};
use crate::utils::error::TraceError;
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{Read, Seek};

/// Aggregated header values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderSet {
    entries: BTreeMap<String, String>,
    summary: u64,
    runs: u32,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a header set from raw header lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut headers = Self::new();
        for line in lines {
            headers.push_line(line.as_ref());
        }
        headers
    }

    /// Parse one `key: value` line into the set
    ///
    /// Blank lines are ignored; lines without a separator are skipped.
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        match line.split_once(HEADER_SEPARATOR) {
            Some((key, value)) => self.insert(key, value),
            None => warn!("Skipping malformed header line: {:?}", line),
        }
    }

    /// Insert a header value
    ///
    /// `summary` values accumulate and bump the run counter; every other
    /// key keeps the last value written.
    pub fn insert(&mut self, key: &str, value: &str) {
        if key != SUMMARY_HEADER {
            self.entries.insert(key.to_string(), value.to_string());
            return;
        }

        let amount = value.trim().parse::<u64>().unwrap_or_else(|e| {
            warn!("Non-numeric summary header {:?}, counting as 0: {}", value, e);
            0
        });

        self.runs += 1;
        self.summary = self.summary.saturating_add(amount);
        self.entries
            .insert(SUMMARY_HEADER.to_string(), self.summary.to_string());
        self.entries
            .insert(RUNS_HEADER.to_string(), self.runs.to_string());
    }

    /// Value for `name`, or an empty string when absent
    pub fn get(&self, name: &str) -> &str {
        self.entries.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Aggregated `summary` total across all runs (0 when absent)
    pub fn summary(&self) -> u64 {
        self.summary
    }

    /// Number of `summary` entries merged
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read the header block starting at `header_offset` through end of file
pub fn read_headers<R: Read + Seek>(
    source: &mut TraceSource<R>,
    header_offset: u64,
) -> Result<HeaderSet, TraceError> {
    debug!("Reading header block at offset {}", header_offset);
    source.seek_to(header_offset)?;

    let mut headers = HeaderSet::new();
    while let Some(line) = source.read_line()? {
        headers.push_line(&line);
    }

    debug!(
        "Parsed {} headers ({} runs, summary {})",
        headers.len(),
        headers.runs(),
        headers.summary()
    );

    Ok(headers)
}
