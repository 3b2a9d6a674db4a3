//! Rank functions by cost.

use crate::reader::{FunctionRecord, TraceReader};
use crate::utils::error::TraceError;
use clap::ValueEnum;
use log::debug;
use serde::Serialize;
use std::io::{Read, Seek};

/// Which cost to rank by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Time spent in the function itself
    #[value(name = "self")]
    #[serde(rename = "self")]
    SelfCost,
    /// Time including callees
    #[default]
    Inclusive,
}

impl SortKey {
    fn cost(&self, record: &FunctionRecord<u64>) -> u64 {
        match self {
            SortKey::SelfCost => record.summed_self_cost,
            SortKey::Inclusive => record.summed_inclusive_cost,
        }
    }
}

/// A function and its position in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedFunction {
    pub function_nr: usize,
    pub record: FunctionRecord<u64>,
}

/// Decode every function and return the `limit` most expensive
///
/// **Public** - main entry point for ranking
///
/// Ties keep file order.
pub fn top_functions<R: Read + Seek>(
    reader: &mut TraceReader<R>,
    sort: SortKey,
    limit: usize,
) -> Result<Vec<RankedFunction>, TraceError> {
    let count = reader.function_count();
    debug!("Ranking {} functions by {:?}", count, sort);

    let mut ranked = Vec::with_capacity(count);
    for function_nr in 0..count {
        let record = reader.function_record(function_nr)?;
        ranked.push(RankedFunction {
            function_nr,
            record,
        });
    }

    ranked.sort_by(|a, b| sort.cost(&b.record).cmp(&sort.cost(&a.record)));
    ranked.truncate(limit);
    Ok(ranked)
}
