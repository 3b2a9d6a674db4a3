//! Calltrace Studio
//!
//! Random-access decoding of preprocessed call-trace profile files.
//!
//! A trace file carries a small prologue, an index of per-function byte
//! offsets, one record per function (fixed costs, caller and callee edges,
//! file and name), and a trailing `key: value` header block. Any function
//! can be decoded with a single seek, without reading the rest of the file.
//!
//! ## Getting Started
//!
//! ```no_run
//! use calltrace_studio::format::CostUnit;
//! use calltrace_studio::reader::TraceReader;
//!
//! # fn main() -> Result<(), calltrace_studio::utils::TraceError> {
//! let mut reader = TraceReader::open("cachegrind.out.trace", CostUnit::Msec)?;
//! let entry = reader.function_info(0)?;
//! println!("{} took {}", entry.function_name, entry.summed_inclusive_cost);
//! println!("runs merged: {}", reader.header("runs")?);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod commands;
pub mod format;
pub mod output;
pub mod reader;
pub mod utils;
