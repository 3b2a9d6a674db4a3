//! Whole-file operations built on the random-access reader.
//!
//! Hot functions are the first place to look when optimizing; validation
//! walks every record to catch corrupt or mismatched trace files early.

pub mod ranking;
pub mod report;
pub mod validate;

// Re-export main functions
pub use ranking::{top_functions, RankedFunction, SortKey};
pub use report::{build_report, TraceReport};
pub use validate::{validate_trace, DanglingEdge, ValidationReport};
