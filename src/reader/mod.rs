//! Random-access decoding of preprocessed call-trace files.
//!
//! This module handles:
//! - Buffered seeks and fixed-width integer reads
//! - The prologue and function offset index
//! - Function records and their call edges
//! - The trailing header block

pub mod decoder;
pub mod edge;
pub mod headers;
pub mod index;
pub mod layout;
pub mod record;
pub mod source;

// Re-export main types
pub use decoder::TraceReader;
pub use edge::{CallEdge, EdgeCounts, EdgeKind};
pub use headers::HeaderSet;
pub use index::TraceIndex;
pub use record::FunctionRecord;
pub use source::TraceSource;
