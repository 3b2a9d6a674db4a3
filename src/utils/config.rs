//! Configuration and constants for the trace decoder and CLI.

/// Trace file format version this decoder understands
pub const SUPPORTED_VERSION: u32 = 7;

/// Current JSON report schema version
pub const REPORT_VERSION: &str = "1.0.0";

// Binary layout constants
// Every integer in a trace file is an unsigned 4-byte little-endian value
pub const INT_WIDTH: u64 = 4;

/// Prologue: version, header block offset, function count
pub const PROLOGUE_INTS: usize = 3;

/// Function record header: line, self cost, inclusive cost, invocations,
/// called-from count, sub-call count
pub const FIXED_HEADER_INTS: u64 = 6;

/// Call edge block: function nr, line, call count, summed cost
pub const EDGE_INTS: u64 = 4;

/// Position of the called-from count inside the fixed header
pub const CALLED_FROM_COUNT_INT: u64 = FIXED_HEADER_INTS - 2;

// Header block keys with special handling
pub const SUMMARY_HEADER: &str = "summary";
pub const RUNS_HEADER: &str = "runs";
pub const HEADER_SEPARATOR: &str = ": ";

/// Default number of functions listed by `top`
pub const DEFAULT_TOP_FUNCTIONS: usize = 20;
