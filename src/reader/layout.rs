//! Byte offset arithmetic for function records.
//!
//! Every seek target inside a function record is derived here from the
//! record's own offset and the field widths in `utils::config`.
//!
//! Record layout, in integers:
//!
//! ```text
//! [line][self][inclusive][invocations][called_from_count][sub_call_count]
//! [edge; called_from_count][edge; sub_call_count]
//! file\n
//! function\n
//! ```

use crate::utils::config::{CALLED_FROM_COUNT_INT, EDGE_INTS, FIXED_HEADER_INTS, INT_WIDTH};

/// Offset `ints` integers past `base`
pub fn int_offset(base: u64, ints: u64) -> u64 {
    base + INT_WIDTH * ints
}

/// Offset of the called-from count (followed directly by the sub-call count)
pub fn edge_counts_offset(function_offset: u64) -> u64 {
    int_offset(function_offset, CALLED_FROM_COUNT_INT)
}

/// Offset of the edge block at `slot`, counting called-from edges first
pub fn edge_offset(function_offset: u64, slot: u64) -> u64 {
    int_offset(function_offset, FIXED_HEADER_INTS + EDGE_INTS * slot)
}

/// Bytes occupied by `edge_count` edge blocks
pub fn edge_blocks_len(edge_count: u64) -> u64 {
    INT_WIDTH * EDGE_INTS * edge_count
}
