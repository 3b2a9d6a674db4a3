//! Display formatting for decoded costs.
//!
//! Costs are stored on disk in microseconds and only converted here,
//! at the boundary where a consumer asks for them.

pub mod cost;

// Re-export main types
pub use cost::{format_cost, CostUnit, FormattedCost};
