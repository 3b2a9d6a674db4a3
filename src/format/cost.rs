//! Cost unit conversion.
//!
//! Raw costs are microseconds. A reader is opened with a display unit and
//! every cost it hands out passes through [`format_cost`].

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Unit a raw cost is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CostUnit {
    /// Share of the aggregated `summary` total, two decimals
    Percent,
    /// Milliseconds, rounded to the nearest whole number
    Msec,
    /// Microseconds, exactly as stored
    #[default]
    Usec,
}

impl CostUnit {
    /// Map a unit name to a unit. Unknown names fall back to microseconds.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "percent" => CostUnit::Percent,
            "msec" => CostUnit::Msec,
            _ => CostUnit::Usec,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CostUnit::Percent => "percent",
            CostUnit::Msec => "msec",
            CostUnit::Usec => "usec",
        }
    }

    /// Whether formatting in this unit needs the aggregated `summary` total
    pub fn needs_total(&self) -> bool {
        matches!(self, CostUnit::Percent)
    }
}

impl FromStr for CostUnit {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CostUnit::from_name(s))
    }
}

impl fmt::Display for CostUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cost rendered for display
///
/// Percentages keep their fixed two-decimal text form; the time units stay numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FormattedCost {
    Percent(String),
    Msec(u64),
    Usec(u64),
}

impl FormattedCost {
    /// Numeric value for the time units, `None` for percentages
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FormattedCost::Percent(_) => None,
            FormattedCost::Msec(v) | FormattedCost::Usec(v) => Some(*v),
        }
    }
}

impl fmt::Display for FormattedCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormattedCost::Percent(p) => write!(f, "{}%", p),
            FormattedCost::Msec(v) => write!(f, "{} ms", v),
            FormattedCost::Usec(v) => write!(f, "{} us", v),
        }
    }
}

/// Convert a raw microsecond cost into `unit`
///
/// **Public** - pure conversion, never fails
///
/// # Arguments
/// * `raw_cost` - Cost as stored in the trace file (microseconds)
/// * `unit` - Target display unit
/// * `total` - Aggregated `summary` header value, only used for percentages
pub fn format_cost(raw_cost: u64, unit: CostUnit, total: u64) -> FormattedCost {
    match unit {
        CostUnit::Percent => {
            // Hundredths of a percent in exact integers, round half up
            let hundredths = if total == 0 {
                0
            } else {
                let total = u128::from(total);
                (u128::from(raw_cost) * 20_000 + total) / (2 * total)
            };
            FormattedCost::Percent(format!("{}.{:02}", hundredths / 100, hundredths % 100))
        }
        // Round half up
        CostUnit::Msec => FormattedCost::Msec(raw_cost.saturating_add(500) / 1000),
        CostUnit::Usec => FormattedCost::Usec(raw_cost),
    }
}
