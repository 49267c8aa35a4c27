//! Error taxonomy of the engine.
//!
//! Three outcome classes, none of which panic:
//! - [`ValidationError`] — caller-facing rejection of malformed input;
//!   computation does not proceed and no partial results are produced.
//! - Not-computable — a single statistic's formula precondition failed;
//!   modelled as `None` in [`crate::StatsResult`], non-fatal to the rest.
//! - Empty input — zero rows or zero total frequency; every statistic is
//!   undefined and the breakdown carries the [`DataStatus::Empty`] marker.

use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection reasons for malformed-but-well-typed numeric input.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("dataset has no rows")]
    EmptyDataset,
    #[error("row {row}: {field} is not a finite number")]
    NonFiniteNumber { row: usize, field: &'static str },
    #[error("row {row}: frequency {frequency} is negative")]
    NegativeFrequency { row: usize, frequency: f64 },
    #[error("row {row}: value {value} is negative")]
    NegativeValue { row: usize, value: f64 },
    #[error("row {row}: lower limit {lower} is not below upper limit {upper}")]
    InvertedInterval { row: usize, lower: f64, upper: f64 },
}

/// Validity marker carried by every breakdown.
///
/// Only an `Ok` breakdown has per-row stage data; the formatter turns the
/// other two into a single placeholder row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataStatus {
    /// Input passed the validity gate and rows were recorded.
    Ok,
    /// No rows, or the frequencies sum to zero.
    Empty,
    /// Input rejected before any computation.
    Invalid { reason: String },
}

impl DataStatus {
    pub fn invalid(err: &ValidationError) -> Self {
        DataStatus::Invalid {
            reason: err.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, DataStatus::Ok)
    }
}
