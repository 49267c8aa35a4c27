//! Intermediate computation artifacts exposed for pedagogical display.
//!
//! Every engine run records, per class or per distinct value, the numbers a
//! textbook derivation would write down: midpoints, weighted values,
//! cumulative frequencies and squared deviations. The rows keep the sorted
//! order of the working copy, so a caller can render them directly.

use derive_getters::Getters;
use serde_derive::{Deserialize, Serialize};

use crate::error::DataStatus;

/// Per-class derivation record of a grouped run, keyed by `"lower-upper"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedRow {
    /// Class label `"lower-upper"`.
    pub class: String,
    /// Class midpoint `(lower + upper) / 2`.
    pub midpoint: f64,
    /// Weighted value `frequency * midpoint`.
    pub fx: f64,
    /// Running total of frequencies up to and including this class.
    pub cumulative: f64,
    /// `(midpoint - mean)^2`; only present when the mean is defined.
    pub deviation_sq: Option<f64>,
    /// `frequency * (midpoint - mean)^2`; only present when the mean is defined.
    pub f_deviation_sq: Option<f64>,
}

/// Per-value derivation record of an ungrouped run, keyed by the value.
///
/// One row per distinct input value, not per expanded element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UngroupedRow {
    pub value: f64,
    pub frequency: f64,
    /// Sum of frequencies of all values `<=` this one in sorted order.
    pub cumulative: f64,
    /// `value - mean`; only present when the mean is defined.
    pub deviation: Option<f64>,
    /// `(value - mean)^2`; only present when the mean is defined.
    pub deviation_sq: Option<f64>,
}

/// Ordered breakdown of a grouped computation.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GroupedBreakdown {
    status: DataStatus,
    rows: Vec<GroupedRow>,
}

impl GroupedBreakdown {
    pub(crate) fn new(status: DataStatus, rows: Vec<GroupedRow>) -> Self {
        Self { status, rows }
    }

    /// Breakdown with no rows, carrying only a validity marker.
    pub(crate) fn bare(status: DataStatus) -> Self {
        Self::new(status, Vec::new())
    }
}

/// Ordered breakdown of an ungrouped computation.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct UngroupedBreakdown {
    status: DataStatus,
    rows: Vec<UngroupedRow>,
}

impl UngroupedBreakdown {
    pub(crate) fn new(status: DataStatus, rows: Vec<UngroupedRow>) -> Self {
        Self { status, rows }
    }

    pub(crate) fn bare(status: DataStatus) -> Self {
        Self::new(status, Vec::new())
    }
}

/// Breakdown of either engine, for callers that dispatch on [`crate::Distribution`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Breakdown {
    Grouped(GroupedBreakdown),
    Ungrouped(UngroupedBreakdown),
}

impl Breakdown {
    pub fn status(&self) -> &DataStatus {
        match self {
            Breakdown::Grouped(b) => b.status(),
            Breakdown::Ungrouped(b) => b.status(),
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            Breakdown::Grouped(b) => b.rows().len(),
            Breakdown::Ungrouped(b) => b.rows().len(),
        }
    }
}
