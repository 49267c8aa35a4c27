//! Dataset and result types shared by the grouped and ungrouped engines.

use serde_derive::{Deserialize, Serialize};

/// One class interval `[lower, upper)` of a grouped frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupedInterval {
    /// Lower class limit (inclusive).
    pub lower: f64,
    /// Upper class limit (exclusive).
    pub upper: f64,
    /// Number of observations falling in this class.
    pub frequency: f64,
}

impl GroupedInterval {
    pub fn new(lower: f64, upper: f64, frequency: f64) -> Self {
        Self {
            lower,
            upper,
            frequency,
        }
    }

    /// Representative value of the class: `(lower + upper) / 2`.
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Class width `upper - lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Display label used as the row key in breakdowns: `"lower-upper"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.lower, self.upper)
    }
}

/// One distinct value and its occurrence count in an ungrouped table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UngroupedObservation {
    /// The observed value.
    pub value: f64,
    /// How many times the value occurs.
    pub frequency: f64,
}

impl UngroupedObservation {
    pub fn new(value: f64, frequency: f64) -> Self {
        Self { value, frequency }
    }
}

/// A full dataset with its explicit mode discriminator.
///
/// The discriminator is always supplied by the caller, never inferred from
/// row shape. On the wire this serializes as
/// `{ "mode": "grouped", "rows": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "rows", rename_all = "snake_case")]
pub enum Distribution {
    /// Class-interval data: sequence of `{lower, upper, frequency}`.
    Grouped(Vec<GroupedInterval>),
    /// Value/frequency data: sequence of `{value, frequency}`.
    Ungrouped(Vec<UngroupedObservation>),
}

impl Distribution {
    /// Number of input rows (classes or distinct values).
    pub fn len(&self) -> usize {
        match self {
            Distribution::Grouped(rows) => rows.len(),
            Distribution::Ungrouped(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mode tag as it appears on the wire.
    pub fn mode_tag(&self) -> &'static str {
        match self {
            Distribution::Grouped(_) => "grouped",
            Distribution::Ungrouped(_) => "ungrouped",
        }
    }
}

/// The five descriptive statistics produced by one engine run.
///
/// A `None` field means "not computable": the governing formula's
/// precondition failed (zero modal denominator, multi-modal tie, empty
/// input, ...). Mean/variance/std-dev use population semantics, with the
/// total frequency as denominator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsResult {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub mode: Option<f64>,
    pub variance: Option<f64>,
    pub std_dev: Option<f64>,
}

impl StatsResult {
    /// All statistics undefined. Returned whenever the validity gate fails.
    pub fn undefined() -> Self {
        Self::default()
    }

    /// True when every statistic is undefined.
    pub fn is_undefined(&self) -> bool {
        self.mean.is_none()
            && self.median.is_none()
            && self.mode.is_none()
            && self.variance.is_none()
            && self.std_dev.is_none()
    }
}
