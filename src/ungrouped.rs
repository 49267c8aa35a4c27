//! Descriptive statistics over ungrouped (value/frequency) tables.
//!
//! Semantics follow the expanded multiset in which each value appears
//! `frequency` times. The implementation never materializes that multiset:
//! mean and variance use the weighted closed forms and the median walks
//! cumulative frequencies to locate order statistics, which is numerically
//! identical to expanding.

use derive_getters::Getters;
use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::breakdown::{UngroupedBreakdown, UngroupedRow};
use crate::error::{DataStatus, ValidationError};
use crate::types::{StatsResult, UngroupedObservation};

/// Results plus the per-value derivation of one ungrouped run.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct UngroupedComputation {
    results: StatsResult,
    breakdown: UngroupedBreakdown,
}

impl UngroupedComputation {
    fn rejected(status: DataStatus) -> Self {
        Self {
            results: StatsResult::undefined(),
            breakdown: UngroupedBreakdown::bare(status),
        }
    }

    pub fn into_parts(self) -> (StatsResult, UngroupedBreakdown) {
        (self.results, self.breakdown)
    }
}

/// Reject malformed observation tables before any computation.
pub fn validate_ungrouped(observations: &[UngroupedObservation]) -> Result<(), ValidationError> {
    if observations.is_empty() {
        return Err(ValidationError::EmptyDataset);
    }
    for (row, obs) in observations.iter().enumerate() {
        if !obs.value.is_finite() {
            return Err(ValidationError::NonFiniteNumber { row, field: "value" });
        }
        if !obs.frequency.is_finite() {
            return Err(ValidationError::NonFiniteNumber {
                row,
                field: "frequency",
            });
        }
        if obs.frequency < 0.0 {
            return Err(ValidationError::NegativeFrequency {
                row,
                frequency: obs.frequency,
            });
        }
        if obs.value < 0.0 {
            return Err(ValidationError::NegativeValue {
                row,
                value: obs.value,
            });
        }
    }
    Ok(())
}

/// Compute ungrouped statistics and their breakdown.
///
/// The caller's slice is never reordered; the breakdown keeps one row per
/// distinct input value, in ascending value order.
pub fn compute_ungrouped(observations: &[UngroupedObservation]) -> UngroupedComputation {
    if let Err(err) = validate_ungrouped(observations) {
        debug!("ungrouped dataset rejected: {err}");
        return UngroupedComputation::rejected(DataStatus::invalid(&err));
    }

    let mut data = observations.to_vec();
    data.sort_by(|a, b| a.value.total_cmp(&b.value));

    let total: f64 = data.iter().map(|o| o.frequency).sum();
    if total == 0.0 {
        debug!("ungrouped dataset has zero total frequency");
        return UngroupedComputation::rejected(DataStatus::Empty);
    }

    let sum_fx: f64 = data.iter().map(|o| o.value * o.frequency).sum();
    let mean = sum_fx / total;

    let median = multiset_median(&data, total);
    let mode = unique_mode(&data);

    // One breakdown row per distinct value; population variance in the
    // same pass.
    let mut rows = Vec::with_capacity(data.len());
    let mut cumulative = 0.0;
    let mut sum_f_dev_sq = 0.0;
    for obs in &data {
        cumulative += obs.frequency;
        let deviation = obs.value - mean;
        let dev_sq = deviation * deviation;
        sum_f_dev_sq += obs.frequency * dev_sq;
        rows.push(UngroupedRow {
            value: obs.value,
            frequency: obs.frequency,
            cumulative,
            deviation: Some(deviation),
            deviation_sq: Some(dev_sq),
        });
    }
    let variance = sum_f_dev_sq / total;

    debug!(
        "ungrouped run: {} distinct values, n={total}, mean={mean}, median={median:?}, mode={mode:?}",
        data.len()
    );

    UngroupedComputation {
        results: StatsResult {
            mean: Some(mean),
            median,
            mode,
            variance: Some(variance),
            std_dev: Some(variance.sqrt()),
        },
        breakdown: UngroupedBreakdown::new(DataStatus::Ok, rows),
    }
}

/// Value at 1-based rank `rank` of the expanded multiset: the first value
/// (in sorted order) whose cumulative frequency reaches the rank.
fn value_at_rank(data: &[UngroupedObservation], rank: f64) -> Option<f64> {
    let mut cumulative = 0.0;
    for obs in data {
        cumulative += obs.frequency;
        if cumulative >= rank {
            return Some(obs.value);
        }
    }
    None
}

/// Order-statistic median of the expanded multiset: average of the two
/// middle elements when the total count is even, the middle element
/// otherwise.
fn multiset_median(data: &[UngroupedObservation], total: f64) -> Option<f64> {
    let is_even_count = total.fract() == 0.0 && (total as u64).is_multiple_of(2);
    if is_even_count {
        let lo = value_at_rank(data, total / 2.0)?;
        let hi = value_at_rank(data, total / 2.0 + 1.0)?;
        Some((lo + hi) / 2.0)
    } else {
        value_at_rank(data, (total + 1.0) / 2.0)
    }
}

/// The single value with the greatest occurrence count, or `None` when two
/// or more distinct values tie for the maximum (no multi-modal list).
fn unique_mode(data: &[UngroupedObservation]) -> Option<f64> {
    let mut max_freq = 0.0;
    let mut modal_value = None;
    let mut tied = false;
    for obs in data {
        if obs.frequency > max_freq {
            max_freq = obs.frequency;
            modal_value = Some(obs.value);
            tied = false;
        } else if obs.frequency == max_freq && modal_value.is_some() {
            tied = true;
        }
    }
    if tied { None } else { modal_value }
}
