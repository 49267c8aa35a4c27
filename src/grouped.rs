//! Descriptive statistics over grouped (class-interval) frequency tables.
//!
//! The engine is a pure function of its input: it sorts a working copy by
//! lower class limit, walks it once to collect midpoints, weighted values
//! and cumulative frequencies, then derives mean, interpolated median and
//! mode, and population variance. Each derived quantity that has a
//! precondition resolves to `None` instead of failing the whole run.

use derive_getters::Getters;
use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::breakdown::{GroupedBreakdown, GroupedRow};
use crate::error::{DataStatus, ValidationError};
use crate::types::{GroupedInterval, StatsResult};

/// Results plus the per-class derivation of one grouped run.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GroupedComputation {
    results: StatsResult,
    breakdown: GroupedBreakdown,
}

impl GroupedComputation {
    fn rejected(status: DataStatus) -> Self {
        Self {
            results: StatsResult::undefined(),
            breakdown: GroupedBreakdown::bare(status),
        }
    }

    pub fn into_parts(self) -> (StatsResult, GroupedBreakdown) {
        (self.results, self.breakdown)
    }
}

/// Reject malformed interval tables before any computation.
///
/// A single bad row fails the whole dataset; no partial results.
pub fn validate_grouped(intervals: &[GroupedInterval]) -> Result<(), ValidationError> {
    if intervals.is_empty() {
        return Err(ValidationError::EmptyDataset);
    }
    for (row, iv) in intervals.iter().enumerate() {
        if !iv.lower.is_finite() {
            return Err(ValidationError::NonFiniteNumber { row, field: "lower" });
        }
        if !iv.upper.is_finite() {
            return Err(ValidationError::NonFiniteNumber { row, field: "upper" });
        }
        if !iv.frequency.is_finite() {
            return Err(ValidationError::NonFiniteNumber {
                row,
                field: "frequency",
            });
        }
        if iv.frequency < 0.0 {
            return Err(ValidationError::NegativeFrequency {
                row,
                frequency: iv.frequency,
            });
        }
        if iv.lower >= iv.upper {
            return Err(ValidationError::InvertedInterval {
                row,
                lower: iv.lower,
                upper: iv.upper,
            });
        }
    }
    Ok(())
}

/// Compute grouped statistics and their breakdown.
///
/// The caller's slice is never reordered; sorting happens on a working
/// copy, and the breakdown rows follow that sorted order.
pub fn compute_grouped(intervals: &[GroupedInterval]) -> GroupedComputation {
    if let Err(err) = validate_grouped(intervals) {
        debug!("grouped dataset rejected: {err}");
        return GroupedComputation::rejected(DataStatus::invalid(&err));
    }

    let mut data = intervals.to_vec();
    data.sort_by(|a, b| a.lower.total_cmp(&b.lower));

    let total: f64 = data.iter().map(|iv| iv.frequency).sum();
    if total == 0.0 {
        debug!("grouped dataset has zero total frequency");
        return GroupedComputation::rejected(DataStatus::Empty);
    }

    // Single pass: midpoints, f*x, cumulative frequency.
    let mut rows = Vec::with_capacity(data.len());
    let mut sum_fx = 0.0;
    let mut cumulative = 0.0;
    for iv in &data {
        let midpoint = iv.midpoint();
        let fx = iv.frequency * midpoint;
        sum_fx += fx;
        cumulative += iv.frequency;
        rows.push(GroupedRow {
            class: iv.label(),
            midpoint,
            fx,
            cumulative,
            deviation_sq: None,
            f_deviation_sq: None,
        });
    }

    let mean = sum_fx / total;
    let median = interpolated_median(&data, total);
    let mode = interpolated_mode(&data);

    // Population variance over class midpoints, recorded row by row.
    let mut sum_f_dev_sq = 0.0;
    for (row, iv) in rows.iter_mut().zip(&data) {
        let deviation = row.midpoint - mean;
        let dev_sq = deviation * deviation;
        let f_dev_sq = iv.frequency * dev_sq;
        sum_f_dev_sq += f_dev_sq;
        row.deviation_sq = Some(dev_sq);
        row.f_deviation_sq = Some(f_dev_sq);
    }
    let variance = sum_f_dev_sq / total;

    debug!(
        "grouped run: {} classes, n={total}, mean={mean}, median={median:?}, mode={mode:?}",
        data.len()
    );

    GroupedComputation {
        results: StatsResult {
            mean: Some(mean),
            median,
            mode,
            variance: Some(variance),
            std_dev: Some(variance.sqrt()),
        },
        breakdown: GroupedBreakdown::new(DataStatus::Ok, rows),
    }
}

/// Median by linear interpolation inside the median class.
///
/// The median class is the first (in sorted order) whose cumulative
/// frequency reaches `n/2`. With a positive total frequency such a class
/// always has `frequency > 0`, but the guard stays in case of float drift.
fn interpolated_median(data: &[GroupedInterval], total: f64) -> Option<f64> {
    let half = total / 2.0;
    let mut cumulative = 0.0;
    for iv in data {
        let before = cumulative;
        cumulative += iv.frequency;
        if cumulative >= half {
            if iv.frequency > 0.0 {
                return Some(iv.lower + ((half - before) / iv.frequency) * iv.width());
            }
            return None;
        }
    }
    None
}

/// Mode by interpolation around the modal class.
///
/// The modal class must be strictly greatest: the scan uses `>` starting
/// from zero, and a second class reaching the same maximum makes the mode
/// `None` (uniform or bimodal shape has no single peak). `None` also when
/// no class has positive frequency or when the interpolation denominator
/// `2*fm - f1 - f2` is not positive.
fn interpolated_mode(data: &[GroupedInterval]) -> Option<f64> {
    let mut max_freq = 0.0;
    let mut modal_idx = None;
    let mut tied = false;
    for (i, iv) in data.iter().enumerate() {
        if iv.frequency > max_freq {
            max_freq = iv.frequency;
            modal_idx = Some(i);
            tied = false;
        } else if iv.frequency == max_freq && modal_idx.is_some() {
            tied = true;
        }
    }
    if tied {
        return None;
    }

    let idx = modal_idx?;
    let modal = &data[idx];
    let f1 = if idx > 0 { data[idx - 1].frequency } else { 0.0 };
    let f2 = if idx + 1 < data.len() {
        data[idx + 1].frequency
    } else {
        0.0
    };
    let denominator = 2.0 * modal.frequency - f1 - f2;
    if denominator > 0.0 {
        Some(modal.lower + ((modal.frequency - f1) / denominator) * modal.width())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroupedInterval as Iv;

    const TOL: f64 = 1e-9;

    fn assert_close(actual: Option<f64>, expected: f64) {
        let v = actual.expect("statistic should be defined");
        assert!(
            (v - expected).abs() < TOL,
            "expected {expected}, got {v}"
        );
    }

    fn reference_dataset() -> Vec<Iv> {
        vec![
            Iv::new(0.0, 10.0, 2.0),
            Iv::new(10.0, 20.0, 5.0),
            Iv::new(20.0, 30.0, 3.0),
        ]
    }

    #[test]
    fn test_reference_dataset_statistics() {
        let comp = compute_grouped(&reference_dataset());
        let r = comp.results();
        // n = 10, mean = (2*5 + 5*15 + 3*25) / 10
        assert_close(r.mean, 16.0);
        // median class [10,20): cumulative 7 >= 5 -> 10 + ((5-2)/5)*10
        assert_close(r.median, 16.0);
        // modal class [10,20): 10 + ((5-2)/(10-2-3))*10
        assert_close(r.mode, 16.0);
        assert!(comp.breakdown().status().is_ok());
    }

    #[test]
    fn test_mean_matches_weighted_formula() {
        let data = vec![
            Iv::new(5.0, 15.0, 4.0),
            Iv::new(15.0, 25.0, 6.0),
            Iv::new(25.0, 35.0, 2.0),
        ];
        let comp = compute_grouped(&data);
        let expected = (4.0 * 10.0 + 6.0 * 20.0 + 2.0 * 30.0) / 12.0;
        assert_close(comp.results().mean, expected);
    }

    #[test]
    fn test_variance_population_semantics() {
        let comp = compute_grouped(&reference_dataset());
        let mean: f64 = 16.0;
        let expected_var =
            (2.0 * (5.0 - mean).powi(2) + 5.0 * (15.0 - mean).powi(2) + 3.0 * (25.0 - mean).powi(2))
                / 10.0;
        assert_close(comp.results().variance, expected_var);
        assert_close(comp.results().std_dev, expected_var.sqrt());
    }

    #[test]
    fn test_uniform_distribution_mode_undefined() {
        let data = vec![
            Iv::new(0.0, 10.0, 3.0),
            Iv::new(10.0, 20.0, 3.0),
            Iv::new(20.0, 30.0, 3.0),
        ];
        let comp = compute_grouped(&data);
        assert_eq!(comp.results().mode, None);
        // the other statistics stay defined
        assert!(comp.results().mean.is_some());
        assert!(comp.results().median.is_some());
    }

    #[test]
    fn test_bimodal_tie_mode_undefined() {
        // two classes share the maximum; no single modal class exists
        let data = vec![
            Iv::new(0.0, 10.0, 5.0),
            Iv::new(10.0, 20.0, 2.0),
            Iv::new(20.0, 30.0, 5.0),
        ];
        let comp = compute_grouped(&data);
        assert_eq!(comp.results().mode, None);
        assert!(comp.results().mean.is_some());
    }

    #[test]
    fn test_late_tie_with_maximum_mode_undefined() {
        // the maximum is reached first, then tied by a later class
        let data = vec![
            Iv::new(0.0, 10.0, 2.0),
            Iv::new(10.0, 20.0, 5.0),
            Iv::new(20.0, 30.0, 5.0),
        ];
        let comp = compute_grouped(&data);
        assert_eq!(comp.results().mode, None);
    }

    #[test]
    fn test_tie_below_maximum_keeps_mode_defined() {
        // 3,3,7: the tie is between non-modal classes, the peak is unique
        let data = vec![
            Iv::new(0.0, 10.0, 3.0),
            Iv::new(10.0, 20.0, 3.0),
            Iv::new(20.0, 30.0, 7.0),
        ];
        let comp = compute_grouped(&data);
        // mode = 20 + ((7-3)/(14-3-0))*10
        assert_close(comp.results().mode, 20.0 + (4.0 / 11.0) * 10.0);
    }

    #[test]
    fn test_edge_modal_class_uses_zero_neighbors() {
        // modal class is the first one: f1 = 0 (no predecessor)
        let data = vec![Iv::new(0.0, 10.0, 5.0), Iv::new(10.0, 20.0, 2.0)];
        let comp = compute_grouped(&data);
        // mode = 0 + ((5-0)/(10-0-2))*10 = 6.25
        assert_close(comp.results().mode, 6.25);
    }

    #[test]
    fn test_unsorted_input_is_sorted_by_lower() {
        let mut data = reference_dataset();
        data.reverse();
        let comp = compute_grouped(&data);
        let labels: Vec<&str> = comp
            .breakdown()
            .rows()
            .iter()
            .map(|r| r.class.as_str())
            .collect();
        assert_eq!(labels, vec!["0-10", "10-20", "20-30"]);
        assert_close(comp.results().median, 16.0);
        // caller's collection keeps its original order
        assert_eq!(data[0].lower, 20.0);
    }

    #[test]
    fn test_idempotent_on_same_input() {
        let mut data = reference_dataset();
        data.swap(0, 2);
        let first = compute_grouped(&data);
        let second = compute_grouped(&data);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let comp = compute_grouped(&[]);
        assert!(comp.results().is_undefined());
        assert!(comp.breakdown().rows().is_empty());
        assert!(!comp.breakdown().status().is_ok());
    }

    #[test]
    fn test_zero_total_frequency_is_empty() {
        let data = vec![Iv::new(0.0, 10.0, 0.0), Iv::new(10.0, 20.0, 0.0)];
        let comp = compute_grouped(&data);
        assert!(comp.results().is_undefined());
        assert_eq!(comp.breakdown().status(), &DataStatus::Empty);
    }

    #[test]
    fn test_inverted_interval_rejected() {
        let data = vec![Iv::new(10.0, 10.0, 3.0)];
        assert_eq!(
            validate_grouped(&data),
            Err(ValidationError::InvertedInterval {
                row: 0,
                lower: 10.0,
                upper: 10.0
            })
        );
        let comp = compute_grouped(&data);
        assert!(comp.results().is_undefined());
    }

    #[test]
    fn test_negative_frequency_rejected() {
        let data = vec![Iv::new(0.0, 10.0, -1.0)];
        assert!(matches!(
            validate_grouped(&data),
            Err(ValidationError::NegativeFrequency { row: 0, .. })
        ));
    }

    #[test]
    fn test_non_finite_bound_rejected() {
        let data = vec![Iv::new(f64::NAN, 10.0, 1.0)];
        assert!(matches!(
            validate_grouped(&data),
            Err(ValidationError::NonFiniteNumber {
                row: 0,
                field: "lower"
            })
        ));
    }

    #[test]
    fn test_breakdown_rows_record_derivation() {
        let comp = compute_grouped(&reference_dataset());
        let rows = comp.breakdown().rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].class, "10-20");
        assert!((rows[1].midpoint - 15.0).abs() < TOL);
        assert!((rows[1].fx - 75.0).abs() < TOL);
        assert!((rows[1].cumulative - 7.0).abs() < TOL);
        // mean = 16, so class [10,20) deviates by -1
        let dev_sq = rows[1].deviation_sq.unwrap();
        assert!((dev_sq - 1.0).abs() < TOL);
        assert!((rows[1].f_deviation_sq.unwrap() - 5.0).abs() < TOL);
    }

    #[test]
    fn test_single_class_median_and_mode() {
        let data = vec![Iv::new(0.0, 10.0, 4.0)];
        let comp = compute_grouped(&data);
        // median = 0 + ((2-0)/4)*10 = 5, mode = 0 + (4/(8-0-0))*10 = 5
        assert_close(comp.results().median, 5.0);
        assert_close(comp.results().mode, 5.0);
    }
}
