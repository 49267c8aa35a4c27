//! Request/response contract for invoking the engine across a boundary.
//!
//! The surrounding system may run the engine in-process or ship the dataset
//! to a server and fall back to the local engine on failure. Both paths use
//! these shapes: the request carries the mode-tagged dataset, the response
//! carries the results plus an echo of the re-sorted dataset, so the caller
//! can rebuild the breakdown without re-deriving the ordering and get a
//! rendering identical to the local path.

use derive_getters::Getters;
use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::breakdown::Breakdown;
use crate::engine::compute;
use crate::error::ValidationError;
use crate::grouped::validate_grouped;
use crate::types::{Distribution, StatsResult};
use crate::ungrouped::validate_ungrouped;

/// Body of a compute request: the dataset with its explicit mode tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeRequest {
    pub dataset: Distribution,
}

impl ComputeRequest {
    pub fn new(dataset: Distribution) -> Self {
        Self { dataset }
    }

    /// Reject malformed rows up front, mirroring the engine's validity
    /// gate. A server answering this request reports the description to
    /// the caller instead of computing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.dataset {
            Distribution::Grouped(rows) => validate_grouped(rows),
            Distribution::Ungrouped(rows) => validate_ungrouped(rows),
        }
    }
}

/// Body of a compute response.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ComputeResponse {
    results: StatsResult,
    /// Total frequency of the dataset.
    n: f64,
    /// The request's dataset, re-sorted by class lower limit or by value.
    dataset: Distribution,
}

impl ComputeResponse {
    /// Validate, compute and echo the sorted dataset.
    ///
    /// Zero total frequency is not an error: the response then carries
    /// all-undefined results, same as a local run.
    pub fn answer(request: &ComputeRequest) -> Result<Self, ValidationError> {
        request.validate()?;
        let computation = compute(&request.dataset);
        let dataset = sorted_echo(&request.dataset);
        let n = total_frequency(&request.dataset);
        debug!(
            "answered {} compute request: {} rows, n={n}",
            request.dataset.mode_tag(),
            request.dataset.len()
        );
        Ok(Self {
            results: *computation.results(),
            n,
            dataset,
        })
    }

    /// Rebuild the breakdown from the echoed dataset.
    ///
    /// Runs the same pure engine over the echo, so the rows are identical
    /// to what a local invocation would have produced.
    pub fn rebuild_breakdown(&self) -> Breakdown {
        let (_, breakdown) = compute(&self.dataset).into_parts();
        breakdown
    }
}

/// Copy of the dataset in the order the engine processes it.
fn sorted_echo(dataset: &Distribution) -> Distribution {
    match dataset {
        Distribution::Grouped(rows) => {
            let mut rows = rows.clone();
            rows.sort_by(|a, b| a.lower.total_cmp(&b.lower));
            Distribution::Grouped(rows)
        }
        Distribution::Ungrouped(rows) => {
            let mut rows = rows.clone();
            rows.sort_by(|a, b| a.value.total_cmp(&b.value));
            Distribution::Ungrouped(rows)
        }
    }
}

fn total_frequency(dataset: &Distribution) -> f64 {
    match dataset {
        Distribution::Grouped(rows) => rows.iter().map(|r| r.frequency).sum(),
        Distribution::Ungrouped(rows) => rows.iter().map(|r| r.frequency).sum(),
    }
}
