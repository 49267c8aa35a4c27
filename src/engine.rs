//! Mode dispatch over [`Distribution`].

use derive_getters::Getters;
use serde_derive::{Deserialize, Serialize};

use crate::breakdown::Breakdown;
use crate::grouped::compute_grouped;
use crate::types::{Distribution, StatsResult};
use crate::ungrouped::compute_ungrouped;

/// Results plus breakdown of one engine run, mode-agnostic.
///
/// The shape is identical whichever arm ran, so a caller that falls back
/// from a remote invocation to a local one sees no difference.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct Computation {
    results: StatsResult,
    breakdown: Breakdown,
}

impl Computation {
    pub fn into_parts(self) -> (StatsResult, Breakdown) {
        (self.results, self.breakdown)
    }
}

/// Run the engine matching the dataset's explicit mode tag.
pub fn compute(dataset: &Distribution) -> Computation {
    match dataset {
        Distribution::Grouped(rows) => {
            let (results, breakdown) = compute_grouped(rows).into_parts();
            Computation {
                results,
                breakdown: Breakdown::Grouped(breakdown),
            }
        }
        Distribution::Ungrouped(rows) => {
            let (results, breakdown) = compute_ungrouped(rows).into_parts();
            Computation {
                results,
                breakdown: Breakdown::Ungrouped(breakdown),
            }
        }
    }
}
