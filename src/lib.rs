//! Descriptive statistics over frequency distributions.
//!
//! The crate computes mean, median, mode, variance and standard deviation
//! from either grouped (class-interval) or ungrouped (value/frequency)
//! tables, and records a step-by-step breakdown of the derivation for
//! pedagogical display.
//!
//! The engine is pure and synchronous: every call works on its own sorted
//! copy of the input, holds no state between calls, and is safe to invoke
//! from any number of threads. A statistic whose formula precondition
//! fails (bimodal tie, degenerate modal denominator, empty input) resolves
//! to `None` instead of a sentinel or a panic.
//!
//! ```
//! use freq_stat::{Distribution, GroupedInterval, compute};
//!
//! let dataset = Distribution::Grouped(vec![
//!     GroupedInterval::new(0.0, 10.0, 2.0),
//!     GroupedInterval::new(10.0, 20.0, 5.0),
//!     GroupedInterval::new(20.0, 30.0, 3.0),
//! ]);
//! let computation = compute(&dataset);
//! assert_eq!(computation.results().mean, Some(16.0));
//! assert_eq!(computation.results().median, Some(16.0));
//! ```

pub mod breakdown;
pub mod engine;
pub mod error;
pub mod grouped;
pub mod protocol;
pub mod report;
pub mod types;
pub mod ungrouped;

// Re-export the engine surface for convenience
pub use breakdown::{Breakdown, GroupedBreakdown, GroupedRow, UngroupedBreakdown, UngroupedRow};
pub use engine::{Computation, compute};
pub use error::{DataStatus, ValidationError};
pub use grouped::{GroupedComputation, compute_grouped, validate_grouped};
pub use protocol::{ComputeRequest, ComputeResponse};
pub use report::{BreakdownReport, DisplayRow, StageSection};
pub use types::{Distribution, GroupedInterval, StatsResult, UngroupedObservation};
pub use ungrouped::{UngroupedComputation, compute_ungrouped, validate_ungrouped};
