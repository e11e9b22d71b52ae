//! Analysis engine: normalization, scoring, scaling and test generation.
//!
//! # Module Structure
//!
//! - `normalize`: min-max metric normalizer with direction
//! - `tables`: immutable per-pattern constant tables
//! - `scoring`: weighted aggregation, ranking and best-pattern queries
//! - `scaling`: before/after scaling simulation and its assessment
//! - `simulator`: randomized (±10% jitter) test generator
//! - `probe`: test strategy seam (`TestProbe`) with simulated and HTTP backends

pub mod normalize;
pub mod probe;
pub mod scaling;
pub mod scoring;
pub mod simulator;
pub mod tables;

pub use normalize::{normalize, normalize_metric};
pub use probe::{probe_for_settings, NetworkProbe, SimulatedProbe, TestProbe};
pub use scaling::{LatencyImpact, ScalingAssessment, ScalingEfficiency, ScalingSimulator};
pub use scoring::{MetricWeights, PatternScorer, ScoreEntry};
pub use simulator::TestGenerator;

/// Round to `decimals` places, half away from zero
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
