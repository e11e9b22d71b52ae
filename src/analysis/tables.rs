//! Immutable per-pattern constant tables.
//!
//! Built once on first use. Values are listed in `metric::ALL` and
//! `scaling_metric::ALL` order respectively.

use crate::models::{metric, metric_values, pattern, scaling_metric, MetricValues};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Fixed weights used by overall scoring (sum to 1.0)
pub const FIXED_WEIGHTS: [(&str, f64); 8] = [
    (metric::THROUGHPUT, 0.15),
    (metric::LATENCY, 0.15),
    (metric::AVAILABILITY, 0.15),
    (metric::RESOURCE_UTILIZATION, 0.10),
    (metric::FAULT_TOLERANCE, 0.15),
    (metric::ELASTICITY, 0.10),
    (metric::COST_EFFICIENCY, 0.10),
    (metric::DATA_CONSISTENCY, 0.10),
];

/// Baseline "before" values shared by every pattern in the scaling simulation
pub const SCALING_BASELINE: [f64; 5] = [150.0, 1000.0, 60.0, 8.0, 2.0];

/// Scaling factors for patterns missing from [`SCALING_FACTORS`]
pub const DEFAULT_SCALING_FACTORS: [f64; 5] = [1.2, 2.0, 1.2, 1.5, 1.2];

/// Fixed test results returned for patterns without a simulation baseline
pub const DEFAULT_TEST_RESULTS: [f64; 8] = [1000.0, 200.0, 99.5, 60.0, 3.0, 3.0, 3.0, 3.0];

lazy_static! {
    /// Per-pattern baseline metrics the test generator jitters around
    pub static ref SIMULATION_BASELINES: HashMap<&'static str, [f64; 8]> = {
        let mut baselines = HashMap::new();
        baselines.insert(pattern::MONOLITHIC, [750.0, 120.0, 99.5, 75.0, 3.0, 2.0, 4.0, 5.0]);
        baselines.insert(pattern::MICROSERVICES, [1800.0, 150.0, 99.95, 60.0, 4.5, 4.8, 3.5, 3.2]);
        baselines.insert(pattern::SERVERLESS, [2500.0, 250.0, 99.99, 20.0, 4.7, 5.0, 4.5, 3.0]);
        baselines.insert(pattern::EVENT_DRIVEN, [3200.0, 180.0, 99.9, 55.0, 4.5, 4.3, 3.8, 3.5]);
        baselines.insert(pattern::PEER_TO_PEER, [900.0, 220.0, 99.8, 70.0, 4.8, 3.5, 4.2, 2.8]);
        baselines.insert(pattern::SOA, [1200.0, 190.0, 99.7, 65.0, 4.0, 3.5, 3.5, 4.0]);
        baselines
    };

    /// Per-pattern multiplicative scaling factors
    pub static ref SCALING_FACTORS: HashMap<&'static str, [f64; 5]> = {
        let mut factors = HashMap::new();
        factors.insert(pattern::MONOLITHIC, [1.5, 1.8, 1.2, 2.0, 2.0]);
        factors.insert(pattern::MICROSERVICES, [1.1, 3.6, 1.08, 1.5, 0.8]);
        factors.insert(pattern::SERVERLESS, [1.08, 3.4, 1.1, 1.4, 0.75]);
        factors.insert(pattern::EVENT_DRIVEN, [1.08, 2.4, 1.1, 1.2, 0.75]);
        factors.insert(pattern::PEER_TO_PEER, [0.9, 6.1, 1.2, 1.55, 0.9]);
        factors.insert(pattern::SOA, [1.1, 4.0, 1.15, 1.4, 0.8]);
        factors
    };
}

/// Baseline metrics for `pattern_name`, if it has one
pub fn simulation_baseline(pattern_name: &str) -> Option<MetricValues> {
    SIMULATION_BASELINES
        .get(pattern_name)
        .map(|values| metric_values(metric::ALL.iter().copied().zip(values.iter().copied())))
}

/// Scaling factor for one scaling metric; unknown patterns use the default set
/// and metrics outside `scaling_metric::ALL` get 1.0
pub fn scaling_factor(pattern_name: &str, scaling_metric_name: &str) -> f64 {
    let table = SCALING_FACTORS
        .get(pattern_name)
        .unwrap_or(&DEFAULT_SCALING_FACTORS);

    match scaling_metric::ALL.iter().position(|m| *m == scaling_metric_name) {
        Some(idx) => table[idx],
        // Unlisted metric passes through unchanged
        None => 1.0,
    }
}

/// The fixed default test results as a metric map
pub fn default_test_results() -> MetricValues {
    metric_values(
        metric::ALL
            .iter()
            .copied()
            .zip(DEFAULT_TEST_RESULTS.iter().copied()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_weights_sum_to_one() {
        let sum: f64 = FIXED_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_every_builtin_pattern_has_tables() {
        for name in pattern::ALL {
            assert!(SIMULATION_BASELINES.contains_key(name), "{} baseline", name);
            assert!(SCALING_FACTORS.contains_key(name), "{} factors", name);
        }
    }

    #[test]
    fn test_scaling_factor_lookup() {
        assert_eq!(scaling_factor(pattern::MICROSERVICES, scaling_metric::THROUGHPUT), 3.6);
        assert_eq!(scaling_factor(pattern::MICROSERVICES, scaling_metric::CPU_UTILIZATION), 1.08);
        assert_eq!(scaling_factor("Unknown", scaling_metric::THROUGHPUT), 2.0);
        assert_eq!(scaling_factor("Unknown", scaling_metric::MEMORY_USAGE), 1.5);
    }

    #[test]
    fn test_unlisted_metric_factor_is_identity() {
        assert_eq!(scaling_factor(pattern::MICROSERVICES, "Requests Per Node"), 1.0);
        assert_eq!(scaling_factor("Unknown", "Requests Per Node"), 1.0);
    }

    #[test]
    fn test_simulation_baseline_unknown() {
        assert!(simulation_baseline("Unknown").is_none());
        let monolith = simulation_baseline(pattern::MONOLITHIC).unwrap();
        assert_eq!(monolith.get(metric::THROUGHPUT), Some(&750.0));
    }
}
