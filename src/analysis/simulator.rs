//! Randomized test generator.
//!
//! Produces a plausible metric set for a pattern by applying uniform ±10%
//! jitter to its baseline constants.

use super::round_to;
use super::tables::{default_test_results, simulation_baseline};
use crate::models::{metric, MetricValues};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Maximum relative deviation from the baseline
pub const JITTER: f64 = 0.10;

/// Decimal places kept for a simulated metric
fn precision(metric_name: &str) -> i32 {
    if metric::RATED.contains(&metric_name) {
        1
    } else if metric_name == metric::AVAILABILITY {
        2
    } else {
        0
    }
}

pub struct TestGenerator {
    rng: StdRng,
}

impl TestGenerator {
    pub fn from_entropy() -> Self {
        TestGenerator {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator for tests
    pub fn with_seed(seed: u64) -> Self {
        TestGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Jittered metrics for `pattern_name`.
    ///
    /// Patterns without a baseline get the fixed default results, unjittered.
    pub fn simulate(&mut self, pattern_name: &str) -> MetricValues {
        let Some(baseline) = simulation_baseline(pattern_name) else {
            log::debug!(
                "[Simulator] No baseline for '{}', using default results",
                pattern_name
            );
            return default_test_results();
        };

        baseline
            .into_iter()
            .map(|(name, value)| {
                let noise: f64 = self.rng.gen_range(-1.0..=1.0);
                let jittered = value * (1.0 + noise * JITTER);
                let decimals = precision(&name);
                (name, round_to(jittered, decimals))
            })
            .collect()
    }
}

impl Default for TestGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}
