//! Load-scaling simulation and assessment.

use super::round_to;
use super::tables::{scaling_factor, SCALING_BASELINE};
use crate::models::{metric_values, scaling_metric, MetricValues, ScalingComparison};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic before/after scaling projection
pub struct ScalingSimulator;

impl ScalingSimulator {
    /// The fixed baseline shared by every pattern
    pub fn baseline() -> MetricValues {
        metric_values(
            scaling_metric::ALL
                .iter()
                .copied()
                .zip(SCALING_BASELINE.iter().copied()),
        )
    }

    /// Scale the fixed baseline by the pattern's factors.
    ///
    /// Unknown patterns use the default factor set.
    pub fn simulate(pattern_name: &str) -> ScalingComparison {
        Self::project(pattern_name, &Self::baseline())
    }

    /// Scale an arbitrary `before` map: `after = round(before * factor, 1)`
    pub fn project(pattern_name: &str, before: &MetricValues) -> ScalingComparison {
        let after = before
            .iter()
            .map(|(metric, value)| {
                (metric.clone(), round_to(value * scaling_factor(pattern_name, metric), 1))
            })
            .collect();

        ScalingComparison {
            before: before.clone(),
            after,
        }
    }
}

/// Throughput gain classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalingEfficiency {
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl ScalingEfficiency {
    pub fn from_throughput_change(pct: f64) -> Self {
        if pct < 50.0 {
            ScalingEfficiency::Poor
        } else if pct < 100.0 {
            ScalingEfficiency::Moderate
        } else if pct < 200.0 {
            ScalingEfficiency::Good
        } else {
            ScalingEfficiency::Excellent
        }
    }
}

impl fmt::Display for ScalingEfficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingEfficiency::Poor => write!(f, "Poor"),
            ScalingEfficiency::Moderate => write!(f, "Moderate"),
            ScalingEfficiency::Good => write!(f, "Good"),
            ScalingEfficiency::Excellent => write!(f, "Excellent"),
        }
    }
}

/// Latency degradation classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LatencyImpact {
    Low,
    Moderate,
    High,
}

impl LatencyImpact {
    pub fn from_latency_change(pct: f64) -> Self {
        if pct > 50.0 {
            LatencyImpact::High
        } else if pct > 20.0 {
            LatencyImpact::Moderate
        } else {
            LatencyImpact::Low
        }
    }
}

impl fmt::Display for LatencyImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatencyImpact::Low => write!(f, "Low"),
            LatencyImpact::Moderate => write!(f, "Moderate"),
            LatencyImpact::High => write!(f, "High"),
        }
    }
}

/// Interpretation of a before/after comparison
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalingAssessment {
    pub throughput_change_pct: f64,
    pub latency_change_pct: f64,
    pub efficiency: ScalingEfficiency,
    pub latency_impact: LatencyImpact,
}

/// Percent change from `before` to `after`; 0 when before is missing or not positive.
/// A missing `after` counts as 0.
pub fn change_pct(before: Option<f64>, after: Option<f64>) -> f64 {
    match before {
        Some(b) if b > 0.0 => (after.unwrap_or(0.0) / b - 1.0) * 100.0,
        _ => 0.0,
    }
}

impl ScalingAssessment {
    pub fn from_comparison(comparison: &ScalingComparison) -> Self {
        let pct = |metric: &str| {
            change_pct(
                comparison.before.get(metric).copied(),
                comparison.after.get(metric).copied(),
            )
        };

        let throughput_change_pct = pct(scaling_metric::THROUGHPUT);
        let latency_change_pct = pct(scaling_metric::LATENCY);

        ScalingAssessment {
            throughput_change_pct,
            latency_change_pct,
            efficiency: ScalingEfficiency::from_throughput_change(throughput_change_pct),
            latency_impact: LatencyImpact::from_latency_change(latency_change_pct),
        }
    }

    /// Suitability verdict for high-load scenarios
    pub fn recommendation(&self) -> &'static str {
        match (self.efficiency, self.latency_impact) {
            (ScalingEfficiency::Excellent, LatencyImpact::Low) => {
                "This pattern shows excellent scaling characteristics and is an excellent choice for high-load scenarios."
            }
            (ScalingEfficiency::Good, LatencyImpact::Low) => {
                "This pattern scales well with minimal latency impact and is a good choice for high-load scenarios."
            }
            (ScalingEfficiency::Moderate, _) => {
                "This pattern scales moderately and may not be ideal for very high-load scenarios."
            }
            _ => {
                "This pattern shows poor scaling characteristics or significant latency impact and is not recommended for high-load scenarios."
            }
        }
    }
}
