//! Core data types for the Architecture Pattern Evaluator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// NAME VOCABULARIES
// ============================================================================

/// Performance metric names shared by every pattern in the catalog.
pub mod metric {
    pub const THROUGHPUT: &str = "Throughput";
    pub const LATENCY: &str = "Latency";
    pub const AVAILABILITY: &str = "Availability";
    pub const RESOURCE_UTILIZATION: &str = "Resource Utilization";
    pub const FAULT_TOLERANCE: &str = "Fault Tolerance";
    pub const ELASTICITY: &str = "Elasticity";
    pub const COST_EFFICIENCY: &str = "Cost Efficiency";
    pub const DATA_CONSISTENCY: &str = "Data Consistency";

    /// The eight performance metrics, in catalog order.
    pub const ALL: [&str; 8] = [
        THROUGHPUT,
        LATENCY,
        AVAILABILITY,
        RESOURCE_UTILIZATION,
        FAULT_TOLERANCE,
        ELASTICITY,
        COST_EFFICIENCY,
        DATA_CONSISTENCY,
    ];

    /// Metrics rated on a 1-5 scale.
    pub const RATED: [&str; 4] = [FAULT_TOLERANCE, ELASTICITY, COST_EFFICIENCY, DATA_CONSISTENCY];
}

/// Scaling comparison vocabulary. Distinct key space from [`metric`].
pub mod scaling_metric {
    pub const LATENCY: &str = "Latency";
    pub const THROUGHPUT: &str = "Throughput";
    pub const CPU_UTILIZATION: &str = "CPU Utilization";
    pub const MEMORY_USAGE: &str = "Memory Usage";
    pub const ERROR_RATE: &str = "Error Rate";

    pub const ALL: [&str; 5] = [LATENCY, THROUGHPUT, CPU_UTILIZATION, MEMORY_USAGE, ERROR_RATE];
}

/// Names of the six built-in architecture patterns.
pub mod pattern {
    pub const MONOLITHIC: &str = "Monolithic Architecture";
    pub const MICROSERVICES: &str = "Microservices Architecture";
    pub const SERVERLESS: &str = "Serverless Architecture";
    pub const EVENT_DRIVEN: &str = "Event-Driven Architecture";
    pub const PEER_TO_PEER: &str = "Peer-to-Peer Architecture";
    pub const SOA: &str = "Service-Oriented Architecture (SOA)";

    pub const ALL: [&str; 6] = [
        MONOLITHIC,
        MICROSERVICES,
        SERVERLESS,
        EVENT_DRIVEN,
        PEER_TO_PEER,
        SOA,
    ];
}

// ============================================================================
// METRIC MAPS
// ============================================================================

/// Metric name to raw value, e.g. the output of a test run.
///
/// Insertion ordered: pattern and metric ordering survive a load/save cycle
/// and "first seen" tie-breaking stays deterministic.
pub type MetricValues = IndexMap<String, f64>;

/// Collect borrowed `(name, value)` pairs into [`MetricValues`]
pub fn metric_values<'a, I>(pairs: I) -> MetricValues
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

// ============================================================================
// CATALOG RECORDS
// ============================================================================

/// One named, unit-bearing performance measure of a pattern.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricRecord {
    pub value: f64,
    pub unit: String,
    pub description: String,
}

impl MetricRecord {
    pub fn new(value: f64, unit: &str, description: &str) -> Self {
        MetricRecord {
            value,
            unit: unit.to_string(),
            description: description.to_string(),
        }
    }
}

/// Before/after values over the scaling vocabulary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingComparison {
    pub before: MetricValues,
    pub after: MetricValues,
}

impl ScalingComparison {
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

/// A software-architecture style held in the catalog.
///
/// The pattern name is the catalog key and is not repeated in the record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pattern {
    pub description: String,
    pub characteristics: Vec<String>,
    pub metrics: IndexMap<String, MetricRecord>,
    pub scaling_comparison: ScalingComparison,
    pub sources: Vec<String>,
}

// ============================================================================
// METRIC DIRECTION
// ============================================================================

/// Whether lower or higher raw values are better for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    LowerIsBetter,
    HigherIsBetter,
}

impl Direction {
    /// Fixed policy: exactly Latency and Resource Utilization are lower-is-better.
    pub fn for_metric(metric_name: &str) -> Self {
        match metric_name {
            metric::LATENCY | metric::RESOURCE_UTILIZATION => Direction::LowerIsBetter,
            _ => Direction::HigherIsBetter,
        }
    }

    /// True if `candidate` is strictly better than `incumbent`
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Direction::LowerIsBetter => candidate < incumbent,
            Direction::HigherIsBetter => candidate > incumbent,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::LowerIsBetter => write!(f, "lower is better"),
            Direction::HigherIsBetter => write!(f, "higher is better"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "lower_is_better" | "lower" => Ok(Direction::LowerIsBetter),
            "higher_is_better" | "higher" => Ok(Direction::HigherIsBetter),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}
