//! Architecture Pattern Evaluator
//!
//! Compares software-architecture patterns (Monolithic, Microservices,
//! Serverless, Event-Driven, Peer-to-Peer, SOA) on a shared set of
//! performance metrics, ranks them under fixed or user-supplied weights,
//! projects their behaviour under load and records simulated or live test
//! results into a persisted pattern catalog.
//!
//! The system is organized into functional modules:
//! - **error**: Unified error type hierarchy
//! - **models**: Core data structures, metric and pattern vocabularies
//! - **catalog**: Pattern catalog, built-in defaults and document stores
//! - **config**: Settings and JSON document loading
//! - **analysis**: Normalization, scoring, scaling simulation and test probes
//! - **report**: Comparison tables, per-metric winners and CSV export
//! - **session**: Explicit per-interaction session state
//! - **controller**: `Evaluator`, the user-facing operations
//! - **log_collector**: Background-thread log persistence

// Core foundational modules
pub mod error;
pub mod models;

// Catalog and persistence
pub mod catalog;
pub mod config;

// Scoring, simulation and probing
pub mod analysis;
pub mod report;

// Interaction layer
pub mod controller;
pub mod session;

// Robust, decoupled logging system
pub mod log_collector;

// Re-export the log crate for macro usage
pub use log;

// Re-export log collector for use throughout the system
pub use log_collector::{init_logging, LogCollector, LogLine};

// ============================================================================
// PUBLIC RE-EXPORTS FOR CONVENIENCE
// ============================================================================

pub use error::{AppError, ConfigError, ProbeError, Result, ScoringError};

pub use models::{
    metric, metric_values, pattern, scaling_metric, Direction, MetricRecord, MetricValues, Pattern,
    ScalingComparison,
};

pub use catalog::{default_catalog, Catalog, DocumentStore, JsonFileStore, MemoryStore};

pub use config::{Settings, SettingsManager};

pub use analysis::{
    normalize, normalize_metric, probe_for_settings, MetricWeights, NetworkProbe, PatternScorer,
    ScalingAssessment, ScalingSimulator, SimulatedProbe, TestGenerator, TestProbe,
};

pub use controller::Evaluator;
pub use session::SessionContext;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
