//! Pattern catalog: the single owner of Pattern and Metric records.
//!
//! # Module Structure
//!
//! - `defaults`: the built-in six-pattern catalog used when no document exists
//! - `store`: the document store seam (`DocumentStore`) and its JSON/in-memory backends
//!
//! # Lookup Policy
//!
//! Every query here is soft-fail: an unknown pattern or metric yields a
//! documented default (0.0, empty string, empty list, empty scaling maps)
//! instead of an error.

pub mod defaults;
pub mod store;

use crate::models::{MetricValues, Pattern, ScalingComparison};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use defaults::default_catalog;
pub use store::{DocumentStore, JsonFileStore, MemoryStore};

/// Ordered collection of patterns keyed by unique name.
///
/// Serializes as the persisted document: an object from pattern name to record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    patterns: IndexMap<String, Pattern>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a pattern. A replaced pattern keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, pattern: Pattern) -> Option<Pattern> {
        self.patterns.insert(name.into(), pattern)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    /// Pattern names in catalog order
    pub fn pattern_names(&self) -> Vec<&str> {
        self.patterns.keys().map(String::as_str).collect()
    }

    /// Exact name, else the first pattern whose name starts with `input`
    /// (case-insensitive). `None` when nothing matches.
    pub fn resolve_name(&self, input: &str) -> Option<&str> {
        if let Some((name, _)) = self.patterns.get_key_value(input) {
            return Some(name.as_str());
        }
        let wanted = input.to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.patterns
            .keys()
            .map(String::as_str)
            .find(|name| name.to_lowercase().starts_with(&wanted))
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pattern)> {
        self.patterns.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// Catalog restricted to `names`, in the given order. Unknown names are skipped.
    pub fn subset(&self, names: &[&str]) -> Catalog {
        let mut subset = Catalog::new();
        for name in names {
            if let Some(p) = self.get(name) {
                subset.insert(*name, p.clone());
            }
        }
        subset
    }

    /// Raw metric value, 0.0 if the pattern or metric is missing
    pub fn get_metric(&self, pattern: &str, metric: &str) -> f64 {
        self.get(pattern)
            .and_then(|p| p.metrics.get(metric))
            .map(|m| m.value)
            .unwrap_or(0.0)
    }

    /// Values of one metric across all patterns, in catalog order
    pub fn metric_column(&self, metric: &str) -> Vec<f64> {
        self.patterns
            .keys()
            .map(|name| self.get_metric(name, metric))
            .collect()
    }

    /// Metric names of the first pattern.
    ///
    /// All patterns are expected to share one metric set; this is not validated.
    pub fn metric_names(&self) -> Vec<&str> {
        self.patterns
            .values()
            .next()
            .map(|p| p.metrics.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn description(&self, pattern: &str) -> &str {
        self.get(pattern).map(|p| p.description.as_str()).unwrap_or("")
    }

    pub fn characteristics(&self, pattern: &str) -> &[String] {
        self.get(pattern)
            .map(|p| p.characteristics.as_slice())
            .unwrap_or(&[])
    }

    pub fn sources(&self, pattern: &str) -> &[String] {
        self.get(pattern).map(|p| p.sources.as_slice()).unwrap_or(&[])
    }

    pub fn metric_unit(&self, pattern: &str, metric: &str) -> &str {
        self.get(pattern)
            .and_then(|p| p.metrics.get(metric))
            .map(|m| m.unit.as_str())
            .unwrap_or("")
    }

    pub fn metric_description(&self, pattern: &str, metric: &str) -> &str {
        self.get(pattern)
            .and_then(|p| p.metrics.get(metric))
            .map(|m| m.description.as_str())
            .unwrap_or("")
    }

    /// Stored before/after scaling data, empty maps if the pattern is missing
    pub fn scaling_comparison(&self, pattern: &str) -> ScalingComparison {
        self.get(pattern)
            .map(|p| p.scaling_comparison.clone())
            .unwrap_or_default()
    }

    /// Overwrite metric values from a test run.
    ///
    /// Only metrics already present in the pattern are updated; unknown names
    /// are ignored. Returns false if the pattern is not in the catalog.
    pub fn apply_metric_values(&mut self, pattern: &str, values: &MetricValues) -> bool {
        let Some(record) = self.patterns.get_mut(pattern) else {
            return false;
        };

        for (name, value) in values.iter() {
            if let Some(metric) = record.metrics.get_mut(name) {
                metric.value = *value;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{metric, pattern};

    #[test]
    fn test_get_metric_defaults_to_zero() {
        let catalog = default_catalog();
        assert_eq!(catalog.get_metric(pattern::MONOLITHIC, metric::THROUGHPUT), 750.0);
        assert_eq!(catalog.get_metric("Unknown Pattern", metric::THROUGHPUT), 0.0);
        assert_eq!(catalog.get_metric(pattern::MONOLITHIC, "Unknown Metric"), 0.0);
    }

    #[test]
    fn test_soft_fail_lookups() {
        let catalog = default_catalog();
        assert_eq!(catalog.description("nope"), "");
        assert!(catalog.characteristics("nope").is_empty());
        assert!(catalog.sources("nope").is_empty());
        assert!(catalog.scaling_comparison("nope").is_empty());
        assert_eq!(catalog.metric_unit("nope", metric::LATENCY), "");
    }

    #[test]
    fn test_metric_column_follows_catalog_order() {
        let catalog = default_catalog();
        assert_eq!(
            catalog.metric_column(metric::THROUGHPUT),
            vec![750.0, 1800.0, 2500.0, 3200.0, 900.0, 1200.0]
        );
    }

    #[test]
    fn test_apply_metric_values_ignores_unknown_metrics() {
        let mut catalog = default_catalog();
        let mut values = MetricValues::new();
        values.insert(metric::THROUGHPUT.to_string(), 800.0);
        values.insert("Made Up".to_string(), 1.0);

        assert!(catalog.apply_metric_values(pattern::MONOLITHIC, &values));
        assert_eq!(catalog.get_metric(pattern::MONOLITHIC, metric::THROUGHPUT), 800.0);
        assert!(catalog.get(pattern::MONOLITHIC).unwrap().metrics.get("Made Up").is_none());
    }

    #[test]
    fn test_resolve_name() {
        let catalog = default_catalog();
        assert_eq!(catalog.resolve_name(pattern::SOA), Some(pattern::SOA));
        assert_eq!(catalog.resolve_name("serverless"), Some(pattern::SERVERLESS));
        assert_eq!(catalog.resolve_name("EVENT"), Some(pattern::EVENT_DRIVEN));
        assert_eq!(catalog.resolve_name("Space-Based Architecture"), None);
        assert_eq!(catalog.resolve_name(""), None);
    }

    #[test]
    fn test_subset_keeps_requested_order() {
        let catalog = default_catalog();
        let subset = catalog.subset(&[pattern::SOA, "Nope", pattern::MONOLITHIC]);
        assert_eq!(subset.pattern_names(), vec![pattern::SOA, pattern::MONOLITHIC]);
    }

    #[test]
    fn test_apply_metric_values_unknown_pattern() {
        let mut catalog = default_catalog();
        let before = catalog.clone();
        assert!(!catalog.apply_metric_values("Nope", &MetricValues::new()));
        assert_eq!(catalog, before);
    }
}
