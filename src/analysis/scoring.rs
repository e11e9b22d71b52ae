//! Pattern scoring and ranking.
//!
//! ## Algorithm
//! For each weighted metric, the raw values across all catalog patterns are
//! normalized to [0, 1] (see [`normalize_metric`]) and each pattern's score is
//! the weighted sum of its normalized values.
//!
//! - **Overall score**: fixed weights (Throughput, Latency, Availability and
//!   Fault Tolerance 15% each; the remaining four metrics 10% each)
//! - **Best pattern**: caller-supplied weights, divided by their sum before use
//!
//! Ties always resolve to the pattern that appears first in catalog order.

use super::normalize::normalize_metric;
use super::tables::FIXED_WEIGHTS;
use crate::catalog::Catalog;
use crate::error::ScoringError;
use crate::models::MetricValues;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Metric name to weight, in insertion order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricWeights(MetricValues);

impl MetricWeights {
    pub fn new() -> Self {
        MetricWeights(MetricValues::new())
    }

    /// The built-in overall-score weight table
    pub fn fixed() -> Self {
        FIXED_WEIGHTS.iter().copied().collect()
    }

    pub fn set(&mut self, metric: impl Into<String>, weight: f64) {
        self.0.insert(metric.into(), weight);
    }

    pub fn get(&self, metric: &str) -> Option<f64> {
        self.0.get(metric).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    /// Weights divided by their sum.
    ///
    /// Fails with `InvalidWeights` for a negative or non-finite weight, or a
    /// zero total.
    pub fn normalized(&self) -> Result<MetricWeights, ScoringError> {
        for (metric, weight) in self.iter() {
            if !weight.is_finite() {
                return Err(ScoringError::InvalidWeights(format!(
                    "weight for '{}' is not a finite number",
                    metric
                )));
            }
            if weight < 0.0 {
                return Err(ScoringError::InvalidWeights(format!(
                    "weight for '{}' is negative ({})",
                    metric, weight
                )));
            }
        }

        let total = self.sum();
        if total <= 0.0 {
            return Err(ScoringError::InvalidWeights(
                "weights sum to zero".to_string(),
            ));
        }

        Ok(self.iter().map(|(k, w)| (k, w / total)).collect())
    }
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self::fixed()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MetricWeights {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        MetricWeights(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl FromStr for MetricWeights {
    type Err = String;

    /// Parse `"Metric=W,Other Metric=W"` pairs
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut weights = MetricWeights::new();
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (metric, weight) = pair
                .rsplit_once('=')
                .ok_or_else(|| format!("Expected 'Metric=Weight', got '{}'", pair))?;
            let weight: f64 = weight
                .trim()
                .parse()
                .map_err(|_| format!("Invalid weight '{}' for '{}'", weight.trim(), metric.trim()))?;
            weights.set(metric.trim(), weight);
        }
        Ok(weights)
    }
}

/// One pattern's aggregate score
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub pattern: String,
    pub score: f64,
}

/// Weighted normalize-then-sum scorer over a catalog
pub struct PatternScorer {
    weights: MetricWeights,
}

impl PatternScorer {
    /// Scorer with the fixed overall-score weights
    pub fn new() -> Self {
        PatternScorer {
            weights: MetricWeights::fixed(),
        }
    }

    /// Scorer with caller weights, normalized by their sum
    pub fn with_weights(weights: &MetricWeights) -> Result<Self, ScoringError> {
        Ok(PatternScorer {
            weights: weights.normalized()?,
        })
    }

    pub fn weights(&self) -> &MetricWeights {
        &self.weights
    }

    /// Score every pattern, in catalog order
    pub fn scores(&self, catalog: &Catalog) -> MetricValues {
        let mut scores: MetricValues = catalog
            .pattern_names()
            .into_iter()
            .map(|name| (name.to_string(), 0.0))
            .collect();

        for (metric, weight) in self.weights.iter() {
            let normalized = normalize_metric(&catalog.metric_column(metric), metric);
            for ((_, score), value) in scores.iter_mut().zip(normalized) {
                *score += weight * value;
            }
        }

        scores
    }

    /// Overall score per pattern using the fixed weight table
    pub fn overall_scores(catalog: &Catalog) -> MetricValues {
        PatternScorer::new().scores(catalog)
    }

    /// Highest-scoring pattern for the given weights.
    ///
    /// Weights are divided by their sum; an all-zero map fails with
    /// `InvalidWeights`. The first pattern in catalog order wins ties.
    pub fn best_pattern(
        catalog: &Catalog,
        weights: &MetricWeights,
    ) -> Result<(String, f64), ScoringError> {
        let scorer = PatternScorer::with_weights(weights)?;
        if catalog.is_empty() {
            return Err(ScoringError::EmptyCatalog);
        }

        let scores = scorer.scores(catalog);
        let mut best: Option<(&str, f64)> = None;
        for (name, score) in scores.iter() {
            match best {
                Some((_, top)) if *score <= top => {}
                _ => best = Some((name.as_str(), *score)),
            }
        }

        best.map(|(name, score)| (name.to_string(), score))
            .ok_or(ScoringError::EmptyCatalog)
    }

    /// Patterns sorted by descending score; equal scores keep catalog order
    pub fn ranking(&self, catalog: &Catalog) -> Vec<ScoreEntry> {
        let mut entries: Vec<ScoreEntry> = self
            .scores(catalog)
            .into_iter()
            .map(|(pattern, score)| ScoreEntry { pattern, score })
            .collect();

        // sort_by is stable
        entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        entries
    }

    /// Per-pattern normalized values for the given metrics
    pub fn normalized_matrix(catalog: &Catalog, metrics: &[&str]) -> IndexMap<String, MetricValues> {
        let mut matrix: IndexMap<String, MetricValues> = catalog
            .pattern_names()
            .into_iter()
            .map(|name| (name.to_string(), MetricValues::with_capacity(metrics.len())))
            .collect();

        for metric in metrics {
            let normalized = normalize_metric(&catalog.metric_column(metric), metric);
            for ((_, row), value) in matrix.iter_mut().zip(normalized) {
                row.insert(metric.to_string(), value);
            }
        }

        matrix
    }
}

impl Default for PatternScorer {
    fn default() -> Self {
        Self::new()
    }
}
