//! Table shaping for presentation.
//!
//! Pure functions from catalog data or test results to the rows a front end
//! renders: metric comparison tables, per-metric winners, scaling change rows,
//! radar/heat-map values and CSV export.

use crate::analysis::scaling::change_pct;
use crate::analysis::PatternScorer;
use crate::catalog::Catalog;
use crate::models::{Direction, MetricValues, ScalingComparison};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Radar charts use a 0-5 axis
pub const RADAR_SCALE: f64 = 5.0;

/// Pattern name to metric values (test results or catalog values)
pub type ResultsByPattern = IndexMap<String, MetricValues>;

/// One metric across the compared patterns
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: String,
    /// One entry per pattern column; `None` where the pattern has no value
    pub values: Vec<Option<f64>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub patterns: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

/// Winner of one metric
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BestMetric {
    pub metric: String,
    pub pattern: String,
    pub value: f64,
}

/// Before/after row of a scaling comparison
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalingRow {
    pub metric: String,
    pub before: f64,
    pub after: f64,
    pub change_pct: f64,
}

/// Current metric values of every catalog pattern
pub fn catalog_values(catalog: &Catalog) -> ResultsByPattern {
    catalog
        .iter()
        .map(|(name, p)| {
            let values: MetricValues = p.metrics.iter().map(|(m, r)| (m.clone(), r.value)).collect();
            (name.to_string(), values)
        })
        .collect()
}

/// Metric order of the first pattern's results
fn metric_order(results: &ResultsByPattern) -> Vec<&str> {
    results
        .values()
        .next()
        .map(|values| values.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// One row per metric (first pattern's metric order), one column per pattern
pub fn comparison_table(results: &ResultsByPattern) -> ComparisonTable {
    let patterns: Vec<String> = results.keys().cloned().collect();
    let rows = metric_order(results)
        .into_iter()
        .map(|metric| ComparisonRow {
            metric: metric.to_string(),
            values: results
                .values()
                .map(|values| values.get(metric).copied())
                .collect(),
        })
        .collect();

    ComparisonTable { patterns, rows }
}

/// Best pattern for each metric by its direction; the first pattern seen wins ties
pub fn best_per_metric(results: &ResultsByPattern) -> Vec<BestMetric> {
    let mut winners = Vec::new();

    for metric in metric_order(results) {
        let direction = Direction::for_metric(metric);
        let mut best: Option<(&str, f64)> = None;

        for (pattern, values) in results.iter() {
            let Some(value) = values.get(metric).copied() else {
                continue;
            };
            match best {
                Some((_, incumbent)) if !direction.is_better(value, incumbent) => {}
                _ => best = Some((pattern.as_str(), value)),
            }
        }

        if let Some((pattern, value)) = best {
            winners.push(BestMetric {
                metric: metric.to_string(),
                pattern: pattern.to_string(),
                value,
            });
        }
    }

    winners
}

/// Per-metric before/after with percent change, in `before` order
pub fn scaling_rows(comparison: &ScalingComparison) -> Vec<ScalingRow> {
    comparison
        .before
        .iter()
        .map(|(metric, before)| {
            let after = comparison.after.get(metric).copied();
            ScalingRow {
                metric: metric.to_string(),
                before: *before,
                after: after.unwrap_or(0.0),
                change_pct: change_pct(Some(*before), after),
            }
        })
        .collect()
}

/// Min-max normalized values (0-1) among the selected patterns
pub fn heatmap_values(catalog: &Catalog, patterns: &[&str], metrics: &[&str]) -> ResultsByPattern {
    PatternScorer::normalized_matrix(&catalog.subset(patterns), metrics)
}

/// Heat-map values stretched onto the radar's 0-5 axis
pub fn radar_values(catalog: &Catalog, patterns: &[&str], metrics: &[&str]) -> ResultsByPattern {
    let mut values = heatmap_values(catalog, patterns, metrics);
    for (_, row) in values.iter_mut() {
        for (_, v) in row.iter_mut() {
            *v *= RADAR_SCALE;
        }
    }
    values
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render as CSV with header `Metric,<pattern...>`. Missing values are empty cells.
pub fn to_csv(table: &ComparisonTable) -> String {
    let mut out = String::new();

    let header: Vec<String> = std::iter::once("Metric")
        .chain(table.patterns.iter().map(String::as_str))
        .map(csv_field)
        .collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in &table.rows {
        let cells: Vec<String> = std::iter::once(csv_field(&row.metric))
            .chain(
                row.values
                    .iter()
                    .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
            )
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }

    out
}
