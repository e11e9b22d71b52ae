//! Min-max metric normalizer.
//!
//! Maps the raw values of ONE metric across patterns into [0, 1], where 1.0 is
//! the best value for the metric's direction. All comparison views (scores,
//! radar, heat map) share this single policy.

use crate::models::Direction;

/// Normalize `values` into [0, 1], preserving length and order.
///
/// - empty input → empty output
/// - all values equal → all 1.0, regardless of direction
/// - higher-is-better: `(v - min) / (max - min)`
/// - lower-is-better: `1 - (v - min) / (max - min)`
pub fn normalize(values: &[f64], direction: Direction) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let min_val = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max_val = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max_val == min_val {
        return vec![1.0; values.len()];
    }

    let range = max_val - min_val;
    values
        .iter()
        .map(|v| {
            let position = (v - min_val) / range;
            match direction {
                Direction::HigherIsBetter => position,
                Direction::LowerIsBetter => 1.0 - position,
            }
        })
        .collect()
}

/// Normalize using the fixed direction policy for `metric_name`
pub fn normalize_metric(values: &[f64], metric_name: &str) -> Vec<f64> {
    normalize(values, Direction::for_metric(metric_name))
}
