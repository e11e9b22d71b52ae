//! Per-interaction session state.
//!
//! Holds what one user's interaction sequence remembers between operations:
//! the selected pattern and the most recent results. It is owned by the
//! caller and passed explicitly to controller operations.

use crate::catalog::Catalog;
use crate::models::{MetricValues, ScalingComparison};
use crate::report::ResultsByPattern;
use serde::{Deserialize, Serialize};

/// Results of the most recent single-pattern test
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    pub pattern: String,
    pub url: Option<String>,
    pub results: MetricValues,
}

/// Most recent scaling projection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalingRun {
    pub pattern: String,
    pub comparison: ScalingComparison,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub selected_pattern: Option<String>,
    pub test_results: Option<TestRun>,
    /// Results of the last run over every pattern
    pub comparison_results: ResultsByPattern,
    pub scaling_results: Option<ScalingRun>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve and remember the selected pattern.
    ///
    /// Order: `requested` if it is in the catalog, then the previous selection
    /// if still present, then the first catalog pattern. `None` for an empty catalog.
    pub fn select_pattern(&mut self, catalog: &Catalog, requested: Option<&str>) -> Option<String> {
        let chosen = requested
            .filter(|name| catalog.contains(name))
            .or_else(|| {
                self.selected_pattern
                    .as_deref()
                    .filter(|name| catalog.contains(name))
            })
            .or_else(|| catalog.pattern_names().first().copied())
            .map(str::to_string);

        if let Some(name) = requested {
            if !catalog.contains(name) {
                log::warn!("[Session] Unknown pattern '{}', keeping previous selection", name);
            }
        }

        self.selected_pattern = chosen.clone();
        chosen
    }

    pub fn clear(&mut self) {
        *self = SessionContext::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::models::pattern;

    #[test]
    fn test_default_selection_is_first_pattern() {
        let mut session = SessionContext::new();
        let selected = session.select_pattern(&default_catalog(), None);
        assert_eq!(selected.as_deref(), Some(pattern::MONOLITHIC));
    }

    #[test]
    fn test_previous_selection_survives_unknown_request() {
        let catalog = default_catalog();
        let mut session = SessionContext::new();
        session.select_pattern(&catalog, Some(pattern::SERVERLESS));

        let selected = session.select_pattern(&catalog, Some("Nope"));
        assert_eq!(selected.as_deref(), Some(pattern::SERVERLESS));
        let selected = session.select_pattern(&catalog, None);
        assert_eq!(selected.as_deref(), Some(pattern::SERVERLESS));
    }

    #[test]
    fn test_empty_catalog_selects_nothing() {
        let mut session = SessionContext::new();
        assert_eq!(session.select_pattern(&Catalog::new(), None), None);
    }
}
