//! Evaluator: the user-facing operations over the catalog.
//!
//! Each operation loads the catalog fresh from the store; nothing is cached
//! between calls. Per-user state lives in the caller's [`SessionContext`].

use crate::analysis::{probe_for_settings, MetricWeights, PatternScorer, ScalingSimulator, ScoreEntry, TestProbe};
use crate::catalog::{Catalog, DocumentStore, JsonFileStore};
use crate::config::Settings;
use crate::error::AppError;
use crate::models::{MetricValues, ScalingComparison};
use crate::report::ResultsByPattern;
use crate::session::{ScalingRun, SessionContext, TestRun};

pub struct Evaluator {
    store: Box<dyn DocumentStore>,
    probe: Box<dyn TestProbe>,
}

impl Evaluator {
    pub fn new(store: Box<dyn DocumentStore>, probe: Box<dyn TestProbe>) -> Self {
        Evaluator { store, probe }
    }

    /// JSON file store at `settings.data_path`, probe chosen by `enable_real_tests`
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let store = JsonFileStore::new(&settings.data_path)?;
        let probe = probe_for_settings(settings)?;
        log::info!(
            "[Evaluator] Catalog at {}, {} test probe",
            settings.data_path.display(),
            probe.name()
        );
        Ok(Evaluator::new(Box::new(store), probe))
    }

    pub fn probe_name(&self) -> &'static str {
        self.probe.name()
    }

    pub fn load_catalog(&self) -> Result<Catalog, AppError> {
        Ok(self.store.load_catalog()?)
    }

    pub fn save_catalog(&self, catalog: &Catalog) -> Result<(), AppError> {
        self.store.save_catalog(catalog)?;
        crate::log_event!("Catalog saved ({} patterns)", catalog.len());
        Ok(())
    }

    /// Stored metric value; 0.0 for an unknown pattern or metric
    pub fn get_metric(&self, pattern: &str, metric: &str) -> Result<f64, AppError> {
        Ok(self.load_catalog()?.get_metric(pattern, metric))
    }

    /// Measure one pattern and write the results back into the catalog.
    ///
    /// Unknown patterns get default results and nothing is persisted.
    pub async fn run_test(
        &self,
        session: &mut SessionContext,
        pattern: &str,
        url: Option<&str>,
    ) -> Result<MetricValues, AppError> {
        let results = self.probe.measure(pattern, url).await?;

        if self.store.update_metrics(pattern, &results)? {
            session.selected_pattern = Some(pattern.to_string());
        }

        crate::log_event!(
            "Test run for '{}' via {} probe ({} metrics)",
            pattern,
            self.probe.name(),
            results.len()
        );

        session.test_results = Some(TestRun {
            pattern: pattern.to_string(),
            url: url.map(str::to_string),
            results: results.clone(),
        });
        Ok(results)
    }

    /// Test every catalog pattern (no URL), persisting each result
    pub async fn run_all_tests(&self, session: &mut SessionContext) -> Result<ResultsByPattern, AppError> {
        let catalog = self.load_catalog()?;
        let mut all_results = ResultsByPattern::with_capacity(catalog.len());

        for name in catalog.pattern_names() {
            let results = self.probe.measure(name, None).await?;
            self.store.update_metrics(name, &results)?;
            all_results.insert(name.to_string(), results);
        }

        crate::log_event!("Comparison run over {} patterns", all_results.len());
        session.comparison_results = all_results.clone();
        Ok(all_results)
    }

    /// Fixed-weight score per pattern, in catalog order
    pub fn overall_scores(&self) -> Result<MetricValues, AppError> {
        Ok(PatternScorer::overall_scores(&self.load_catalog()?))
    }

    pub fn ranking(&self) -> Result<Vec<ScoreEntry>, AppError> {
        Ok(PatternScorer::new().ranking(&self.load_catalog()?))
    }

    /// Best pattern for caller weights; all-zero weights fail with `InvalidWeights`
    pub fn best_pattern_for(&self, weights: &MetricWeights) -> Result<(String, f64), AppError> {
        let catalog = self.load_catalog()?;
        Ok(PatternScorer::best_pattern(&catalog, weights)?)
    }

    /// Stored before/after scaling data; empty for an unknown pattern
    pub fn scaling_comparison(&self, pattern: &str) -> Result<ScalingComparison, AppError> {
        Ok(self.load_catalog()?.scaling_comparison(pattern))
    }

    /// Fresh projection from the fixed baseline, remembered in the session
    pub fn simulate_scaling(&self, session: &mut SessionContext, pattern: &str) -> ScalingComparison {
        let comparison = ScalingSimulator::simulate(pattern);
        session.scaling_results = Some(ScalingRun {
            pattern: pattern.to_string(),
            comparison: comparison.clone(),
        });
        comparison
    }
}
