//! End-to-end tests for the evaluator over a file-backed catalog
//!
//! Test Organization:
//! - Settings-driven construction
//! - Test runs persisted to disk
//! - Session state across operations
//! - Comparison reports and CSV export

use arch_evaluator::models::{metric, pattern, scaling_metric};
use arch_evaluator::report;
use arch_evaluator::{
    Evaluator, JsonFileStore, MetricWeights, SessionContext, Settings, SimulatedProbe,
};
use tempfile::TempDir;

fn file_evaluator(dir: &TempDir, seed: u64) -> Evaluator {
    let store = JsonFileStore::new(dir.path().join("architecture_patterns.json")).unwrap();
    Evaluator::new(Box::new(store), Box::new(SimulatedProbe::with_seed(seed)))
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_from_settings_defaults_to_simulation() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings {
        data_path: temp_dir.path().join("patterns.json"),
        ..Settings::default()
    };

    let evaluator = Evaluator::from_settings(&settings).unwrap();
    assert_eq!(evaluator.probe_name(), "simulated");
    assert_eq!(evaluator.load_catalog().unwrap().len(), pattern::ALL.len());
}

#[test]
fn test_from_settings_with_real_tests_enabled() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings {
        data_path: temp_dir.path().join("patterns.json"),
        enable_real_tests: true,
        ..Settings::default()
    };

    let evaluator = Evaluator::from_settings(&settings).unwrap();
    assert_eq!(evaluator.probe_name(), "network");
}

// ============================================================================
// TEST RUNS
// ============================================================================

#[tokio::test]
async fn test_run_test_survives_a_new_evaluator() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = SessionContext::new();

    let results = file_evaluator(&temp_dir, 5)
        .run_test(&mut session, pattern::EVENT_DRIVEN, None)
        .await
        .unwrap();

    // A fresh evaluator reads the same document
    let reopened = file_evaluator(&temp_dir, 6);
    for (name, value) in results.iter() {
        assert_eq!(reopened.get_metric(pattern::EVENT_DRIVEN, name).unwrap(), *value);
    }
}

#[tokio::test]
async fn test_run_all_tests_updates_every_pattern() {
    let temp_dir = TempDir::new().unwrap();
    let evaluator = file_evaluator(&temp_dir, 9);
    let mut session = SessionContext::new();

    let all = evaluator.run_all_tests(&mut session).await.unwrap();
    let catalog = evaluator.load_catalog().unwrap();

    for (name, results) in all.iter() {
        assert_eq!(
            catalog.get_metric(name, metric::LATENCY),
            *results.get(metric::LATENCY).unwrap()
        );
    }
    assert_eq!(session.comparison_results, all);
}

// ============================================================================
// SESSION
// ============================================================================

#[tokio::test]
async fn test_session_tracks_selection_and_runs() {
    let temp_dir = TempDir::new().unwrap();
    let evaluator = file_evaluator(&temp_dir, 3);
    let catalog = evaluator.load_catalog().unwrap();
    let mut session = SessionContext::new();

    assert_eq!(
        session.select_pattern(&catalog, None).as_deref(),
        Some(pattern::MONOLITHIC)
    );

    evaluator
        .run_test(&mut session, pattern::SERVERLESS, Some("http://ignored.example"))
        .await
        .unwrap();
    assert_eq!(session.selected_pattern.as_deref(), Some(pattern::SERVERLESS));
    let run = session.test_results.clone().unwrap();
    assert_eq!(run.url.as_deref(), Some("http://ignored.example"));

    // Unknown request keeps the previous selection
    assert_eq!(
        session.select_pattern(&catalog, Some("Nope")).as_deref(),
        Some(pattern::SERVERLESS)
    );

    evaluator.simulate_scaling(&mut session, pattern::MICROSERVICES);
    assert_eq!(
        session.scaling_results.as_ref().unwrap().pattern,
        pattern::MICROSERVICES
    );

    session.clear();
    assert_eq!(session, SessionContext::default());
}

// ============================================================================
// REPORTS
// ============================================================================

#[test]
fn test_best_pattern_over_file_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let evaluator = file_evaluator(&temp_dir, 1);

    let weights: MetricWeights = "Latency=1".parse().unwrap();
    let (name, score) = evaluator.best_pattern_for(&weights).unwrap();
    assert_eq!(name, pattern::MONOLITHIC);
    assert_eq!(score, 1.0);
}

#[test]
fn test_catalog_comparison_csv() {
    let temp_dir = TempDir::new().unwrap();
    let evaluator = file_evaluator(&temp_dir, 1);
    let catalog = evaluator.load_catalog().unwrap();

    let table = report::comparison_table(&report::catalog_values(&catalog));
    let csv = report::to_csv(&table);
    let mut lines = csv.lines();

    let header = lines.next().unwrap();
    assert!(header.starts_with("Metric,Monolithic Architecture,"));
    assert_eq!(header.split(',').count(), 1 + pattern::ALL.len());
    assert_eq!(lines.next().unwrap(), "Throughput,750,1800,2500,3200,900,1200");
    assert_eq!(csv.lines().count(), 1 + metric::ALL.len());
}

#[test]
fn test_stored_and_simulated_scaling_differ() {
    let temp_dir = TempDir::new().unwrap();
    let evaluator = file_evaluator(&temp_dir, 1);
    let mut session = SessionContext::new();

    let stored = evaluator.scaling_comparison(pattern::SERVERLESS).unwrap();
    let simulated = evaluator.simulate_scaling(&mut session, pattern::SERVERLESS);

    assert_eq!(stored.after.get(scaling_metric::THROUGHPUT), Some(&8500.0));
    assert_eq!(simulated.after.get(scaling_metric::THROUGHPUT), Some(&3400.0));
}
