use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};

use arch_evaluator::analysis::{MetricWeights, ScalingAssessment};
use arch_evaluator::report::{self, ComparisonTable, ResultsByPattern};
use arch_evaluator::{
    init_logging, Catalog, Evaluator, SessionContext, Settings, SettingsManager, VERSION,
};

#[derive(Parser)]
#[command(name = "arch_evaluator", version, about = "Architecture pattern evaluator")]
struct Cli {
    /// Settings file (defaults to config/settings.json)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    /// Catalog document, overrides the settings
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog patterns
    List,
    /// Show one pattern in detail
    Show { pattern: String },
    /// Overall scores with the fixed weights, best first
    Scores,
    /// Best pattern for your metric priorities
    Best {
        /// Metric weight as "Metric=W", repeatable
        #[arg(long = "weight", required = true)]
        weights: Vec<String>,
    },
    /// Compare stored metric values across all patterns
    Compare {
        #[arg(long)]
        csv: bool,
    },
    /// Run a test for one pattern and store the results
    Test {
        pattern: String,
        /// Probe a live endpoint (requires ENABLE_REAL_TESTS=true)
        #[arg(long)]
        url: Option<String>,
    },
    /// Run tests for every pattern and compare the results
    TestAll {
        #[arg(long)]
        csv: bool,
    },
    /// Before/after load scaling for a pattern
    Scale {
        pattern: String,
        /// Project from the fixed baseline instead of the stored data
        #[arg(long)]
        simulate: bool,
    },
}

fn load_settings(cli: &Cli) -> Settings {
    let mut settings = match &cli.settings {
        Some(path) => {
            let mut s = SettingsManager::load_or_default(path);
            s.apply_env();
            s
        }
        None => SettingsManager::load(),
    };
    if let Some(data) = &cli.data {
        settings.data_path = data.clone();
    }
    settings
}

/// Catalog name for the input; unknown names pass through so runs on them soft-fail
fn resolve_pattern(catalog: &Catalog, input: &str) -> String {
    catalog.resolve_name(input).unwrap_or(input).to_string()
}

fn print_table(table: &ComparisonTable) {
    println!("{:<24} {}", "Metric", table.patterns.join(" | "));
    for row in &table.rows {
        let cells: Vec<String> = row
            .values
            .iter()
            .map(|v| v.map(|v| format!("{}", v)).unwrap_or_else(|| "-".to_string()))
            .collect();
        println!("{:<24} {}", row.metric, cells.join(" | "));
    }
}

fn print_comparison(results: &ResultsByPattern, csv: bool) {
    let table = report::comparison_table(results);
    if csv {
        print!("{}", report::to_csv(&table));
        return;
    }

    print_table(&table);
    println!();
    println!("Best pattern for each metric:");
    for best in report::best_per_metric(results) {
        println!("  {:<22} {} ({})", best.metric, best.pattern, best.value);
    }
}

fn print_scaling(pattern: &str, comparison: &arch_evaluator::ScalingComparison) {
    if comparison.is_empty() {
        println!("No scaling data for '{}'", pattern);
        return;
    }

    println!("Scaling comparison: {}", pattern);
    for row in report::scaling_rows(comparison) {
        println!(
            "  {:<18} {:>10.1} -> {:>10.1}  ({:+.1}%)",
            row.metric, row.before, row.after, row.change_pct
        );
    }

    let assessment = ScalingAssessment::from_comparison(comparison);
    println!(
        "Scaling efficiency: {} ({:+.1}% throughput)",
        assessment.efficiency, assessment.throughput_change_pct
    );
    println!(
        "Latency impact: {} ({:+.1}% latency)",
        assessment.latency_impact, assessment.latency_change_pct
    );
    println!("{}", assessment.recommendation());
}

async fn run(cli: Cli, settings: &Settings) -> anyhow::Result<()> {
    let evaluator = Evaluator::from_settings(settings).map_err(|e| anyhow!(e.user_message()))?;
    let mut session = SessionContext::new();
    let catalog = evaluator
        .load_catalog()
        .map_err(|e| anyhow!(e.user_message()))?;

    match cli.command {
        Commands::List => {
            for (name, p) in catalog.iter() {
                println!("{}\n    {}", name, p.description);
            }
        }
        Commands::Show { pattern } => {
            let resolved = catalog.resolve_name(&pattern).ok_or_else(|| {
                anyhow!(
                    "Unknown pattern '{}'. Available: {}",
                    pattern,
                    catalog.pattern_names().join(", ")
                )
            })?;
            let name = session
                .select_pattern(&catalog, Some(resolved))
                .ok_or_else(|| anyhow!("Catalog is empty"))?;
            println!("{}\n\n{}\n", name, catalog.description(&name));
            println!("Characteristics:");
            for c in catalog.characteristics(&name) {
                println!("  - {}", c);
            }
            println!("\nMetrics:");
            for metric in catalog.metric_names() {
                println!(
                    "  {:<22} {:>8} {:<10} {}",
                    metric,
                    catalog.get_metric(&name, metric),
                    catalog.metric_unit(&name, metric),
                    catalog.metric_description(&name, metric)
                );
            }
            println!("\nSources:");
            for s in catalog.sources(&name) {
                println!("  - {}", s);
            }
        }
        Commands::Scores => {
            for (rank, entry) in evaluator
                .ranking()
                .map_err(|e| anyhow!(e.user_message()))?
                .iter()
                .enumerate()
            {
                println!("{}. {:<40} {:.3}", rank + 1, entry.pattern, entry.score);
            }
        }
        Commands::Best { weights } => {
            let weights: MetricWeights = weights
                .join(",")
                .parse()
                .map_err(|e: String| anyhow!(e))?;
            let (name, score) = evaluator
                .best_pattern_for(&weights)
                .map_err(|e| anyhow!(e.user_message()))?;
            println!("Best pattern based on your priorities: {} (score {:.2})", name, score);
        }
        Commands::Compare { csv } => {
            print_comparison(&report::catalog_values(&catalog), csv);
        }
        Commands::Test { pattern, url } => {
            let name = resolve_pattern(&catalog, &pattern);
            let results = evaluator
                .run_test(&mut session, &name, url.as_deref())
                .await
                .map_err(|e| anyhow!(e.user_message()))?;
            println!("Test results for {} ({} probe):", name, evaluator.probe_name());
            for (metric, value) in results.iter() {
                println!("  {:<22} {}", metric, value);
            }
        }
        Commands::TestAll { csv } => {
            let results = evaluator
                .run_all_tests(&mut session)
                .await
                .map_err(|e| anyhow!(e.user_message()))?;
            print_comparison(&results, csv);
        }
        Commands::Scale { pattern, simulate } => {
            let name = resolve_pattern(&catalog, &pattern);
            let comparison = if simulate {
                evaluator.simulate_scaling(&mut session, &name)
            } else {
                evaluator
                    .scaling_comparison(&name)
                    .map_err(|e| anyhow!(e.user_message()))?
            };
            print_scaling(&name, &comparison);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli);

    let collector = init_logging(&settings);
    log::info!("Architecture Pattern Evaluator v{} starting", VERSION);

    let result = run(cli, &settings).await.context("Command failed");

    if let Some(collector) = collector {
        if let Err(e) = collector.flush_blocking() {
            eprintln!("[Main] WARNING: Failed to flush logs: {}", e);
        }
    }

    result
}
