//! Test strategies for measuring a pattern's metrics.
//!
//! [`TestProbe`] is the seam between the controller and the way results are
//! produced. [`SimulatedProbe`] jitters the per-pattern baselines;
//! [`NetworkProbe`] issues real HTTP requests against a user-supplied URL and
//! falls back to simulation when no URL is given. The strategy is chosen once
//! from settings by [`probe_for_settings`].
//!
//! Network failures are counted into the error rate and never retried. A run
//! where every request fails reports a 100% error rate rather than an error.

use super::simulator::TestGenerator;
use crate::config::Settings;
use crate::error::ProbeError;
use crate::models::{metric, MetricValues};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use hdrhistogram::Histogram;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant};

static HTTP_URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+$").expect("Invalid HTTP URL regex"));

/// Placeholder for metrics HTTP probing cannot observe
const UNMEASURED_RATING: f64 = 3.0;
const UNMEASURED_UTILIZATION: f64 = 60.0;

#[async_trait]
pub trait TestProbe: Send + Sync {
    /// Short strategy name for logs
    fn name(&self) -> &'static str;

    /// Measure the metrics of `pattern`, optionally against a live `url`
    async fn measure(&self, pattern: &str, url: Option<&str>) -> Result<MetricValues, ProbeError>;
}

/// Validate that `url` is an absolute http(s) URL
pub fn validate_url(url: &str) -> Result<(), ProbeError> {
    if HTTP_URL_REGEX.is_match(url.trim()) {
        Ok(())
    } else {
        Err(ProbeError::InvalidUrl(url.to_string()))
    }
}

// ============================================================================
// SIMULATED
// ============================================================================

/// Randomized results around per-pattern baselines. URLs are ignored.
pub struct SimulatedProbe {
    generator: Mutex<TestGenerator>,
}

impl SimulatedProbe {
    pub fn new() -> Self {
        SimulatedProbe {
            generator: Mutex::new(TestGenerator::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        SimulatedProbe {
            generator: Mutex::new(TestGenerator::with_seed(seed)),
        }
    }

    pub fn simulate(&self, pattern: &str) -> MetricValues {
        // A poisoned generator is still a valid RNG
        let mut generator = self
            .generator
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        generator.simulate(pattern)
    }
}

impl Default for SimulatedProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TestProbe for SimulatedProbe {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn measure(&self, pattern: &str, url: Option<&str>) -> Result<MetricValues, ProbeError> {
        if let Some(url) = url {
            log::debug!(
                "[Probe] Real tests disabled, ignoring URL {} for '{}'",
                url,
                pattern
            );
        }
        Ok(self.simulate(pattern))
    }
}

// ============================================================================
// NETWORK
// ============================================================================

/// Request counts and timings for the network probe
#[derive(Clone, Debug, PartialEq)]
pub struct ProbeConfig {
    pub latency_requests: usize,
    pub latency_concurrency: usize,
    pub latency_timeout: Duration,
    pub throughput_duration: Duration,
    pub throughput_concurrency: usize,
    pub throughput_timeout: Duration,
}

impl ProbeConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        ProbeConfig {
            latency_requests: settings.latency_requests,
            latency_concurrency: settings.latency_concurrency.max(1),
            latency_timeout: settings.latency_timeout(),
            throughput_duration: settings.throughput_duration(),
            throughput_concurrency: settings.throughput_concurrency.max(1),
            throughput_timeout: settings.throughput_timeout(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Result of a fixed-count latency test
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatencyReport {
    pub avg_latency_ms: f64,
    pub min_latency_ms: f64,
    pub max_latency_ms: f64,
    pub p95_latency_ms: f64,
    pub successful_requests: usize,
    /// Transport errors plus non-2xx responses, percent of all requests
    pub error_rate: f64,
    pub total_requests: usize,
    pub errors: usize,
}

/// Result of a fixed-duration throughput test
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThroughputReport {
    /// All requests per second, failed ones included
    pub throughput: f64,
    pub successful_throughput: f64,
    pub error_rate: f64,
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub avg_latency_ms: f64,
    pub p95_latency_ms: f64,
    pub duration_secs: f64,
}

/// One completed request: elapsed ms and status code
type Sample = Result<(f64, u16), reqwest::Error>;

#[derive(Default)]
struct WorkerTally {
    requests: usize,
    successful: usize,
    failed: usize,
    latencies_ms: Vec<f64>,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// 95th percentile in ms, recorded at microsecond resolution
fn p95_ms(latencies_ms: &[f64]) -> Result<f64, ProbeError> {
    if latencies_ms.is_empty() {
        return Ok(0.0);
    }

    let mut histogram =
        Histogram::<u64>::new(3).map_err(|e| ProbeError::Histogram(e.to_string()))?;
    for ms in latencies_ms {
        let us = (ms * 1000.0).round().max(0.0) as u64;
        histogram
            .record(us)
            .map_err(|e| ProbeError::Histogram(e.to_string()))?;
    }
    Ok(histogram.value_at_quantile(0.95) as f64 / 1000.0)
}

/// HTTP prober. Without a URL it simulates like [`SimulatedProbe`].
pub struct NetworkProbe {
    client: Client,
    config: ProbeConfig,
    fallback: SimulatedProbe,
}

impl NetworkProbe {
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ProbeError::ClientBuild(e.to_string()))?;
        Ok(NetworkProbe {
            client,
            config,
            fallback: SimulatedProbe::new(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ProbeError> {
        Self::new(ProbeConfig::from_settings(settings))
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    async fn timed_get(&self, url: &str, timeout: Duration) -> Sample {
        let start = Instant::now();
        let response = self.client.get(url).timeout(timeout).send().await?;
        let status = response.status().as_u16();
        response.bytes().await?;
        Ok((start.elapsed().as_secs_f64() * 1000.0, status))
    }

    /// Issue a fixed number of GETs with bounded concurrency
    pub async fn run_latency_test(&self, url: &str) -> Result<LatencyReport, ProbeError> {
        validate_url(url)?;
        let total = self.config.latency_requests;
        let timeout = self.config.latency_timeout;

        log::info!(
            "[Probe] Latency test: {} requests, concurrency {} against {}",
            total,
            self.config.latency_concurrency,
            url
        );

        let samples: Vec<Sample> = stream::iter(0..total)
            .map(|_| self.timed_get(url, timeout))
            .buffer_unordered(self.config.latency_concurrency)
            .collect()
            .await;

        let mut latencies = Vec::with_capacity(samples.len());
        let mut statuses = Vec::with_capacity(samples.len());
        let mut errors = 0usize;
        for sample in samples {
            match sample {
                Ok((ms, status)) => {
                    latencies.push(ms);
                    statuses.push(status);
                }
                Err(e) => {
                    log::debug!("[Probe] Request failed: {}", e);
                    errors += 1;
                }
            }
        }

        if latencies.is_empty() {
            log::warn!("[Probe] All {} latency requests to {} failed", total, url);
            return Ok(LatencyReport {
                avg_latency_ms: 0.0,
                min_latency_ms: 0.0,
                max_latency_ms: 0.0,
                p95_latency_ms: 0.0,
                successful_requests: 0,
                error_rate: 100.0,
                total_requests: total,
                errors,
            });
        }

        let successful = statuses.iter().filter(|s| is_success(**s)).count();
        let failed = errors + (statuses.len() - successful);

        Ok(LatencyReport {
            avg_latency_ms: mean(&latencies),
            min_latency_ms: latencies.iter().copied().fold(f64::INFINITY, f64::min),
            max_latency_ms: latencies.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            p95_latency_ms: p95_ms(&latencies)?,
            successful_requests: successful,
            error_rate: failed as f64 / total as f64 * 100.0,
            total_requests: total,
            errors,
        })
    }

    /// Run concurrent workers issuing GETs back to back until the duration elapses
    pub async fn run_throughput_test(&self, url: &str) -> Result<ThroughputReport, ProbeError> {
        validate_url(url)?;
        let duration = self.config.throughput_duration;
        let timeout = self.config.throughput_timeout;
        let deadline = Instant::now() + duration;

        log::info!(
            "[Probe] Throughput test: {} workers for {:?} against {}",
            self.config.throughput_concurrency,
            duration,
            url
        );

        let workers = (0..self.config.throughput_concurrency).map(move |_| async move {
            let mut tally = WorkerTally::default();
            while Instant::now() < deadline {
                tally.requests += 1;
                match self.timed_get(url, timeout).await {
                    Ok((ms, status)) => {
                        if is_success(status) {
                            tally.successful += 1;
                        } else {
                            tally.failed += 1;
                        }
                        tally.latencies_ms.push(ms);
                    }
                    Err(_) => tally.failed += 1,
                }
            }
            tally
        });

        let mut total = WorkerTally::default();
        for tally in futures::future::join_all(workers).await {
            total.requests += tally.requests;
            total.successful += tally.successful;
            total.failed += tally.failed;
            total.latencies_ms.extend(tally.latencies_ms);
        }

        let secs = duration.as_secs_f64();
        let per_sec = |count: usize| if secs > 0.0 { count as f64 / secs } else { 0.0 };

        Ok(ThroughputReport {
            throughput: per_sec(total.requests),
            successful_throughput: per_sec(total.successful),
            error_rate: if total.requests > 0 {
                total.failed as f64 / total.requests as f64 * 100.0
            } else {
                0.0
            },
            total_requests: total.requests,
            successful_requests: total.successful,
            failed_requests: total.failed,
            avg_latency_ms: mean(&total.latencies_ms),
            p95_latency_ms: p95_ms(&total.latencies_ms)?,
            duration_secs: secs,
        })
    }
}

/// Map probe reports onto the catalog's metric set
pub fn metrics_from_reports(latency: &LatencyReport, throughput: &ThroughputReport) -> MetricValues {
    let mut values = MetricValues::with_capacity(metric::ALL.len());
    values.insert(metric::THROUGHPUT.to_string(), throughput.throughput);
    values.insert(metric::LATENCY.to_string(), latency.avg_latency_ms);
    values.insert(metric::AVAILABILITY.to_string(), (1.0 - latency.error_rate / 100.0) * 100.0);
    values.insert(metric::RESOURCE_UTILIZATION.to_string(), UNMEASURED_UTILIZATION);
    for rated in metric::RATED {
        values.insert(rated.to_string(), UNMEASURED_RATING);
    }
    values
}

#[async_trait]
impl TestProbe for NetworkProbe {
    fn name(&self) -> &'static str {
        "network"
    }

    async fn measure(&self, pattern: &str, url: Option<&str>) -> Result<MetricValues, ProbeError> {
        let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
            return Ok(self.fallback.simulate(pattern));
        };

        validate_url(url)?;
        let latency = self.run_latency_test(url).await?;
        let throughput = self.run_throughput_test(url).await?;

        crate::log_event!(
            "Network test for '{}': {:.1} req/s, {:.1} ms avg, {:.1}% errors",
            pattern,
            throughput.throughput,
            latency.avg_latency_ms,
            latency.error_rate
        );

        Ok(metrics_from_reports(&latency, &throughput))
    }
}

/// Select the test strategy for these settings
pub fn probe_for_settings(settings: &Settings) -> Result<Box<dyn TestProbe>, ProbeError> {
    if settings.enable_real_tests {
        Ok(Box::new(NetworkProbe::from_settings(settings)?))
    } else {
        Ok(Box::new(SimulatedProbe::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pattern;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("http://localhost:8080/health").is_ok());
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("example.com").is_err());
        assert!(validate_url("http://").is_err());
    }

    #[test]
    fn test_p95() {
        let latencies: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let p95 = p95_ms(&latencies).unwrap();
        assert!((p95 - 95.0).abs() < 0.1, "p95 was {}", p95);
        assert_eq!(p95_ms(&[]).unwrap(), 0.0);
    }

    #[test]
    fn test_metrics_from_reports() {
        let latency = LatencyReport {
            avg_latency_ms: 42.0,
            min_latency_ms: 10.0,
            max_latency_ms: 90.0,
            p95_latency_ms: 80.0,
            successful_requests: 98,
            error_rate: 2.0,
            total_requests: 100,
            errors: 2,
        };
        let throughput = ThroughputReport {
            throughput: 512.5,
            successful_throughput: 500.0,
            error_rate: 2.4,
            total_requests: 5125,
            successful_requests: 5000,
            failed_requests: 125,
            avg_latency_ms: 40.0,
            p95_latency_ms: 70.0,
            duration_secs: 10.0,
        };

        let values = metrics_from_reports(&latency, &throughput);
        assert_eq!(values.keys().map(String::as_str).collect::<Vec<_>>(), metric::ALL.to_vec());
        assert_eq!(values.get(metric::THROUGHPUT), Some(&512.5));
        assert_eq!(values.get(metric::LATENCY), Some(&42.0));
        assert_eq!(values.get(metric::AVAILABILITY), Some(&98.0));
        assert_eq!(values.get(metric::RESOURCE_UTILIZATION), Some(&60.0));
        assert_eq!(values.get(metric::ELASTICITY), Some(&3.0));
    }

    #[tokio::test]
    async fn test_simulated_probe_ignores_url() {
        let probe = SimulatedProbe::with_seed(3);
        let values = probe
            .measure(pattern::MICROSERVICES, Some("http://localhost:1"))
            .await
            .unwrap();
        assert_eq!(values.len(), 8);
    }

    #[tokio::test]
    async fn test_network_probe_without_url_simulates() {
        let probe = NetworkProbe::new(ProbeConfig::default()).unwrap();
        let values = probe.measure(pattern::MONOLITHIC, None).await.unwrap();
        let throughput = values.get(metric::THROUGHPUT).copied().unwrap();
        assert!((675.0..=825.0).contains(&throughput));
    }

    #[tokio::test]
    async fn test_network_probe_rejects_bad_url() {
        let probe = NetworkProbe::new(ProbeConfig::default()).unwrap();
        let result = probe.measure(pattern::MONOLITHIC, Some("not a url")).await;
        assert!(matches!(result, Err(ProbeError::InvalidUrl(_))));
    }

    #[test]
    fn test_probe_selection() {
        let mut settings = Settings::default();
        assert_eq!(probe_for_settings(&settings).unwrap().name(), "simulated");
        settings.enable_real_tests = true;
        assert_eq!(probe_for_settings(&settings).unwrap().name(), "network");
    }
}
