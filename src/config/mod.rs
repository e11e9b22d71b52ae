//! Configuration module for the evaluator.
//!
//! # Module Structure
//!
//! - `loader`: JSON document load/save and path validation
//!
//! # Settings Management
//!
//! `SettingsManager` resolves `Settings` in three layers:
//! 1. Built-in defaults
//! 2. `config/settings.json` (or an explicit path)
//! 3. Environment overrides (`ENABLE_REAL_TESTS`, `ARCH_EVAL_DATA_PATH`, `ARCH_EVAL_LOG_DIR`)

pub mod loader;

use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Local settings file, relative to the working directory
pub const LOCAL_SETTINGS_PATH: &str = "config/settings.json";

/// Environment toggle gating real HTTP probing
pub const ENV_ENABLE_REAL_TESTS: &str = "ENABLE_REAL_TESTS";
pub const ENV_DATA_PATH: &str = "ARCH_EVAL_DATA_PATH";
pub const ENV_LOG_DIR: &str = "ARCH_EVAL_LOG_DIR";

/// Evaluator settings
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Persisted catalog document
    pub data_path: PathBuf,
    /// Use the real HTTP prober when a URL is supplied
    pub enable_real_tests: bool,

    // Latency probe
    pub latency_requests: usize,
    pub latency_concurrency: usize,
    pub latency_timeout_ms: u64,

    // Throughput probe
    pub throughput_duration_ms: u64,
    pub throughput_concurrency: usize,
    pub throughput_timeout_ms: u64,

    // Logging
    pub log_dir: PathBuf,
    pub debug_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_path: PathBuf::from("data/architecture_patterns.json"),
            enable_real_tests: false,
            latency_requests: 100,
            latency_concurrency: 10,
            latency_timeout_ms: 10_000,
            throughput_duration_ms: 10_000,
            throughput_concurrency: 50,
            throughput_timeout_ms: 5_000,
            log_dir: PathBuf::from("logs"),
            debug_logging: false,
        }
    }
}

impl Settings {
    pub fn latency_timeout(&self) -> Duration {
        Duration::from_millis(self.latency_timeout_ms)
    }

    pub fn throughput_duration(&self) -> Duration {
        Duration::from_millis(self.throughput_duration_ms)
    }

    pub fn throughput_timeout(&self) -> Duration {
        Duration::from_millis(self.throughput_timeout_ms)
    }

    /// Apply environment overrides using a lookup function.
    ///
    /// `ENABLE_REAL_TESTS` is true only for a case-insensitive "true".
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(flag) = lookup(ENV_ENABLE_REAL_TESTS) {
            self.enable_real_tests = flag.trim().eq_ignore_ascii_case("true");
        }
        if let Some(path) = lookup(ENV_DATA_PATH).filter(|p| !p.is_empty()) {
            self.data_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|d| !d.is_empty()) {
            self.log_dir = PathBuf::from(dir);
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }
}

/// Settings persistence and resolution
pub struct SettingsManager;

impl SettingsManager {
    /// Load settings from `config/settings.json`, falling back to the global
    /// settings file, then to defaults. Environment overrides are applied last.
    ///
    /// An unparsable file logs a warning and yields defaults.
    pub fn load() -> Settings {
        let local = Path::new(LOCAL_SETTINGS_PATH);
        let path = if local.exists() {
            Some(local.to_path_buf())
        } else {
            loader::get_global_settings_path()
                .ok()
                .filter(|p| p.exists())
        };

        let mut settings = match path {
            Some(p) => Self::load_or_default(&p),
            None => Settings::default(),
        };
        settings.apply_env();
        settings
    }

    /// Load settings from an explicit path, without environment overrides
    pub fn load_from(path: &Path) -> Result<Settings, ConfigError> {
        loader::load_json_file(path)
    }

    /// Load settings from `path`; a missing or broken file yields defaults
    pub fn load_or_default(path: &Path) -> Settings {
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(ConfigError::FileNotFound(_)) => Settings::default(),
            Err(e) => {
                log::warn!(
                    "[Config] Failed to read {}, falling back to defaults: {}",
                    path.display(),
                    e
                );
                Settings::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
        loader::save_json_file(settings, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(!settings.enable_real_tests);
        assert_eq!(settings.latency_requests, 100);
        assert_eq!(settings.latency_concurrency, 10);
        assert_eq!(settings.throughput_concurrency, 50);
        assert_eq!(settings.latency_timeout(), Duration::from_secs(10));
        assert_eq!(settings.throughput_timeout(), Duration::from_secs(5));
        assert_eq!(
            settings.data_path,
            PathBuf::from("data/architecture_patterns.json")
        );
    }

    #[test]
    fn test_env_toggle_is_case_insensitive() {
        let mut settings = Settings::default();
        settings.apply_env_with(|key| (key == ENV_ENABLE_REAL_TESTS).then(|| "TRUE".to_string()));
        assert!(settings.enable_real_tests);

        settings.apply_env_with(|key| (key == ENV_ENABLE_REAL_TESTS).then(|| "yes".to_string()));
        assert!(!settings.enable_real_tests);
    }

    #[test]
    fn test_env_path_overrides() {
        let mut settings = Settings::default();
        settings.apply_env_with(|key| match key {
            ENV_DATA_PATH => Some("/tmp/catalog.json".to_string()),
            ENV_LOG_DIR => Some(String::new()),
            _ => None,
        });
        assert_eq!(settings.data_path, PathBuf::from("/tmp/catalog.json"));
        assert_eq!(settings.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_partial_settings_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"enable_real_tests": true, "latency_requests": 5}"#).unwrap();

        let settings = SettingsManager::load_from(&path).unwrap();
        assert!(settings.enable_real_tests);
        assert_eq!(settings.latency_requests, 5);
        assert_eq!(settings.throughput_concurrency, 50);
    }

    #[test]
    fn test_broken_settings_file_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        assert_eq!(SettingsManager::load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_save_and_reload_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config/settings.json");

        let mut settings = Settings::default();
        settings.debug_logging = true;
        settings.throughput_duration_ms = 250;
        SettingsManager::save_to(&settings, &path).unwrap();

        assert_eq!(SettingsManager::load_from(&path).unwrap(), settings);
    }
}
