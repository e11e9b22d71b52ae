//! Catalog document stores.
//!
//! The catalog is persisted as ONE document that is read and written
//! wholesale. `update_metrics` is a full read-modify-write of that document.
//!
//! `JsonFileStore` serializes its own writers with a mutex and replaces the
//! file atomically; separate processes sharing one file still race, and the
//! last writer wins.

use super::{default_catalog, Catalog};
use crate::config::loader;
use crate::error::ConfigError;
use crate::models::MetricValues;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

/// Persistence seam for the pattern catalog
pub trait DocumentStore: Send + Sync {
    /// Read the whole catalog. A missing document is materialized from the
    /// built-in defaults and persisted; it is never reported as an error.
    fn load_catalog(&self) -> Result<Catalog, ConfigError>;

    /// Replace the whole persisted catalog
    fn save_catalog(&self, catalog: &Catalog) -> Result<(), ConfigError>;

    /// Reload, overwrite the named pattern's existing metric values, persist.
    ///
    /// Returns false (and writes nothing) if the pattern is not in the catalog.
    fn update_metrics(&self, pattern: &str, values: &MetricValues) -> Result<bool, ConfigError> {
        let mut catalog = self.load_catalog()?;
        if !catalog.apply_metric_values(pattern, values) {
            log::warn!(
                "[Store] Pattern '{}' not in catalog, test results not persisted",
                pattern
            );
            return Ok(false);
        }
        self.save_catalog(&catalog)?;
        Ok(true)
    }
}

/// File-backed store holding the catalog as pretty-printed JSON
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        loader::validate_document_path(&path)?;
        Ok(JsonFileStore {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_unlocked(&self, catalog: &Catalog) -> Result<(), ConfigError> {
        loader::save_json_file(catalog, &self.path)?;
        log::debug!(
            "[Store] Persisted {} patterns to {}",
            catalog.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        match loader::load_json_file::<Catalog>(&self.path) {
            Ok(catalog) => Ok(catalog),
            Err(ConfigError::FileNotFound(_)) => {
                crate::log_event!(
                    "Catalog document {} missing, initializing built-in defaults",
                    self.path.display()
                );
                let catalog = default_catalog();
                let _guard = self
                    .write_lock
                    .lock()
                    .map_err(|e| ConfigError::ValidationFailed(format!("Store lock poisoned: {}", e)))?;
                self.write_unlocked(&catalog)?;
                Ok(catalog)
            }
            Err(e) => Err(e),
        }
    }

    fn save_catalog(&self, catalog: &Catalog) -> Result<(), ConfigError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| ConfigError::ValidationFailed(format!("Store lock poisoned: {}", e)))?;
        self.write_unlocked(catalog)
    }

    fn update_metrics(&self, pattern: &str, values: &MetricValues) -> Result<bool, ConfigError> {
        // Hold the lock across the read-modify-write so in-process writers do not interleave
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| ConfigError::ValidationFailed(format!("Store lock poisoned: {}", e)))?;

        let mut catalog = match loader::load_json_file::<Catalog>(&self.path) {
            Ok(catalog) => catalog,
            Err(ConfigError::FileNotFound(_)) => default_catalog(),
            Err(e) => return Err(e),
        };

        if !catalog.apply_metric_values(pattern, values) {
            log::warn!(
                "[Store] Pattern '{}' not in catalog, test results not persisted",
                pattern
            );
            return Ok(false);
        }

        self.write_unlocked(&catalog)?;
        crate::log_event!("Stored {} metric values for '{}'", values.len(), pattern);
        Ok(true)
    }
}

/// In-memory store, used for tests and throwaway sessions
pub struct MemoryStore {
    document: RwLock<Option<Catalog>>,
}

impl MemoryStore {
    /// Empty store; the first load materializes the defaults
    pub fn new() -> Self {
        MemoryStore {
            document: RwLock::new(None),
        }
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        MemoryStore {
            document: RwLock::new(Some(catalog)),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        let mut document = self
            .document
            .write()
            .map_err(|e| ConfigError::ValidationFailed(format!("Store lock poisoned: {}", e)))?;
        Ok(document.get_or_insert_with(default_catalog).clone())
    }

    fn save_catalog(&self, catalog: &Catalog) -> Result<(), ConfigError> {
        let mut document = self
            .document
            .write()
            .map_err(|e| ConfigError::ValidationFailed(format!("Store lock poisoned: {}", e)))?;
        *document = Some(catalog.clone());
        Ok(())
    }
}
