//! JSON document loader and serialization.
//!
//! Shared by the catalog file store and the settings manager.

use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Get the global settings path: ~/.config/arch-evaluator/settings.json
pub fn get_global_settings_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        ConfigError::ValidationFailed("Cannot determine user config directory".to_string())
    })?;

    Ok(config_dir.join("arch-evaluator").join("settings.json"))
}

/// Load a JSON document from file.
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    validate_document_path(path)?;

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(format!("Document not found at: {}", path.display()))
        } else {
            ConfigError::IoError(e)
        }
    })?;

    let document: T = serde_json::from_str(&content).map_err(ConfigError::InvalidJson)?;

    Ok(document)
}

/// Save a JSON document to file.
///
/// The whole document is replaced. The new content is written to a temporary
/// file in the same directory and renamed over the target, so readers never
/// observe a half-written document.
pub fn save_json_file<T: Serialize>(document: &T, path: &Path) -> Result<(), ConfigError> {
    validate_document_path(path)?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(ConfigError::IoError)?;
            parent.to_path_buf()
        }
        _ => PathBuf::from("."),
    };

    let json_content = serde_json::to_string_pretty(document).map_err(ConfigError::InvalidJson)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(ConfigError::IoError)?;
    tmp.write_all(json_content.as_bytes())
        .map_err(ConfigError::IoError)?;
    tmp.flush().map_err(ConfigError::IoError)?;
    tmp.persist(path).map_err(|e| ConfigError::IoError(e.error))?;

    Ok(())
}

/// Validate document path (.json extension required).
pub fn validate_document_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationFailed(
            "Document path cannot be empty".to_string(),
        ));
    }

    match path.extension() {
        Some(ext) if ext == "json" => {}
        Some(ext) => {
            return Err(ConfigError::ValidationFailed(format!(
                "Document must have .json extension, got .{}",
                ext.to_string_lossy()
            )))
        }
        None => {
            return Err(ConfigError::ValidationFailed(
                "Document must have .json extension".to_string(),
            ))
        }
    }

    if path.to_str().is_none() {
        return Err(ConfigError::ValidationFailed(
            "Document path contains invalid characters".to_string(),
        ));
    }

    Ok(())
}
