//! Configuration file loading
//!
//! Reads a JSON or TOML file into the nested structure the factory is
//! built from. The format is picked by file extension.

use crate::core::{LoggerError, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(ConfigFormat::Json),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Resolve `path` against `root` unless it is already absolute
pub fn resolve_path(path: &Path, root: Option<&Path>) -> PathBuf {
    match root {
        Some(root) if path.is_relative() => root.join(path),
        _ => path.to_path_buf(),
    }
}

/// Load a configuration file
///
/// Relative paths are resolved against `root` when one is given, otherwise
/// against the working directory.
///
/// # Errors
///
/// `UnsupportedConfigFormat` for an extension other than `.json` or
/// `.toml`; `ConfigLoad` if the file cannot be read or parsed.
pub fn load_config(path: impl AsRef<Path>, root: Option<&Path>) -> Result<Value> {
    let path = resolve_path(path.as_ref(), root);
    let shown = path.display().to_string();

    let format =
        ConfigFormat::from_path(&path).ok_or_else(|| LoggerError::unsupported_format(&shown))?;

    let content =
        fs::read_to_string(&path).map_err(|e| LoggerError::config_load(&shown, e.to_string()))?;

    let value = match format {
        ConfigFormat::Json => serde_json::from_str(&content)
            .map_err(|e| LoggerError::config_load(&shown, e.to_string()))?,
        ConfigFormat::Toml => toml::from_str::<Value>(&content)
            .map_err(|e| LoggerError::config_load(&shown, e.to_string()))?,
    };

    tracing::debug!(path = %shown, ?format, "loaded logger configuration");
    Ok(value)
}
