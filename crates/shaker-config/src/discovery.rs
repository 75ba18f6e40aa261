//! Config file discovery
//!
//! Knows where `shaker.json` / `shaker.toml` live for a component directory
//! and where `application.json` lives for the app root, and how to parse
//! them. Existence checks and reads belong to the caller, so the same
//! discovery runs against the real filesystem or an in-memory tree.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};

pub const SHAKER_CONFIG_FILE: &str = "shaker.json";
pub const SHAKER_TOML_FILE: &str = "shaker.toml";
pub const APP_CONFIG_FILE: &str = "application.json";

/// Configuration discovery for one directory.
///
/// # Example
///
/// ```
/// use shaker_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new("mojits/header");
/// let found = discovery.find(|path| path.ends_with("shaker.toml"));
/// assert_eq!(found.unwrap(), std::path::Path::new("mojits/header/shaker.toml"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Component config files in priority order.
    pub fn candidates(&self) -> [PathBuf; 2] {
        [
            self.root.join(SHAKER_CONFIG_FILE),
            self.root.join(SHAKER_TOML_FILE),
        ]
    }

    /// First candidate for which `exists` holds.
    ///
    /// Searches in this order:
    /// 1. shaker.json
    /// 2. shaker.toml
    pub fn find(&self, exists: impl Fn(&Path) -> bool) -> Option<PathBuf> {
        let found = self.candidates().into_iter().find(|path| exists(path));
        if found.is_none() {
            debug!(root = %self.root.display(), "no shaker config, using defaults");
        }
        found
    }

    /// Location of `application.json` when this directory is the app root.
    pub fn application_file(&self) -> PathBuf {
        self.root.join(APP_CONFIG_FILE)
    }
}

/// Parse configuration text. `path` only selects the format (TOML for a
/// `.toml` extension, JSON otherwise) and names the file in errors.
pub fn parse_value(content: &str, path: &Path) -> Result<Value> {
    if path.extension().is_some_and(|ext| ext == "toml") {
        let toml_val: toml::Value =
            toml::from_str(content).map_err(|e| ConfigError::InvalidValue {
                field: SHAKER_TOML_FILE.to_string(),
                hint: Some(format!("Invalid TOML syntax: {e}")),
            })?;

        return serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
            field: SHAKER_TOML_FILE.to_string(),
            hint: Some(format!("TOML to JSON conversion failed: {e}")),
        });
    }

    serde_json::from_str(content).map_err(|e| ConfigError::InvalidValue {
        field: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| SHAKER_CONFIG_FILE.to_string()),
        hint: Some(format!("Invalid JSON: {e}")),
    })
}
