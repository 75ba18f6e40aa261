//! `application.json` reader. Only the component directories are used.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

pub const DEFAULT_COMPONENT_DIR: &str = "mojits";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Directories, relative to the app root, whose subdirectories are
    /// components.
    #[serde(default = "default_component_dirs", rename = "mojitDirs")]
    pub component_dirs: Vec<String>,
}

fn default_component_dirs() -> Vec<String> {
    vec![DEFAULT_COMPONENT_DIR.to_string()]
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            component_dirs: default_component_dirs(),
        }
    }
}

impl ApplicationConfig {
    /// Accepts either an object or an array of contexts, in which case the
    /// first entry is the base context.
    pub fn from_value(value: Value) -> Result<Self> {
        let base = match value {
            Value::Array(mut contexts) => {
                if contexts.is_empty() {
                    return Ok(Self::default());
                }
                contexts.swap_remove(0)
            }
            other => other,
        };

        serde_json::from_value(base).map_err(|e| ConfigError::InvalidValue {
            field: "application".to_string(),
            hint: Some(e.to_string()),
        })
    }
}
