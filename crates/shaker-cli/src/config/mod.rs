//! CLI settings with multi-source loading.
//!
//! Priority: CLI flags > `SHAKER_*` environment > `shaker.config.json` >
//! defaults.

mod defaults;
mod loading;

use serde::{Deserialize, Serialize};
use shaker::ShakeOptions;
use shaker_config::FacetOrder;
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

pub use defaults::*;
pub use loading::SettingsOverrides;

/// Settings for one CLI run, loaded by [`ShakerSettings::load`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ShakerSettings {
    /// Application root
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Default facet order
    #[serde(default = "default_order")]
    pub order: String,

    /// Result document, relative to the root unless absolute
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Replaces `mojitDirs` from `application.json`
    #[serde(default, alias = "component_dirs", skip_serializing_if = "Option::is_none")]
    pub component_dirs: Option<Vec<String>>,

    /// Skip binder chains for every component
    #[serde(default, alias = "skip_binders")]
    pub skip_binders: bool,

    /// Upper bound on components shaken at once
    #[serde(default, alias = "max_parallel", skip_serializing_if = "Option::is_none")]
    pub max_parallel: Option<usize>,
}

impl Default for ShakerSettings {
    fn default() -> Self {
        Self {
            root: default_root(),
            order: default_order(),
            output: default_output(),
            component_dirs: None,
            skip_binders: false,
            max_parallel: None,
        }
    }
}

impl ShakerSettings {
    /// Engine options for these settings.
    pub fn shake_options(&self) -> Result<ShakeOptions> {
        let order = FacetOrder::parse(&self.order).map_err(|err| ConfigError::InvalidValue {
            field: "order".to_string(),
            value: self.order.clone(),
            hint: err.to_string(),
        })?;

        if self.max_parallel == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "maxParallel".to_string(),
                value: "0".to_string(),
                hint: "Use at least 1, or leave it unset for the default".to_string(),
            }
            .into());
        }

        Ok(ShakeOptions {
            order,
            component_dirs: self.component_dirs.clone(),
            skip_binders: self.skip_binders,
            max_parallel: self.max_parallel,
        })
    }
}
