use crate::config::{ENV_PREFIX, SETTINGS_FILE, ShakerSettings};
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings given on the command line. Unset flags leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl From<&crate::cli::BuildArgs> for SettingsOverrides {
    fn from(args: &crate::cli::BuildArgs) -> Self {
        Self {
            root: args.root.clone(),
            order: args.order.clone(),
            output: args.output.clone(),
        }
    }
}

impl From<&crate::cli::CheckArgs> for SettingsOverrides {
    fn from(args: &crate::cli::CheckArgs) -> Self {
        Self {
            root: args.root.clone(),
            ..Self::default()
        }
    }
}

impl ShakerSettings {
    /// Load settings from every source.
    ///
    /// The settings file is `config_path` when given (and must exist), or
    /// `shaker.config.json` in the root named on the command line (`cwd`
    /// when none), when present. A relative root is resolved against `cwd`.
    pub fn load(overrides: &SettingsOverrides, config_path: Option<&Path>, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let settings_file = match config_path {
            Some(path) => {
                let path = crate::commands::utils::resolve_path(path, cwd);
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path).into());
                }
                Some(path)
            }
            None => {
                let root = overrides.root.as_deref().unwrap_or(Path::new("."));
                let candidate = crate::commands::utils::resolve_path(root, cwd).join(SETTINGS_FILE);
                candidate.is_file().then_some(candidate)
            }
        };

        if let Some(path) = settings_file {
            debug!(path = %path.display(), "loading settings file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));
        figment = figment.merge(Serialized::defaults(overrides));

        let mut settings: Self = figment
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()))?;
        settings.root = crate::commands::utils::resolve_path(&settings.root, cwd);
        Ok(settings)
    }

    /// The result document path, resolved against the root.
    pub fn output_path(&self) -> PathBuf {
        crate::commands::utils::resolve_path(&self.output, &self.root)
    }
}
