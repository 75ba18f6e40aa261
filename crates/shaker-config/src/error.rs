//! Error types for configuration validation and loading.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Config parsing errors
    #[error("invalid config value for '{field}'{}", hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    // Schema errors, always attributed to the component that owns the file
    #[error("invalid shaker config for component '{component}': {message}")]
    Schema {
        component: String,
        message: String,
        hint: Option<String>,
    },

    #[error("invalid facet order '{order}': {reason}")]
    InvalidOrder { order: String, reason: String },

    #[error("unknown facet '{0}' (expected one of common, action, device, skin, region, lang)")]
    UnknownFacet(String),
}

impl ConfigError {
    /// Attach a component name to an error raised while reading that
    /// component's configuration.
    pub fn for_component(self, component: &str) -> Self {
        match self {
            Self::Schema { .. } => self,
            other => Self::Schema {
                component: component.to_string(),
                message: other.to_string(),
                hint: None,
            },
        }
    }
}
