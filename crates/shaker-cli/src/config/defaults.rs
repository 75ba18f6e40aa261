use std::path::PathBuf;

/// Settings file looked up in the application root.
pub const SETTINGS_FILE: &str = "shaker.config.json";

/// Environment variable prefix, e.g. `SHAKER_ORDER`.
pub const ENV_PREFIX: &str = "SHAKER_";

pub fn default_root() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_order() -> String {
    shaker_config::DEFAULT_ORDER.to_string()
}

pub fn default_output() -> PathBuf {
    PathBuf::from(shaker::META_FILE)
}
