//! Error handling for the Shaker CLI.
//!
//! `CliError` is what commands return. Domain errors (`ConfigError`,
//! `BuildError`) carry a hint telling the user what to change, and convert
//! into `CliError` through `#[from]`. Engine errors are mapped to the
//! matching `BuildError` so every failure the user sees has a hint.
//!
//! # Example
//!
//! ```rust,no_run
//! use shaker_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_settings(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Create the file or pass --config <path>")
//! }
//! ```

mod miette;

pub use self::miette::{build_error_to_miette, cli_error_to_miette};

use shaker::GraphError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings could not be loaded or are invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The shake itself failed
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Errors in the CLI's own settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested settings file does not exist
    #[error("Config file not found: {}\n\nHint: Create a shaker.config.json file or specify --config <path>", .0.display())]
    NotFound(PathBuf),

    /// Settings could not be merged or deserialized
    #[error("Failed to load settings: {0}\n\nHint: Check shaker.config.json syntax and SHAKER_* environment variables")]
    Load(String),

    /// Invalid value for a setting
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the setting
        field: String,
        /// The rejected value
        value: String,
        /// What a valid value looks like
        hint: String,
    },
}

/// Errors raised while shaking the application.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The application root does not exist or is not a directory
    #[error("Application root not found: {}\n\nHint: Run from the application directory or pass --root <dir>", .0.display())]
    RootNotFound(PathBuf),

    /// A component's shaker.json or shaker.toml is invalid
    #[error("{0}\n\nHint: Facet, variant and action names cannot contain '-', and orders may only name known facets")]
    InvalidComponentConfig(String),

    /// An autoload or binder file has no usable module registration
    #[error("Failed to parse module file: {0}\n\nHint: Every autoload and binder file must call YUI.add('<name>', ...)")]
    ModuleParse(String),

    /// Module requires form a cycle
    #[error("Circular module dependency detected:\n{chain}\n\nHint: Remove one of the requires so the modules no longer depend on each other")]
    CycleDetected {
        /// Formatted cycle, e.g. `a -> b -> a`
        chain: String,
    },

    /// The result document could not be written
    #[error("Failed to write {}: {message}\n\nHint: Check that the output directory is writable or pass --output <file>", .path.display())]
    OutputWriteFailed {
        /// Output file
        path: PathBuf,
        /// Underlying error
        message: String,
    },

    /// Some components failed; the rest were shaken
    #[error("{count} component(s) failed: {}\n\nHint: Run 'shaker check --verbose' for details", .names.join(", "))]
    ComponentsFailed {
        /// Number of failed components
        count: usize,
        /// Their names
        names: Vec<String>,
    },

    /// Any other engine error
    #[error("{0}")]
    Shake(String),
}

impl From<shaker::Error> for BuildError {
    fn from(err: shaker::Error) -> Self {
        match err {
            shaker::Error::Graph(GraphError::CycleDetected { chain }) => Self::CycleDetected { chain },
            shaker::Error::Graph(GraphError::Parse(parse)) => Self::ModuleParse(parse.to_string()),
            shaker::Error::Config(config) => Self::InvalidComponentConfig(config.to_string()),
            other => Self::Shake(other.to_string()),
        }
    }
}

impl From<shaker::Error> for CliError {
    fn from(err: shaker::Error) -> Self {
        Self::Build(err.into())
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
