//! Error types for shaker operations.

use shaker_config::ConfigError;
use shaker_graph::{GraphError, ParseError};

use crate::runtime::RuntimeError;

/// Errors that stop a component (or the whole run).
///
/// Recoverable problems such as a missing include file are not errors; they
/// are collected as [`crate::Diagnostic`]s.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed configuration, attributed to its component.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A module file could not be parsed, or its requires form a cycle.
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("scan of component '{component}' failed: {source}")]
    Scan {
        component: String,
        #[source]
        source: RuntimeError,
    },

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("failed to serialize shaker metadata: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A component task panicked or was cancelled.
    #[error("task for component '{component}' did not complete: {message}")]
    Task { component: String, message: String },
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Graph(GraphError::Parse(err))
    }
}

/// Result type alias for shaker operations.
pub type Result<T> = std::result::Result<T, Error>;
