//! Error types for descriptor parsing and dependency resolution.

use thiserror::Error;

/// A module file that cannot contribute a descriptor.
///
/// Always fatal for that file: a broken module never silently resolves to
/// "no dependencies".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("failed to parse {path}: {message}")]
    Syntax { path: String, message: String },

    #[error("{path} does not register a module (no YUI.add call)")]
    NoRegistration { path: String },

    #[error("invalid module registration in {path}: {reason}")]
    InvalidRegistration { path: String, reason: String },
}

impl ParseError {
    pub fn path(&self) -> &str {
        match self {
            Self::Syntax { path, .. }
            | Self::NoRegistration { path }
            | Self::InvalidRegistration { path, .. } => path,
        }
    }
}

/// Error types for graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A module requires itself through the chain shown.
    #[error("dependency cycle detected: {chain}")]
    CycleDetected { chain: String },

    #[error("unknown module '{0}'")]
    UnknownModule(String),
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
