//! Recoverable problems found while shaking.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// An explicitly included file does not exist.
    MissingResource,
    /// An application action references a component or component action
    /// that was not shaken.
    MissingComponent,
}

/// A warning recorded in the run report. Never aborts a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub component: String,
    pub message: String,
    pub path: Option<String>,
}

impl Diagnostic {
    pub fn missing_resource(component: &str, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            kind: DiagnosticKind::MissingResource,
            component: component.to_string(),
            message: format!("included file '{path}' does not exist"),
            path: Some(path),
        }
    }

    pub fn missing_component(component: &str, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::MissingComponent,
            component: component.to_string(),
            message: message.into(),
            path: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.component, self.message)
    }
}

/// Append-only diagnostic sink. Every push is also logged.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        warn!(component = %diagnostic.component, kind = ?diagnostic.kind, "{}", diagnostic.message);
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
