use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use shaker_config::{ComponentConfig, FacetOrder};

use crate::Error;
use crate::diagnostics::Diagnostic;
use crate::dimension::DimensionTree;
use crate::flatten::FlatFiles;
use crate::output::ShakerMeta;

/// Result of shaking one action. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShakenAction {
    pub files: FlatFiles,
    /// Binder chain prepended to every file list.
    pub dependencies: Vec<String>,
    /// The component's tree, kept for aggregation.
    pub dimensions: DimensionTree,
    #[serde(serialize_with = "serialize_order")]
    pub order: FacetOrder,
}

fn serialize_order<S: serde::Serializer>(order: &FacetOrder, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(order)
}

/// Every action of one component (or of the application).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShakenComponent {
    pub name: String,
    /// App-relative directory, empty for the application.
    pub root: String,
    pub config: ComponentConfig,
    pub actions: IndexMap<String, ShakenAction>,
}

impl ShakenComponent {
    pub fn action(&self, name: &str) -> Option<&ShakenAction> {
        self.actions.get(name)
    }

    /// Every concrete selector produced by any action.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.actions
            .values()
            .flat_map(|action| action.files.keys().map(String::as_str))
    }
}

/// A shaken component with the diagnostics recorded while shaking it.
#[derive(Debug, Clone)]
pub struct ComponentOutcome {
    pub component: Arc<ShakenComponent>,
    pub diagnostics: Vec<Diagnostic>,
}

/// An application action after its component references were merged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundledAction {
    pub files: FlatFiles,
    pub dependencies: Vec<String>,
    /// `component[.action]` references as declared.
    pub mojits: Vec<String>,
}

/// A component that could not be shaken. Siblings are unaffected.
#[derive(Debug)]
pub struct ComponentFailure {
    pub component: String,
    pub error: Error,
}

/// Outcome of a whole-application run.
#[derive(Debug)]
pub struct ShakeReport {
    pub meta: ShakerMeta,
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<ComponentFailure>,
}

impl ShakeReport {
    /// No component failed.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Outcome of validating every component without producing output.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Components (and `app`) that passed.
    pub checked: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<ComponentFailure>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}
