#![cfg_attr(docsrs, feature(doc_cfg))]

//! # shaker
//!
//! Per-context asset resolution for component-based web applications.
//!
//! Every component ships scripts and stylesheets laid out by facet
//! (`assets/<facet>/<variant>/...`). For each action of each component this
//! crate works out, for every concrete context such as `common-login-mobile`,
//! the ordered list of files to ship, prefixed by the transitive dependency
//! chain of the action's binder module.
//!
//! ## Pipeline
//!
//! 1. [`scan`] collects each component's files through a [`Runtime`].
//! 2. [`builder`] turns configuration and files into a [`DimensionTree`].
//! 3. [`dispatch`] cascades the facets of an order into one another.
//! 4. [`flatten`] walks the dispatched tree to concrete selectors.
//! 5. [`aggregate`] folds referenced components into application actions.
//! 6. [`selector`] reduces the produced selectors to the canonical set.
//!
//! [`Shaker`] drives all of it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use shaker::{NativeRuntime, ShakeCache, Shaker};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = ShakeCache::new();
//! let report = Shaker::new("./app", Arc::new(NativeRuntime))
//!     .shake_all(&cache)
//!     .await?;
//!
//! for failure in &report.failures {
//!     eprintln!("{}: {}", failure.component, failure.error);
//! }
//! println!("{:?}", report.meta.selectors);
//! # Ok(()) }
//! ```

pub mod aggregate;
pub mod builder;
pub mod cache;
pub mod diagnostics;
pub mod dimension;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod flatten;
pub mod output;
pub mod paths;
pub mod result;
pub mod runtime;
pub mod scan;
pub mod selector;
pub mod shake;
pub mod stages;

// Test utilities (available in test builds and when test-utils feature is enabled)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::bundle_components;
pub use builder::TreeBuilder;
pub use cache::{CacheKey, CacheStats, ShakeCache};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use dimension::{DimensionNode, DimensionTree, merge, merge_concat};
pub use dispatch::{DispatchStep, Dispatched, dispatch};
pub use error::{Error, Result};
pub use filter::filter_resources;
pub use flatten::{FlatFiles, flatten};
pub use output::{META_FILE, ShakerMeta};
pub use result::{
    BundledAction, CheckReport, ComponentFailure, ComponentOutcome, ShakeReport, ShakenAction,
    ShakenComponent,
};
pub use runtime::{NativeRuntime, Runtime, RuntimeError, RuntimeResult};
pub use scan::{ComponentResources, discover_components, scan_component};
pub use selector::canonicalize;
pub use shake::{APP_NAME, ShakeOptions, Shaker};
pub use stages::{AugmentStage, Passthrough, ResourceStage};

// Configuration and graph types used in this crate's API
pub use shaker_config::{ComponentConfig, Facet, FacetOrder};
pub use shaker_graph::{GraphError, ModuleDescriptor, ModuleRegistry, ParseError};
