//! # shaker-graph
//!
//! Client module descriptors and their dependency chains.
//!
//! ## Overview
//!
//! Client modules register themselves with a call of the form
//! `YUI.add(name, factory, version, { requires: [...] })`. This crate:
//!
//! - parses such files statically with oxc and extracts a
//!   [`ModuleDescriptor`] (no code is evaluated);
//! - keeps the known descriptors of a resolution pass in a
//!   [`ModuleRegistry`];
//! - resolves the ordered list of files a module transitively needs
//!   ([`resolve_chain`]), failing on cycles instead of recursing forever.
//!
//! ## Quick Start
//!
//! ```rust
//! use shaker_graph::{ModuleRegistry, parse_descriptor, resolve_chain};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = ModuleRegistry::new();
//! registry.register(parse_descriptor(
//!     "YUI.add('utils', function (Y) {});",
//!     "autoload/utils.js",
//! )?);
//! registry.register(parse_descriptor(
//!     "YUI.add('login', function (Y) {}, '0.1', {requires: ['utils']});",
//!     "binders/login.js",
//! )?);
//!
//! let chain = resolve_chain("login", &registry)?;
//! assert_eq!(chain, vec!["autoload/utils.js", "binders/login.js"]);
//! # Ok(())
//! # }
//! ```

pub mod dependency_chain;
pub mod descriptor;
pub mod error;
pub mod registry;

pub use dependency_chain::{DependencyChain, resolve_binder, resolve_chain};
pub use descriptor::{ModuleDescriptor, parse_descriptor};
pub use error::{GraphError, ParseError, Result};
pub use registry::ModuleRegistry;

// Re-export OXC foundation types for consistent version usage across workspace
pub mod oxc {
    //! OXC types used for module parsing, re-exported so downstream crates
    //! share one version.

    /// Arena allocator for AST nodes
    pub use oxc_allocator::Allocator;

    /// Span types for source location tracking
    pub use oxc_span::SourceType;

    /// AST node types
    pub use oxc_ast::ast;

    /// AST visitor trait
    pub use oxc_ast_visit::Visit;

    /// JavaScript parser
    pub use oxc_parser::{Parser, ParserReturn};
}
