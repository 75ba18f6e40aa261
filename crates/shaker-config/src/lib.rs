//! # shaker-config
//!
//! Configuration models for the shaker asset resolver.
//!
//! Two kinds of files are understood:
//!
//! - `shaker.json` (or `shaker.toml`) next to every component and at the
//!   application root, describing dimensions, actions and augment rules.
//! - `application.json` at the application root, from which only the
//!   component directories (`mojitDirs`) are read.
//!
//! Everything here is plain data plus validation. [`discovery`] names the
//! files to look for and parses their content; reading them is left to the
//! caller.

pub mod application;
pub mod component;
pub mod discovery;
pub mod error;
pub mod facet;
pub mod validation;

pub use application::{ApplicationConfig, DEFAULT_COMPONENT_DIR};
pub use component::{ActionConfig, AugmentRule, ComponentConfig, ComponentRef, DimensionSpec};
pub use error::*;
pub use facet::{DEFAULT_ORDER, Facet, FacetOrder, SELECTOR_SEPARATOR, WILDCARD_ACTION};

pub use discovery::{
    APP_CONFIG_FILE, ConfigDiscovery, SHAKER_CONFIG_FILE, SHAKER_TOML_FILE, parse_value,
};
pub use validation::{ConfigValidator, SchemaValidator, validate_schema};
