//! Shaker CLI - per-context asset resolution from the command line.
//!
//! Wraps the [`shaker`] engine in two commands:
//!
//! - `shaker build` shakes every component of an application and writes
//!   the result document (`shaker-meta.json` by default)
//! - `shaker check` runs the same pipeline and reports configuration and
//!   module errors without writing anything
//!
//! # Modules
//!
//! - [`cli`] - argument definitions
//! - [`commands`] - command implementations
//! - [`config`] - settings layered from defaults, `shaker.config.json`,
//!   `SHAKER_*` environment variables and flags
//! - [`error`] - error types with actionable hints
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - colored status output

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{BuildError, CliError, ConfigError, Result, ResultExt};
