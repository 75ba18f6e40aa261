//! Command implementations.
//!
//! - [`build`] - shake the application and write the result document
//! - [`check`] - validate every component without writing output
//!
//! Each command provides an `execute` function taking its parsed arguments.

pub mod build;
pub mod check;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use check::execute as check_execute;
