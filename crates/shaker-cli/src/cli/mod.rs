//! Command-line interface definition.
//!
//! - `shaker build` - shake the application and write the result document
//! - `shaker check` - validate every component without writing output

mod commands;
mod tests;
mod validation;

use clap::Parser;

pub use commands::{BuildArgs, CheckArgs, Command};
pub use validation::parse_order;

/// Shaker - per-context asset resolution
#[derive(Parser, Debug)]
#[command(
    name = "shaker",
    version,
    about = "Resolve per-context asset lists for component-based web applications",
    long_about = "Shaker scans every component of an application, resolves the binder\n\
                  dependency chain of each action and computes, for every concrete context\n\
                  such as common-login-mobile, the ordered list of files to ship."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
