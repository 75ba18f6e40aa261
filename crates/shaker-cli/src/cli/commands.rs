use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::parse_order;

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Shake the application and write the result document
    ///
    /// Every component under the configured component directories is
    /// shaken, the application actions are bundled with the components
    /// they reference and the result is written as JSON.
    Build(BuildArgs),

    /// Validate component configuration and module files
    ///
    /// Runs the whole pipeline without writing output. Exits non-zero when
    /// any component fails.
    Check(CheckArgs),
}

/// Arguments for the build command
#[derive(Args, Debug, Default, Clone)]
pub struct BuildArgs {
    /// Application root directory
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Default facet order for actions that do not set one
    ///
    /// Example: common-action-device-skin-region-lang
    #[arg(long, value_name = "ORDER", value_parser = parse_order)]
    pub order: Option<String>,

    /// Output file, relative to the application root
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Settings file (defaults to <root>/shaker.config.json when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Args, Debug, Default, Clone)]
pub struct CheckArgs {
    /// Application root directory
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}
