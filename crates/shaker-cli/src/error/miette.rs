//! Miette diagnostic conversion for CLI errors.

use crate::error::{BuildError, CliError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => build_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert BuildError to miette Report
pub fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::CycleDetected { chain } => {
            miette::miette!(
                help = "Remove one of the requires so the modules no longer depend on each other",
                "Circular module dependency detected:\n{}",
                chain
            )
        }
        BuildError::ComponentsFailed { count, names } => {
            miette::miette!(
                help = "Run 'shaker check --verbose' for details",
                "{} component(s) failed: {}",
                count,
                names.join(", ")
            )
        }
        _ => miette::miette!("{}", err),
    }
}
