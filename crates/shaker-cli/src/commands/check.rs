//! Check command implementation.
//!
//! Runs the whole pipeline without writing output.

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::config::SettingsOverrides;
use crate::error::{BuildError, Result};
use crate::ui;

/// Execute the check command.
///
/// Every component's configuration is layered and validated, its autoload
/// and binder files are parsed and its chains resolved, and the application
/// actions are bundled. Missing includes and unknown component references
/// are printed as warnings.
///
/// # Errors
///
/// Returns [`BuildError::ComponentsFailed`] when any component (or the
/// application) fails.
pub async fn execute(args: CheckArgs) -> Result<()> {
    let overrides = SettingsOverrides::from(&args);
    let (settings, shaker, _runtime) = utils::prepare_shaker(&overrides, None)?;

    ui::info(&format!("Checking {}", settings.root.display()));
    let report = shaker.check().await?;

    ui::print_diagnostics(&report.diagnostics);
    for name in &report.checked {
        ui::success(&format!("{name} is valid"));
    }
    ui::print_failures(&report.failures);

    if !report.is_ok() {
        return Err(BuildError::ComponentsFailed {
            count: report.failures.len(),
            names: report.failures.iter().map(|f| f.component.clone()).collect(),
        }
        .into());
    }

    if report.diagnostics.is_empty() {
        ui::success("All checks passed!");
    } else {
        ui::warning(&format!(
            "All checks passed with {} warning(s)",
            report.diagnostics.len()
        ));
    }
    Ok(())
}
