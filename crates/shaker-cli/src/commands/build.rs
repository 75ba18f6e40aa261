//! Build command implementation.

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::config::SettingsOverrides;
use crate::error::{BuildError, Result};
use crate::ui;
use shaker::ShakeCache;
use std::time::Instant;
use tracing::debug;

/// Execute the build command.
///
/// 1. Load settings (defaults, settings file, environment, flags)
/// 2. Shake every component and the application
/// 3. Write the result document, even when some components failed
/// 4. Report diagnostics, failures and a summary
///
/// # Errors
///
/// Returns an error when settings are invalid, the application itself
/// cannot be shaken, the document cannot be written, or any component
/// failed.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let started = Instant::now();
    let overrides = SettingsOverrides::from(&args);
    let (settings, shaker, runtime) = utils::prepare_shaker(&overrides, args.config.as_deref())?;

    ui::info(&format!("Shaking {}", settings.root.display()));
    debug!(order = %settings.order, "default facet order");

    let report = shaker.shake_all(&ShakeCache::new()).await?;

    let output = settings.output_path();
    let json = report.meta.to_json_pretty()?;
    runtime
        .write_file(&output, json.as_bytes())
        .await
        .map_err(|e| BuildError::OutputWriteFailed {
            path: output.clone(),
            message: e.to_string(),
        })?;

    ui::print_diagnostics(&report.diagnostics);
    ui::print_failures(&report.failures);
    ui::print_shake_summary(&report.meta, started.elapsed());

    if !report.is_ok() {
        return Err(BuildError::ComponentsFailed {
            count: report.failures.len(),
            names: report.failures.iter().map(|f| f.component.clone()).collect(),
        }
        .into());
    }

    ui::success(&format!(
        "Wrote {} ({})",
        output.display(),
        ui::format_size(json.len() as u64)
    ));
    Ok(())
}
