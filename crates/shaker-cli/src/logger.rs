//! Logging setup for the Shaker CLI.
//!
//! Verbosity comes from the global flags: `--verbose` turns on debug output
//! for the shaker crates, `--quiet` keeps errors only, and otherwise
//! `RUST_LOG` applies with an info-level fallback.
//!
//! ```rust,no_run
//! use shaker_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("shaking application");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "shaker=debug,shaker_config=debug,shaker_graph=debug,shaker_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "shaker=info,shaker_config=info,shaker_graph=info,shaker_cli=info";

/// Pick the filter directives for the given flags.
///
/// Returns `None` when `RUST_LOG` should decide.
pub fn filter_directives(verbose: bool, quiet: bool) -> Option<&'static str> {
    if verbose {
        Some(VERBOSE_FILTER)
    } else if quiet {
        Some(QUIET_FILTER)
    } else {
        None
    }
}

/// Initialize the global tracing subscriber. Call once, before any logging.
///
/// Precedence: `--verbose`, then `--quiet`, then `RUST_LOG`, then info for
/// the shaker crates.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = match filter_directives(verbose, quiet) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };
    init_logger_with_filter(filter, no_color || !should_use_colors());
}

/// Initialize logging with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    // A second initialization (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Whether log output should be colored.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
