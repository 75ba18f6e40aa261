//! Terminal output helpers.
//!
//! Status lines go to stderr so the result document can be piped.
//!
//! ```no_run
//! use shaker_cli::ui;
//!
//! ui::init_colors(false);
//! ui::info("Shaking ./app");
//! ui::success("Wrote shaker-meta.json");
//! ```

mod format;
mod messages;

pub use format::{format_duration, format_size, print_diagnostics, print_failures, print_shake_summary};
pub use messages::{debug, error, info, success, warning};

/// Whether status output should be colored.
///
/// Respects `NO_COLOR` and `FORCE_COLOR`, then falls back to whether stderr
/// is attended.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Apply `--no-color` and the environment to all status output.
pub fn init_colors(no_color: bool) {
    owo_colors::set_override(!no_color && should_use_color());
}
