//! Formatting utilities for sizes, durations and run summaries.

use console::Term;
use owo_colors::{OwoColorize, Stream};
use shaker::{ComponentFailure, Diagnostic, ShakerMeta};
use std::time::Duration;

/// Format file size in human-readable format.
///
/// ```
/// use shaker_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format duration in human-readable format.
///
/// ```
/// use std::time::Duration;
/// use shaker_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print one warning line per diagnostic, grouped by component.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    let mut sorted: Vec<&Diagnostic> = diagnostics.iter().collect();
    sorted.sort_by(|a, b| a.component.cmp(&b.component));
    for diagnostic in sorted {
        super::warning(&diagnostic.to_string());
    }
}

/// Print one error line per failed component.
pub fn print_failures(failures: &[ComponentFailure]) {
    for failure in failures {
        super::error(&format!("[{}] {}", failure.component, failure.error));
    }
}

/// Print a per-component summary table to stderr.
pub fn print_shake_summary(meta: &ShakerMeta, elapsed: Duration) {
    let width = (Term::stderr().size().1 as usize).clamp(20, 80);

    eprintln!(
        "\n{}",
        "Shake Summary".if_supports_color(Stream::Stderr, |t| t.bold())
    );
    eprintln!("{}", "─".repeat(width));

    for (name, actions) in &meta.mojits {
        let selectors: usize = actions.values().map(|a| a.files.len()).sum();
        eprintln!(
            "  {} {} {}",
            "▸".if_supports_color(Stream::Stderr, |t| t.blue()),
            name.if_supports_color(Stream::Stderr, |t| t.bold()),
            format!("{} action(s), {} selector(s)", actions.len(), selectors)
                .if_supports_color(Stream::Stderr, |t| t.dimmed())
        );
    }
    for (action, bundled) in &meta.app {
        eprintln!(
            "  {} app.{} {}",
            "▸".if_supports_color(Stream::Stderr, |t| t.green()),
            action,
            format!("bundles {}", bundled.mojits.join(", "))
                .if_supports_color(Stream::Stderr, |t| t.dimmed())
        );
    }

    eprintln!("{}", "─".repeat(width));
    eprintln!(
        "  {} {} component(s), {} canonical selector(s) in {}",
        "Total:".if_supports_color(Stream::Stderr, |t| t.bold()),
        meta.mojits.len(),
        meta.selectors.len(),
        format_duration(elapsed)
    );
}
