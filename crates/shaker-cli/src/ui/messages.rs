//! Status message functions for terminal output.

use owo_colors::{OwoColorize, Stream, Style};

fn marker(symbol: &str, style: Style) -> String {
    symbol
        .if_supports_color(Stream::Stderr, |s| s.style(style))
        .to_string()
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", marker("✓", Style::new().green().bold()), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", marker("ℹ", Style::new().blue().bold()), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        marker("⚠", Style::new().yellow().bold()),
        message.if_supports_color(Stream::Stderr, |m| m.yellow())
    );
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!(
        "{} {}",
        marker("✗", Style::new().red().bold()),
        message.if_supports_color(Stream::Stderr, |m| m.red())
    );
}

/// Print a debug message to stderr (only if RUST_LOG is set).
pub fn debug(message: &str) {
    if std::env::var_os("RUST_LOG").is_some() {
        eprintln!(
            "{} {}",
            marker("◆", Style::new().dimmed()),
            message.if_supports_color(Stream::Stderr, |m| m.dimmed())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        success("Success message");
        info("Info message");
        warning("Warning message");
        error("Error message");
        debug("Debug message");
    }
}
