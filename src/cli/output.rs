//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::error::Error;

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr, followed by its causes.
///
/// Layer wrappers repeat their inner message, so a cause is only printed
/// when its text differs from the previous line.
pub fn error(err: &(dyn Error + 'static)) {
    let mut last = err.to_string();
    eprintln!("{}: {}", "error".red().bold(), last);
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if text != last {
            eprintln!("  {} {}", "caused by:".red(), text);
            last = text;
        }
        source = cause.source();
    }
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}
