//! Logging utilities with colored output.
//!
//! Provides the `log!` macro for terminal output with a colored module prefix.
//! Every line is a command result, so messages are always printed in full.
//!
//! # Example
//!
//! ```ignore
//! log!("sitemap"; "{} urls total", count);
//! ```

use colored::{ColoredString, Colorize};
use std::io::{Write, stdout};

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix.
#[inline]
pub fn log(module: &str, message: &str) {
    let line = format_line(module, message);

    let mut stdout = stdout().lock();
    writeln!(stdout, "{line}").ok();
    stdout.flush().ok();
}

/// Prefix `message` with the colored `[module]` tag.
fn format_line(module: &str, message: &str) -> String {
    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());
    format!("{prefix} {message}")
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "check" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

// ============================================================================
// Tests
// ============================================================================
