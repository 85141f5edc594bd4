//! Shared CLI output helpers for consistent operator-facing text.

use std::fmt::Display;
use std::io::{self, Write};

use owo_colors::OwoColorize;

const RULE_WIDTH: usize = 56;

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("{label:<14} {value}");
}

/// Print a successful status line.
pub fn ok(message: &str) {
    println!("{} {message}", "✓".green());
}

/// Print a warning status line.
pub fn warn(message: &str) {
    println!("{} {message}", "⚠".yellow());
}

/// Print an error status line.
pub fn error(message: &str) {
    eprintln!("{} {message}", "✗".red());
}

/// Print a single-line note.
pub fn note(message: &str) {
    println!("{message}");
}

/// Format an emphasized value.
pub fn highlight(value: impl Display) -> String {
    format!("{}", value.cyan())
}

/// Format a dimmed/muted value.
pub fn muted(value: impl Display) -> String {
    format!("{}", value.dimmed())
}

/// Print an indented table, line by line.
pub fn table(rendered: &str) {
    for line in rendered.lines() {
        println!("  {line}");
    }
}

/// Start a progress line in the format `Label... `.
pub fn progress(label: &str) {
    print!("{label}... ");
    let _ = io::stdout().flush();
}

/// Finish a progress line.
pub fn progress_done(success: bool) {
    println!("{}", if success { "ok" } else { "failed" });
}
