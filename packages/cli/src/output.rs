//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fmt::Display;
use std::path::Path;

use colored::Colorize;
use copier_operations::BatchSummary;

fn info() -> colored::ColoredString {
    "[INFO]".blue().bold()
}

fn highlight(path: &Path) -> colored::ColoredString {
    path.display().to_string().yellow()
}

/// Print an informational message.
pub fn print_info(message: &str) {
    println!("{} {}", info(), message);
}

/// Announce a file transfer.
pub fn print_copying(source: &Path, destination: &Path) {
    println!(
        "{} COPYING {} TO {}",
        info(),
        highlight(source),
        highlight(destination)
    );
}

/// Print the completion line for a file transfer.
pub fn print_done() {
    println!("{} COPYING DONE!", info());
}

/// Print a failed file transfer.
pub fn print_failed(source: &Path, error: &dyn Display) {
    eprintln!(
        "{} COPYING {} FAILED: {}",
        "[ERROR]".red().bold(),
        highlight(source),
        error
    );
}

/// Print a scan entry that was not copied.
pub fn print_skipped(path: &Path, reason: &str) {
    println!("{} SKIPPING {} ({})", "[WARN]".yellow().bold(), highlight(path), reason);
}

/// Print the totals for the whole run.
pub fn print_summary(summary: &BatchSummary) {
    let totals = summary.totals;
    print_info(&format!(
        "{} SOURCE(S): {} FILE(S) COPIED, {} DIRECTORIES CREATED",
        summary.sources, totals.files_copied, totals.dirs_created
    ));

    if totals.entries_skipped > 0 {
        print_warning(&format!("{} ENTRIES SKIPPED", totals.entries_skipped));
    }
    if totals.files_failed > 0 {
        print_error(&format!("{} FILE(S) FAILED", totals.files_failed));
    }
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), message);
}
