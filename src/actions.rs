//! Reporting back to the Actions runner
//!
//! Warnings and failures are written as workflow commands on stdout so the
//! runner can surface them as annotations. Progress lines are plain colored
//! console output.

use colored::Colorize;

use crate::error::Error;

/// Message used when an error renders to nothing
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Escape a message for use as workflow command data
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn command(name: &str, message: &str) -> String {
    format!("::{}::{}", name, escape_data(message))
}

pub fn warning(message: &str) {
    println!("{}", command("warning", message));
}

pub fn debug(message: &str) {
    println!("{}", command("debug", message));
}

/// Report the run as failed
///
/// The caller is responsible for exiting with a non-zero code.
pub fn set_failed(message: &str) {
    println!("{}", command("error", message));
}

/// The single human-readable message reported for a failed run
pub fn failure_message(err: &Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}

/// Print a progress line (`> label: value`)
pub fn step(label: &str, value: &str) {
    println!("{} {}: {}", ">".bright_green(), label, value.bright_cyan());
}

/// Print a line describing a write that was made (or would be, on dry runs)
pub fn changed(message: &str, dry_run: bool) {
    if dry_run {
        println!("{} {} {}", "~".yellow(), message, "(dry run)".yellow());
    } else {
        println!("{} {}", "+".bright_green(), message);
    }
}
