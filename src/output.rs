//! User-facing terminal messages.
//!
//! Diagnostics go to stderr so stdout carries only the run summary.

use owo_colors::OwoColorize;

fn is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {msg}");
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {msg}");
    }
}

/// Print a plain line to stdout (no prefix). Used for the JSON summary, which users may script against.
pub fn print_user(msg: &str) {
    println!("{msg}");
}
