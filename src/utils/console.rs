//! Line-oriented user output that stays readable while the terminal is in raw mode.
//!
//! Raw mode turns off output post-processing, so a bare `\n` moves down without
//! returning to column zero. Every line written here ends with `\r\n` while raw
//! mode is active.

use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Line terminator for the current terminal mode.
pub fn line_ending() -> &'static str {
    if raw_mode_active() { "\r\n" } else { "\n" }
}

#[cfg(feature = "keys")]
fn raw_mode_active() -> bool {
    crossterm::terminal::is_raw_mode_enabled().unwrap_or(false)
}

#[cfg(not(feature = "keys"))]
fn raw_mode_active() -> bool {
    false
}

fn write_line(mut out: impl Write, msg: &str) {
    let ending = line_ending();
    // Output is best effort; a closed stdout must not stop playback
    let _ = write!(out, "{}{ending}", msg.replace('\n', ending));
    let _ = out.flush();
}

pub fn line(msg: &str) {
    write_line(io::stdout().lock(), msg);
}

pub fn info(msg: &str) {
    write_line(io::stdout().lock(), &format!("{} {msg}", "•".cyan()));
}

pub fn warn(msg: &str) {
    write_line(io::stderr().lock(), &format!("{} {msg}", "Warning:".yellow().bold()));
}

pub fn error(msg: &str) {
    write_line(io::stderr().lock(), &format!("{} {msg}", "Error:".red().bold()));
}
