//! File logging setup.
//!
//! Logs go to a per-user file because the terminal is shared with the
//! prompt, the spinner and raw-mode key input. Failing to open the log never
//! stops playback; the caller warns and carries on without a file logger.

use crate::constants::LOG_FILE_NAME;
use simplelog::{CombinedLogger, Config, LevelFilter, WriteLogger};
use std::error::Error;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// `<cache dir>/mw/mw-player.log`, or the temp dir when there is no cache dir.
pub fn log_file_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("mw"))
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_FILE_NAME)
}

/// Parse a configured level name, falling back to `Info`.
pub fn level_from_name(name: &str) -> LevelFilter {
    match name.to_ascii_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Create the log file, making its parent directory if needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

pub fn init_logging(level: LevelFilter) -> Result<PathBuf, Box<dyn Error>> {
    let log_file = log_file_path();
    let file = open_log_file(&log_file)
        .map_err(|e| format!("Cannot write log file {}: {e}", log_file.display()))?;
    CombinedLogger::init(vec![WriteLogger::new(level, Config::default(), file)])?;
    Ok(log_file)
}
