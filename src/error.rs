//! Error types for track rendering and playback.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("{tool} not found (looked for {searched})")]
    ToolMissing { tool: String, searched: String },

    #[error("Failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status} for {}", .track.display())]
    Failed {
        tool: String,
        status: ExitStatus,
        track: PathBuf,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlaybackError {
    /// A missing tool cannot be recovered from for any later track.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PlaybackError::ToolMissing { .. })
    }
}

pub type Result<T> = std::result::Result<T, PlaybackError>;
