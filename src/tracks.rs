//! Track enumeration for a selected folder.

use crate::constants::AUDIO_EXTENSIONS;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
    Flac,
    Ogg,
    M4a,
    Aac,
    Wma,
    Opus,
}

impl AudioFormat {
    /// Infer the format from a file extension, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "flac" => Some(Self::Flac),
            "ogg" => Some(Self::Ogg),
            "m4a" => Some(Self::M4a),
            "aac" => Some(Self::Aac),
            "wma" => Some(Self::Wma),
            "opus" => Some(Self::Opus),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::M4a => "m4a",
            Self::Aac => "aac",
            Self::Wma => "wma",
            Self::Opus => "opus",
        };
        f.write_str(name)
    }
}

/// One playable file found in the selected folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    path: PathBuf,
    format: AudioFormat,
}

impl Track {
    /// Returns `None` when the path's extension is not a recognized audio format.
    pub fn new(path: PathBuf) -> Option<Self> {
        let format = AudioFormat::from_path(&path)?;
        Some(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// File name for display
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// File name without extension, used to name the rendered file.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "track".to_string())
    }
}

/// Supported extensions formatted for user messages, e.g. `.mp3, .wav`.
pub fn supported_extensions_list() -> String {
    AUDIO_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// List the recognized audio files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into. An empty folder yields an empty list.
pub fn enumerate(dir: &Path) -> io::Result<Vec<Track>> {
    let mut tracks = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        match Track::new(path) {
            Some(track) => tracks.push(track),
            None => log::debug!("Skipping non-audio file: {:?}", entry.file_name()),
        }
    }

    tracks.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    log::info!("Found {} tracks in {}", tracks.len(), dir.display());

    Ok(tracks)
}
