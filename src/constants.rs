//! Project-wide constants used across multiple modules.
//!
//! This module centralizes constant definitions to avoid duplication and ensure
//! consistency across the codebase.

/// Spinner animation characters for progress indicators
pub const SPINNER_CHARS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Supported audio file extensions (without leading dot, lowercase)
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg", "m4a", "aac", "wma", "opus"];

/// Sample rate of the rendered stream and of the generated whistle/crackle sources
pub const SAMPLE_RATE: u32 = 44_100;

/// Default interval between control signal checks while a process runs
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Bounds accepted for a configured poll interval
pub const MIN_POLL_INTERVAL_MS: u64 = 10;
pub const MAX_POLL_INTERVAL_MS: u64 = 1000;

pub const DEFAULT_NEXT_KEY: char = 'n';
pub const DEFAULT_QUIT_KEY: char = 'q';

/// Base names of the external tools
pub const RENDER_TOOL: &str = "ffmpeg";
pub const PLAY_TOOL: &str = "ffplay";

/// File name of the debug log written to the system temp directory
pub const LOG_FILE_NAME: &str = "mw-player.log";

/// Prefix for per-track temporary render directories
pub const TEMP_DIR_PREFIX: &str = "mw_mix_";
