//! Application configuration management.
//!
//! This module handles the persistent configuration for the player: optional
//! explicit paths to the external tools, the control poll interval, the
//! transport keys and the log level. Configuration is stored in the user's
//! config directory (typically ~/.config/mw/config.toml). A missing file
//! means defaults. The filter chain itself is fixed and not configurable.

use crate::constants::{
    DEFAULT_NEXT_KEY, DEFAULT_POLL_INTERVAL_MS, DEFAULT_QUIT_KEY, MAX_POLL_INTERVAL_MS,
    MIN_POLL_INTERVAL_MS,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Keys accepted by `mw config set`
pub const CONFIG_KEYS: &[&str] = &[
    "ffmpeg_path",
    "ffplay_path",
    "poll_interval_ms",
    "next_key",
    "quit_key",
    "log_level",
];

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffmpeg_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffplay_path: Option<String>,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_next_key")]
    pub next_key: char,
    #[serde(default = "default_quit_key")]
    pub quit_key: char,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_next_key() -> char {
    DEFAULT_NEXT_KEY
}

fn default_quit_key() -> char {
    DEFAULT_QUIT_KEY
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            ffmpeg_path: None,
            ffplay_path: None,
            poll_interval_ms: default_poll_interval_ms(),
            next_key: default_next_key(),
            quit_key: default_quit_key(),
            log_level: default_log_level(),
        }
    }

    pub fn config_dir() -> Result<PathBuf, Box<dyn Error>> {
        // Check for XDG_CONFIG_HOME first (useful for testing)
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config).join("mw")
        } else {
            dirs::config_dir()
                .ok_or("Unable to find config directory")?
                .join("mw")
        };
        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf, Box<dyn Error>> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self, Box<dyn Error>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Default::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;

        Ok(())
    }

    pub fn exists() -> Result<bool, Box<dyn Error>> {
        Ok(Self::config_path()?.exists())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Check values that serde alone cannot reject.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        check_poll_interval(self.poll_interval_ms)?;
        check_key(self.next_key)?;
        check_key(self.quit_key)?;
        if self.next_key.eq_ignore_ascii_case(&self.quit_key) {
            return Err("next_key and quit_key must be different".into());
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(format!(
                "log_level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            )
            .into());
        }
        Ok(())
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        match key {
            "ffmpeg_path" => self.ffmpeg_path = optional_path(value),
            "ffplay_path" => self.ffplay_path = optional_path(value),
            "poll_interval_ms" => {
                let ms = value
                    .parse::<u64>()
                    .map_err(|_| "Value must be a whole number of milliseconds")?;
                check_poll_interval(ms)?;
                self.poll_interval_ms = ms;
            }
            "next_key" => self.next_key = parse_key(value)?,
            "quit_key" => self.quit_key = parse_key(value)?,
            "log_level" => self.log_level = value.to_lowercase(),
            _ => return Err(format!("Unknown configuration key: {key}").into()),
        }
        self.validate()
    }
}

fn optional_path(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_key(value: &str) -> Result<char, Box<dyn Error>> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            check_key(c)?;
            Ok(c.to_ascii_lowercase())
        }
        _ => Err("Value must be a single character".into()),
    }
}

fn check_key(key: char) -> Result<(), Box<dyn Error>> {
    if !key.is_ascii_alphanumeric() {
        return Err(format!("Key must be a letter or digit, got '{key}'").into());
    }
    Ok(())
}

fn check_poll_interval(ms: u64) -> Result<(), Box<dyn Error>> {
    if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&ms) {
        return Err(format!(
            "poll_interval_ms must be between {MIN_POLL_INTERVAL_MS} and {MAX_POLL_INTERVAL_MS}"
        )
        .into());
    }
    Ok(())
}
