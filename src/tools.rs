//! Locating the external render and play tools.
//!
//! Each tool is looked up in order: an explicitly configured path, the
//! directory holding the running executable, then every `PATH` entry.

use crate::config::Config;
use crate::constants::{PLAY_TOOL, RENDER_TOOL};
use crate::error::{PlaybackError, Result};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Resolved paths of both external tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tools {
    pub ffmpeg: PathBuf,
    pub ffplay: PathBuf,
}

impl Tools {
    /// Resolve both tools using the configured overrides and the process `PATH`.
    pub fn locate(config: &Config) -> Result<Self> {
        let search = SearchPath::from_env();
        Ok(Self {
            ffmpeg: search.find(RENDER_TOOL, config.ffmpeg_path.as_deref())?,
            ffplay: search.find(PLAY_TOOL, config.ffplay_path.as_deref())?,
        })
    }
}

/// Platform file name of a tool (`ffmpeg.exe` on Windows).
pub fn executable_name(tool: &str) -> String {
    if cfg!(windows) {
        format!("{tool}.exe")
    } else {
        tool.to_string()
    }
}

/// Directories searched for tools, in priority order.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// The running executable's directory followed by `PATH`.
    pub fn from_env() -> Self {
        let mut dirs = Vec::new();
        if let Ok(exe) = env::current_exe()
            && let Some(dir) = exe.parent()
        {
            dirs.push(dir.to_path_buf());
        }
        dirs.extend(env::split_paths(&env::var_os("PATH").unwrap_or_else(OsString::new)));
        Self { dirs }
    }

    /// Find `tool`, preferring `configured` when given.
    pub fn find(&self, tool: &str, configured: Option<&str>) -> Result<PathBuf> {
        if let Some(configured) = configured {
            let path = PathBuf::from(shellexpand::tilde(configured).as_ref());
            if is_executable(&path) {
                log::info!("Using configured {tool}: {}", path.display());
                return Ok(path);
            }
            return Err(PlaybackError::ToolMissing {
                tool: tool.to_string(),
                searched: path.display().to_string(),
            });
        }

        let name = executable_name(tool);
        for dir in &self.dirs {
            let candidate = dir.join(&name);
            if is_executable(&candidate) {
                log::info!("Found {tool}: {}", candidate.display());
                return Ok(candidate);
            }
        }

        Err(PlaybackError::ToolMissing {
            tool: tool.to_string(),
            searched: "the program directory and PATH".to_string(),
        })
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn make_tool(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn test_finds_tool_in_later_dir() {
        let empty = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        let expected = make_tool(bin.path(), "ffplay", 0o755);

        let search = SearchPath::new(vec![empty.path().to_path_buf(), bin.path().to_path_buf()]);
        assert_eq!(search.find("ffplay", None).unwrap(), expected);
    }

    #[test]
    fn test_first_dir_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let expected = make_tool(first.path(), "ffmpeg", 0o755);
        make_tool(second.path(), "ffmpeg", 0o755);

        let search =
            SearchPath::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
        assert_eq!(search.find("ffmpeg", None).unwrap(), expected);
    }

    #[test]
    fn test_non_executable_ignored() {
        let bin = TempDir::new().unwrap();
        make_tool(bin.path(), "ffmpeg", 0o644);

        let search = SearchPath::new(vec![bin.path().to_path_buf()]);
        let err = search.find("ffmpeg", None).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_missing_tool() {
        let search = SearchPath::new(Vec::new());
        let err = search.find("ffplay", None).unwrap_err();
        assert!(matches!(err, PlaybackError::ToolMissing { ref tool, .. } if tool == "ffplay"));
    }

    #[test]
    fn test_configured_path_takes_priority() {
        let on_path = TempDir::new().unwrap();
        let custom = TempDir::new().unwrap();
        make_tool(on_path.path(), "ffmpeg", 0o755);
        let configured = make_tool(custom.path(), "my-ffmpeg", 0o755);

        let search = SearchPath::new(vec![on_path.path().to_path_buf()]);
        let found = search
            .find("ffmpeg", Some(configured.to_str().unwrap()))
            .unwrap();
        assert_eq!(found, configured);
    }

    #[test]
    fn test_bad_configured_path_does_not_fall_back() {
        let on_path = TempDir::new().unwrap();
        make_tool(on_path.path(), "ffmpeg", 0o755);

        let search = SearchPath::new(vec![on_path.path().to_path_buf()]);
        let err = search
            .find("ffmpeg", Some("/this/path/does/not/exist/ffmpeg"))
            .unwrap_err();
        assert!(err.to_string().contains("/this/path/does/not/exist/ffmpeg"));
    }
}
