//! Folder selection.
//!
//! The picker is an opaque capability: it yields a directory or a
//! cancellation. The interactive implementation asks on the terminal.

use crate::utils::console;
use dialoguer::{Input, theme::ColorfulTheme};
use std::error::Error;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

pub trait FolderPicker {
    /// `Ok(None)` means the user cancelled.
    fn pick(&self) -> Result<Option<PathBuf>, Box<dyn Error>>;
}

/// Prompts for a folder path; an empty answer cancels.
pub struct PromptPicker {
    prompt: String,
}

impl Default for PromptPicker {
    fn default() -> Self {
        Self {
            prompt: "Choose folder with audio files (empty to cancel)".to_string(),
        }
    }
}

impl FolderPicker for PromptPicker {
    fn pick(&self) -> Result<Option<PathBuf>, Box<dyn Error>> {
        if !io::stdin().is_terminal() {
            console::warn("No terminal to ask for a folder. Pass it as an argument: mw play <FOLDER>");
            return Ok(None);
        }

        let answer = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(&self.prompt)
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                match expand_answer(input) {
                    Some(path) if !path.is_dir() => {
                        Err(format!("{} is not a folder", path.display()))
                    }
                    _ => Ok(()),
                }
            })
            .interact_text();

        match answer {
            Ok(answer) => Ok(expand_answer(&answer)),
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Turn a typed answer into a path, expanding `~`. Blank means cancel.
pub fn expand_answer(answer: &str) -> Option<PathBuf> {
    let trimmed = answer.trim().trim_matches(|c| c == '"' || c == '\'');
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(shellexpand::tilde(trimmed).as_ref()))
}
