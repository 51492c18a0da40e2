//! Progress spinner shown while a track is being rendered.

use crate::constants::SPINNER_CHARS;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a ticking spinner for a render in progress.
///
/// The spinner animates on its own thread until `finish_and_clear` is called,
/// so the caller can keep polling its child process.
///
/// # Example
///
/// ```ignore
/// use crate::utils::progress::render_spinner;
///
/// let spinner = render_spinner("track.mp3");
/// // ... wait for the render tool ...
/// spinner.finish_and_clear();
/// ```
pub fn render_spinner(track_name: &str) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(SPINNER_CHARS);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style);
    spinner.set_message(format!("Rendering {track_name}"));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
