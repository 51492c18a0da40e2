//! Sequential playback of tracks through the external render and play tools.
//!
//! Each track is rendered with the medium wave filter graph into a private
//! temporary directory, then played. While either process runs the
//! controller polls the shared [`SignalCell`] so a skip or quit terminates
//! the process within one poll interval. Only one process exists at a time.

use crate::constants::{PLAY_TOOL, RENDER_TOOL, SAMPLE_RATE, TEMP_DIR_PREFIX};
use crate::error::{PlaybackError, Result};
use crate::filter::{OUTPUT_LABEL, filter_graph};
use crate::signal::SignalCell;
use crate::tools::Tools;
use crate::tracks::Track;
use crate::utils::console;
use crate::utils::progress::render_spinner;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Playing,
    Skipping,
    Quitting,
    Done,
}

/// How one supervised process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    Finished,
    Skipped,
    Quit,
}

/// Counts reported once the track list is exhausted or the user quits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub played: usize,
    pub skipped: usize,
    pub failed: usize,
    pub quit: bool,
}

/// One running external process bound to one track.
///
/// Dropping a session that is still running kills and reaps the process.
#[derive(Debug)]
pub struct PlaybackSession {
    child: Child,
    tool: String,
    track: PathBuf,
}

impl PlaybackSession {
    pub fn spawn<I>(tool: &str, program: &Path, args: I, track: &Path) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        log::debug!("Spawning {tool}: {}", program.display());
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    PlaybackError::ToolMissing {
                        tool: tool.to_string(),
                        searched: program.display().to_string(),
                    }
                } else {
                    PlaybackError::Spawn {
                        tool: tool.to_string(),
                        source,
                    }
                }
            })?;

        Ok(Self {
            child,
            tool: tool.to_string(),
            track: track.to_path_buf(),
        })
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    pub fn try_wait(&mut self) -> Result<Option<ExitStatus>> {
        Ok(self.child.try_wait()?)
    }

    /// Kill the process and wait for it so no zombie is left behind.
    pub fn terminate(mut self) -> Result<()> {
        self.kill_and_reap()
    }

    fn kill_and_reap(&mut self) -> Result<()> {
        if self.child.try_wait()?.is_some() {
            return Ok(());
        }
        log::debug!("Terminating {} (pid {})", self.tool, self.child.id());
        match self.child.kill() {
            Ok(()) => {}
            // Already exited between the check and the kill
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => {}
            Err(e) => return Err(e.into()),
        }
        self.child.wait()?;
        Ok(())
    }

    fn into_failure(self, status: ExitStatus) -> PlaybackError {
        PlaybackError::Failed {
            tool: self.tool.clone(),
            status,
            track: self.track.clone(),
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        if let Err(e) = self.kill_and_reap() {
            log::warn!("Could not terminate {}: {e}", self.tool);
        }
    }
}

pub struct PlaybackController {
    tools: Tools,
    signal: SignalCell,
    poll_interval: Duration,
    state: PlayerState,
}

impl PlaybackController {
    pub fn new(tools: Tools, signal: SignalCell, poll_interval: Duration) -> Self {
        Self {
            tools,
            signal,
            poll_interval,
            state: PlayerState::Idle,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    fn transition(&mut self, next: PlayerState) {
        if self.state != next {
            log::debug!("Player state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// Play every track in order until the list is exhausted or quit is requested.
    ///
    /// Per-track failures are reported and counted. A missing tool aborts the
    /// whole session with an error.
    pub fn run(&mut self, tracks: &[Track]) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        log::debug!("Filter graph: {}", filter_graph());

        for track in tracks {
            if self.signal.quit_requested() {
                self.transition(PlayerState::Quitting);
                summary.quit = true;
                break;
            }
            // A skip pressed between tracks has nothing left to skip
            self.signal.take_skip();

            self.transition(PlayerState::Playing);
            console::info(&format!("Playing: {}", track.name()));
            log::info!("Playing {}", track.path().display());

            match self.play_track(track) {
                Ok(TrackOutcome::Finished) => summary.played += 1,
                Ok(TrackOutcome::Skipped) => {
                    self.transition(PlayerState::Skipping);
                    log::info!("Skipped {}", track.name());
                    summary.skipped += 1;
                }
                Ok(TrackOutcome::Quit) => {
                    self.transition(PlayerState::Quitting);
                    log::info!("Quit during {}", track.name());
                    summary.quit = true;
                    break;
                }
                Err(e) if e.is_fatal() => {
                    log::error!("{e}");
                    self.transition(PlayerState::Done);
                    return Err(e);
                }
                Err(e) => {
                    log::error!("Track {} failed: {e}", track.name());
                    console::warn(&format!("Skipping {}: {e}", track.name()));
                    summary.failed += 1;
                }
            }
            self.transition(PlayerState::Idle);
        }

        self.transition(PlayerState::Done);
        Ok(summary)
    }

    fn play_track(&mut self, track: &Track) -> Result<TrackOutcome> {
        // Removed on drop, after every session below has been reaped
        let temp_dir = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()?;
        let wav_path = temp_dir.path().join(format!("{}.wav", track.stem()));

        let spinner = render_spinner(&track.name());

        let render = PlaybackSession::spawn(
            RENDER_TOOL,
            &self.tools.ffmpeg,
            render_args(track.path(), &wav_path),
            track.path(),
        );
        let rendered = render.and_then(|session| self.supervise(session));
        spinner.finish_and_clear();

        match rendered? {
            TrackOutcome::Finished => {}
            other => return Ok(other),
        }

        let player = PlaybackSession::spawn(
            PLAY_TOOL,
            &self.tools.ffplay,
            play_args(&wav_path),
            track.path(),
        )?;
        self.supervise(player)
    }

    /// Wait for the session to exit, terminating it on skip or quit.
    fn supervise(&self, mut session: PlaybackSession) -> Result<TrackOutcome> {
        loop {
            if self.signal.quit_requested() {
                session.terminate()?;
                return Ok(TrackOutcome::Quit);
            }
            if self.signal.take_skip() {
                session.terminate()?;
                return Ok(TrackOutcome::Skipped);
            }
            if let Some(status) = session.try_wait()? {
                if status.success() {
                    return Ok(TrackOutcome::Finished);
                }
                return Err(session.into_failure(status));
            }
            thread::sleep(self.poll_interval);
        }
    }
}

/// Arguments that render `input` through the filter graph into a mono WAV file.
pub fn render_args(input: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-y", "-i"]
        .iter()
        .map(OsString::from)
        .collect();
    args.push(input.as_os_str().to_owned());
    args.push("-filter_complex".into());
    args.push(filter_graph().into());
    args.push("-map".into());
    args.push(format!("[{OUTPUT_LABEL}]").into());
    args.push("-ac".into());
    args.push("1".into());
    args.push("-ar".into());
    args.push(SAMPLE_RATE.to_string().into());
    args.push(output.as_os_str().to_owned());
    args
}

/// Arguments that play `wav` without a window and exit at the end of the stream.
pub fn play_args(wav: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-nodisp", "-autoexit", "-hide_banner", "-loglevel", "error"]
        .iter()
        .map(OsString::from)
        .collect();
    args.push(wav.as_os_str().to_owned());
    args
}
