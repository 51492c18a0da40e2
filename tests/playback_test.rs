//! End-to-end playback tests using shell scripts in place of ffmpeg and ffplay.
//!
//! The fake render tool writes an empty WAV file unless the input name contains
//! `broken`. The fake play tool fails for files starting with `bad` and blocks
//! for files starting with `slow`. Both append what they did to a log file.
#![cfg(unix)]

use medium_wave::error::PlaybackError;
use medium_wave::playback::{PlaybackController, PlaybackSession, PlayerState};
use medium_wave::signal::SignalCell;
use medium_wave::tools::{SearchPath, Tools};
use medium_wave::tracks::{self, Track};
use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

// Writing a script while another test forks can make exec fail with ETXTBSY
static PROCESS_MUTEX: Mutex<()> = Mutex::new(());

const POLL: Duration = Duration::from_millis(20);

struct Fixture {
    _bin: TempDir,
    music: TempDir,
    log: PathBuf,
    tools: Tools,
}

impl Fixture {
    fn new(track_names: &[&str]) -> Self {
        let bin = TempDir::new().unwrap();
        let music = TempDir::new().unwrap();
        let log = bin.path().join("calls.log");

        let ffmpeg = write_script(
            bin.path(),
            "ffmpeg",
            &format!(
                "for last; do :; done\n\
                 echo \"render $(basename \"$last\")\" >> '{log}'\n\
                 case \"$*\" in *broken*) exit 1;; esac\n\
                 : > \"$last\"\n",
                log = log.display()
            ),
        );
        let ffplay = write_script(
            bin.path(),
            "ffplay",
            &format!(
                "for last; do :; done\n\
                 name=$(basename \"$last\")\n\
                 echo \"play $name\" >> '{log}'\n\
                 case \"$name\" in bad*) exit 1;; slow*) exec sleep 10;; esac\n",
                log = log.display()
            ),
        );

        for name in track_names {
            fs::write(music.path().join(name), b"").unwrap();
        }

        Self {
            _bin: bin,
            music,
            log,
            tools: Tools { ffmpeg, ffplay },
        }
    }

    fn tracks(&self) -> Vec<Track> {
        tracks::enumerate(self.music.path()).unwrap()
    }

    fn controller(&self, signal: &SignalCell) -> PlaybackController {
        PlaybackController::new(self.tools.clone(), signal.clone(), POLL)
    }

    fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}exit 0\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn after(delay: Duration, action: impl FnOnce() + Send + 'static) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        thread::sleep(delay);
        action();
    })
}

#[test]
fn test_plays_all_tracks_in_order() {
    let _guard = PROCESS_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let fixture = Fixture::new(&["b.flac", "a.mp3", "notes.txt"]);
    let signal = SignalCell::new();

    let summary = fixture.controller(&signal).run(&fixture.tracks()).unwrap();

    assert_eq!(summary.played, 2);
    assert_eq!(summary.failed, 0);
    assert!(!summary.quit);
    assert_eq!(
        fixture.calls(),
        vec!["render a.wav", "play a.wav", "render b.wav", "play b.wav"]
    );
}

#[test]
fn test_play_failure_does_not_stop_session() {
    let _guard = PROCESS_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let fixture = Fixture::new(&["bad.mp3", "good.mp3"]);
    let signal = SignalCell::new();

    let mut controller = fixture.controller(&signal);
    let summary = controller.run(&fixture.tracks()).unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.played, 1);
    assert!(fixture.calls().contains(&"play good.wav".to_string()));
    assert_eq!(controller.state(), PlayerState::Done);
}

#[test]
fn test_render_failure_skips_playback_of_that_track() {
    let _guard = PROCESS_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let fixture = Fixture::new(&["broken.wav", "fine.ogg"]);
    let signal = SignalCell::new();

    let summary = fixture.controller(&signal).run(&fixture.tracks()).unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.played, 1);
    let calls = fixture.calls();
    assert!(!calls.contains(&"play broken.wav".to_string()));
    assert!(calls.contains(&"play fine.wav".to_string()));
}

#[test]
fn test_skip_terminates_current_track() {
    let _guard = PROCESS_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let fixture = Fixture::new(&["slow.mp3", "tail.mp3"]);
    let signal = SignalCell::new();

    let writer = signal.clone();
    let skipper = after(Duration::from_millis(300), move || writer.request_skip());

    let started = Instant::now();
    let summary = fixture.controller(&signal).run(&fixture.tracks()).unwrap();
    skipper.join().unwrap();

    // The fake player would block for ten seconds without the skip
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.played, 1);
    assert_eq!(fixture.calls().last().map(String::as_str), Some("play tail.wav"));
}

#[test]
fn test_quit_stops_session() {
    let _guard = PROCESS_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let fixture = Fixture::new(&["a.mp3", "slow.mp3", "z.mp3"]);
    let signal = SignalCell::new();

    let writer = signal.clone();
    let quitter = after(Duration::from_millis(500), move || writer.request_quit());

    let started = Instant::now();
    let mut controller = fixture.controller(&signal);
    let summary = controller.run(&fixture.tracks()).unwrap();
    quitter.join().unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(summary.quit);
    assert_eq!(summary.played, 1);
    assert!(!fixture.calls().iter().any(|call| call.contains("z.wav")));
    assert_eq!(controller.state(), PlayerState::Done);
}

#[test]
fn test_quit_before_start_plays_nothing() {
    let _guard = PROCESS_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let fixture = Fixture::new(&["a.mp3", "b.mp3"]);
    let signal = SignalCell::new();
    signal.request_quit();

    let summary = fixture.controller(&signal).run(&fixture.tracks()).unwrap();

    assert!(summary.quit);
    assert_eq!(summary.played, 0);
    assert!(fixture.calls().is_empty());
}

#[test]
fn test_stale_skip_does_not_skip_next_track() {
    let _guard = PROCESS_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let fixture = Fixture::new(&["a.mp3"]);
    let signal = SignalCell::new();
    signal.request_skip();

    let summary = fixture.controller(&signal).run(&fixture.tracks()).unwrap();

    assert_eq!(summary.played, 1);
    assert_eq!(summary.skipped, 0);
}

#[test]
fn test_missing_tool_at_spawn_is_fatal() {
    let _guard = PROCESS_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let fixture = Fixture::new(&["a.mp3", "b.mp3"]);
    let tools = Tools {
        ffmpeg: fixture.tools.ffmpeg.clone(),
        ffplay: PathBuf::from("/this/path/does/not/exist/ffplay"),
    };
    let signal = SignalCell::new();

    let mut controller = PlaybackController::new(tools, signal, POLL);
    let err = controller.run(&fixture.tracks()).unwrap_err();

    assert!(err.is_fatal());
    assert!(matches!(err, PlaybackError::ToolMissing { .. }));
    // Only the first track was attempted
    assert_eq!(fixture.calls(), vec!["render a.wav"]);
    assert_eq!(controller.state(), PlayerState::Done);
}

#[test]
fn test_missing_tool_detected_before_playback() {
    let empty = TempDir::new().unwrap();
    let search = SearchPath::new(vec![empty.path().to_path_buf()]);

    let err = search.find("ffmpeg", None).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn test_terminated_session_is_reaped() {
    let _guard = PROCESS_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let args: Vec<OsString> = vec!["-c".into(), "exec sleep 10".into()];
    let session =
        PlaybackSession::spawn("sh", Path::new("/bin/sh"), args, Path::new("a.mp3")).unwrap();
    let pid = session.id();

    session.terminate().unwrap();

    if cfg!(target_os = "linux") {
        assert!(!Path::new(&format!("/proc/{pid}")).exists());
    }
}

#[test]
fn test_dropped_session_is_reaped() {
    let _guard = PROCESS_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let args: Vec<OsString> = vec!["-c".into(), "exec sleep 10".into()];
    let session =
        PlaybackSession::spawn("sh", Path::new("/bin/sh"), args, Path::new("a.mp3")).unwrap();
    let pid = session.id();

    drop(session);

    if cfg!(target_os = "linux") {
        assert!(!Path::new(&format!("/proc/{pid}")).exists());
    }
}
