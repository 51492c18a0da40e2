//! Keyboard transport control.
//!
//! The watcher puts the terminal in raw mode and reads key events on a
//! background thread, writing skip and quit requests into the shared
//! [`SignalCell`]. It only starts when stdin and stdout are interactive
//! terminals; otherwise the player runs without keyboard control.

use crate::config::Config;
use crate::signal::{ControlSignal, SignalCell};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How long each event poll blocks before checking for shutdown.
const EVENT_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub next: char,
    pub quit: char,
}

impl KeyBindings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            next: config.next_key,
            quit: config.quit_key,
        }
    }

    /// Map a key event to the signal it requests, if any.
    pub fn signal_for(&self, key: &KeyEvent) -> Option<ControlSignal> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            // Raw mode swallows SIGINT, so Ctrl+C has to be handled here
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(ControlSignal::Quit)
            }
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&self.quit) => Some(ControlSignal::Quit),
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&self.next) => {
                Some(ControlSignal::SkipTrack)
            }
            _ => None,
        }
    }
}

pub struct InputWatcher {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputWatcher {
    /// Raw keypress capture needs an interactive terminal on both ends.
    pub fn is_supported() -> bool {
        io::stdin().is_terminal() && io::stdout().is_terminal()
    }

    /// Start watching keys. Returns `None` when keyboard control is unavailable.
    pub fn start(bindings: KeyBindings, signal: SignalCell) -> Option<Self> {
        if !Self::is_supported() {
            log::info!("Not attached to a terminal, keyboard control disabled");
            return None;
        }
        if let Err(e) = enable_raw_mode() {
            log::warn!("Raw mode unavailable, keyboard control disabled: {e}");
            return None;
        }

        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let spawned = thread::Builder::new()
            .name("mw-keys".to_string())
            .spawn(move || watch_keys(bindings, signal, thread_stop));

        match spawned {
            Ok(handle) => {
                log::info!(
                    "Keyboard control active: {} = next, {} = quit",
                    bindings.next,
                    bindings.quit
                );
                Some(Self {
                    stop,
                    handle: Some(handle),
                })
            }
            Err(e) => {
                log::warn!("Could not start key watcher: {e}");
                let _ = disable_raw_mode();
                None
            }
        }
    }

    /// Stop the watcher thread and restore the terminal.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Key watcher thread panicked");
            }
            if let Err(e) = disable_raw_mode() {
                log::error!("Failed to restore terminal: {e}");
            }
        }
    }
}

impl Drop for InputWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn watch_keys(bindings: KeyBindings, signal: SignalCell, stop: Arc<AtomicBool>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(EVENT_POLL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => {
                    if let Some(requested) = bindings.signal_for(&key) {
                        log::debug!("Key {:?} -> {requested:?}", key.code);
                        signal.set(requested);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("Failed to read key event: {e}");
                    return;
                }
            },
            Ok(false) => {}
            Err(e) => {
                log::error!("Failed to poll key events: {e}");
                return;
            }
        }
    }
}
