//! Shared control signal between the key watcher and the playback loop.
//!
//! The signal is one atomic byte. It holds only the latest intent; nothing is
//! queued. `Quit` is sticky and can never be replaced.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ControlSignal {
    None = 0,
    SkipTrack = 1,
    Quit = 2,
}

impl ControlSignal {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::SkipTrack,
            2 => Self::Quit,
            _ => Self::None,
        }
    }
}

/// Single-slot signal cell. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct SignalCell {
    slot: Arc<AtomicU8>,
}

impl SignalCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> ControlSignal {
        ControlSignal::from_u8(self.slot.load(Ordering::Acquire))
    }

    /// Overwrite the current signal unless a quit has already been requested.
    pub fn set(&self, signal: ControlSignal) {
        let _ = self
            .slot
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                if current == ControlSignal::Quit as u8 {
                    None
                } else {
                    Some(signal as u8)
                }
            });
    }

    pub fn request_skip(&self) {
        self.set(ControlSignal::SkipTrack);
    }

    pub fn request_quit(&self) {
        self.set(ControlSignal::Quit);
    }

    pub fn quit_requested(&self) -> bool {
        self.get() == ControlSignal::Quit
    }

    /// Consume a pending skip. Returns true if one was pending.
    pub fn take_skip(&self) -> bool {
        self.slot
            .compare_exchange(
                ControlSignal::SkipTrack as u8,
                ControlSignal::None as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}
