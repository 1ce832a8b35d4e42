use std::collections::HashSet;

use crate::engine::{EventSink, KeyInfo};

use super::file::{FileBinding, FileRejected};
use super::resize::ResizeTracker;
use super::types::{KeyContract, KeyState, PointerAction, PointerSample, RawKey};

/// Identity of a held key, independent of modifiers.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
enum HeldKey {
    Physical(String),
    Code(u32),
    Named(String),
}

impl HeldKey {
    /// Physical code first, then legacy key code. The key string is the
    /// last resort and is case-folded, since Shift changes it.
    fn of(raw: &RawKey) -> Self {
        if !raw.code.is_empty() {
            Self::Physical(raw.code.clone())
        } else if raw.key_code != 0 {
            Self::Code(raw.key_code)
        } else {
            Self::Named(raw.key.to_lowercase())
        }
    }
}

/// Converts raw platform input into engine events.
///
/// Owns the engine's event sink. Every method forwards synchronously; the
/// timestamp is supplied by the caller so that input and tick share the frame
/// clock.
#[derive(Debug)]
pub struct InputTranslator<S> {
    sink: S,
    contract: KeyContract,
    clamp_pointer: bool,

    /// Keys currently held, for leading-edge key-down detection.
    held_keys: HashSet<HeldKey>,

    resize: ResizeTracker,
    files_forwarded: u64,
    files_rejected: u64,
}

impl<S: EventSink> InputTranslator<S> {
    pub fn new(sink: S, contract: KeyContract, clamp_pointer: bool) -> Self {
        Self {
            sink,
            contract,
            clamp_pointer,
            held_keys: HashSet::new(),
            resize: ResizeTracker::default(),
            files_forwarded: 0,
            files_rejected: 0,
        }
    }

    pub fn pointer(&mut self, timestamp_ms: f64, action: PointerAction, sample: PointerSample) {
        let (x, y) = sample.fractions(self.clamp_pointer);
        match action {
            PointerAction::Down(button) => {
                self.sink.send_mouse_button(timestamp_ms, x, y, button.id(), false);
            }
            PointerAction::Up(button) => {
                self.sink.send_mouse_button(timestamp_ms, x, y, button.id(), true);
            }
            PointerAction::Move => {
                self.sink.send_mouse_move(timestamp_ms, x, y);
            }
        }
    }

    pub fn click(&mut self, sample: PointerSample) {
        let (x, y) = sample.fractions(self.clamp_pointer);
        self.sink.send_click(x, y);
    }

    /// Forwards a key event; returns whether it reached the engine.
    ///
    /// Key-down is forwarded only on the leading edge: auto-repeats and a
    /// second press of a key already held are dropped. Key-up always goes
    /// through.
    pub fn key(&mut self, timestamp_ms: f64, state: KeyState, raw: &RawKey) -> bool {
        let held = HeldKey::of(raw);
        let info = self.key_info(raw);
        match state {
            KeyState::Pressed => {
                if raw.repeat || !self.held_keys.insert(held) {
                    return false;
                }
                self.sink.send_key_down(&info, timestamp_ms);
            }
            KeyState::Released => {
                self.held_keys.remove(&held);
                self.sink.send_key_up(&info, timestamp_ms);
            }
        }
        true
    }

    /// Forgets held keys; the matching key-ups will never arrive.
    pub fn focus_lost(&mut self) {
        self.held_keys.clear();
    }

    /// Forwards a surface size if it changed; returns whether it did.
    pub fn window_resized(&mut self, width: u32, height: u32) -> bool {
        if !self.resize.observe(width, height) {
            return false;
        }
        log::debug!("surface resized to {width}x{height}");
        self.sink.send_window_resize(width, height);
        true
    }

    /// Forwards a loaded file if it fits the binding's limit.
    pub fn file_loaded(
        &mut self,
        binding: &FileBinding,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<(), FileRejected> {
        if let Err(rejected) = binding.admit(file_name, bytes.len()) {
            log::warn!("{rejected}");
            self.files_rejected += 1;
            return Err(rejected);
        }
        log::debug!(
            "forwarding file {file_name:?} ({} bytes) as {:?}",
            bytes.len(),
            binding.field_name
        );
        self.sink.send_file_read(&binding.field_name, file_name, bytes);
        self.files_forwarded += 1;
        Ok(())
    }

    pub fn resizes_forwarded(&self) -> u64 {
        self.resize.forwarded()
    }

    pub fn files_forwarded(&self) -> u64 {
        self.files_forwarded
    }

    pub fn files_rejected(&self) -> u64 {
        self.files_rejected
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn key_info(&self, raw: &RawKey) -> KeyInfo {
        match self.contract {
            KeyContract::KeyCode => KeyInfo::Code(raw.key_code),
            KeyContract::KeyWithModifiers => KeyInfo::Named {
                key: raw.key.clone(),
                modifiers: raw.modifiers,
            },
        }
    }
}
