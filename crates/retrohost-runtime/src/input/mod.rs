//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose DOM types.
//! Backends convert raw platform events into [`PointerSample`]s and
//! [`RawKey`]s; [`InputTranslator`] normalizes them and forwards them to the
//! engine's [`EventSink`](crate::engine::EventSink).

mod file;
mod resize;
mod translator;
mod types;

pub use file::{FileBinding, FileRejected, DEFAULT_MAX_SIZE_MB};
pub use resize::ResizeTracker;
pub use translator::InputTranslator;
pub use types::{KeyContract, KeyState, Modifiers, MouseButton, PointerAction, PointerSample, RawKey};
