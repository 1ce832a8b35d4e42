//! Time subsystem.
//!
//! The frame scheduler owns the clock read. Once per frame it calls
//! [`FrameClock::tick`], which publishes the timestamp through a
//! [`FrameStamp`]; input handlers stamp their events with that same value so
//! that tick and input never disagree within one frame.

mod clock;
mod frame_clock;

pub use clock::Clock;
#[cfg(not(target_arch = "wasm32"))]
pub use clock::InstantClock;
pub use frame_clock::{FrameClock, FrameStamp, FrameTime};
