//! Retrohost runtime.
//!
//! Platform-agnostic core of a browser host for opaque tick/render game
//! engines: the frame state machine, input normalization, listener lifetime
//! management, surface sizing and blitting, and FPS sampling.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Capability traits the engine is driven through |
//! | [`host`] | Configuration, [`host::GameHost`] state machine, FPS counter |
//! | [`input`] | Raw input types and the [`input::InputTranslator`] |
//! | [`listener`] | Scoped listener registrations |
//! | [`surface`] | Drawable sizing and pixel blits |
//! | [`time`] | Per-frame timestamps |

pub mod engine;
pub mod host;
pub mod input;
pub mod listener;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod surface;
pub mod time;

#[cfg(test)]
mod testing;

pub use engine::{Engine, EngineError, EventSink, KeyInfo, TickSignal, WindowDescriptor};
pub use host::{GameHost, HostBuilder, HostConfig, HostState, Schedule, SurfaceMode};
