//! Engine capability contract.
//!
//! The host never inspects engine internals. Everything goes through [`Engine`]
//! and the [`EventSink`] it hands out; the browser backend adapts the JS-side
//! game handle to these traits, tests use scripted fakes.

mod error;
mod signal;
mod sink;
mod window;

pub use error::EngineError;
pub use signal::TickSignal;
pub use sink::{EventSink, KeyInfo};
pub use window::WindowDescriptor;

/// An externally supplied simulation engine.
///
/// The host owns the engine for its whole lifetime and only ever invokes it.
pub trait Engine {
    /// Intake for normalized input events.
    type Sink: EventSink;

    /// Advances the engine by one step.
    fn tick(&mut self, timestamp_ms: f64) -> Result<TickSignal, EngineError>;

    /// Describes the current renderable image.
    ///
    /// Must be re-read on every redraw: the engine may reallocate its pixel
    /// buffer between ticks.
    fn window(&self) -> Result<WindowDescriptor, EngineError>;

    /// Returns the engine's event intake.
    fn event_queue(&self) -> Self::Sink;
}
