//! Game host: configuration, the frame state machine and FPS sampling.
//!
//! The host is platform-agnostic. A backend builds a [`GameHost`] from a
//! [`HostConfig`], registers one listener per [`ListenerKind`] in the
//! config's plan, calls [`GameHost::start`], then calls
//! [`GameHost::frame`] from its frame-synchronized callback until it
//! returns [`Schedule::Stop`].

mod config;
mod fps;
mod game_host;


pub use config::{FpsConfig, HostBuilder, HostConfig, ListenerKind, SurfaceMode};
pub use fps::{FpsCounter, FpsSample};
pub use game_host::{GameHost, HostState, HostStats, Schedule, SharedInput};
