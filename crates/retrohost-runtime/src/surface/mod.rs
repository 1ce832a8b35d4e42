//! Render surface management.
//!
//! This module is responsible for:
//! - keeping the drawable's pixel size equal to the engine's image size
//! - validating the pixel region a [`WindowDescriptor`](crate::engine::WindowDescriptor) points at
//! - blitting that region onto the drawable at the origin, unscaled, overwriting
//!
//! [`BufferDrawable`] is a software drawable over a [`LinearMemory`], used for
//! headless embedding and tests.

mod buffer;
mod drawable;
mod error;
mod manager;

pub use buffer::{BufferDrawable, LinearMemory};
pub use drawable::Drawable;
pub use error::SurfaceError;
pub use manager::SurfaceManager;
