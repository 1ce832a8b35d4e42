use crate::engine::WindowDescriptor;

use super::SurfaceError;

/// A pixel surface the host paints engine frames onto.
pub trait Drawable {
    /// Current size in pixels.
    fn size(&self) -> (u32, u32);

    /// Changes the pixel size. Clears existing content.
    fn resize(&mut self, width: u32, height: u32);

    /// Overwrites the surface with the image described by `window`,
    /// at the origin, without scaling or blending.
    ///
    /// The caller guarantees the surface already has the image's size and
    /// the region holds at least `width * height * 4` bytes.
    fn put_image(&mut self, window: &WindowDescriptor) -> Result<(), SurfaceError>;

    /// Size of the shared memory the surface reads from, when known.
    fn memory_len(&self) -> Option<usize> {
        None
    }
}
