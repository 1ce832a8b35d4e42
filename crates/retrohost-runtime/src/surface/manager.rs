use crate::engine::WindowDescriptor;

use super::{Drawable, SurfaceError};

/// Owns the drawable and keeps it in sync with the engine's image.
#[derive(Debug)]
pub struct SurfaceManager<D> {
    drawable: D,
    resizes: u64,
}

impl<D: Drawable> SurfaceManager<D> {
    pub fn new(drawable: D) -> Self {
        Self { drawable, resizes: 0 }
    }

    /// Paints the image described by `window`.
    ///
    /// Resizes the drawable only when the size differs, since resizing clears it.
    pub fn present(&mut self, window: &WindowDescriptor) -> Result<(), SurfaceError> {
        let (width, height) = window.dimensions();
        let range = window
            .pixel_range()
            .ok_or(SurfaceError::SizeOverflow { width, height })?;

        let expected = range.len();
        if window.image_data_byte_length < expected {
            return Err(SurfaceError::ShortBuffer {
                expected,
                actual: window.image_data_byte_length,
            });
        }
        if let Some(memory_len) = self.drawable.memory_len() {
            if range.end > memory_len {
                return Err(SurfaceError::OutOfBounds { end: range.end, memory_len });
            }
        }

        if self.drawable.size() != (width, height) {
            log::debug!("resizing drawable to {width}x{height}");
            self.drawable.resize(width, height);
            self.resizes += 1;
        }

        self.drawable.put_image(window)
    }

    pub fn drawable(&self) -> &D {
        &self.drawable
    }

    pub fn drawable_mut(&mut self) -> &mut D {
        &mut self.drawable
    }

    /// Number of size changes applied so far.
    pub fn resizes(&self) -> u64 {
        self.resizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{BufferDrawable, LinearMemory};

    fn setup(memory_len: usize) -> (SurfaceManager<BufferDrawable>, LinearMemory) {
        let memory = LinearMemory::new(memory_len);
        (SurfaceManager::new(BufferDrawable::new(memory.clone())), memory)
    }

    // ── sizing ────────────────────────────────────────────────────────────

    #[test]
    fn first_present_sizes_drawable() {
        let (mut m, _) = setup(64);
        m.present(&WindowDescriptor::packed(4, 4, 0)).unwrap();
        assert_eq!(m.drawable().size(), (4, 4));
        assert_eq!(m.resizes(), 1);
    }

    #[test]
    fn same_size_does_not_resize() {
        let (mut m, _) = setup(64);
        let w = WindowDescriptor::packed(2, 2, 0);
        m.present(&w).unwrap();
        m.present(&w).unwrap();
        assert_eq!(m.resizes(), 1);
    }

    #[test]
    fn size_follows_each_descriptor() {
        let (mut m, _) = setup(1024);
        for (w, h) in [(8, 8), (4, 2), (16, 4)] {
            m.present(&WindowDescriptor::packed(w, h, 0)).unwrap();
            assert_eq!(m.drawable().size(), (w, h));
        }
        assert_eq!(m.resizes(), 3);
    }

    // ── blit ──────────────────────────────────────────────────────────────

    #[test]
    fn pixels_copied_from_offset() {
        let (mut m, memory) = setup(32);
        memory.write(8, &[1, 2, 3, 4, 5, 6, 7, 8]);
        m.present(&WindowDescriptor::packed(2, 1, 8)).unwrap();
        assert_eq!(m.drawable().pixel(0, 0), Some([1, 2, 3, 4]));
        assert_eq!(m.drawable().pixel(1, 0), Some([5, 6, 7, 8]));
    }

    #[test]
    fn longer_region_uses_image_prefix() {
        let (mut m, memory) = setup(16);
        memory.write(0, &[9, 9, 9, 9, 1, 1, 1, 1]);
        let w = WindowDescriptor {
            image_width: 1,
            image_height: 1,
            image_data_offset: 0,
            image_data_byte_length: 8,
        };
        m.present(&w).unwrap();
        assert_eq!(m.drawable().pixel(0, 0), Some([9, 9, 9, 9]));
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn short_region_is_rejected_without_resize() {
        let (mut m, _) = setup(64);
        let w = WindowDescriptor {
            image_width: 2,
            image_height: 2,
            image_data_offset: 0,
            image_data_byte_length: 15,
        };
        assert_eq!(m.present(&w), Err(SurfaceError::ShortBuffer { expected: 16, actual: 15 }));
        assert_eq!(m.drawable().size(), (0, 0));
    }

    #[test]
    fn region_past_memory_is_rejected() {
        let (mut m, _) = setup(16);
        let err = m.present(&WindowDescriptor::packed(2, 2, 4)).unwrap_err();
        assert_eq!(err, SurfaceError::OutOfBounds { end: 20, memory_len: 16 });
    }

    #[test]
    fn overflowing_size_is_rejected() {
        let (mut m, _) = setup(16);
        let w = WindowDescriptor {
            image_width: u32::MAX,
            image_height: u32::MAX,
            image_data_offset: usize::MAX / 2,
            image_data_byte_length: 0,
        };
        assert!(matches!(m.present(&w), Err(SurfaceError::SizeOverflow { .. })));
    }
}
