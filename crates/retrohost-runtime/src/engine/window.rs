use std::ops::Range;

/// Snapshot of the engine's renderable image.
///
/// Describes RGBA8 pixels living in the engine's linear memory at
/// `image_data_offset`. Never cache one across frames.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WindowDescriptor {
    pub image_width: u32,
    pub image_height: u32,
    pub image_data_offset: usize,
    pub image_data_byte_length: usize,
}

impl WindowDescriptor {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Descriptor for a tightly packed RGBA8 image at `offset`.
    pub fn packed(image_width: u32, image_height: u32, image_data_offset: usize) -> Self {
        let image_data_byte_length = image_width as usize * image_height as usize * Self::BYTES_PER_PIXEL;
        Self {
            image_width,
            image_height,
            image_data_offset,
            image_data_byte_length,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    /// Bytes needed for `image_width * image_height` RGBA8 pixels.
    ///
    /// `None` when the product does not fit in `usize`.
    pub fn expected_byte_length(&self) -> Option<usize> {
        (self.image_width as usize)
            .checked_mul(self.image_height as usize)?
            .checked_mul(Self::BYTES_PER_PIXEL)
    }

    /// Memory range holding exactly the image pixels.
    pub fn pixel_range(&self) -> Option<Range<usize>> {
        let len = self.expected_byte_length()?;
        let end = self.image_data_offset.checked_add(len)?;
        Some(self.image_data_offset..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_computes_length() {
        let w = WindowDescriptor::packed(4, 3, 16);
        assert_eq!(w.image_data_byte_length, 48);
        assert_eq!(w.expected_byte_length(), Some(48));
        assert_eq!(w.pixel_range(), Some(16..64));
    }

    #[test]
    fn empty_image_has_empty_range() {
        let w = WindowDescriptor::packed(0, 10, 8);
        assert_eq!(w.pixel_range(), Some(8..8));
    }

    #[test]
    fn range_overflow_is_none() {
        let w = WindowDescriptor {
            image_width: 2,
            image_height: 2,
            image_data_offset: usize::MAX - 4,
            image_data_byte_length: 16,
        };
        assert_eq!(w.pixel_range(), None);
    }
}
