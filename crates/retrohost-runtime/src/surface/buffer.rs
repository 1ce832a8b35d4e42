use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::WindowDescriptor;

use super::{Drawable, SurfaceError};

/// Shared linear memory, the native counterpart of a wasm memory buffer.
///
/// Clones share the same bytes. The engine writes, the host reads.
#[derive(Debug, Clone, Default)]
pub struct LinearMemory(Rc<RefCell<Vec<u8>>>);

impl LinearMemory {
    pub fn new(len: usize) -> Self {
        Self(Rc::new(RefCell::new(vec![0; len])))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies `bytes` in at `offset`, growing the memory if needed.
    pub fn write(&self, offset: usize, bytes: &[u8]) {
        let mut mem = self.0.borrow_mut();
        let end = offset + bytes.len();
        if mem.len() < end {
            mem.resize(end, 0);
        }
        mem[offset..end].copy_from_slice(bytes);
    }

    /// Replaces the whole buffer, like an engine reallocating its memory.
    pub fn replace(&self, bytes: Vec<u8>) {
        *self.0.borrow_mut() = bytes;
    }

    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(&self.0.borrow())
    }
}

/// Software drawable: an RGBA8 framebuffer fed from a [`LinearMemory`].
#[derive(Debug)]
pub struct BufferDrawable {
    memory: LinearMemory,
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    blits: u64,
}

impl BufferDrawable {
    pub fn new(memory: LinearMemory) -> Self {
        Self {
            memory,
            width: 0,
            height: 0,
            pixels: Vec::new(),
            blits: 0,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Number of successful blits.
    pub fn blits(&self) -> u64 {
        self.blits
    }
}

impl Drawable for BufferDrawable {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, [0; 4]);
    }

    fn put_image(&mut self, window: &WindowDescriptor) -> Result<(), SurfaceError> {
        let range = window.pixel_range().ok_or(SurfaceError::SizeOverflow {
            width: window.image_width,
            height: window.image_height,
        })?;
        let pixels = &mut self.pixels;
        self.memory.with_bytes(|bytes| -> Result<(), SurfaceError> {
            let region = bytes.get(range.clone()).ok_or(SurfaceError::OutOfBounds {
                end: range.end,
                memory_len: bytes.len(),
            })?;
            let src: &[[u8; 4]] = bytemuck::try_cast_slice(region)
                .map_err(|e| SurfaceError::Rejected(e.to_string()))?;
            if src.len() != pixels.len() {
                return Err(SurfaceError::Rejected(format!(
                    "{} pixels for a {}-pixel surface",
                    src.len(),
                    pixels.len()
                )));
            }
            pixels.copy_from_slice(src);
            Ok(())
        })?;
        self.blits += 1;
        Ok(())
    }

    fn memory_len(&self) -> Option<usize> {
        Some(self.memory.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clones_share_bytes() {
        let a = LinearMemory::new(4);
        let b = a.clone();
        a.write(0, &[1, 2]);
        assert_eq!(b.with_bytes(|m| m.to_vec()), vec![1, 2, 0, 0]);
    }

    #[test]
    fn memory_write_grows() {
        let m = LinearMemory::new(2);
        m.write(4, &[5]);
        assert_eq!(m.len(), 5);
    }

    #[test]
    fn resize_clears_content() {
        let memory = LinearMemory::new(4);
        memory.write(0, &[1, 2, 3, 4]);
        let mut d = BufferDrawable::new(memory);
        d.resize(1, 1);
        d.put_image(&WindowDescriptor::packed(1, 1, 0)).unwrap();
        assert_eq!(d.pixel(0, 0), Some([1, 2, 3, 4]));
        d.resize(1, 1);
        assert_eq!(d.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn put_image_reads_current_memory() {
        let memory = LinearMemory::new(0);
        let mut d = BufferDrawable::new(memory.clone());
        d.resize(1, 1);
        memory.replace(vec![0, 0, 0, 0, 10, 20, 30, 40]);
        d.put_image(&WindowDescriptor::packed(1, 1, 4)).unwrap();
        assert_eq!(d.pixel(0, 0), Some([10, 20, 30, 40]));
        assert_eq!(d.blits(), 1);
    }

    #[test]
    fn pixel_out_of_range() {
        let d = BufferDrawable::new(LinearMemory::new(0));
        assert_eq!(d.pixel(0, 0), None);
    }
}
