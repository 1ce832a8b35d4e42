use std::fmt;

/// Reasons a frame could not be painted.
///
/// None of these are fatal; the frame is skipped and the loop continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// `width * height * 4` does not fit the address space.
    SizeOverflow { width: u32, height: u32 },
    /// The region is shorter than the image needs.
    ShortBuffer { expected: usize, actual: usize },
    /// The region extends past the end of shared memory.
    OutOfBounds { end: usize, memory_len: usize },
    /// The platform refused the blit.
    Rejected(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeOverflow { width, height } => {
                write!(f, "image size {width}x{height} overflows")
            }
            Self::ShortBuffer { expected, actual } => {
                write!(f, "pixel region holds {actual} bytes, image needs {expected}")
            }
            Self::OutOfBounds { end, memory_len } => {
                write!(f, "pixel region ends at {end}, past shared memory of {memory_len} bytes")
            }
            Self::Rejected(msg) => write!(f, "blit rejected: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}
