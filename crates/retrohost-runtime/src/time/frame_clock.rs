use std::cell::Cell;
use std::rc::Rc;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Timestamp handed to the engine for this frame.
    pub timestamp_ms: f64,

    /// Time since the previous frame, never negative.
    pub dt_ms: f64,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Read side of the current frame timestamp.
///
/// Clones observe the same value. Handed to input handlers so events carry
/// the timestamp of the frame they belong to.
#[derive(Debug, Clone, Default)]
pub struct FrameStamp(Rc<Cell<f64>>);

impl FrameStamp {
    #[inline]
    pub fn get(&self) -> f64 {
        self.0.get()
    }

    fn set(&self, timestamp_ms: f64) {
        self.0.set(timestamp_ms);
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Fed by the scheduler with the platform timestamp of each frame; a
/// timestamp going backwards is held at the previous value so engines only
/// ever see a monotonic sequence.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
    frame_index: u64,
    stamp: FrameStamp,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the baseline without counting a frame.
    pub fn reset(&mut self, now_ms: f64) {
        self.last = Some(now_ms);
        self.stamp.set(now_ms);
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self, now_ms: f64) -> FrameTime {
        let timestamp_ms = match self.last {
            Some(last) if now_ms < last => last,
            _ => now_ms,
        };
        let dt_ms = self.last.map_or(0.0, |last| timestamp_ms - last);

        self.last = Some(timestamp_ms);
        self.stamp.set(timestamp_ms);

        let ft = FrameTime {
            timestamp_ms,
            dt_ms,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }

    pub fn stamp(&self) -> FrameStamp {
        self.stamp.clone()
    }

    pub fn frames(&self) -> u64 {
        self.frame_index
    }
}
