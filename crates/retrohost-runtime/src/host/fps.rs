/// One FPS measurement window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FpsSample {
    pub frames_per_second: f64,
    pub ms_per_frame: f64,
    pub frame_count: u32,
}

/// Rolling frames-per-second measurement.
///
/// Purely observational. The first recorded frame opens the window; each
/// later frame is counted, and once the window spans `interval_ms` a sample
/// is produced and a new window opens at that frame.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    interval_ms: f64,
    frame_count: u32,
    window_start: Option<f64>,
    last_frame: f64,
}

impl FpsCounter {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            frame_count: 0,
            window_start: None,
            last_frame: 0.0,
        }
    }

    pub fn record(&mut self, timestamp_ms: f64) -> Option<FpsSample> {
        let Some(start) = self.window_start else {
            self.window_start = Some(timestamp_ms);
            self.last_frame = timestamp_ms;
            return None;
        };

        self.frame_count += 1;
        self.last_frame = timestamp_ms;

        let elapsed = timestamp_ms - start;
        if elapsed < self.interval_ms {
            return None;
        }

        let sample = (elapsed > 0.0).then(|| FpsSample {
            frames_per_second: 1000.0 * f64::from(self.frame_count) / elapsed,
            ms_per_frame: elapsed / f64::from(self.frame_count),
            frame_count: self.frame_count,
        });

        self.frame_count = 0;
        self.window_start = Some(timestamp_ms);
        sample
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Timestamp of the most recent recorded frame.
    pub fn last_frame(&self) -> f64 {
        self.last_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_sample_inside_window() {
        let mut c = FpsCounter::new(1000.0);
        for i in 0..30 {
            assert!(c.record(f64::from(i) * 20.0).is_none());
        }
    }

    #[test]
    fn sixty_hz_reports_sixty() {
        let mut c = FpsCounter::new(1000.0);
        let mut sample = None;
        for i in 0..=60 {
            if let Some(s) = c.record(f64::from(i) * 1000.0 / 60.0) {
                sample = Some(s);
            }
        }
        let s = sample.expect("one window elapsed");
        assert_eq!(s.frame_count, 60);
        assert!((s.frames_per_second - 60.0).abs() < 1e-6);
        assert!((s.ms_per_frame - 1000.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn window_resets_after_sample() {
        let mut c = FpsCounter::new(100.0);
        c.record(0.0);
        c.record(50.0);
        let first = c.record(100.0).unwrap();
        assert_eq!(first.frame_count, 2);
        assert!(c.record(150.0).is_none());
        let second = c.record(200.0).unwrap();
        assert_eq!(second.frame_count, 2);
        assert_eq!(c.last_frame(), 200.0);
    }

    #[test]
    fn zero_interval_with_identical_timestamps_yields_nothing() {
        let mut c = FpsCounter::new(0.0);
        c.record(5.0);
        assert!(c.record(5.0).is_none());
    }
}
