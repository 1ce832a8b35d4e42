/// Deduplicates surface size reports.
///
/// Observers may report the same size repeatedly (layout passes, initial
/// observation); the engine only hears about actual changes.
#[derive(Debug, Default, Clone)]
pub struct ResizeTracker {
    last: Option<(u32, u32)>,
    forwarded: u64,
}

impl ResizeTracker {
    /// Records a reported size; returns `true` if it differs from the last one.
    pub fn observe(&mut self, width: u32, height: u32) -> bool {
        if self.last == Some((width, height)) {
            return false;
        }
        self.last = Some((width, height));
        self.forwarded += 1;
        true
    }

    pub fn last(&self) -> Option<(u32, u32)> {
        self.last
    }

    pub fn forwarded(&self) -> u64 {
        self.forwarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_report_always_forwards() {
        let mut t = ResizeTracker::default();
        assert!(t.observe(800, 600));
        assert_eq!(t.last(), Some((800, 600)));
    }

    #[test]
    fn repeated_size_is_dropped() {
        let mut t = ResizeTracker::default();
        t.observe(800, 600);
        assert!(!t.observe(800, 600));
        assert!(t.observe(400, 300));
        assert_eq!(t.forwarded(), 2);
    }
}
