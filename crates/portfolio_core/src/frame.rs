/// Coalesces animation-frame requests: any number of requests between two
/// frames yield a single frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameScheduler {
    pending: bool,
    delivered: u64,
    last_timestamp_ms: Option<u64>,
}

impl FrameScheduler {
    /// Returns true when the caller must ask the host for a frame; false when
    /// one is already on its way.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Marks a frame as delivered and returns the time since the previous
    /// frame in milliseconds (0 for the first frame or a clock going back).
    pub fn complete(&mut self, timestamp_ms: u64) -> u64 {
        self.pending = false;
        self.delivered += 1;
        let elapsed = self
            .last_timestamp_ms
            .map_or(0, |last| timestamp_ms.saturating_sub(last));
        self.last_timestamp_ms = Some(timestamp_ms.max(self.last_timestamp_ms.unwrap_or(0)));
        elapsed
    }

    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Drops any outstanding request, e.g. when the page unmounts.
    pub fn reset(&mut self) {
        self.pending = false;
        self.last_timestamp_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::FrameScheduler;

    #[test]
    fn requests_coalesce_until_frame_completes() {
        let mut frames = FrameScheduler::default();
        assert!(frames.request());
        assert!(!frames.request());
        assert!(!frames.request());
        assert_eq!(frames.complete(1000), 0);
        assert!(frames.request());
        assert_eq!(frames.complete(1016), 16);
        assert_eq!(frames.delivered(), 2);
    }

    #[test]
    fn clock_going_back_yields_zero_elapsed() {
        let mut frames = FrameScheduler::default();
        frames.complete(500);
        assert_eq!(frames.complete(400), 0);
        assert_eq!(frames.complete(510), 10);
    }
}
