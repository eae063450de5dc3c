use std::time::{Duration, Instant};

/// Animation-frame throttle for scroll/resize reposition work.
///
/// Scroll containers can fire dozens of events per frame; the overlay only
/// needs one reposition per frame. The clock is injected so the gate is
/// testable without real time.
#[derive(Debug)]
pub struct FrameThrottle {
    frame: Duration,
    last_run: Option<Instant>,
}

impl FrameThrottle {
    /// Roughly one 60Hz frame.
    pub const DEFAULT_FRAME: Duration = Duration::from_millis(16);

    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            last_run: None,
        }
    }

    /// Whether work may run at `now`. Records the run when it answers yes.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last_run {
            Some(last) if now.duration_since(last) < self.frame => false,
            _ => {
                self.last_run = Some(now);
                true
            }
        }
    }

    /// Forget the last run, e.g. when the overlay is reopened.
    pub fn reset(&mut self) {
        self.last_run = None;
    }
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FRAME)
    }
}
