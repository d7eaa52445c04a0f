//! Tick scheduling shared by the session drivers
//!
//! One simulation tick runs per frame at a fixed cadence. A tick never
//! yields; the scheduler only sleeps between ticks.

use std::time::{Duration, Instant};

/// Fixed-cadence tick clock.
#[derive(Debug, Clone, Copy)]
pub struct TickScheduler {
    frame: Duration,
}

impl TickScheduler {
    pub fn new(tick_ms: u64) -> Self {
        Self {
            frame: Duration::from_millis(tick_ms),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Sleep out whatever is left of the frame that began at `frame_start`.
    ///
    /// # Example
    /// ```rust,no_run
    /// use std::time::Instant;
    /// # use action_tennis::session::TickScheduler;
    /// let scheduler = TickScheduler::new(16);
    /// let frame_start = Instant::now();
    /// // ... one tick of work ...
    /// scheduler.limit_frame_rate(frame_start);
    /// ```
    pub fn limit_frame_rate(&self, frame_start: Instant) {
        if let Some(remaining) = self.remaining(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.frame.checked_sub(elapsed).filter(|d| !d.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_frame_time() {
        let scheduler = TickScheduler::new(16);
        assert_eq!(
            scheduler.remaining(Duration::from_millis(10)),
            Some(Duration::from_millis(6))
        );
        assert_eq!(scheduler.remaining(Duration::from_millis(16)), None);
        assert_eq!(scheduler.remaining(Duration::from_millis(40)), None);
    }
}
