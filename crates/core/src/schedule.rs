//! Fixed-interval tick scheduling.
//!
//! Hosts deliver frames at whatever rate they like; a [`TickSchedule`]
//! accumulates elapsed time and reports how many fixed-length ticks are due.
//! Catch-up after a long stall is capped so a backgrounded tab does not
//! replay minutes of motion in one frame.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default tick interval, roughly 60 Hz.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(16);
/// Most ticks a single `advance` call will report.
pub const MAX_CATCH_UP: u32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSchedule {
    interval: Duration,
    pending: Duration,
    ticks: u64,
    cancelled: bool,
}

impl TickSchedule {
    /// A zero interval is replaced by [`DEFAULT_INTERVAL`].
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: if interval.is_zero() { DEFAULT_INTERVAL } else { interval },
            pending: Duration::ZERO,
            ticks: 0,
            cancelled: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total ticks reported so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stops the schedule; every later `advance` reports zero ticks.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.pending = Duration::ZERO;
    }

    /// Adds `elapsed` and returns how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.cancelled {
            return 0;
        }
        self.pending += elapsed;
        let mut due = 0;
        while self.pending >= self.interval {
            self.pending -= self.interval;
            due += 1;
            if due == MAX_CATCH_UP {
                // drop the backlog rather than spiral
                self.pending = Duration::ZERO;
                break;
            }
        }
        self.ticks += u64::from(due);
        due
    }
}

impl Default for TickSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_frames_accumulate() {
        let mut s = TickSchedule::default();
        assert_eq!(s.advance(Duration::from_millis(10)), 0);
        assert_eq!(s.advance(Duration::from_millis(10)), 1);
        assert_eq!(s.advance(Duration::from_millis(12)), 1);
        assert_eq!(s.ticks(), 2);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut s = TickSchedule::default();
        assert_eq!(s.advance(Duration::from_secs(5)), MAX_CATCH_UP);
        assert_eq!(s.advance(Duration::from_millis(1)), 0);
    }

    #[test]
    fn cancel_stops_ticks() {
        let mut s = TickSchedule::default();
        s.advance(Duration::from_millis(8));
        s.cancel();
        assert!(s.is_cancelled());
        assert_eq!(s.advance(Duration::from_millis(100)), 0);
    }

    #[test]
    fn zero_interval_falls_back_to_default() {
        let s = TickSchedule::new(Duration::ZERO);
        assert_eq!(s.interval(), DEFAULT_INTERVAL);
    }
}
