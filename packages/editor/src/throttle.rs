//! # Change Throttler
//!
//! Collapses a burst of rapid triggers into one trailing recomputation per
//! fixed time window.
//!
//! The primitive is deliberately passive: `submit` stashes the most recent
//! argument and arms a deadline, `poll` fires once the window has elapsed.
//! The host drives time by passing `Instant`s, which keeps the controller
//! single-threaded and the windows exact under test.

use std::time::{Duration, Instant};

/// Trailing-edge rate limiter carrying the most recent argument.
///
/// A burst of submissions inside one window produces exactly one fire, with
/// the latest argument. Later submissions within an armed window replace the
/// pending argument without extending the deadline.
#[derive(Debug)]
pub struct Throttle<T> {
    interval: Duration,
    deadline: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
            pending: None,
        }
    }

    /// Record the most recent argument, arming the window if idle.
    pub fn submit(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        if self.deadline.is_none() {
            self.deadline = Some(now + self.interval);
        }
    }

    /// Take the pending argument if the window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// Instant at which `poll` will next fire, if a submission is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drop any pending argument and disarm the window.
    pub fn clear(&mut self) {
        self.deadline = None;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(1);

    #[test]
    fn test_idle_throttle_does_not_fire() {
        let mut throttle: Throttle<u32> = Throttle::new(INTERVAL);
        let now = Instant::now();
        assert!(throttle.poll(now).is_none());
        assert!(throttle.next_deadline().is_none());
    }

    #[test]
    fn test_burst_collapses_to_latest_argument() {
        let mut throttle = Throttle::new(INTERVAL);
        let t0 = Instant::now();

        for i in 0u32..10 {
            throttle.submit(i, t0 + Duration::from_millis(u64::from(i) * 20));
        }

        // Nothing fires inside the window.
        assert_eq!(throttle.poll(t0 + Duration::from_millis(500)), None);

        // One fire at the trailing edge, with the most recent argument.
        assert_eq!(throttle.poll(t0 + INTERVAL), Some(9));

        // Consumed: no second fire.
        assert_eq!(throttle.poll(t0 + INTERVAL * 2), None);
    }

    #[test]
    fn test_window_rearms_after_fire() {
        let mut throttle = Throttle::new(INTERVAL);
        let t0 = Instant::now();

        throttle.submit("a", t0);
        assert_eq!(throttle.poll(t0 + INTERVAL), Some("a"));

        let t1 = t0 + INTERVAL + Duration::from_millis(100);
        throttle.submit("b", t1);
        assert_eq!(throttle.next_deadline(), Some(t1 + INTERVAL));
        assert_eq!(throttle.poll(t1 + INTERVAL), Some("b"));
    }

    #[test]
    fn test_later_submission_keeps_original_deadline() {
        let mut throttle = Throttle::new(INTERVAL);
        let t0 = Instant::now();

        throttle.submit(1, t0);
        throttle.submit(2, t0 + Duration::from_millis(900));

        // The window is anchored at the first submission of the burst.
        assert_eq!(throttle.next_deadline(), Some(t0 + INTERVAL));
        assert_eq!(throttle.poll(t0 + INTERVAL), Some(2));
    }

    #[test]
    fn test_clear_discards_pending() {
        let mut throttle = Throttle::new(INTERVAL);
        let t0 = Instant::now();

        throttle.submit(1, t0);
        throttle.clear();

        assert!(throttle.next_deadline().is_none());
        assert_eq!(throttle.poll(t0 + INTERVAL), None);
    }
}
