//! Cancellable, restartable one-shot delay.
//!
//! The timer holds a deadline instead of a callback. Its owner polls it from
//! the same event loop that delivers pen input, so firing is serialised with
//! every other state change.

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

/// A one-shot deadline that fires at most once per start.
#[derive(Debug, Clone)]
pub struct RevertTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl RevertTimer {
    /// Create a stopped timer with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Start the timer, replacing any running deadline.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Push a running deadline back to a full delay from `now`.
    /// Does nothing when stopped.
    pub fn restart(&mut self, now: Instant) {
        if self.deadline.is_some() {
            self.start(now);
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Stop and report true if the deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(5000);

    #[test]
    fn test_fires_once() {
        let start = Instant::now();
        let mut timer = RevertTimer::new(DELAY);
        timer.start(start);

        assert!(!timer.fire_if_due(start + Duration::from_millis(4999)));
        assert!(timer.fire_if_due(start + DELAY));
        assert!(!timer.is_running());
        assert!(!timer.fire_if_due(start + DELAY * 2));
    }

    #[test]
    fn test_restart_pushes_deadline() {
        let start = Instant::now();
        let mut timer = RevertTimer::new(DELAY);
        timer.start(start);
        timer.restart(start + Duration::from_millis(3000));

        assert!(!timer.fire_if_due(start + DELAY));
        assert!(timer.fire_if_due(start + Duration::from_millis(8000)));
    }

    #[test]
    fn test_restart_when_stopped_does_nothing() {
        let mut timer = RevertTimer::new(DELAY);
        timer.restart(Instant::now());
        assert!(!timer.is_running());
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut timer = RevertTimer::new(DELAY);
        timer.start(start);
        timer.cancel();
        assert!(!timer.fire_if_due(start + DELAY));
    }
}
