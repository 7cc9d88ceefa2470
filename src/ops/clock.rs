use std::cell::Cell;

use chrono::Utc;

/// Source of creation-timestamp ids
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

/// Wall clock, nudged forward so two ids taken in the same millisecond differ
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Cell<i64>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let next = now.max(self.last.get() + 1);
        self.last.set(next);
        next
    }
}

/// Deterministic clock for tests: starts at `start` and advances by one per call
#[derive(Debug)]
pub struct StepClock {
    next: Cell<i64>,
}

impl StepClock {
    pub fn new(start: i64) -> Self {
        StepClock {
            next: Cell::new(start),
        }
    }
}

impl Clock for StepClock {
    fn now_millis(&self) -> i64 {
        let value = self.next.get();
        self.next.set(value + 1);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_strictly_increasing() {
        let clock = SystemClock::new();
        let a = clock.now_millis();
        let b = clock.now_millis();
        let c = clock.now_millis();
        assert!(a < b && b < c);
    }

    #[test]
    fn step_clock_counts_up() {
        let clock = StepClock::new(100);
        assert_eq!(clock.now_millis(), 100);
        assert_eq!(clock.now_millis(), 101);
    }
}
