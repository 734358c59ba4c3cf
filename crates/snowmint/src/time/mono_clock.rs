use crate::TimeSource;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// A wall-clock-anchored time source that never goes backward.
///
/// The clock samples `SystemTime::now()` once at construction and from then on
/// advances by the elapsed monotonic time (`Instant`). Adjustments made to the
/// system clock after construction (e.g., NTP corrections or manual changes)
/// are ignored, so a generator driven by this clock never observes a
/// regression.
///
/// The trade-off is drift: a long-running process will slowly diverge from
/// the host's wall clock by however much the system clock was corrected.
///
/// # Example
///
/// ```
/// use snowmint::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::new();
/// let a = clock.current_millis();
/// std::thread::sleep(std::time::Duration::from_millis(2));
/// let b = clock.current_millis();
/// assert!(b >= a);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    anchor: u64, // unix millis at `start`
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Constructs a clock anchored to the current wall-clock time.
    pub fn new() -> Self {
        let start = Instant::now();
        let anchor = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as u64);
        Self::with_anchor(anchor, start)
    }

    /// Constructs a clock that reports `anchor` milliseconds at the instant
    /// `start`.
    pub const fn with_anchor(anchor: u64, start: Instant) -> Self {
        Self { start, anchor }
    }
}

impl TimeSource for MonotonicClock {
    /// Returns the anchor plus the monotonic time elapsed since construction.
    fn current_millis(&self) -> u64 {
        self.anchor + self.start.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    #[test]
    fn monotonic_clock_starts_at_anchor() {
        let clock = MonotonicClock::with_anchor(1_000, Instant::now());
        let now = clock.current_millis();
        assert!((1_000..1_000 + 1_000).contains(&now));
    }

    #[test]
    fn monotonic_clock_never_regresses() {
        let clock = MonotonicClock::new();
        let mut last = clock.current_millis();
        for _ in 0..10_000 {
            let now = clock.current_millis();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn monotonic_clock_advances() {
        let clock = MonotonicClock::new();
        let before = clock.current_millis();
        std::thread::sleep(Duration::from_millis(5));
        assert!(clock.current_millis() >= before + 5);
    }
}
