use crate::TimeSource;
use std::time::{SystemTime, UNIX_EPOCH};

/// The host's wall clock.
///
/// Every call reads `SystemTime::now()`, so the returned value follows any
/// adjustment made to the system clock, including backward steps from NTP.
/// The generator detects such regressions and refuses to issue IDs until the
/// clock catches up (see [`Error::ClockMovedBackward`]).
///
/// A clock set before 1970 reads as `0`.
///
/// [`Error::ClockMovedBackward`]: crate::Error::ClockMovedBackward
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as u64)
    }
}
