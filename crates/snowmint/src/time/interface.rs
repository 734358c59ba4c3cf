use core::time::Duration;

/// Default epoch: Sunday, April 21, 2019 00:00:00 UTC
pub const DEFAULT_EPOCH: Duration = Duration::from_millis(1_555_804_800_000);

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the real system clock, a clock that
/// never regresses, or a mocked time source in tests.
///
/// Unlike the generator's relative timestamp, the value returned here is
/// **milliseconds since the Unix epoch**. The generator subtracts its own
/// configured epoch when packing an ID.
///
/// # Example
///
/// ```
/// use snowmint::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}
