use crate::SnowflakeId;

/// Represents the result of a non-blocking attempt to generate an ID.
///
/// This type models the outcome of
/// [`SnowflakeGenerator::try_poll_id`](crate::SnowflakeGenerator::try_poll_id):
///
/// - [`Poll::Ready`] indicates a new ID was successfully generated.
/// - [`Poll::Pending`] means the sequence for the current millisecond is
///   exhausted and the caller should back off for `yield_for` milliseconds.
///
/// This allows async callers and cooperative loops to wait outside the
/// generator's lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: SnowflakeId,
    },
    /// No ID could be generated because the sequence has been exhausted for the
    /// current millisecond.
    Pending {
        /// Milliseconds to wait before trying again.
        yield_for: u64,
    },
}

/// Strategies for waiting out an exhausted millisecond.
///
/// When 4096 IDs have already been issued within one millisecond, the
/// generator must wait for the clock to advance before issuing another. The
/// wait happens while the generator's lock is held, so the chosen strategy
/// only trades CPU usage against latency. It never affects ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backoff {
    /// Busy-waits in a tight loop.
    ///
    /// Offers the lowest latency at the cost of pegging a core for up to a
    /// millisecond.
    #[default]
    Spin,

    /// Yields to the OS scheduler to allow other threads to run.
    ///
    /// More CPU-friendly than spinning, but may still busy-wait if no other
    /// threads are ready.
    Yield,

    /// Sleeps for the remaining time until the next millisecond.
    ///
    /// Lowest CPU usage, but may oversleep depending on platform-specific
    /// scheduler resolution.
    Sleep,
}

impl Backoff {
    /// Waits once according to the strategy.
    pub fn wait(self, yield_for: u64) {
        match self {
            Self::Spin => core::hint::spin_loop(),
            Self::Yield => std::thread::yield_now(),
            Self::Sleep => std::thread::sleep(core::time::Duration::from_millis(yield_for)),
        }
    }
}
