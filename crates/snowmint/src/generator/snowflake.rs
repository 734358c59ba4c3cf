use core::time::Duration;

#[cfg(feature = "tracing")]
use tracing::{debug, instrument, trace, warn};

use crate::{
    Error, FixedNodeId, GeneratorConfig, NodeId, NodeResolver, PrivateIpv4Resolver, Result,
    SnowflakeId, SystemClock, TimeSource,
    generator::{Backoff, Mutex, MutexGuard, Poll},
};

/// Mutable generation state, guarded by the generator's lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct State {
    /// Unix millis of the last issued ID.
    pub(crate) last_millis: u64,
    /// Sequence of the last issued ID within `last_millis`.
    pub(crate) sequence: u64,
}

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// Each generator embeds a fixed node ID and measures time from a fixed epoch.
/// The generation state (last timestamp and sequence) sits behind a single
/// [`Mutex`], and the whole of [`next_id`] runs inside that lock. Share one
/// generator per process across threads by reference or through an
/// [`Arc`](std::sync::Arc).
///
/// ## Guarantees
/// - IDs from one generator are unique and strictly increasing as long as the
///   clock does not move backward.
/// - A backward clock step is reported as [`Error::ClockMovedBackward`] and
///   leaves the state untouched.
/// - More than 4096 requests within one millisecond wait (per [`Backoff`])
///   for the next millisecond rather than break ordering.
///
/// ## See Also
/// - [`GeneratorConfig`]
/// - [`NodeResolver`]
///
/// [`next_id`]: SnowflakeGenerator::next_id
#[derive(Debug)]
pub struct SnowflakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    pub(crate) state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    pub(crate) state: Mutex<State>,
    epoch: u64,
    node_id: NodeId,
    time: T,
}

impl SnowflakeGenerator<SystemClock> {
    /// Creates a generator driven by the system wall clock.
    ///
    /// The node ID comes from `config.node_id` when set, and is otherwise
    /// derived from the host's private IPv4 address with
    /// [`PrivateIpv4Resolver`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidNodeId`] if the explicit node ID is outside
    ///   `[0, 1023]`
    /// - [`Error::EpochOutOfRange`] if `config.epoch` in milliseconds does not
    ///   fit in a `u64`
    /// - [`Error::NoPrivateAddress`] or [`Error::NetworkQueryFailed`] if the
    ///   node ID had to be derived and could not be
    ///
    /// # Example
    /// ```
    /// use snowmint::{GeneratorConfig, SnowflakeGenerator};
    ///
    /// let generator = SnowflakeGenerator::new(GeneratorConfig::default().with_node_id(7))?;
    ///
    /// let a = generator.next_id()?;
    /// let b = generator.next_id()?;
    /// assert!(a < b);
    /// assert_eq!(a.node_id(), 7);
    /// # Ok::<(), snowmint::Error>(())
    /// ```
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator from `config`, reading time from `time`.
    ///
    /// # Errors
    ///
    /// Same as [`SnowflakeGenerator::new`].
    pub fn with_clock(config: GeneratorConfig, time: T) -> Result<Self> {
        match config.node_id {
            Some(raw) => Self::with_resolver(config.epoch, &FixedNodeId::new(raw), time),
            None => Self::with_resolver(config.epoch, &PrivateIpv4Resolver, time),
        }
    }

    /// Creates a generator whose node ID is determined by `resolver`.
    ///
    /// The resolver is consulted exactly once.
    ///
    /// # Errors
    ///
    /// Propagates the resolver's error, or [`Error::EpochOutOfRange`] as in
    /// [`SnowflakeGenerator::from_parts`].
    ///
    /// # Example
    /// ```
    /// use snowmint::{
    ///     DEFAULT_EPOCH, InMemoryRegistry, MonotonicClock, RegistryResolver, SnowflakeGenerator,
    /// };
    ///
    /// let registry = InMemoryRegistry::new();
    /// let resolver = RegistryResolver::new(&registry);
    /// let generator =
    ///     SnowflakeGenerator::with_resolver(DEFAULT_EPOCH, &resolver, MonotonicClock::new())?;
    /// assert_eq!(generator.node_id().get(), 0);
    /// # Ok::<(), snowmint::Error>(())
    /// ```
    pub fn with_resolver(epoch: Duration, resolver: &impl NodeResolver, time: T) -> Result<Self> {
        let node_id = resolver.resolve()?;
        #[cfg(feature = "tracing")]
        debug!(%node_id, epoch_ms = %epoch.as_millis(), "resolved node ID");
        Self::from_parts(epoch, node_id, time)
    }

    /// Creates a generator from an already-validated node ID.
    ///
    /// The last timestamp and sequence start at zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EpochOutOfRange`] if `epoch` in milliseconds does not
    /// fit in a `u64`.
    pub fn from_parts(epoch: Duration, node_id: NodeId, time: T) -> Result<Self> {
        let epoch_ms = epoch.as_millis();
        let epoch = u64::try_from(epoch_ms).map_err(|_| Error::EpochOutOfRange { epoch_ms })?;
        Ok(Self::from_state(epoch, node_id, State::default(), time))
    }

    pub(crate) fn from_state(epoch: u64, node_id: NodeId, state: State, time: T) -> Self {
        Self {
            state: Mutex::new(state).into(),
            epoch,
            node_id,
            time,
        }
    }

    /// Returns the epoch IDs are measured from.
    pub const fn epoch(&self) -> Duration {
        Duration::from_millis(self.epoch)
    }

    /// Returns the node ID embedded in every ID.
    pub const fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Returns the time source.
    pub const fn clock(&self) -> &T {
        &self.time
    }

    /// Generates the next ID, spinning through an exhausted millisecond.
    ///
    /// Equivalent to `next_id_with_backoff(Backoff::Spin)`.
    ///
    /// # Errors
    ///
    /// See [`SnowflakeGenerator::next_id_with_backoff`].
    pub fn next_id(&self) -> Result<SnowflakeId> {
        self.next_id_with_backoff(Backoff::Spin)
    }

    /// Generates the next ID.
    ///
    /// The clock is read and the state updated inside the generator's lock.
    /// If the sequence for the current millisecond is exhausted, the clock is
    /// re-read (calling `backoff` between reads) until it advances, still
    /// holding the lock. This wait is bounded by about one millisecond.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockMovedBackward`] if the clock is behind the last issued
    ///   timestamp; no state is modified
    /// - [`Error::ClockBeforeEpoch`] or [`Error::EpochExhausted`] if the
    ///   time since the epoch does not fit the 41-bit timestamp field
    /// - [`Error::LockPoisoned`] if another thread panicked while generating
    ///
    /// # Example
    /// ```
    /// use snowmint::{Backoff, GeneratorConfig, SnowflakeGenerator};
    ///
    /// let generator = SnowflakeGenerator::new(GeneratorConfig::default().with_node_id(1))?;
    /// let id = generator.next_id_with_backoff(Backoff::Yield)?;
    /// assert_eq!(id.node_id(), 1);
    /// # Ok::<(), snowmint::Error>(())
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id_with_backoff(&self, backoff: Backoff) -> Result<SnowflakeId> {
        let mut state = self.lock()?;

        let mut now = self.time.current_millis();
        if now < state.last_millis {
            return Err(Self::cold_clock_behind(now, state.last_millis));
        }
        if now == state.last_millis && state.sequence == SnowflakeId::max_sequence() {
            now = self.cold_wait_for_next_millis(state.last_millis, backoff);
        }

        let elapsed = self.elapsed_since_epoch(now)?;
        Ok(Self::advance(&mut state, now, elapsed, self.node_id))
    }

    /// Attempts to generate the next ID without waiting.
    ///
    /// Unlike [`SnowflakeGenerator::next_id`], an exhausted millisecond is
    /// reported as [`Poll::Pending`] and the lock is released, so the caller
    /// can back off (e.g., with an async sleep) and try again.
    ///
    /// # Returns
    /// - `Ok(Poll::Ready { id })`: a new ID is available
    /// - `Ok(Poll::Pending { yield_for })`: the time to wait (in milliseconds)
    ///   before trying again
    ///
    /// # Errors
    ///
    /// Same as [`SnowflakeGenerator::next_id_with_backoff`].
    ///
    /// # Example
    /// ```
    /// use snowmint::{GeneratorConfig, Poll, SnowflakeGenerator};
    ///
    /// let generator = SnowflakeGenerator::new(GeneratorConfig::default().with_node_id(0))?;
    ///
    /// let id = loop {
    ///     match generator.try_poll_id()? {
    ///         Poll::Ready { id } => break id,
    ///         Poll::Pending { yield_for } => {
    ///             std::thread::sleep(std::time::Duration::from_millis(yield_for));
    ///         }
    ///     }
    /// };
    /// assert!(id.is_valid());
    /// # Ok::<(), snowmint::Error>(())
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<Poll> {
        let mut state = self.lock()?;

        let now = self.time.current_millis();
        if now < state.last_millis {
            return Err(Self::cold_clock_behind(now, state.last_millis));
        }
        if now == state.last_millis && state.sequence == SnowflakeId::max_sequence() {
            return Ok(Poll::Pending { yield_for: 1 });
        }

        let elapsed = self.elapsed_since_epoch(now)?;
        let id = Self::advance(&mut state, now, elapsed, self.node_id);
        Ok(Poll::Ready { id })
    }

    /// Commits `now` to the state and packs the resulting ID.
    ///
    /// Requires `now >= state.last_millis`, with room left in the sequence
    /// when they are equal.
    fn advance(state: &mut State, now: u64, elapsed: u64, node_id: NodeId) -> SnowflakeId {
        state.sequence = if now == state.last_millis {
            state.sequence + 1
        } else {
            0
        };
        state.last_millis = now;
        SnowflakeId::from_components(elapsed, u64::from(node_id), state.sequence)
    }

    /// Milliseconds from the epoch to `now`, checked against the timestamp
    /// field width.
    fn elapsed_since_epoch(&self, now: u64) -> Result<u64> {
        let elapsed = now.checked_sub(self.epoch).ok_or(Error::ClockBeforeEpoch {
            now,
            epoch: self.epoch,
        })?;
        if elapsed > SnowflakeId::max_timestamp() {
            return Err(Error::EpochExhausted { elapsed });
        }
        Ok(elapsed)
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: u64, last: u64) -> Error {
        #[cfg(feature = "tracing")]
        warn!(now, last, behind_ms = last - now, "clock moved backward");
        Error::ClockMovedBackward { now, last }
    }

    #[cold]
    #[inline(never)]
    fn cold_wait_for_next_millis(&self, last: u64, backoff: Backoff) -> u64 {
        #[cfg(feature = "tracing")]
        trace!(last, ?backoff, "sequence exhausted, waiting for next millisecond");
        loop {
            let now = self.time.current_millis();
            if now > last {
                return now;
            }
            backoff.wait(last + 1 - now);
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }
}
