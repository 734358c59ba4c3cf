//! Error types for node resolution and ID generation.
//!
//! Every fallible operation in `snowmint` returns [`Result`], which defaults
//! to this crate's [`Error`]. Errors are surfaced to the caller as-is: the
//! generator never retries internally and never hands back a partial ID.

/// A result type defaulting to [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `snowmint` can emit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The host's network interface list could not be read.
    ///
    /// Also returned on platforms without interface enumeration, or when the
    /// `network` feature is disabled.
    #[error("Failed to query network interfaces: {reason}")]
    NetworkQueryFailed { reason: String },

    /// No non-loopback private IPv4 address was found on any interface.
    ///
    /// Supply an explicit node ID instead.
    #[error("No private IPv4 address available to derive a node ID")]
    NoPrivateAddress,

    /// A node ID outside `[0, 1023]` was supplied.
    ///
    /// `node_id` is wide enough to report any signed or unsigned 64-bit input
    /// unchanged.
    #[error("Invalid node ID {node_id}: must be within [0, {max}]", max = crate::NodeId::MAX)]
    InvalidNodeId { node_id: i128 },

    /// The clock reported a time earlier than the last issued timestamp.
    ///
    /// The generator state is left untouched, so a later call succeeds once
    /// the clock catches up.
    #[error("Clock moved backward: now {now} ms is behind last issued {last} ms")]
    ClockMovedBackward { now: u64, last: u64 },

    /// The clock reported a time earlier than the generator's epoch.
    #[error("Clock is before the epoch: now {now} ms < epoch {epoch} ms")]
    ClockBeforeEpoch { now: u64, epoch: u64 },

    /// Milliseconds elapsed since the epoch no longer fit in the 41-bit
    /// timestamp field.
    #[error("Epoch exhausted: {elapsed} ms since epoch overflows the timestamp field")]
    EpochExhausted { elapsed: u64 },

    /// The configured epoch, in milliseconds, does not fit in a `u64`.
    #[error("Epoch out of range: {epoch_ms} ms exceeds the 64-bit millisecond range")]
    EpochOutOfRange { epoch_ms: u128 },

    /// Every node ID in the registry is already claimed.
    #[error("Node registry exhausted: all node IDs are claimed")]
    NodeRegistryExhausted,

    /// The operation failed because the lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison, so this
    /// variant is never produced.
    #[error("Generator lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};

#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
