use crate::DEFAULT_EPOCH;
use core::time::Duration;

/// Construction options for [`SnowflakeGenerator`].
///
/// # Example
///
/// ```
/// use snowmint::GeneratorConfig;
/// use std::time::Duration;
///
/// let config = GeneratorConfig::default()
///     .with_epoch(Duration::from_millis(1_704_067_200_000))
///     .with_node_id(42);
/// assert_eq!(config.node_id, Some(42));
/// ```
///
/// With the `serde` feature the epoch is (de)serialized as Unix milliseconds,
/// and missing fields fall back to their defaults:
///
/// ```text
/// { "epoch": 1555804800000, "node_id": 7 }
/// ```
///
/// [`SnowflakeGenerator`]: crate::SnowflakeGenerator
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Reference instant, as a duration since the Unix epoch, from which ID
    /// timestamps are measured.
    #[cfg_attr(feature = "serde", serde(with = "epoch_millis"))]
    pub epoch: Duration,

    /// Explicit node ID. When `None`, the node ID is derived from the host's
    /// private IPv4 address.
    ///
    /// Validated at generator construction: values outside `[0, 1023]` are
    /// rejected with [`Error::InvalidNodeId`](crate::Error::InvalidNodeId).
    pub node_id: Option<i64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            epoch: DEFAULT_EPOCH,
            node_id: None,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub const fn with_epoch(mut self, epoch: Duration) -> Self {
        self.epoch = epoch;
        self
    }

    #[must_use]
    pub const fn with_node_id(mut self, node_id: i64) -> Self {
        self.node_id = Some(node_id);
        self
    }
}

#[cfg(feature = "serde")]
mod epoch_millis {
    use core::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer, ser};

    pub fn serialize<S: Serializer>(epoch: &Duration, s: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(epoch.as_millis()).map_err(|_| {
            ser::Error::custom(format!("epoch {} ms does not fit in u64", epoch.as_millis()))
        })?;
        s.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
