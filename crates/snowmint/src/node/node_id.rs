use crate::{Error, Result};
use core::fmt;

/// A validated node identifier in `[0, 1023]`.
///
/// The only way to obtain a `NodeId` is through a range check, so a generator
/// holding one can never pack an out-of-range value into the node field.
///
/// # Example
///
/// ```
/// use snowmint::{Error, NodeId};
///
/// assert_eq!(NodeId::try_from(1023i64).unwrap().get(), 1023);
/// assert_eq!(
///     NodeId::try_from(-1i64),
///     Err(Error::InvalidNodeId { node_id: -1 })
/// );
/// ```
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "i64", into = "u16")
)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u16);

impl NodeId {
    /// Largest valid node ID.
    pub const MAX: u16 = (1 << crate::SnowflakeId::NODE_ID_BITS) - 1;

    /// Validates `raw` as a node ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`] if `raw` exceeds [`NodeId::MAX`].
    pub fn new(raw: u16) -> Result<Self> {
        Self::checked(i128::from(raw))
    }

    fn checked(raw: i128) -> Result<Self> {
        match u16::try_from(raw) {
            Ok(node_id) if node_id <= Self::MAX => Ok(Self(node_id)),
            _ => Err(Error::InvalidNodeId { node_id: raw }),
        }
    }

    /// Keeps only the low 10 bits of `raw`.
    pub(crate) const fn from_low_bits(raw: u16) -> Self {
        Self(raw & Self::MAX)
    }

    /// Returns the node ID as an integer.
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<i64> for NodeId {
    type Error = Error;

    fn try_from(raw: i64) -> Result<Self> {
        Self::checked(i128::from(raw))
    }
}

impl TryFrom<u64> for NodeId {
    type Error = Error;

    fn try_from(raw: u64) -> Result<Self> {
        Self::checked(i128::from(raw))
    }
}

impl From<NodeId> for u16 {
    fn from(node_id: NodeId) -> Self {
        node_id.0
    }
}

impl From<NodeId> for u64 {
    fn from(node_id: NodeId) -> Self {
        u64::from(node_id.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_accepted() {
        assert_eq!(NodeId::try_from(0i64).unwrap().get(), 0);
        assert_eq!(NodeId::try_from(1023i64).unwrap().get(), 1023);
        assert_eq!(NodeId::new(512).unwrap().get(), 512);
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(
            NodeId::try_from(-1i64),
            Err(Error::InvalidNodeId { node_id: -1 })
        );
        assert_eq!(
            NodeId::try_from(1024i64),
            Err(Error::InvalidNodeId { node_id: 1024 })
        );
        assert_eq!(
            NodeId::new(u16::MAX),
            Err(Error::InvalidNodeId { node_id: 65535 })
        );
    }

    #[test]
    fn rejected_input_is_reported_unchanged() {
        assert_eq!(
            NodeId::try_from(u64::MAX),
            Err(Error::InvalidNodeId {
                node_id: i128::from(u64::MAX)
            })
        );
        assert_eq!(
            NodeId::try_from(1u64 << 63),
            Err(Error::InvalidNodeId {
                node_id: 1i128 << 63
            })
        );
        assert_eq!(
            NodeId::try_from(i64::MIN),
            Err(Error::InvalidNodeId {
                node_id: i128::from(i64::MIN)
            })
        );
    }

    #[test]
    fn low_bits_are_masked() {
        assert_eq!(NodeId::from_low_bits(1024 + 7).get(), 7);
        assert_eq!(NodeId::from_low_bits(u16::MAX).get(), NodeId::MAX);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_validates_range() {
        let node: NodeId = serde_json::from_str("7").unwrap();
        assert_eq!(node.get(), 7);
        assert_eq!(serde_json::to_string(&node).unwrap(), "7");
        assert!(serde_json::from_str::<NodeId>("1024").is_err());
        assert!(serde_json::from_str::<NodeId>("-1").is_err());
    }
}
