use crate::{NodeId, NodeResolver, Result};

/// A resolver that returns an explicitly configured node ID.
///
/// The raw value is validated when resolved, so an out-of-range override
/// surfaces as [`Error::InvalidNodeId`] from generator construction.
///
/// [`Error::InvalidNodeId`]: crate::Error::InvalidNodeId
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedNodeId {
    raw: i64,
}

impl FixedNodeId {
    pub const fn new(raw: i64) -> Self {
        Self { raw }
    }
}

impl From<NodeId> for FixedNodeId {
    fn from(node_id: NodeId) -> Self {
        Self::new(i64::from(node_id.get()))
    }
}

impl NodeResolver for FixedNodeId {
    fn resolve(&self) -> Result<NodeId> {
        NodeId::try_from(self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn resolves_valid_override() {
        assert_eq!(FixedNodeId::new(0).resolve().unwrap().get(), 0);
        assert_eq!(FixedNodeId::new(1023).resolve().unwrap().get(), 1023);
        let node = NodeId::new(9).unwrap();
        assert_eq!(FixedNodeId::from(node).resolve(), Ok(node));
    }

    #[test]
    fn rejects_invalid_override() {
        assert_eq!(
            FixedNodeId::new(1024).resolve(),
            Err(Error::InvalidNodeId { node_id: 1024 })
        );
        assert_eq!(
            FixedNodeId::new(-1).resolve(),
            Err(Error::InvalidNodeId { node_id: -1 })
        );
    }
}
