use crate::{Error, NodeId, NodeResolver, Result, generator::Mutex};
use std::{collections::BTreeSet, sync::Arc};

#[cfg(feature = "tracing")]
use tracing::debug;

/// A source of exclusively-held node IDs, such as a coordination service or a
/// shared database table.
///
/// Implementations hand out each node ID to at most one holder at a time.
pub trait NodeRegistry {
    /// Claims an unused node ID.
    ///
    /// # Errors
    ///
    /// Returns an error if no node ID is available or the registry cannot be
    /// reached.
    fn claim(&self) -> Result<NodeId>;

    /// Returns a previously claimed node ID to the pool.
    ///
    /// Returns `true` if the node ID was claimed.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be reached.
    fn release(&self, node_id: NodeId) -> Result<bool>;
}

impl<R: NodeRegistry + ?Sized> NodeRegistry for &R {
    fn claim(&self) -> Result<NodeId> {
        (**self).claim()
    }

    fn release(&self, node_id: NodeId) -> Result<bool> {
        (**self).release(node_id)
    }
}

impl<R: NodeRegistry + ?Sized> NodeRegistry for Arc<R> {
    fn claim(&self) -> Result<NodeId> {
        (**self).claim()
    }

    fn release(&self, node_id: NodeId) -> Result<bool> {
        (**self).release(node_id)
    }
}

/// A process-local registry that claims the lowest free node ID.
///
/// Useful when several generators run inside one process (e.g., one per
/// shard) and must not share a node ID.
///
/// # Example
///
/// ```
/// use snowmint::{InMemoryRegistry, NodeRegistry};
///
/// let registry = InMemoryRegistry::new();
/// let a = registry.claim().unwrap();
/// let b = registry.claim().unwrap();
/// assert_eq!((a.get(), b.get()), (0, 1));
///
/// assert!(registry.release(a).unwrap());
/// assert_eq!(registry.claim().unwrap(), a);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    claimed: Mutex<BTreeSet<u16>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of node IDs currently claimed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if the lock was poisoned.
    pub fn claimed(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<crate::generator::MutexGuard<'_, BTreeSet<u16>>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.claimed.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.claimed.lock()?)
        }
    }
}

impl NodeRegistry for InMemoryRegistry {
    /// # Errors
    ///
    /// Returns [`Error::NodeRegistryExhausted`] once all 1024 node IDs are
    /// claimed.
    fn claim(&self) -> Result<NodeId> {
        let mut claimed = self.lock()?;
        let free = (0..=NodeId::MAX)
            .find(|candidate| !claimed.contains(candidate))
            .ok_or(Error::NodeRegistryExhausted)?;
        claimed.insert(free);

        #[cfg(feature = "tracing")]
        debug!(node_id = free, "claimed node ID");
        NodeId::new(free)
    }

    fn release(&self, node_id: NodeId) -> Result<bool> {
        Ok(self.lock()?.remove(&node_id.get()))
    }
}

/// A resolver that claims its node ID from a [`NodeRegistry`].
///
/// # Example
///
/// ```
/// use snowmint::{InMemoryRegistry, NodeResolver, RegistryResolver};
/// use std::sync::Arc;
///
/// let registry = Arc::new(InMemoryRegistry::new());
/// let first = RegistryResolver::new(Arc::clone(&registry));
/// let second = RegistryResolver::new(Arc::clone(&registry));
/// assert_ne!(first.resolve().unwrap(), second.resolve().unwrap());
/// ```
#[derive(Debug)]
pub struct RegistryResolver<R> {
    registry: R,
}

impl<R: NodeRegistry> RegistryResolver<R> {
    pub const fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Returns the underlying registry, e.g. to release the node ID on
    /// shutdown.
    pub const fn registry(&self) -> &R {
        &self.registry
    }
}

impl<R: NodeRegistry> NodeResolver for RegistryResolver<R> {
    fn resolve(&self) -> Result<NodeId> {
        self.registry.claim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_lowest_free_id() {
        let registry = InMemoryRegistry::new();
        for expected in 0..4 {
            assert_eq!(registry.claim().unwrap().get(), expected);
        }
        assert!(registry.release(NodeId::new(1).unwrap()).unwrap());
        assert_eq!(registry.claim().unwrap().get(), 1);
        assert_eq!(registry.claim().unwrap().get(), 4);
        assert_eq!(registry.claimed().unwrap(), 5);
    }

    #[test]
    fn release_of_unclaimed_id_reports_false() {
        let registry = InMemoryRegistry::new();
        assert!(!registry.release(NodeId::new(3).unwrap()).unwrap());
    }

    #[test]
    fn exhausts_after_every_id_is_claimed() {
        let registry = InMemoryRegistry::new();
        for _ in 0..=NodeId::MAX {
            registry.claim().unwrap();
        }
        assert_eq!(registry.claim(), Err(Error::NodeRegistryExhausted));

        let last = NodeId::new(NodeId::MAX).unwrap();
        assert!(registry.release(last).unwrap());
        assert_eq!(registry.claim(), Ok(last));
    }

    #[test]
    fn concurrent_claims_are_distinct() {
        use std::sync::Mutex;

        let registry = Arc::new(InMemoryRegistry::new());
        let claimed = Mutex::new(Vec::new());

        std::thread::scope(|s| {
            for _ in 0..8 {
                let resolver = RegistryResolver::new(Arc::clone(&registry));
                let claimed = &claimed;
                s.spawn(move || {
                    for _ in 0..64 {
                        let node_id = resolver.resolve().unwrap();
                        claimed.lock().unwrap().push(node_id);
                    }
                });
            }
        });

        let mut claimed = claimed.into_inner().unwrap();
        claimed.sort();
        claimed.dedup();
        assert_eq!(claimed.len(), 512);
    }
}
