use crate::{NodeId, Result};

/// A strategy for determining this process's node ID.
///
/// A generator calls [`NodeResolver::resolve`] exactly once, at construction.
///
/// # Example
///
/// ```
/// use snowmint::{NodeId, NodeResolver};
///
/// let from_env = || NodeId::new(7);
/// assert_eq!(from_env.resolve().unwrap().get(), 7);
/// ```
pub trait NodeResolver {
    /// Resolves the node ID.
    ///
    /// # Errors
    ///
    /// Returns an error if no valid node ID can be determined. Resolution
    /// failures are fatal to generator construction; there is no fallback.
    fn resolve(&self) -> Result<NodeId>;
}

impl<F> NodeResolver for F
where
    F: Fn() -> Result<NodeId>,
{
    fn resolve(&self) -> Result<NodeId> {
        self()
    }
}
