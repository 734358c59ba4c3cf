//! Node identifier resolution.
//!
//! Every generator embeds a 10-bit node ID in the IDs it issues. Distinct
//! processes must use distinct node IDs for their IDs not to collide. How a
//! process learns its node ID is pluggable through [`NodeResolver`]:
//!
//! - [`PrivateIpv4Resolver`]: derived from the host's private IPv4 address
//!   (the default when no explicit node ID is configured).
//! - [`FixedNodeId`]: an explicitly injected value.
//! - [`RegistryResolver`]: claimed from a [`NodeRegistry`] such as
//!   [`InMemoryRegistry`] or an external coordinator.
//!
//! Any `Fn() -> Result<NodeId>` closure is also a resolver.

mod fixed;
mod interface;
mod network;
mod node_id;
mod registry;

pub use fixed::*;
pub use interface::*;
pub use network::*;
pub use node_id::*;
pub use registry::*;
