use crate::{Error, NodeId, NodeResolver, Result};
use std::net::{IpAddr, Ipv4Addr};

#[cfg(feature = "tracing")]
use tracing::{debug, instrument};

/// Derives the node ID from the host's first private IPv4 address.
///
/// Interface addresses are scanned in the order the OS reports them.
/// Loopback and IPv6 addresses are skipped; the first address in
/// `10.0.0.0/8`, `172.16.0.0/12` or `192.168.0.0/16` is used. See
/// [`node_id_from_ipv4`] for how the address maps to a node ID.
///
/// Two hosts whose addresses agree in the low 10 bits get the same node ID.
/// Deployments that need strict uniqueness should inject node IDs explicitly
/// ([`FixedNodeId`]) or claim them from a registry ([`RegistryResolver`]).
///
/// [`FixedNodeId`]: crate::FixedNodeId
/// [`RegistryResolver`]: crate::RegistryResolver
#[derive(Copy, Clone, Debug, Default)]
pub struct PrivateIpv4Resolver;

impl NodeResolver for PrivateIpv4Resolver {
    /// # Errors
    ///
    /// - [`Error::NetworkQueryFailed`] if the interface list cannot be read
    /// - [`Error::NoPrivateAddress`] if no address qualifies
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    fn resolve(&self) -> Result<NodeId> {
        node_id_from_addrs(interface_addrs()?)
    }
}

/// Selects the first non-loopback private IPv4 address from `addrs` and
/// derives a node ID from it.
///
/// # Errors
///
/// Returns [`Error::NoPrivateAddress`] if no address qualifies.
///
/// # Example
///
/// ```
/// use snowmint::node_id_from_addrs;
/// use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
///
/// let addrs = [
///     IpAddr::V4(Ipv4Addr::LOCALHOST),
///     IpAddr::V6(Ipv6Addr::LOCALHOST),
///     IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
///     IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)),
/// ];
/// assert_eq!(node_id_from_addrs(addrs).unwrap().get(), (1 << 8) | 20);
/// ```
pub fn node_id_from_addrs(addrs: impl IntoIterator<Item = IpAddr>) -> Result<NodeId> {
    let ip = addrs
        .into_iter()
        .filter(|addr| !addr.is_loopback())
        .find_map(|addr| match addr {
            IpAddr::V4(ip) if ip.is_private() => Some(ip),
            _ => None,
        })
        .ok_or(Error::NoPrivateAddress)?;

    let node_id = node_id_from_ipv4(ip);
    #[cfg(feature = "tracing")]
    debug!(%ip, %node_id, "derived node ID from private address");
    Ok(node_id)
}

/// Maps an IPv4 address to a node ID using its last two octets.
///
/// The third octet is shifted into the top of a 16-bit word and back down,
/// keeping only its low 2 bits as bits 8-9; the fourth octet fills bits 0-7.
/// This equals `((o3 & 0x3F) << 8 | o4)` truncated to 10 bits, i.e.
/// `(o3 & 0x03) << 8 | o4`.
///
/// ```
/// use snowmint::node_id_from_ipv4;
/// use std::net::Ipv4Addr;
///
/// assert_eq!(node_id_from_ipv4(Ipv4Addr::new(10, 0, 3, 255)).get(), 1023);
/// assert_eq!(node_id_from_ipv4(Ipv4Addr::new(10, 0, 4, 0)).get(), 0);
/// ```
pub fn node_id_from_ipv4(ip: Ipv4Addr) -> NodeId {
    let [_, _, o3, o4] = ip.octets();
    NodeId::from_low_bits(((u16::from(o3) << 14) >> 6) + u16::from(o4))
}

#[cfg(all(unix, feature = "network"))]
fn interface_addrs() -> Result<Vec<IpAddr>> {
    use std::net::{SocketAddrV4, SocketAddrV6};

    let ifaddrs = nix::ifaddrs::getifaddrs().map_err(|errno| Error::NetworkQueryFailed {
        reason: errno.to_string(),
    })?;

    Ok(ifaddrs
        .filter_map(|ifaddr| ifaddr.address)
        .filter_map(|addr| {
            if let Some(sin) = addr.as_sockaddr_in() {
                Some(IpAddr::V4(*SocketAddrV4::from(*sin).ip()))
            } else {
                addr.as_sockaddr_in6()
                    .map(|sin6| IpAddr::V6(*SocketAddrV6::from(*sin6).ip()))
            }
        })
        .collect())
}

#[cfg(not(all(unix, feature = "network")))]
fn interface_addrs() -> Result<Vec<IpAddr>> {
    Err(Error::NetworkQueryFailed {
        reason: "interface enumeration is unavailable on this target".into(),
    })
}
