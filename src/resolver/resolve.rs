//! First-address selection over interface snapshots.
//!
//! Pure functions implementing the host-address contract: the first
//! non-loopback address of the requested family, scanning interfaces in
//! the order the scanner reported them.

use super::{InterfaceSnapshot, IpVersion};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Returns the first non-loopback IPv4 address across all interfaces.
///
/// Unspecified (all-zero) addresses are skipped, mirroring the blank
/// filter on the textual form. Interface order decides ties.
#[must_use]
pub fn first_ipv4(interfaces: &[InterfaceSnapshot]) -> Option<Ipv4Addr> {
    interfaces
        .iter()
        .flat_map(|iface| iface.ipv4_addresses.iter().copied())
        .find(|addr| !addr.is_loopback() && !addr.is_unspecified())
}

/// Returns the first non-loopback IPv6 address across all interfaces.
#[must_use]
pub fn first_ipv6(interfaces: &[InterfaceSnapshot]) -> Option<Ipv6Addr> {
    interfaces
        .iter()
        .flat_map(|iface| iface.ipv6_addresses.iter().copied())
        .find(|addr| !addr.is_loopback() && !addr.is_unspecified())
}

/// Returns the first host address matching the requested family.
///
/// With [`IpVersion::Both`], IPv4 is preferred and IPv6 is the fallback.
#[must_use]
pub fn first_host_address(interfaces: &[InterfaceSnapshot], version: IpVersion) -> Option<IpAddr> {
    match version {
        IpVersion::V4 => first_ipv4(interfaces).map(IpAddr::V4),
        IpVersion::V6 => first_ipv6(interfaces).map(IpAddr::V6),
        IpVersion::Both => first_ipv4(interfaces)
            .map(IpAddr::V4)
            .or_else(|| first_ipv6(interfaces).map(IpAddr::V6)),
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
