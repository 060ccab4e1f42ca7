//! Core types for network interface representation.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// IP address family selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    /// IPv4 only.
    V4,
    /// IPv6 only.
    V6,
    /// Either family.
    Both,
}

impl IpVersion {
    /// Returns true if this selection includes IPv4.
    #[must_use]
    pub const fn includes_v4(self) -> bool {
        matches!(self, Self::V4 | Self::Both)
    }

    /// Returns true if this selection includes IPv6.
    #[must_use]
    pub const fn includes_v6(self) -> bool {
        matches!(self, Self::V6 | Self::Both)
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
            Self::Both => write!(f, "IPv4+IPv6"),
        }
    }
}

/// Network interface type classification.
///
/// Feeds transport probing and logging. Platform scanners map their native
/// type codes (or naming conventions) onto these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceKind {
    /// Wired Ethernet interface.
    Ethernet,
    /// Wireless (Wi-Fi) interface.
    Wireless,
    /// Mobile broadband (WWAN) interface.
    Cellular,
    /// Loopback interface (localhost).
    Loopback,
    /// Virtual interface (tunnels, bridges, container veths).
    Virtual,
    /// Unknown interface type.
    Other,
}

impl InterfaceKind {
    /// Returns true if this is the loopback interface.
    #[must_use]
    pub const fn is_loopback(&self) -> bool {
        matches!(self, Self::Loopback)
    }
}

/// A snapshot of a single network interface's addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSnapshot {
    /// The interface name (e.g., "eth0", "Wi-Fi").
    pub name: String,
    /// The interface type.
    pub kind: InterfaceKind,
    /// All IPv4 addresses assigned to this interface.
    pub ipv4_addresses: Vec<Ipv4Addr>,
    /// All IPv6 addresses assigned to this interface.
    pub ipv6_addresses: Vec<Ipv6Addr>,
}

impl InterfaceSnapshot {
    /// Creates a new interface snapshot.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: InterfaceKind,
        ipv4_addresses: Vec<Ipv4Addr>,
        ipv6_addresses: Vec<Ipv6Addr>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            ipv4_addresses,
            ipv6_addresses,
        }
    }

    /// Returns true if this interface has any address (IPv4 or IPv6).
    #[must_use]
    pub fn has_addresses(&self) -> bool {
        !self.ipv4_addresses.is_empty() || !self.ipv6_addresses.is_empty()
    }
}
