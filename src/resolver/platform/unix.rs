//! Interface scanning for non-Windows hosts via `systemstat`.

use crate::resolver::{InterfaceKind, InterfaceScanner, InterfaceSnapshot, ScanError};
use systemstat::{Platform, System};

/// [`InterfaceScanner`] implementation backed by `systemstat`'s network
/// enumeration.
///
/// `systemstat` reports interface names and addresses but not link types,
/// so the interface kind is inferred from conventional naming
/// (`wlan0`/`wlp3s0` wireless, `wwan0`/`rmnet0` cellular, and so on).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemScanner {
    _private: (),
}

impl SystemScanner {
    /// Creates a new scanner.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl InterfaceScanner for SystemScanner {
    fn scan(&self) -> Result<Vec<InterfaceSnapshot>, ScanError> {
        let networks = System::new()
            .networks()
            .map_err(|source| ScanError::Platform {
                message: format!("network enumeration failed: {source}"),
            })?;

        let mut interfaces = Vec::with_capacity(networks.len());
        for network in networks.values() {
            let mut ipv4_addresses = Vec::new();
            let mut ipv6_addresses = Vec::new();

            for addrs in &network.addrs {
                match addrs.addr {
                    systemstat::IpAddr::V4(addr) => ipv4_addresses.push(addr),
                    systemstat::IpAddr::V6(addr) => ipv6_addresses.push(addr),
                    // Link-layer and empty entries carry no host address.
                    _ => {}
                }
            }

            interfaces.push(InterfaceSnapshot::new(
                network.name.clone(),
                kind_from_name(&network.name),
                ipv4_addresses,
                ipv6_addresses,
            ));
        }

        Ok(interfaces)
    }
}

/// Infers the interface kind from its name.
///
/// Covers the common Linux/BSD/macOS naming schemes; anything unknown
/// falls through to [`InterfaceKind::Other`].
fn kind_from_name(name: &str) -> InterfaceKind {
    if name == "lo" || name.starts_with("lo0") {
        InterfaceKind::Loopback
    } else if name.starts_with("wl") || name.starts_with("ath") {
        InterfaceKind::Wireless
    } else if name.starts_with("wwan") || name.starts_with("rmnet") || name.starts_with("ppp") {
        InterfaceKind::Cellular
    } else if name.starts_with("veth")
        || name.starts_with("docker")
        || name.starts_with("br-")
        || name.starts_with("virbr")
        || name.starts_with("tun")
        || name.starts_with("tap")
        || name.starts_with("utun")
    {
        InterfaceKind::Virtual
    } else if name.starts_with("eth") || name.starts_with("en") {
        InterfaceKind::Ethernet
    } else {
        InterfaceKind::Other
    }
}
