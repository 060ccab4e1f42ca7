//! Capability probing and change-to-event synthesis.
//!
//! Connectivity sources on this crate's platforms do not receive rich
//! capability callbacks; they see interface-table snapshots. This module
//! turns a snapshot into [`NetworkCapabilities`] and turns consecutive
//! snapshots into the [`ConnectivityEvent`]s the observer expects.

use crate::reachability::{ConnectivityEvent, NetworkCapabilities};
use crate::resolver::{InterfaceKind, InterfaceSnapshot};

/// Derives transport capabilities from an interface snapshot.
///
/// An interface counts toward connectivity when it is not loopback, not
/// virtual, and carries at least one address. Returns `None` when no such
/// interface exists, i.e. the host has no usable network at all.
#[must_use]
pub fn probe_capabilities(interfaces: &[InterfaceSnapshot]) -> Option<NetworkCapabilities> {
    let mut capabilities = NetworkCapabilities::new();
    let mut connected = false;

    for interface in interfaces {
        if !interface.has_addresses() {
            continue;
        }
        match interface.kind {
            InterfaceKind::Loopback | InterfaceKind::Virtual => continue,
            InterfaceKind::Wireless => {
                capabilities = capabilities.with_wifi();
                connected = true;
            }
            InterfaceKind::Cellular => {
                capabilities = capabilities.with_cellular();
                connected = true;
            }
            InterfaceKind::Ethernet | InterfaceKind::Other => {
                connected = true;
            }
        }
    }

    connected.then_some(capabilities)
}

/// Turns a sequence of probe results into connectivity events.
///
/// Remembers the previous probe and emits an event only when connectivity
/// actually changed:
///
/// - nothing seen yet, probe finds a network: `Available`
/// - nothing seen yet, probe finds none: `Unavailable`
/// - network appears after none: `Available`
/// - network disappears: `Lost`
/// - transports change on a live network: `CapabilitiesChanged`
/// - no change: suppressed (`None`)
#[derive(Debug, Default)]
pub struct EventSynthesizer {
    last: Option<Option<NetworkCapabilities>>,
}

impl EventSynthesizer {
    /// Creates a synthesizer with no history.
    ///
    /// The first [`observe`](Self::observe) always yields an event so the
    /// stream opens with the current ground truth.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Records a probe result and returns the event it implies, if any.
    pub fn observe(&mut self, probe: Option<NetworkCapabilities>) -> Option<ConnectivityEvent> {
        let previous = self.last.replace(probe);

        match (previous, probe) {
            // First probe: report ground truth unconditionally.
            (None, Some(capabilities)) => Some(ConnectivityEvent::Available {
                capabilities: Some(capabilities),
            }),
            (None, None) => Some(ConnectivityEvent::Unavailable),

            (Some(None), Some(capabilities)) => Some(ConnectivityEvent::Available {
                capabilities: Some(capabilities),
            }),
            (Some(Some(_)), None) => Some(ConnectivityEvent::Lost),
            (Some(Some(before)), Some(after)) if before != after => {
                Some(ConnectivityEvent::CapabilitiesChanged {
                    capabilities: Some(after),
                })
            }
            // Unchanged.
            (Some(_), _) => None,
        }
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
