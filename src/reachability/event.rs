//! Connectivity events and their translation to reachability states.

use super::state::{NetworkState, NetworkType};

/// Transport capability set reported with a connectivity event.
///
/// Only the transports that affect classification are modeled; everything
/// else falls through to [`NetworkType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NetworkCapabilities {
    cellular: bool,
    wifi: bool,
}

impl NetworkCapabilities {
    /// Creates an empty capability set (no known transport).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cellular: false,
            wifi: false,
        }
    }

    /// Marks the cellular transport as present.
    #[must_use]
    pub const fn with_cellular(mut self) -> Self {
        self.cellular = true;
        self
    }

    /// Marks the Wi-Fi transport as present.
    #[must_use]
    pub const fn with_wifi(mut self) -> Self {
        self.wifi = true;
        self
    }

    /// Returns true if the cellular transport is present.
    #[must_use]
    pub const fn has_cellular(self) -> bool {
        self.cellular
    }

    /// Returns true if the Wi-Fi transport is present.
    #[must_use]
    pub const fn has_wifi(self) -> bool {
        self.wifi
    }

    /// Classifies this capability set into a [`NetworkType`].
    ///
    /// The cellular check runs before the Wi-Fi check, so Wi-Fi wins when
    /// both transports are present. The sequential upgrade is the contract,
    /// quirk included; do not collapse it into a match on both flags.
    #[must_use]
    pub const fn classify(self) -> NetworkType {
        let mut kind = NetworkType::Other;
        if self.cellular {
            kind = NetworkType::Cellular;
        }
        if self.wifi {
            kind = NetworkType::WiFi;
        }
        kind
    }
}

/// A lifecycle event delivered by a connectivity source.
///
/// Mirrors the OS callback surface: availability events carry the
/// capability set observed at delivery time, absent when the source could
/// not inspect the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    /// A default network became active.
    Available {
        /// Capabilities of the new network, if the source could read them.
        capabilities: Option<NetworkCapabilities>,
    },
    /// The active network's capabilities changed.
    CapabilitiesChanged {
        /// The updated capability set, if the source could read it.
        capabilities: Option<NetworkCapabilities>,
    },
    /// The active network is about to disconnect.
    Losing {
        /// Grace period reported by the OS, in milliseconds.
        max_ms_to_live: u32,
    },
    /// The active network disconnected.
    Lost,
    /// No network satisfied the registration request.
    Unavailable,
}

/// Translates a connectivity event into exactly one reachability state.
///
/// Pure function, exercised row by row in the tests. Events carrying an
/// absent capability set translate to [`NetworkState::Unavailable`], not
/// `Available(Other)`. Nothing translates to [`NetworkState::Connecting`].
#[must_use]
pub const fn translate(event: ConnectivityEvent) -> NetworkState {
    match event {
        ConnectivityEvent::Lost => NetworkState::Lost,
        ConnectivityEvent::Unavailable => NetworkState::Unavailable,
        ConnectivityEvent::Losing { .. } => NetworkState::Losing,
        ConnectivityEvent::Available { capabilities }
        | ConnectivityEvent::CapabilitiesChanged { capabilities } => match capabilities {
            Some(caps) => NetworkState::Available(caps.classify()),
            None => NetworkState::Unavailable,
        },
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
