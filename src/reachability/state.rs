//! Core reachability state model.

use std::fmt;

/// Network class of the active connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkType {
    /// Wi-Fi transport.
    WiFi,
    /// Cellular transport.
    Cellular,
    /// Any other transport (Ethernet, VPN, unknown).
    Other,
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WiFi => write!(f, "Wi-Fi"),
            Self::Cellular => write!(f, "cellular"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Reachability state published to subscribers.
///
/// Exactly one state is current at a time. The channel starts at
/// [`NetworkState::Unavailable`] before any connectivity event arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkState {
    /// A usable network is active.
    Available(NetworkType),
    /// No network path exists.
    Unavailable,
    /// A network is establishing.
    ///
    /// Declared for forward compatibility; no event currently produces it.
    Connecting,
    /// The active network is about to disconnect.
    Losing,
    /// The active network has disconnected.
    Lost,
}

impl NetworkState {
    /// Returns true if a usable network is active.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Returns the network class when available, `None` otherwise.
    #[must_use]
    pub const fn network_type(&self) -> Option<NetworkType> {
        match self {
            Self::Available(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl fmt::Display for NetworkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(kind) => write!(f, "available ({kind})"),
            Self::Unavailable => write!(f, "unavailable"),
            Self::Connecting => write!(f, "connecting"),
            Self::Losing => write!(f, "losing"),
            Self::Lost => write!(f, "lost"),
        }
    }
}
