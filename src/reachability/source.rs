//! Connectivity source abstraction.

use super::event::ConnectivityEvent;
use thiserror::Error;
use tokio_stream::Stream;

/// Error type for connectivity source registration.
///
/// Registration is assumed to succeed under normal operation; failures are
/// surfaced once and never retried.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// The platform has no usable notification mechanism.
    #[error("Connectivity notifications not supported: {reason}")]
    Unsupported {
        /// Description of the missing capability.
        reason: String,
    },
}

/// A registrable source of connectivity lifecycle events.
///
/// Implementations wrap an OS notification mechanism (or a polling loop on
/// platforms without one) and hand out a fresh event stream per
/// registration. Dropping the stream releases the registration; that is
/// how the observer's pause operation unregisters.
///
/// Sources may deliver an initial event immediately after registration,
/// describing the network that is already active.
pub trait ConnectivitySource: Send + Sync {
    /// The event stream produced by [`register`](Self::register).
    type Events: Stream<Item = ConnectivityEvent> + Send + Unpin + 'static;

    /// Registers for connectivity notifications.
    ///
    /// Each call produces an independent stream; the caller is responsible
    /// for dropping any previous one so that a single registration stays
    /// active.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the underlying mechanism rejects the
    /// registration.
    fn register(&self) -> Result<Self::Events, SourceError>;
}
