//! The reachability observer: bridges a connectivity source to the channel.

use super::channel::{ReachabilityChannel, Subscription};
use super::event::translate;
use super::source::{ConnectivitySource, SourceError};
use super::state::NetworkState;
use crate::resolver::{self, InterfaceScanner};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;

/// Observes a [`ConnectivitySource`] and republishes its events as
/// [`NetworkState`] values on a replayable channel.
///
/// One observer owns at most one active source registration at a time.
/// It is constructed once at the composition root, shared by reference
/// (or `Arc`) with consumers, and lives for the process lifetime; there
/// is no global instance to look up.
///
/// # Type Parameters
///
/// * `S` - The [`ConnectivitySource`] delivering OS lifecycle events
/// * `I` - The [`InterfaceScanner`] backing the address accessors
///
/// # Example
///
/// ```ignore
/// use netreach::reachability::ReachabilityObserver;
/// use netreach::reachability::platform::PollingSource;
/// use netreach::resolver::platform::PlatformScanner;
/// use std::time::Duration;
///
/// let scanner = PlatformScanner::default();
/// let source = PollingSource::new(scanner.clone(), Duration::from_secs(5));
/// let observer = ReachabilityObserver::new(source, scanner);
///
/// observer.resume_listening()?;
/// let mut updates = observer.subscribe();
/// while let Some(state) = updates.next().await {
///     println!("{state}: {:?}", observer.current_ipv4_address());
/// }
/// ```
#[derive(Debug)]
pub struct ReachabilityObserver<S, I> {
    source: S,
    scanner: I,
    channel: ReachabilityChannel,
    registration: Mutex<Option<Registration>>,
}

/// An active source registration: the pump task forwarding events.
///
/// Dropping the registration aborts the pump, which drops the source's
/// event stream and thereby releases the OS-side registration.
#[derive(Debug)]
struct Registration {
    pump: JoinHandle<()>,
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

impl<S, I> ReachabilityObserver<S, I>
where
    S: ConnectivitySource,
    I: InterfaceScanner,
{
    /// Creates an observer with no active registration.
    ///
    /// The channel starts at [`NetworkState::Unavailable`] until
    /// [`resume_listening`](Self::resume_listening) is called and the
    /// source delivers its first event.
    pub fn new(source: S, scanner: I) -> Self {
        Self {
            source,
            scanner,
            channel: ReachabilityChannel::new(),
            registration: Mutex::new(None),
        }
    }

    /// Registers with the connectivity source and starts forwarding events.
    ///
    /// Any previous registration is dropped first, so at most one is ever
    /// active. The source may deliver an initial event right away. Must be
    /// called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the source rejects the registration.
    /// No retry is attempted.
    pub fn resume_listening(&self) -> Result<(), SourceError> {
        self.pause_listening();

        let mut events = self.source.register()?;
        let channel = self.channel.clone();
        let pump = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                let state = translate(event);
                tracing::debug!(?event, "publishing {state}");
                channel.publish(state);
            }
            tracing::debug!("connectivity event stream ended");
        });

        *self.lock_registration() = Some(Registration { pump });
        Ok(())
    }

    /// Drops the active source registration, if any.
    ///
    /// Pausing an observer that is not listening is a no-op, never an
    /// error; calling this twice in a row is fine.
    pub fn pause_listening(&self) {
        if self.lock_registration().take().is_none() {
            tracing::trace!("pause requested with no active registration");
        }
    }

    /// Returns true if a source registration is currently active.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.lock_registration().is_some()
    }

    /// Creates a subscription that replays the current state first.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        self.channel.subscribe()
    }

    /// Returns the most recently published state.
    #[must_use]
    pub fn current_state(&self) -> NetworkState {
        self.channel.current()
    }

    /// Returns the host's first non-loopback IPv4 address, if any.
    ///
    /// Scan failures degrade to `None`; no error is surfaced.
    #[must_use]
    pub fn current_ipv4_address(&self) -> Option<Ipv4Addr> {
        match self.scanner.scan() {
            Ok(interfaces) => resolver::first_ipv4(&interfaces),
            Err(e) => {
                tracing::warn!("interface scan failed: {e}");
                None
            }
        }
    }

    /// Returns the host's first non-loopback IPv6 address, if any.
    ///
    /// Scan failures degrade to `None`; no error is surfaced.
    #[must_use]
    pub fn current_ipv6_address(&self) -> Option<Ipv6Addr> {
        match self.scanner.scan() {
            Ok(interfaces) => resolver::first_ipv6(&interfaces),
            Err(e) => {
                tracing::warn!("interface scan failed: {e}");
                None
            }
        }
    }

    fn lock_registration(&self) -> MutexGuard<'_, Option<Registration>> {
        // The lock only guards an Option swap; a poisoned guard is still
        // structurally valid, so recover it instead of panicking.
        self.registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "observer_tests.rs"]
mod tests;
