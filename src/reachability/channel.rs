//! Replayable broadcast channel for reachability states.

use super::state::NetworkState;
use std::sync::Arc;
use tokio::sync::watch;

/// Single-value broadcast channel holding the current [`NetworkState`].
///
/// The channel always holds exactly one value, initially
/// [`NetworkState::Unavailable`]. Publishing replaces the value and wakes
/// every live subscription; a subscription created afterwards starts from
/// the replaced value. A slow subscriber observes the latest value rather
/// than every intermediate one — replay is latest-value only, never a log.
///
/// Publishes are serialized and safe from any thread. Cloning the channel
/// is cheap; all clones publish into the same stream.
#[derive(Debug, Clone)]
pub struct ReachabilityChannel {
    tx: Arc<watch::Sender<NetworkState>>,
}

impl Default for ReachabilityChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ReachabilityChannel {
    /// Creates a channel holding [`NetworkState::Unavailable`].
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(NetworkState::Unavailable);
        Self { tx: Arc::new(tx) }
    }

    /// Publishes a state, waking every live subscription.
    ///
    /// Re-publishing the current state still counts as an update: each
    /// connectivity event produces exactly one publication.
    pub fn publish(&self, state: NetworkState) {
        let previous = self.tx.send_replace(state);
        if previous != state {
            tracing::debug!("reachability changed: {previous} -> {state}");
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn current(&self) -> NetworkState {
        *self.tx.borrow()
    }

    /// Creates a subscription that replays the current state first.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
            replayed: false,
        }
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A live handle onto the reachability stream.
///
/// The first call to [`next`](Self::next) yields the state current at that
/// moment (replay); later calls wait for a publication. Dropping the
/// subscription stops delivery to this handle only and is safe at any
/// time, including concurrently with a publish.
#[derive(Debug)]
pub struct Subscription {
    rx: watch::Receiver<NetworkState>,
    replayed: bool,
}

impl Subscription {
    /// Returns the current state without waiting.
    #[must_use]
    pub fn current(&self) -> NetworkState {
        *self.rx.borrow()
    }

    /// Waits for the next state to deliver.
    ///
    /// Returns `None` once the channel itself is gone (every
    /// [`ReachabilityChannel`] clone dropped), which ends the stream.
    pub async fn next(&mut self) -> Option<NetworkState> {
        if !self.replayed {
            self.replayed = true;
            return Some(*self.rx.borrow_and_update());
        }

        match self.rx.changed().await {
            Ok(()) => Some(*self.rx.borrow_and_update()),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
