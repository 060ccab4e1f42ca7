//! Polling connectivity source.
//!
//! This module provides [`PollingSource`], a portable
//! [`ConnectivitySource`] that rescans the interface table on a fixed
//! interval and synthesizes connectivity events from the differences.

use super::probe::{EventSynthesizer, probe_capabilities};
use crate::reachability::{ConnectivityEvent, ConnectivitySource, SourceError};
use crate::resolver::InterfaceScanner;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Interval, interval};
use tokio_stream::Stream;
use tracing::warn;

/// A connectivity source that polls the interface table.
///
/// Works on every platform the scanner supports. The first tick fires
/// immediately, so the stream opens with the host's current connectivity
/// rather than waiting a full interval.
#[derive(Debug)]
pub struct PollingSource<I> {
    scanner: I,
    poll_interval: Duration,
}

impl<I> PollingSource<I>
where
    I: InterfaceScanner + Clone,
{
    /// Creates a polling source with the given scanner and interval.
    #[must_use]
    pub const fn new(scanner: I, poll_interval: Duration) -> Self {
        Self {
            scanner,
            poll_interval,
        }
    }
}

impl<I> ConnectivitySource for PollingSource<I>
where
    I: InterfaceScanner + Clone + Unpin + Send + Sync + 'static,
{
    type Events = PollingEvents<I>;

    fn register(&self) -> Result<Self::Events, SourceError> {
        Ok(PollingEvents {
            scanner: self.scanner.clone(),
            interval: interval(self.poll_interval),
            synthesizer: EventSynthesizer::new(),
        })
    }
}

/// The event stream produced by [`PollingSource`].
pub struct PollingEvents<I> {
    scanner: I,
    interval: Interval,
    synthesizer: EventSynthesizer,
}

impl<I> Stream for PollingEvents<I>
where
    I: InterfaceScanner + Unpin,
{
    type Item = ConnectivityEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            // Poll the interval timer - registers waker for next tick when Pending
            if Pin::new(&mut self.interval).poll_tick(cx).is_pending() {
                return Poll::Pending;
            }

            // Scan errors are intentionally swallowed for resilient polling:
            // a transient enumeration failure should not terminate the stream.
            let probe = match self.scanner.scan() {
                Ok(interfaces) => probe_capabilities(&interfaces),
                Err(error) => {
                    warn!("interface scan failed: {error}");
                    continue;
                }
            };

            if let Some(event) = self.synthesizer.observe(probe) {
                return Poll::Ready(Some(event));
            }
            // Connectivity unchanged - loop back to re-register waker via poll_tick
        }
    }
}
