//! Tests for the reachability observer.

use super::*;
use crate::reachability::{ConnectivityEvent, NetworkCapabilities, NetworkType};
use crate::resolver::{InterfaceKind, InterfaceSnapshot, ScanError};
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::timeout;
use tokio_stream::Stream;

/// Source that replays one scripted batch of events per registration,
/// then stays pending like a quiet OS subscription.
struct MockSource {
    script: Mutex<VecDeque<Vec<ConnectivityEvent>>>,
    registrations: Arc<AtomicUsize>,
}

impl MockSource {
    fn new(script: Vec<Vec<ConnectivityEvent>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            registrations: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn single(events: Vec<ConnectivityEvent>) -> Self {
        Self::new(vec![events])
    }

    fn registration_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.registrations)
    }
}

impl ConnectivitySource for MockSource {
    type Events = ScriptedEvents;

    fn register(&self) -> Result<Self::Events, SourceError> {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        let events = self.script.lock().unwrap().pop_front().unwrap_or_default();
        Ok(ScriptedEvents {
            events: events.into(),
        })
    }
}

struct ScriptedEvents {
    events: VecDeque<ConnectivityEvent>,
}

impl Stream for ScriptedEvents {
    type Item = ConnectivityEvent;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events
            .pop_front()
            .map_or(Poll::Pending, |event| Poll::Ready(Some(event)))
    }
}

/// Source whose registration always fails.
struct FailingSource;

impl ConnectivitySource for FailingSource {
    type Events = ScriptedEvents;

    fn register(&self) -> Result<Self::Events, SourceError> {
        Err(SourceError::Unsupported {
            reason: "scripted failure".to_string(),
        })
    }
}

#[derive(Clone)]
struct MockScanner {
    interfaces: Vec<InterfaceSnapshot>,
    fail: bool,
}

impl MockScanner {
    fn returning(interfaces: Vec<InterfaceSnapshot>) -> Self {
        Self {
            interfaces,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            interfaces: vec![],
            fail: true,
        }
    }

    fn empty() -> Self {
        Self::returning(vec![])
    }
}

impl InterfaceScanner for MockScanner {
    fn scan(&self) -> Result<Vec<InterfaceSnapshot>, ScanError> {
        if self.fail {
            Err(ScanError::Platform {
                message: "scripted scan failure".to_string(),
            })
        } else {
            Ok(self.interfaces.clone())
        }
    }
}

fn available(caps: NetworkCapabilities) -> ConnectivityEvent {
    ConnectivityEvent::Available {
        capabilities: Some(caps),
    }
}

async fn wait_for_state<S, I>(observer: &ReachabilityObserver<S, I>, want: NetworkState)
where
    S: ConnectivitySource,
    I: InterfaceScanner,
{
    let mut subscription = observer.subscribe();
    timeout(Duration::from_secs(1), async {
        loop {
            match subscription.next().await {
                Some(state) if state == want => break,
                Some(_) => {}
                None => panic!("channel closed while waiting for {want}"),
            }
        }
    })
    .await
    .unwrap_or_else(|_| panic!("timed out waiting for {want}"));
}

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn new_observer_is_not_listening() {
        let observer = ReachabilityObserver::new(MockSource::single(vec![]), MockScanner::empty());

        assert!(!observer.is_listening());
        assert_eq!(observer.current_state(), NetworkState::Unavailable);
    }

    #[tokio::test]
    async fn resume_forwards_source_events() {
        let source = MockSource::single(vec![
            available(NetworkCapabilities::new().with_wifi()),
            ConnectivityEvent::Losing {
                max_ms_to_live: 30_000,
            },
            ConnectivityEvent::Lost,
        ]);
        let observer = ReachabilityObserver::new(source, MockScanner::empty());

        observer.resume_listening().expect("registration failed");

        wait_for_state(&observer, NetworkState::Lost).await;
        assert_eq!(observer.current_state(), NetworkState::Lost);
    }

    #[tokio::test]
    async fn pause_twice_is_a_noop() {
        let source = MockSource::single(vec![]);
        let observer = ReachabilityObserver::new(source, MockScanner::empty());

        observer.resume_listening().expect("registration failed");
        assert!(observer.is_listening());

        observer.pause_listening();
        assert!(!observer.is_listening());

        // Second pause with nothing registered must be silent.
        observer.pause_listening();
        assert!(!observer.is_listening());
    }

    #[tokio::test]
    async fn resume_replaces_the_previous_registration() {
        let source = MockSource::new(vec![vec![], vec![]]);
        let registrations = source.registration_counter();
        let observer = ReachabilityObserver::new(source, MockScanner::empty());

        observer.resume_listening().expect("registration failed");
        observer.resume_listening().expect("registration failed");

        assert_eq!(registrations.load(Ordering::SeqCst), 2);
        assert!(observer.is_listening());
    }

    #[tokio::test]
    async fn failed_registration_leaves_the_observer_paused() {
        let observer = ReachabilityObserver::new(FailingSource, MockScanner::empty());

        let result = observer.resume_listening();

        assert!(matches!(result, Err(SourceError::Unsupported { .. })));
        assert!(!observer.is_listening());
    }

    #[tokio::test]
    async fn late_subscriber_replays_the_latest_state() {
        let source = MockSource::single(vec![available(
            NetworkCapabilities::new().with_cellular(),
        )]);
        let observer = ReachabilityObserver::new(source, MockScanner::empty());

        observer.resume_listening().expect("registration failed");
        wait_for_state(&observer, NetworkState::Available(NetworkType::Cellular)).await;

        let mut late = observer.subscribe();
        let first = timeout(Duration::from_secs(1), late.next())
            .await
            .expect("timed out");

        assert_eq!(first, Some(NetworkState::Available(NetworkType::Cellular)));
    }
}

mod addresses {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn wifi_interface() -> InterfaceSnapshot {
        InterfaceSnapshot::new(
            "wlan0",
            InterfaceKind::Wireless,
            vec![Ipv4Addr::new(192, 168, 1, 20)],
            vec!["fe80::20".parse().unwrap()],
        )
    }

    #[tokio::test]
    async fn ipv4_address_comes_from_the_scanner() {
        let observer = ReachabilityObserver::new(
            MockSource::single(vec![]),
            MockScanner::returning(vec![wifi_interface()]),
        );

        assert_eq!(
            observer.current_ipv4_address(),
            Some(Ipv4Addr::new(192, 168, 1, 20))
        );
    }

    #[tokio::test]
    async fn ipv6_address_comes_from_the_scanner() {
        let observer = ReachabilityObserver::new(
            MockSource::single(vec![]),
            MockScanner::returning(vec![wifi_interface()]),
        );

        assert_eq!(
            observer.current_ipv6_address(),
            Some("fe80::20".parse::<Ipv6Addr>().unwrap())
        );
    }

    #[tokio::test]
    async fn scan_failure_degrades_to_none() {
        let observer =
            ReachabilityObserver::new(MockSource::single(vec![]), MockScanner::failing());

        assert_eq!(observer.current_ipv4_address(), None);
        assert_eq!(observer.current_ipv6_address(), None);
    }
}
