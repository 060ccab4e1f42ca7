//! Tests for the reachability channel.

use super::*;
use crate::reachability::NetworkType;
use std::time::Duration;
use tokio::time::timeout;

const WIFI: NetworkState = NetworkState::Available(NetworkType::WiFi);
const CELL: NetworkState = NetworkState::Available(NetworkType::Cellular);

async fn next_within(subscription: &mut Subscription) -> Option<NetworkState> {
    timeout(Duration::from_secs(1), subscription.next())
        .await
        .expect("timed out waiting for a state")
}

mod replay {
    use super::*;

    #[tokio::test]
    async fn starts_unavailable() {
        let channel = ReachabilityChannel::new();

        assert_eq!(channel.current(), NetworkState::Unavailable);

        let mut subscription = channel.subscribe();
        assert_eq!(next_within(&mut subscription).await, Some(NetworkState::Unavailable));
    }

    #[tokio::test]
    async fn new_subscriber_receives_latest_published_state_first() {
        let channel = ReachabilityChannel::new();
        channel.publish(WIFI);
        channel.publish(NetworkState::Losing);
        channel.publish(NetworkState::Lost);

        let mut subscription = channel.subscribe();

        assert_eq!(next_within(&mut subscription).await, Some(NetworkState::Lost));
    }

    #[tokio::test]
    async fn current_accessor_tracks_publishes() {
        let channel = ReachabilityChannel::new();
        let subscription = channel.subscribe();

        channel.publish(CELL);

        assert_eq!(channel.current(), CELL);
        assert_eq!(subscription.current(), CELL);
    }
}

mod delivery {
    use super::*;

    #[tokio::test]
    async fn states_arrive_in_publish_order() {
        let channel = ReachabilityChannel::new();
        let mut subscription = channel.subscribe();

        // Consume the replayed initial state first.
        assert_eq!(next_within(&mut subscription).await, Some(NetworkState::Unavailable));

        channel.publish(WIFI);
        assert_eq!(next_within(&mut subscription).await, Some(WIFI));

        channel.publish(NetworkState::Losing);
        assert_eq!(next_within(&mut subscription).await, Some(NetworkState::Losing));

        channel.publish(NetworkState::Lost);
        assert_eq!(next_within(&mut subscription).await, Some(NetworkState::Lost));
    }

    #[tokio::test]
    async fn slow_subscriber_is_coalesced_to_the_latest_state() {
        let channel = ReachabilityChannel::new();
        let mut subscription = channel.subscribe();
        assert_eq!(next_within(&mut subscription).await, Some(NetworkState::Unavailable));

        // Two publishes before the subscriber catches up.
        channel.publish(WIFI);
        channel.publish(NetworkState::Lost);

        assert_eq!(next_within(&mut subscription).await, Some(NetworkState::Lost));

        // Nothing else is buffered.
        let pending = timeout(Duration::from_millis(50), subscription.next()).await;
        assert!(pending.is_err(), "expected no further delivery");
    }

    #[tokio::test]
    async fn republishing_the_same_state_still_wakes_subscribers() {
        let channel = ReachabilityChannel::new();
        let mut subscription = channel.subscribe();
        assert_eq!(next_within(&mut subscription).await, Some(NetworkState::Unavailable));

        channel.publish(NetworkState::Unavailable);

        assert_eq!(next_within(&mut subscription).await, Some(NetworkState::Unavailable));
    }

    #[tokio::test]
    async fn concurrent_publishers_leave_one_published_value() {
        let channel = ReachabilityChannel::new();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let publisher = channel.clone();
            handles.push(tokio::spawn(async move {
                publisher.publish(WIFI);
                publisher.publish(NetworkState::Lost);
            }));
        }
        for handle in handles {
            handle.await.expect("publisher task failed");
        }

        let current = channel.current();
        assert!(
            current == WIFI || current == NetworkState::Lost,
            "unexpected final state {current:?}"
        );
    }
}

mod disposal {
    use super::*;

    #[tokio::test]
    async fn dropped_subscription_receives_nothing_further() {
        let channel = ReachabilityChannel::new();
        let subscription = channel.subscribe();
        assert_eq!(channel.subscriber_count(), 1);

        drop(subscription);
        assert_eq!(channel.subscriber_count(), 0);

        // Publishing after disposal must not fail or deliver anywhere.
        channel.publish(WIFI);
        assert_eq!(channel.current(), WIFI);
    }

    #[tokio::test]
    async fn dropping_one_subscription_leaves_others_live() {
        let channel = ReachabilityChannel::new();
        let mut kept = channel.subscribe();
        let dropped = channel.subscribe();
        assert_eq!(next_within(&mut kept).await, Some(NetworkState::Unavailable));

        drop(dropped);
        channel.publish(CELL);

        assert_eq!(next_within(&mut kept).await, Some(CELL));
    }

    #[tokio::test]
    async fn subscription_ends_when_channel_is_gone() {
        let channel = ReachabilityChannel::new();
        let mut subscription = channel.subscribe();
        assert_eq!(next_within(&mut subscription).await, Some(NetworkState::Unavailable));

        drop(channel);

        assert_eq!(next_within(&mut subscription).await, None);
    }
}
