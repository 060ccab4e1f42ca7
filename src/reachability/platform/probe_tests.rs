//! Tests for capability probing and event synthesis.

use super::*;
use crate::reachability::{ConnectivityEvent, NetworkCapabilities};
use crate::resolver::{InterfaceKind, InterfaceSnapshot};

fn iface(name: &str, kind: InterfaceKind, v4: &[&str]) -> InterfaceSnapshot {
    InterfaceSnapshot::new(
        name,
        kind,
        v4.iter().map(|a| a.parse().unwrap()).collect(),
        vec![],
    )
}

mod probing {
    use super::*;

    #[test]
    fn no_interfaces_means_no_network() {
        assert_eq!(probe_capabilities(&[]), None);
    }

    #[test]
    fn loopback_alone_means_no_network() {
        let interfaces = [iface("lo", InterfaceKind::Loopback, &["127.0.0.1"])];

        assert_eq!(probe_capabilities(&interfaces), None);
    }

    #[test]
    fn virtual_interfaces_are_ignored() {
        let interfaces = [iface("docker0", InterfaceKind::Virtual, &["172.17.0.1"])];

        assert_eq!(probe_capabilities(&interfaces), None);
    }

    #[test]
    fn addressless_interfaces_do_not_count() {
        let interfaces = [iface("wlan0", InterfaceKind::Wireless, &[])];

        assert_eq!(probe_capabilities(&interfaces), None);
    }

    #[test]
    fn wireless_interface_reports_wifi() {
        let interfaces = [iface("wlan0", InterfaceKind::Wireless, &["192.168.1.20"])];

        assert_eq!(
            probe_capabilities(&interfaces),
            Some(NetworkCapabilities::new().with_wifi())
        );
    }

    #[test]
    fn cellular_interface_reports_cellular() {
        let interfaces = [iface("wwan0", InterfaceKind::Cellular, &["10.64.0.2"])];

        assert_eq!(
            probe_capabilities(&interfaces),
            Some(NetworkCapabilities::new().with_cellular())
        );
    }

    #[test]
    fn ethernet_is_connected_without_transport_flags() {
        let interfaces = [iface("eth0", InterfaceKind::Ethernet, &["10.0.0.7"])];

        assert_eq!(probe_capabilities(&interfaces), Some(NetworkCapabilities::new()));
    }

    #[test]
    fn wifi_and_cellular_together_set_both_flags() {
        let interfaces = [
            iface("wwan0", InterfaceKind::Cellular, &["10.64.0.2"]),
            iface("wlan0", InterfaceKind::Wireless, &["192.168.1.20"]),
        ];

        let capabilities = probe_capabilities(&interfaces).unwrap();
        assert!(capabilities.has_wifi());
        assert!(capabilities.has_cellular());
    }
}

mod synthesis {
    use super::*;

    fn wifi() -> NetworkCapabilities {
        NetworkCapabilities::new().with_wifi()
    }

    fn cellular() -> NetworkCapabilities {
        NetworkCapabilities::new().with_cellular()
    }

    #[test]
    fn first_probe_with_network_yields_available() {
        let mut synthesizer = EventSynthesizer::new();

        assert_eq!(
            synthesizer.observe(Some(wifi())),
            Some(ConnectivityEvent::Available {
                capabilities: Some(wifi()),
            })
        );
    }

    #[test]
    fn first_probe_without_network_yields_unavailable() {
        let mut synthesizer = EventSynthesizer::new();

        assert_eq!(
            synthesizer.observe(None),
            Some(ConnectivityEvent::Unavailable)
        );
    }

    #[test]
    fn unchanged_probe_is_suppressed() {
        let mut synthesizer = EventSynthesizer::new();
        synthesizer.observe(Some(wifi()));

        assert_eq!(synthesizer.observe(Some(wifi())), None);
        assert_eq!(synthesizer.observe(Some(wifi())), None);
    }

    #[test]
    fn repeated_absence_is_suppressed() {
        let mut synthesizer = EventSynthesizer::new();
        synthesizer.observe(None);

        assert_eq!(synthesizer.observe(None), None);
    }

    #[test]
    fn losing_the_network_yields_lost() {
        let mut synthesizer = EventSynthesizer::new();
        synthesizer.observe(Some(wifi()));

        assert_eq!(synthesizer.observe(None), Some(ConnectivityEvent::Lost));
    }

    #[test]
    fn regaining_the_network_yields_available() {
        let mut synthesizer = EventSynthesizer::new();
        synthesizer.observe(Some(wifi()));
        synthesizer.observe(None);

        assert_eq!(
            synthesizer.observe(Some(cellular())),
            Some(ConnectivityEvent::Available {
                capabilities: Some(cellular()),
            })
        );
    }

    #[test]
    fn transport_change_yields_capabilities_changed() {
        let mut synthesizer = EventSynthesizer::new();
        synthesizer.observe(Some(cellular()));

        assert_eq!(
            synthesizer.observe(Some(wifi())),
            Some(ConnectivityEvent::CapabilitiesChanged {
                capabilities: Some(wifi()),
            })
        );
    }
}
