//! Application execution logic.
//!
//! This module contains the main async loop that observes reachability
//! transitions and reports them together with the current host addresses.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use thiserror::Error;
use tokio::signal;

use netreach::config::ValidatedConfig;
use netreach::reachability::{
    ConnectivitySource, NetworkState, ReachabilityObserver, SourceError,
};
use netreach::resolver::platform::PlatformScanner;
use netreach::resolver::{InterfaceScanner, IpVersion};

#[cfg(windows)]
use netreach::reachability::platform::WindowsSource;

#[cfg(not(windows))]
use netreach::reachability::platform::PollingSource;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to register with the connectivity source.
    #[error("Failed to register with the connectivity source: {0}")]
    Registration(#[source] SourceError),

    /// The reachability channel closed while the loop was still running.
    #[error("Reachability channel closed unexpectedly")]
    ChannelClosed,
}

/// Executes the main application loop.
///
/// This function:
/// 1. Creates the platform scanner and connectivity source
/// 2. Builds the observer and resumes listening
/// 3. Reports every reachability transition until shutdown (Ctrl+C)
///
/// With `--once`, the first reported state (the replayed current state)
/// ends the loop.
///
/// # Errors
///
/// Returns an error if the connectivity source rejects the registration
/// or the reachability channel closes unexpectedly.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Platform-specific network APIs
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let scanner = PlatformScanner::default();

    #[cfg(windows)]
    let source = WindowsSource::new(scanner);

    #[cfg(not(windows))]
    let source = PollingSource::new(scanner, config.poll_interval);

    let observer = ReachabilityObserver::new(source, scanner);
    observer.resume_listening().map_err(RunError::Registration)?;

    let result = run_loop(&observer, config.ip_version, config.once).await;

    observer.pause_listening();
    result
}

/// Runs the reporting loop until shutdown, channel closure, or (with
/// `once`) the first reported state.
///
/// Excluded from coverage - requires signal handling.
#[cfg(not(tarpaulin_include))]
async fn run_loop<S, I>(
    observer: &ReachabilityObserver<S, I>,
    ip_version: IpVersion,
    once: bool,
) -> Result<(), RunError>
where
    S: ConnectivitySource,
    I: InterfaceScanner,
{
    let mut updates = observer.subscribe();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                return Ok(());
            }

            state = updates.next() => {
                match state {
                    Some(state) => {
                        let report = format_report(
                            state,
                            observer.current_ipv4_address(),
                            observer.current_ipv6_address(),
                            ip_version,
                        );
                        tracing::info!("{report}");

                        if once {
                            return Ok(());
                        }
                    }
                    None => {
                        return Err(RunError::ChannelClosed);
                    }
                }
            }
        }
    }
}

/// Renders a single reachability report line.
///
/// Addresses are appended only while the network is available, and only
/// for the families the configuration selects.
fn format_report(
    state: NetworkState,
    ipv4: Option<Ipv4Addr>,
    ipv6: Option<Ipv6Addr>,
    ip_version: IpVersion,
) -> String {
    let mut report = state.to_string();

    if state.is_available() {
        if ip_version.includes_v4() {
            report.push_str(&format!(", IPv4: {}", format_address(ipv4)));
        }
        if ip_version.includes_v6() {
            report.push_str(&format!(", IPv6: {}", format_address(ipv6)));
        }
    }

    report
}

/// Renders an optional address, falling back to "none".
fn format_address<A: fmt::Display>(address: Option<A>) -> String {
    address.map_or_else(|| "none".to_string(), |a| a.to_string())
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
