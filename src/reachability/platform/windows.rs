//! Windows connectivity source using `NotifyIpInterfaceChange`.

use super::probe::{EventSynthesizer, probe_capabilities};
use crate::reachability::{ConnectivityEvent, ConnectivitySource, SourceError};
use crate::resolver::InterfaceScanner;
use crate::resolver::platform::WindowsScanner;
use std::pin::Pin;
use std::sync::mpsc;
use std::task::{Context, Poll};
use tokio::sync::mpsc as tokio_mpsc;
use tokio_stream::Stream;
use tracing::warn;
use windows::Win32::Foundation::{HANDLE, NO_ERROR, WIN32_ERROR};
use windows::Win32::NetworkManagement::IpHelper::{
    CancelMibChangeNotify2, MIB_IPINTERFACE_ROW, MIB_NOTIFICATION_TYPE, NotifyIpInterfaceChange,
};
use windows::Win32::Networking::WinSock::AF_UNSPEC;

/// Windows implementation of [`ConnectivitySource`].
///
/// Registers with `NotifyIpInterfaceChange` so the interface table is
/// rescanned only when Windows reports a change, instead of on a timer.
/// The callback-based API is converted into an async event stream.
///
/// # One-time Semantics
///
/// Each call to [`register`](ConnectivitySource::register) creates an
/// independent notification registration; dropping the returned stream
/// cancels it.
#[derive(Debug, Default)]
pub struct WindowsSource {
    scanner: WindowsScanner,
}

impl WindowsSource {
    /// Creates a Windows connectivity source.
    #[must_use]
    pub const fn new(scanner: WindowsScanner) -> Self {
        Self { scanner }
    }
}

impl ConnectivitySource for WindowsSource {
    type Events = WindowsEvents;

    fn register(&self) -> Result<Self::Events, SourceError> {
        WindowsEvents::open(self.scanner)
    }
}

/// Stream of connectivity events derived from Windows interface changes.
pub struct WindowsEvents {
    /// Receiver for synthesized events
    receiver: tokio_mpsc::UnboundedReceiver<ConnectivityEvent>,
    /// Handle for cancelling the notification registration.
    /// This field is used implicitly through its `Drop` impl which calls
    /// `CancelMibChangeNotify2` to clean up the Windows notification.
    #[allow(dead_code)]
    handle: NotificationHandle,
}

impl std::fmt::Debug for WindowsEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowsEvents").finish_non_exhaustive()
    }
}

/// RAII wrapper for the notification handle.
///
/// Automatically cancels the notification registration when dropped,
/// and reclaims the leaked `CallbackContext` to prevent memory/thread leaks.
struct NotificationHandle {
    handle: HANDLE,
    /// Raw pointer to reclaim the leaked `CallbackContext` after cancellation.
    /// Dropping the context closes the channel, allowing the bridge thread to exit.
    context_ptr: *mut CallbackContext,
}

impl Drop for NotificationHandle {
    fn drop(&mut self) {
        // SAFETY: We own this handle and it was returned by NotifyIpInterfaceChange.
        // CancelMibChangeNotify2 is safe to call once per handle.
        let _ = unsafe { CancelMibChangeNotify2(self.handle) };

        // SAFETY: After CancelMibChangeNotify2 returns, Windows guarantees the
        // callback won't fire again, so we can safely reclaim the context.
        // Dropping the context drops the sender, which closes the channel and
        // allows the bridge thread to exit cleanly.
        drop(unsafe { Box::from_raw(self.context_ptr) });
    }
}

// SAFETY: The HANDLE is thread-safe for the cancel operation.
// The Windows API guarantees that CancelMibChangeNotify2 can be called
// from any thread.
unsafe impl Send for NotificationHandle {}

/// Context passed to the Windows callback.
///
/// Contains the sender half of the channel that wakes the bridge thread.
struct CallbackContext {
    sender: mpsc::Sender<()>,
}

impl WindowsEvents {
    /// Registers the notification and starts the bridge thread.
    ///
    /// The bridge probes connectivity once up front so the stream opens
    /// with the current state, then reprobes on every notification and
    /// forwards only the changes.
    fn open(scanner: WindowsScanner) -> Result<Self, SourceError> {
        // Sync channel for the callback (called from the Windows thread pool)
        let (sync_tx, sync_rx) = mpsc::channel::<()>();

        // Async channel for the stream consumer
        let (async_tx, async_rx) = tokio_mpsc::unbounded_channel();

        let (handle, context_ptr) = register_notification(sync_tx)?;

        std::thread::spawn(move || {
            let mut synthesizer = EventSynthesizer::new();

            forward_probe(&scanner, &mut synthesizer, &async_tx);

            while sync_rx.recv().is_ok() {
                if async_tx.is_closed() {
                    // Receiver dropped, stop bridging
                    break;
                }
                forward_probe(&scanner, &mut synthesizer, &async_tx);
            }
        });

        Ok(Self {
            receiver: async_rx,
            handle: NotificationHandle {
                handle,
                context_ptr,
            },
        })
    }
}

/// Scans the interface table and forwards the resulting event, if any.
///
/// Scan errors are swallowed with a warning so a transient API failure
/// does not end the stream.
fn forward_probe(
    scanner: &WindowsScanner,
    synthesizer: &mut EventSynthesizer,
    events: &tokio_mpsc::UnboundedSender<ConnectivityEvent>,
) {
    let probe = match scanner.scan() {
        Ok(interfaces) => probe_capabilities(&interfaces),
        Err(error) => {
            warn!("interface scan failed: {error}");
            return;
        }
    };

    if let Some(event) = synthesizer.observe(probe) {
        let _ = events.send(event);
    }
}

impl Stream for WindowsEvents {
    type Item = ConnectivityEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_recv(cx)
    }
}

/// Registers for IP interface change notifications.
///
/// Returns both the notification handle and the context pointer, so the
/// caller can store them together and reclaim the context when cancelling.
///
/// # Safety
///
/// This function uses unsafe to call Windows API and manage raw pointers.
/// The callback context is leaked intentionally and must be reclaimed by the
/// caller after calling `CancelMibChangeNotify2`.
///
/// # Coverage Note
///
/// Excluded from coverage: requires real Windows API interaction, and
/// callback testing requires triggering actual network changes.
#[cfg(not(tarpaulin_include))]
fn register_notification(
    sender: mpsc::Sender<()>,
) -> Result<(HANDLE, *mut CallbackContext), SourceError> {
    // Leak the context so it lives for the lifetime of the notification.
    // The caller is responsible for reclaiming it after cancellation.
    let context_ptr = Box::into_raw(Box::new(CallbackContext { sender }));
    let void_ptr = context_ptr.cast::<std::ffi::c_void>();

    let mut handle = HANDLE::default();

    // SAFETY: We provide valid callback and context. The callback will be called
    // from the Windows thread pool when IP interface changes occur.
    // InitialNotification = false means no callback on registration; the
    // bridge thread performs the initial probe itself.
    let result = unsafe {
        NotifyIpInterfaceChange(
            AF_UNSPEC,
            Some(ip_interface_change_callback),
            Some(void_ptr),
            false, // InitialNotification
            &raw mut handle,
        )
    };

    if result != NO_ERROR {
        // Clean up leaked context on error
        // SAFETY: Registration failed, so Windows won't call the callback
        drop(unsafe { Box::from_raw(context_ptr) });
        return Err(windows::core::Error::from(WIN32_ERROR(result.0)).into());
    }

    Ok((handle, context_ptr))
}

/// Callback function for `NotifyIpInterfaceChange`.
///
/// Called by Windows when IP interface changes occur. Wakes the bridge
/// thread through the sync channel.
///
/// # Safety
///
/// - `caller_context` must be a valid pointer to `CallbackContext`
/// - `row` may be null and is not used
///
/// # Coverage Note
///
/// Excluded from coverage because it's only called by Windows.
#[cfg(not(tarpaulin_include))]
unsafe extern "system" fn ip_interface_change_callback(
    caller_context: *const std::ffi::c_void,
    _row: *const MIB_IPINTERFACE_ROW,
    _notification_type: MIB_NOTIFICATION_TYPE,
) {
    // SAFETY: caller_context was set by us in register_notification
    // and points to a valid CallbackContext.
    if caller_context.is_null() {
        return;
    }

    let context = unsafe { &*(caller_context.cast::<CallbackContext>()) };

    // Send notification through the channel (ignore send errors - receiver may be dropped)
    let _ = context.sender.send(());
}
