//! Interface scanning trait and error types.

use super::InterfaceSnapshot;
use thiserror::Error;

/// Error type for interface enumeration.
///
/// Describes what went wrong without dictating recovery strategy; the
/// observer's address accessors degrade scan failures to "no address".
#[derive(Debug, Error)]
pub enum ScanError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Trait for enumerating the host's network interfaces.
///
/// The single seam between address resolution and the platform: production
/// code uses the scanner in [`super::platform`], tests inject mocks.
///
/// # Example
///
/// ```ignore
/// use netreach::resolver::{InterfaceScanner, InterfaceSnapshot, ScanError};
///
/// struct FixedScanner(Vec<InterfaceSnapshot>);
///
/// impl InterfaceScanner for FixedScanner {
///     fn scan(&self) -> Result<Vec<InterfaceSnapshot>, ScanError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait InterfaceScanner: Send + Sync {
    /// Returns a snapshot of every network interface on the host.
    ///
    /// Implementations return ALL interfaces; filtering (loopback, blank
    /// addresses) happens in the selection functions.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] when the platform API fails.
    fn scan(&self) -> Result<Vec<InterfaceSnapshot>, ScanError>;
}
