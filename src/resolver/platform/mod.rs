//! Platform-specific interface scanner implementations.
//!
//! # Platform Support
//!
//! - **Windows**: Uses `GetAdaptersAddresses` via the `windows` crate.
//! - **Other hosts**: Uses `systemstat`'s network enumeration with
//!   name-based interface classification.

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use windows::WindowsScanner;

#[cfg(windows)]
pub use windows::WindowsScanner as PlatformScanner;

#[cfg(not(windows))]
mod unix;

#[cfg(not(windows))]
pub use unix::SystemScanner;

#[cfg(not(windows))]
pub use unix::SystemScanner as PlatformScanner;
