//! Platform connectivity sources.
//!
//! Both sources derive connectivity from the host's interface table:
//!
//! - [`PollingSource`] rescans on a fixed interval and works everywhere.
//! - `WindowsSource` (Windows only) rescans when the IP interface table
//!   changes, via `NotifyIpInterfaceChange`.
//!
//! The shared probing and event synthesis logic lives in [`probe`]; a
//! source is just a strategy for deciding *when* to probe.

mod polling;
mod probe;

#[cfg(windows)]
mod windows;

pub use polling::{PollingEvents, PollingSource};
pub use probe::{EventSynthesizer, probe_capabilities};

#[cfg(windows)]
pub use windows::{WindowsEvents, WindowsSource};
