//! Host address resolution over local network interfaces.
//!
//! This module provides types and functions for:
//! - Representing interface snapshots ([`InterfaceSnapshot`],
//!   [`InterfaceKind`], [`IpVersion`])
//! - Enumerating interfaces ([`InterfaceScanner`], [`platform`])
//! - Selecting the host address ([`first_ipv4`], [`first_ipv6`],
//!   [`first_host_address`])

mod interface;
pub mod platform;
mod resolve;
mod scanner;

pub use interface::{InterfaceKind, InterfaceSnapshot, IpVersion};
pub use resolve::{first_host_address, first_ipv4, first_ipv6};
pub use scanner::{InterfaceScanner, ScanError};
