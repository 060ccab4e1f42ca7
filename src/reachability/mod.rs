//! Reachability layer: state model, channel, observer, and sources.
//!
//! This module provides types and functions for:
//! - Representing reachability states ([`NetworkState`], [`NetworkType`])
//! - Connectivity events and their translation ([`ConnectivityEvent`],
//!   [`NetworkCapabilities`], [`translate`])
//! - The replayable broadcast channel ([`ReachabilityChannel`],
//!   [`Subscription`])
//! - Bridging a source to the channel ([`ReachabilityObserver`])
//! - Source abstraction and platform sources ([`ConnectivitySource`],
//!   [`platform`])

mod channel;
mod event;
mod observer;
pub mod platform;
mod source;
mod state;

pub use channel::{ReachabilityChannel, Subscription};
pub use event::{ConnectivityEvent, NetworkCapabilities, translate};
pub use observer::ReachabilityObserver;
pub use source::{ConnectivitySource, SourceError};
pub use state::{NetworkState, NetworkType};
