//! netreach: Network Reachability Observer
//!
//! A library for observing operating-system connectivity changes and
//! republishing them as a replayable stream of reachability states,
//! plus a stateless resolver for the host's current IP addresses.

pub mod config;
pub mod reachability;
pub mod resolver;
