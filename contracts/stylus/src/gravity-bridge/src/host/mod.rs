//! Host environments the bridge core runs against.

pub mod onchain;

pub use gravity_bridge_types::{BridgeHost, HostError};
