//! Gravity bridge verification core for Arbitrum Stylus.
//!
//! The core operations ([`registry`], [`batch`], [`logic_call`], [`custody`]) are generic over
//! a [`BridgeStore`] and a [`BridgeHost`]; [`Gravity`] wires them to contract storage and the
//! VM, [`Bridge`] to an in-memory state with the same all-or-nothing semantics.

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]

extern crate alloc;

pub mod batch;
pub mod bridge;
pub mod custody;
pub mod errors;
pub mod gravity;
pub mod host;
pub mod interfaces;
pub mod logic_call;
pub mod registry;
pub mod replay;
pub mod state;
pub mod utils;
pub mod verifier;

#[cfg(test)]
mod testing;

pub use bridge::Bridge;
pub use gravity::Gravity;
pub use gravity_bridge_types::BridgeHost;
pub use state::{BridgeState, BridgeStore};
