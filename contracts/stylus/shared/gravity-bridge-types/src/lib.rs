//! Shared types for the Gravity bridge: validator sets, signatures, transition arguments,
//! the checkpoint codec, the error taxonomy and the host capability trait.
//!
//! Everything here is used both by the Stylus contract and by the off-chain signer, so the
//! crate stays `no_std` and only depends on alloy.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod checkpoint;
pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod signature;
pub mod transitions;
pub mod valset;

pub use checkpoint::{
    batch_digest, gravity_id_from_str, logic_call_digest, valset_checkpoint, TransitionKind,
};
pub use config::{BridgeConfig, MAX_NONCE_JUMP, POWER_THRESHOLD, TWO_THIRDS_POWER_THRESHOLD};
pub use error::{BridgeError, HostError};
pub use events::BridgeEvent;
pub use host::{AssetClass, BridgeHost};
pub use signature::{eth_signed_message_hash, ValidatorSignature};
pub use transitions::{LogicCall, LogicCallCapability, TxBatch};
pub use valset::{canonical_cmp, Validator, Valset};
