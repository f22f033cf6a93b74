use core::fmt;

use alloy_primitives::{Address, U256};

/// Failures reported by the host environment (token transfers, delegated calls).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostError {
    /// The host does not provide this capability.
    Unsupported,
    /// The call reverted or could not be made.
    CallFailed { target: Address },
    /// The callee answered with something other than the expected ABI shape.
    MalformedReturn { target: Address },
    /// The callee answered but refused the operation (e.g. a `false` transfer result).
    Rejected { target: Address },
}

/// Every way a submitted transition can fail. All of them abort the whole submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BridgeError {
    MalformedCurrentValidatorSet,
    MalformedNewValidatorSet,
    NonCanonicalValidatorSet,
    IncorrectCheckpoint,
    InvalidValsetNonce { new: U256, current: U256 },
    InvalidBatchNonce { new: U256, current: U256 },
    InvalidLogicCallNonce { new: U256, current: U256 },
    MalformedBatch,
    InvalidLogicCallTransfers,
    InvalidLogicCallFees,
    BatchTimedOut,
    LogicCallTimedOut,
    InvalidSignature,
    InsufficientPower { actual: u32, required: u32 },
    UnknownAsset(Address),
    AssetClassMismatch(Address),
    AssetAlreadyRegistered(Address),
    InsufficientReserves { token: Address, available: U256, required: U256 },
    NftNotInCustody { token: Address, token_id: U256 },
    AlreadyInitialized,
    NotInitialized,
    /// An event counter is exhausted.
    EventNonceOverflow,
    Host(HostError),
}

impl From<HostError> for BridgeError {
    fn from(err: HostError) -> Self {
        BridgeError::Host(err)
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Unsupported => write!(f, "host capability not supported"),
            HostError::CallFailed { target } => write!(f, "call to {target} failed"),
            HostError::MalformedReturn { target } => {
                write!(f, "call to {target} returned malformed data")
            }
            HostError::Rejected { target } => write!(f, "call to {target} was rejected"),
        }
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::MalformedCurrentValidatorSet => write!(f, "MalformedCurrentValidatorSet()"),
            BridgeError::MalformedNewValidatorSet => write!(f, "MalformedNewValidatorSet()"),
            BridgeError::NonCanonicalValidatorSet => write!(f, "NonCanonicalValidatorSet()"),
            BridgeError::IncorrectCheckpoint => write!(f, "IncorrectCheckpoint()"),
            BridgeError::InvalidValsetNonce { new, current } => {
                write!(f, "InvalidValsetNonce({new}, {current})")
            }
            BridgeError::InvalidBatchNonce { new, current } => {
                write!(f, "InvalidBatchNonce({new}, {current})")
            }
            BridgeError::InvalidLogicCallNonce { new, current } => {
                write!(f, "InvalidLogicCallNonce({new}, {current})")
            }
            BridgeError::MalformedBatch => write!(f, "MalformedBatch()"),
            BridgeError::InvalidLogicCallTransfers => write!(f, "InvalidLogicCallTransfers()"),
            BridgeError::InvalidLogicCallFees => write!(f, "InvalidLogicCallFees()"),
            BridgeError::BatchTimedOut => write!(f, "BatchTimedOut()"),
            BridgeError::LogicCallTimedOut => write!(f, "LogicCallTimedOut()"),
            BridgeError::InvalidSignature => write!(f, "InvalidSignature()"),
            BridgeError::InsufficientPower { actual, required } => {
                write!(f, "InsufficientPower({actual}, {required})")
            }
            BridgeError::UnknownAsset(token) => write!(f, "UnknownAsset({token})"),
            BridgeError::AssetClassMismatch(token) => write!(f, "AssetClassMismatch({token})"),
            BridgeError::AssetAlreadyRegistered(token) => {
                write!(f, "AssetAlreadyRegistered({token})")
            }
            BridgeError::InsufficientReserves {
                token,
                available,
                required,
            } => write!(f, "InsufficientReserves({token}, {available}, {required})"),
            BridgeError::NftNotInCustody { token, token_id } => {
                write!(f, "NftNotInCustody({token}, {token_id})")
            }
            BridgeError::AlreadyInitialized => write!(f, "AlreadyInitialized()"),
            BridgeError::NotInitialized => write!(f, "NotInitialized()"),
            BridgeError::EventNonceOverflow => write!(f, "EventNonceOverflow()"),
            BridgeError::Host(err) => write!(f, "{err}"),
        }
    }
}
