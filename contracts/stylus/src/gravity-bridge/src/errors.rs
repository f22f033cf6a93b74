//! Solidity-facing errors. Each [`BridgeError`] variant reverts with a custom error of the same
//! name.

use alloy_sol_types::sol;
use stylus_sdk::{
    alloy_primitives::{Address, U256},
    stylus_proc::SolidityError,
};

use gravity_bridge_types::{BridgeError, HostError};

sol! {
    error MalformedCurrentValidatorSet();
    error MalformedNewValidatorSet();
    error NonCanonicalValidatorSet();
    error IncorrectCheckpoint();
    error InvalidValsetNonce(uint256 newNonce, uint256 currentNonce);
    error InvalidBatchNonce(uint256 newNonce, uint256 currentNonce);
    error InvalidLogicCallNonce(uint256 newNonce, uint256 currentNonce);
    error MalformedBatch();
    error InvalidLogicCallTransfers();
    error InvalidLogicCallFees();
    error BatchTimedOut();
    error LogicCallTimedOut();
    error InvalidSignature();
    error InsufficientPower(uint256 cumulativePower, uint256 powerThreshold);
    error UnknownAsset(address token);
    error AssetClassMismatch(address token);
    error AssetAlreadyRegistered(address token);
    error InsufficientReserves(address token, uint256 available, uint256 required);
    error NftNotInCustody(address token, uint256 tokenId);
    error AlreadyInitialized();
    error NotInitialized();
    error EventNonceOverflow();
    error ExternalCallFailed(address target);
}

#[derive(SolidityError)]
pub enum GravityError {
    MalformedCurrentValidatorSet(MalformedCurrentValidatorSet),
    MalformedNewValidatorSet(MalformedNewValidatorSet),
    NonCanonicalValidatorSet(NonCanonicalValidatorSet),
    IncorrectCheckpoint(IncorrectCheckpoint),
    InvalidValsetNonce(InvalidValsetNonce),
    InvalidBatchNonce(InvalidBatchNonce),
    InvalidLogicCallNonce(InvalidLogicCallNonce),
    MalformedBatch(MalformedBatch),
    InvalidLogicCallTransfers(InvalidLogicCallTransfers),
    InvalidLogicCallFees(InvalidLogicCallFees),
    BatchTimedOut(BatchTimedOut),
    LogicCallTimedOut(LogicCallTimedOut),
    InvalidSignature(InvalidSignature),
    InsufficientPower(InsufficientPower),
    UnknownAsset(UnknownAsset),
    AssetClassMismatch(AssetClassMismatch),
    AssetAlreadyRegistered(AssetAlreadyRegistered),
    InsufficientReserves(InsufficientReserves),
    NftNotInCustody(NftNotInCustody),
    AlreadyInitialized(AlreadyInitialized),
    NotInitialized(NotInitialized),
    EventNonceOverflow(EventNonceOverflow),
    ExternalCallFailed(ExternalCallFailed),
}

impl From<BridgeError> for GravityError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::MalformedCurrentValidatorSet => {
                GravityError::MalformedCurrentValidatorSet(MalformedCurrentValidatorSet {})
            }
            BridgeError::MalformedNewValidatorSet => {
                GravityError::MalformedNewValidatorSet(MalformedNewValidatorSet {})
            }
            BridgeError::NonCanonicalValidatorSet => {
                GravityError::NonCanonicalValidatorSet(NonCanonicalValidatorSet {})
            }
            BridgeError::IncorrectCheckpoint => {
                GravityError::IncorrectCheckpoint(IncorrectCheckpoint {})
            }
            BridgeError::InvalidValsetNonce { new, current } => {
                GravityError::InvalidValsetNonce(InvalidValsetNonce {
                    newNonce: new,
                    currentNonce: current,
                })
            }
            BridgeError::InvalidBatchNonce { new, current } => {
                GravityError::InvalidBatchNonce(InvalidBatchNonce {
                    newNonce: new,
                    currentNonce: current,
                })
            }
            BridgeError::InvalidLogicCallNonce { new, current } => {
                GravityError::InvalidLogicCallNonce(InvalidLogicCallNonce {
                    newNonce: new,
                    currentNonce: current,
                })
            }
            BridgeError::MalformedBatch => GravityError::MalformedBatch(MalformedBatch {}),
            BridgeError::InvalidLogicCallTransfers => {
                GravityError::InvalidLogicCallTransfers(InvalidLogicCallTransfers {})
            }
            BridgeError::InvalidLogicCallFees => {
                GravityError::InvalidLogicCallFees(InvalidLogicCallFees {})
            }
            BridgeError::BatchTimedOut => GravityError::BatchTimedOut(BatchTimedOut {}),
            BridgeError::LogicCallTimedOut => GravityError::LogicCallTimedOut(LogicCallTimedOut {}),
            BridgeError::InvalidSignature => GravityError::InvalidSignature(InvalidSignature {}),
            BridgeError::InsufficientPower { actual, required } => {
                GravityError::InsufficientPower(InsufficientPower {
                    cumulativePower: U256::from(actual),
                    powerThreshold: U256::from(required),
                })
            }
            BridgeError::UnknownAsset(token) => GravityError::UnknownAsset(UnknownAsset { token }),
            BridgeError::AssetClassMismatch(token) => {
                GravityError::AssetClassMismatch(AssetClassMismatch { token })
            }
            BridgeError::AssetAlreadyRegistered(token) => {
                GravityError::AssetAlreadyRegistered(AssetAlreadyRegistered { token })
            }
            BridgeError::InsufficientReserves {
                token,
                available,
                required,
            } => GravityError::InsufficientReserves(InsufficientReserves {
                token,
                available,
                required,
            }),
            BridgeError::NftNotInCustody { token, token_id } => {
                GravityError::NftNotInCustody(NftNotInCustody {
                    token,
                    tokenId: token_id,
                })
            }
            BridgeError::AlreadyInitialized => {
                GravityError::AlreadyInitialized(AlreadyInitialized {})
            }
            BridgeError::NotInitialized => GravityError::NotInitialized(NotInitialized {}),
            BridgeError::EventNonceOverflow => {
                GravityError::EventNonceOverflow(EventNonceOverflow {})
            }
            BridgeError::Host(err) => GravityError::ExternalCallFailed(ExternalCallFailed {
                target: host_error_target(err),
            }),
        }
    }
}

fn host_error_target(err: HostError) -> Address {
    match err {
        HostError::Unsupported => Address::ZERO,
        HostError::CallFailed { target }
        | HostError::MalformedReturn { target }
        | HostError::Rejected { target } => target,
    }
}
