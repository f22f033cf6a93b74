//! Checkpoint codec.
//!
//! Every digest is `keccak256(abi.encode(gravityId, kindTag, ...))`. The parameter lists below
//! are an interoperability contract with the origin chain and the orchestrators: field order and
//! ABI types must not change.

use alloc::vec::Vec;

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;

use crate::{
    transitions::{LogicCall, TxBatch},
    valset::Valset,
};

/// Domain-separation tag mixed into every digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Checkpoint,
    TransactionBatch,
    LogicCall,
}

impl TransitionKind {
    pub const fn name(self) -> &'static str {
        match self {
            TransitionKind::Checkpoint => "checkpoint",
            TransitionKind::TransactionBatch => "transactionBatch",
            TransitionKind::LogicCall => "logicCall",
        }
    }

    pub const fn tag(self) -> B256 {
        pad_right(self.name().as_bytes())
    }
}

/// `bytes32` form of a short identifier: UTF-8 bytes right-padded with zeros. Returns `None`
/// when the string does not fit.
pub fn gravity_id_from_str(id: &str) -> Option<B256> {
    if id.len() > 32 {
        return None;
    }
    Some(pad_right(id.as_bytes()))
}

const fn pad_right(bytes: &[u8]) -> B256 {
    let mut out = [0u8; 32];
    let mut i = 0;
    while i < bytes.len() && i < 32 {
        out[i] = bytes[i];
        i += 1;
    }
    B256::new(out)
}

fn powers_as_words(powers: &[u32]) -> Vec<U256> {
    powers.iter().map(|p| U256::from(*p)).collect()
}

/// `abi.encode(gravityId, "checkpoint", nonce, validators, powers, rewardAmount, rewardToken)`.
pub fn encode_valset_checkpoint(gravity_id: B256, valset: &Valset) -> Vec<u8> {
    (
        gravity_id,
        TransitionKind::Checkpoint.tag(),
        valset.nonce,
        valset.validators.clone(),
        powers_as_words(&valset.powers),
        valset.reward_amount,
        valset.reward_token,
    )
        .abi_encode_params()
}

pub fn valset_checkpoint(gravity_id: B256, valset: &Valset) -> B256 {
    keccak256(encode_valset_checkpoint(gravity_id, valset))
}

/// `abi.encode(gravityId, "transactionBatch", txIds, destinations, fees, batchNonce,
/// tokenContract, batchTimeout)`.
pub fn encode_batch(gravity_id: B256, batch: &TxBatch) -> Vec<u8> {
    (
        gravity_id,
        TransitionKind::TransactionBatch.tag(),
        batch.tx_ids.clone(),
        batch.destinations.clone(),
        batch.fees.clone(),
        batch.batch_nonce,
        batch.token_contract,
        batch.timeout,
    )
        .abi_encode_params()
}

pub fn batch_digest(gravity_id: B256, batch: &TxBatch) -> B256 {
    keccak256(encode_batch(gravity_id, batch))
}

/// `abi.encode(gravityId, "logicCall", transferAmounts, transferTokenContracts, feeAmounts,
/// feeTokenContracts, logicContractAddress, payload, timeOut, invalidationId, invalidationNonce)`.
pub fn encode_logic_call(gravity_id: B256, call: &LogicCall) -> Vec<u8> {
    let transfer_tokens: Vec<Address> = call.transfer_token_contracts.clone();
    let fee_tokens: Vec<Address> = call.fee_token_contracts.clone();
    (
        gravity_id,
        TransitionKind::LogicCall.tag(),
        call.transfer_amounts.clone(),
        transfer_tokens,
        call.fee_amounts.clone(),
        fee_tokens,
        call.logic_contract_address,
        call.payload.clone(),
        call.timeout,
        call.invalidation_id,
        call.invalidation_nonce,
    )
        .abi_encode_params()
}

pub fn logic_call_digest(gravity_id: B256, call: &LogicCall) -> B256 {
    keccak256(encode_logic_call(gravity_id, call))
}
