//! Transition arguments submitted by relayers alongside a signer roster.

use alloc::vec::Vec;

use alloy_primitives::{Address, Bytes, B256, U256};

/// An ordered set of withdrawals out of one token contract.
///
/// For fungible tokens `tx_ids[i]` is an amount; for non-fungible tokens it is a token id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TxBatch {
    pub tx_ids: Vec<U256>,
    pub destinations: Vec<Address>,
    pub fees: Vec<U256>,
    pub batch_nonce: U256,
    pub token_contract: Address,
    pub timeout: U256,
}

impl TxBatch {
    pub fn is_well_formed(&self) -> bool {
        self.tx_ids.len() == self.destinations.len() && self.tx_ids.len() == self.fees.len()
    }

    /// Sum of all fees, `None` on overflow.
    pub fn fee_total(&self) -> Option<U256> {
        self.fees
            .iter()
            .try_fold(U256::ZERO, |acc, fee| acc.checked_add(*fee))
    }
}

/// A single delegated call with attached transfers and fees.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct LogicCall {
    pub transfer_amounts: Vec<U256>,
    pub transfer_token_contracts: Vec<Address>,
    pub fee_amounts: Vec<U256>,
    pub fee_token_contracts: Vec<Address>,
    pub logic_contract_address: Address,
    pub payload: Bytes,
    pub timeout: U256,
    pub invalidation_id: B256,
    pub invalidation_nonce: U256,
}

impl LogicCall {
    pub fn transfers(&self) -> impl Iterator<Item = (Address, U256)> + '_ {
        self.transfer_token_contracts
            .iter()
            .copied()
            .zip(self.transfer_amounts.iter().copied())
    }

    pub fn fees(&self) -> impl Iterator<Item = (Address, U256)> + '_ {
        self.fee_token_contracts
            .iter()
            .copied()
            .zip(self.fee_amounts.iter().copied())
    }

    pub fn capability(&self) -> LogicCallCapability {
        LogicCallCapability {
            target: self.logic_contract_address,
            payload: self.payload.clone(),
        }
    }
}

/// What the bridge hands to the host to execute: a target and an opaque payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicCallCapability {
    pub target: Address,
    pub payload: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_shape_and_fee_total() {
        let mut batch = TxBatch {
            tx_ids: vec![U256::from(1), U256::from(2)],
            destinations: vec![Address::repeat_byte(1), Address::repeat_byte(2)],
            fees: vec![U256::from(3), U256::from(4)],
            ..Default::default()
        };
        assert!(batch.is_well_formed());
        assert_eq!(batch.fee_total(), Some(U256::from(7)));

        batch.fees[1] = U256::MAX;
        assert_eq!(batch.fee_total(), None);

        batch.destinations.pop();
        assert!(!batch.is_well_formed());
    }

    #[test]
    fn capability_carries_target_and_payload() {
        let call = LogicCall {
            logic_contract_address: Address::repeat_byte(9),
            payload: Bytes::from_static(&[0xde, 0xad]),
            ..Default::default()
        };
        let cap = call.capability();
        assert_eq!(cap.target, Address::repeat_byte(9));
        assert_eq!(cap.payload.as_ref(), &[0xde, 0xad]);
    }
}
