use alloc::{string::String, vec::Vec};

use alloy_primitives::{Address, Bytes, B256, U256};

/// Observable outcome of a successful transition, consumed by origin-chain watchers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BridgeEvent {
    ValsetUpdated {
        new_valset_nonce: U256,
        event_nonce: U256,
        reward_amount: U256,
        reward_token: Address,
        validators: Vec<Address>,
        powers: Vec<u32>,
        checkpoint: B256,
    },
    TransactionBatchExecuted {
        batch_nonce: U256,
        token: Address,
        event_nonce: U256,
        executor: Address,
    },
    LogicCallExecuted {
        invalidation_id: B256,
        invalidation_nonce: U256,
        return_data: Bytes,
        event_nonce: U256,
        executor: Address,
    },
    SendToCosmos {
        token: Address,
        sender: Address,
        destination: String,
        amount: U256,
        event_nonce: U256,
    },
    SendErc721ToCosmos {
        token: Address,
        sender: Address,
        destination: String,
        token_id: U256,
        event_nonce: U256,
    },
    /// A Cosmos-originated token was registered; its supply starts out in custody.
    Erc20Deployed {
        cosmos_denom: String,
        token: Address,
        name: String,
        symbol: String,
        decimals: u8,
        event_nonce: U256,
    },
}

impl BridgeEvent {
    pub fn event_nonce(&self) -> U256 {
        match self {
            BridgeEvent::ValsetUpdated { event_nonce, .. }
            | BridgeEvent::TransactionBatchExecuted { event_nonce, .. }
            | BridgeEvent::LogicCallExecuted { event_nonce, .. }
            | BridgeEvent::SendToCosmos { event_nonce, .. }
            | BridgeEvent::SendErc721ToCosmos { event_nonce, .. }
            | BridgeEvent::Erc20Deployed { event_nonce, .. } => *event_nonce,
        }
    }
}
