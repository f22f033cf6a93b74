//! In-memory bridge with all-or-nothing transitions.
//!
//! Each operation runs against a staged copy of the state and the host; both are committed
//! only when the operation succeeds. This is the execution model the chain gives the contract
//! through revert, reproduced for off-chain use and tests.

use alloc::{string::String, vec::Vec};

use alloy_primitives::{Address, U256};
use gravity_bridge_types::{
    BridgeConfig, BridgeError, BridgeEvent, BridgeHost, LogicCall, TxBatch, ValidatorSignature,
    Valset,
};

use crate::{
    batch, custody, logic_call, registry,
    state::{BridgeState, BridgeStore},
};

#[derive(Clone, Debug)]
pub struct Bridge {
    state: BridgeState,
    events: Vec<BridgeEvent>,
}

impl Bridge {
    /// Deploys a bridge for `config` with `genesis` as the first validator set.
    pub fn initialize(config: BridgeConfig, genesis: &Valset) -> Result<Self, BridgeError> {
        let mut state = BridgeState::new(config);
        let event = registry::initialize(&mut state, genesis)?;
        Ok(Self {
            state,
            events: vec![event],
        })
    }

    pub fn state(&self) -> &BridgeState {
        &self.state
    }

    pub fn config(&self) -> BridgeConfig {
        self.state.config()
    }

    /// Every event emitted so far, oldest first.
    pub fn events(&self) -> &[BridgeEvent] {
        &self.events
    }

    pub fn update_valset<H: BridgeHost + Clone>(
        &mut self,
        host: &mut H,
        new_valset: &Valset,
        current: &Valset,
        signatures: &[ValidatorSignature],
    ) -> Result<BridgeEvent, BridgeError> {
        self.transact(host, |state, host| {
            registry::update_valset(state, host, new_valset, current, signatures)
        })
    }

    pub fn submit_batch<H: BridgeHost + Clone>(
        &mut self,
        host: &mut H,
        current: &Valset,
        signatures: &[ValidatorSignature],
        batch: &TxBatch,
    ) -> Result<BridgeEvent, BridgeError> {
        self.transact(host, |state, host| {
            batch::submit_batch(state, host, current, signatures, batch)
        })
    }

    pub fn submit_logic_call<H: BridgeHost + Clone>(
        &mut self,
        host: &mut H,
        current: &Valset,
        signatures: &[ValidatorSignature],
        call: &LogicCall,
    ) -> Result<BridgeEvent, BridgeError> {
        self.transact(host, |state, host| {
            logic_call::submit_logic_call(state, host, current, signatures, call)
        })
    }

    pub fn send_to_cosmos<H: BridgeHost + Clone>(
        &mut self,
        host: &mut H,
        token: Address,
        destination: impl Into<String>,
        amount: U256,
    ) -> Result<BridgeEvent, BridgeError> {
        let destination = destination.into();
        self.transact(host, |state, host| {
            custody::lock_fungible(state, host, token, destination, amount)
        })
    }

    pub fn send_erc721_to_cosmos<H: BridgeHost + Clone>(
        &mut self,
        host: &mut H,
        token: Address,
        destination: impl Into<String>,
        token_id: U256,
    ) -> Result<BridgeEvent, BridgeError> {
        let destination = destination.into();
        self.transact(host, |state, host| {
            custody::lock_nft(state, host, token, destination, token_id)
        })
    }

    /// Registers a Cosmos-originated token; the bridge's balance of it becomes custody.
    pub fn register_erc20<H: BridgeHost + Clone>(
        &mut self,
        host: &mut H,
        token: Address,
        cosmos_denom: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Result<BridgeEvent, BridgeError> {
        let (cosmos_denom, name, symbol) = (cosmos_denom.into(), name.into(), symbol.into());
        self.transact(host, |state, host| {
            custody::register_erc20(state, host, token, cosmos_denom, name, symbol, decimals)
        })
    }

    fn transact<H, F>(&mut self, host: &mut H, op: F) -> Result<BridgeEvent, BridgeError>
    where
        H: BridgeHost + Clone,
        F: FnOnce(&mut BridgeState, &mut H) -> Result<BridgeEvent, BridgeError>,
    {
        let mut staged_state = self.state.clone();
        let mut staged_host = host.clone();
        let event = op(&mut staged_state, &mut staged_host)?;
        self.state = staged_state;
        *host = staged_host;
        self.events.push(event.clone());
        Ok(event)
    }
}
