//! Mock host for off-chain testing.
//!
//! Keeps token ledgers, NFT ownership and logic-contract behavior in memory so bridge
//! transitions can be driven end to end without a chain. Signer recovery uses k256, so
//! signatures produced with [`crate::sign_digest`] verify exactly as they would on-chain.

use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::{Address, Bytes, B256, U256};
use gravity_bridge_types::{BridgeHost, HostError, LogicCallCapability, ValidatorSignature};

use crate::signer::recover_signer;

#[derive(Clone, Debug, Default)]
pub struct MockHost {
    pub block_number: u64,
    pub caller: Address,
    /// Custody account of the bridge under test.
    pub bridge: Address,
    /// Deployed token contracts. Calls to anything else fail.
    pub tokens: BTreeSet<Address>,
    /// `(token, holder) -> balance`.
    pub balances: BTreeMap<(Address, Address), U256>,
    /// `(token, token_id) -> owner`.
    pub nft_owners: BTreeMap<(Address, U256), Address>,
    /// Amount burned on every transfer of a fee-on-transfer token.
    pub transfer_fees: BTreeMap<Address, U256>,
    /// Contracts whose calls revert.
    pub reverting: BTreeSet<Address>,
    /// Logic calls executed so far.
    pub logic_calls: Vec<LogicCallCapability>,
    /// Return data handed back by every logic contract.
    pub logic_return: Bytes,
}

impl MockHost {
    pub fn new(bridge: Address) -> Self {
        Self {
            bridge,
            ..Self::default()
        }
    }

    pub fn deploy_token(&mut self, token: Address) {
        self.tokens.insert(token);
    }

    pub fn mint(&mut self, token: Address, holder: Address, amount: U256) {
        self.deploy_token(token);
        *self.balances.entry((token, holder)).or_default() += amount;
    }

    pub fn mint_nft(&mut self, token: Address, holder: Address, token_id: U256) {
        self.deploy_token(token);
        self.nft_owners.insert((token, token_id), holder);
    }

    pub fn balance_of(&self, token: Address, holder: Address) -> U256 {
        self.balances
            .get(&(token, holder))
            .copied()
            .unwrap_or_default()
    }

    pub fn owner_of(&self, token: Address, token_id: U256) -> Option<Address> {
        self.nft_owners.get(&(token, token_id)).copied()
    }

    pub fn revert_calls_to(&mut self, target: Address) {
        self.reverting.insert(target);
    }

    fn reachable(&self, target: Address) -> Result<(), HostError> {
        if self.reverting.contains(&target) {
            return Err(HostError::CallFailed { target });
        }
        Ok(())
    }

    fn token(&self, token: Address) -> Result<(), HostError> {
        self.reachable(token)?;
        if !self.tokens.contains(&token) {
            return Err(HostError::CallFailed { target: token });
        }
        Ok(())
    }

    fn move_fungible(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<U256, HostError> {
        self.token(token)?;
        let from_balance = self.balance_of(token, from);
        let remaining = from_balance
            .checked_sub(amount)
            .ok_or(HostError::CallFailed { target: token })?;
        let fee = self.transfer_fees.get(&token).copied().unwrap_or_default();
        let delivered = amount.saturating_sub(fee);

        self.balances.insert((token, from), remaining);
        *self.balances.entry((token, to)).or_default() += delivered;
        Ok(delivered)
    }

    fn move_nft(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), HostError> {
        self.token(token)?;
        if self.owner_of(token, token_id) != Some(from) {
            return Err(HostError::CallFailed { target: token });
        }
        self.nft_owners.insert((token, token_id), to);
        Ok(())
    }
}

impl BridgeHost for MockHost {
    fn block_number(&self) -> u64 {
        self.block_number
    }

    fn caller(&self) -> Address {
        self.caller
    }

    fn recover_signer(&self, hash: B256, signature: &ValidatorSignature) -> Option<Address> {
        recover_signer(hash, signature)
    }

    fn bridge_balance(&self, token: Address) -> Result<U256, HostError> {
        self.token(token)?;
        Ok(self.balance_of(token, self.bridge))
    }

    fn pull_fungible(
        &mut self,
        token: Address,
        from: Address,
        amount: U256,
    ) -> Result<U256, HostError> {
        let bridge = self.bridge;
        self.move_fungible(token, from, bridge, amount)
    }

    fn push_fungible(&mut self, token: Address, to: Address, amount: U256) -> Result<(), HostError> {
        let bridge = self.bridge;
        self.move_fungible(token, bridge, to, amount).map(|_| ())
    }

    fn pull_nft(&mut self, token: Address, from: Address, token_id: U256) -> Result<(), HostError> {
        let bridge = self.bridge;
        self.move_nft(token, from, bridge, token_id)
    }

    fn push_nft(&mut self, token: Address, to: Address, token_id: U256) -> Result<(), HostError> {
        let bridge = self.bridge;
        self.move_nft(token, bridge, to, token_id)
    }

    fn execute(&mut self, call: &LogicCallCapability) -> Result<Bytes, HostError> {
        self.reachable(call.target)?;
        self.logic_calls.push(call.clone());
        Ok(self.logic_return.clone())
    }
}
