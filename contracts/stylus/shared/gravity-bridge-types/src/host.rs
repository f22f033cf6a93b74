use alloy_primitives::{Address, Bytes, B256, U256};

use crate::{error::HostError, signature::ValidatorSignature, transitions::LogicCallCapability};

/// Custody class of a token contract, fixed the first time it is locked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetClass {
    Fungible,
    NonFungible,
}

/// Host abstraction, implemented by the Stylus VM on-chain and by mocks off-chain.
///
/// The bridge core only ever reaches the outside world through this trait.
pub trait BridgeHost {
    fn block_number(&self) -> u64;

    /// Submitter of the current transition.
    fn caller(&self) -> Address;

    /// `ecrecover(hash, v, r, s)`. `None` when recovery fails.
    fn recover_signer(&self, hash: B256, signature: &ValidatorSignature) -> Option<Address>;

    /// How much of `token` the bridge account itself holds.
    fn bridge_balance(&self, _token: Address) -> Result<U256, HostError> {
        Err(HostError::Unsupported)
    }

    /// Moves `amount` of `token` from `from` into bridge custody and returns how much actually
    /// arrived.
    fn pull_fungible(
        &mut self,
        _token: Address,
        _from: Address,
        _amount: U256,
    ) -> Result<U256, HostError> {
        Err(HostError::Unsupported)
    }

    fn push_fungible(
        &mut self,
        _token: Address,
        _to: Address,
        _amount: U256,
    ) -> Result<(), HostError> {
        Err(HostError::Unsupported)
    }

    fn pull_nft(
        &mut self,
        _token: Address,
        _from: Address,
        _token_id: U256,
    ) -> Result<(), HostError> {
        Err(HostError::Unsupported)
    }

    fn push_nft(&mut self, _token: Address, _to: Address, _token_id: U256) -> Result<(), HostError> {
        Err(HostError::Unsupported)
    }

    /// Invokes the logic contract with the opaque payload and returns its return data.
    fn execute(&mut self, _call: &LogicCallCapability) -> Result<Bytes, HostError> {
        Err(HostError::Unsupported)
    }
}
