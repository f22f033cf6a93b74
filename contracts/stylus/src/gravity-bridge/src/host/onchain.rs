use alloc::vec::Vec;

use stylus_sdk::{
    alloy_primitives::{Address, Bytes, B256, U256},
    alloy_sol_types::SolCall,
    prelude::*,
    stylus_core::{
        calls::{context::Call, CallAccess},
        Host,
    },
};

use gravity_bridge_types::{LogicCallCapability, ValidatorSignature};

use crate::{
    host::{BridgeHost, HostError},
    interfaces::tokens::{IERC20, IERC721},
    utils::crypto::ecrecover,
};

/// Per-call gas cap for read-only token queries.
const STATIC_CALL_GAS: u64 = 100_000;

/// Host backed by the Stylus VM. Token movements and logic calls go through the VM's call
/// interface, so the test VM can stand in for the chain.
pub struct OnchainHost<'a> {
    vm: &'a dyn Host,
}

impl<'a> OnchainHost<'a> {
    pub fn new(vm: &'a dyn Host) -> Self {
        Self { vm }
    }

    /// The bridge contract's own address, i.e. the custody account.
    fn bridge(&self) -> Address {
        self.vm.contract_address()
    }

    fn call(&self, target: Address, data: &[u8]) -> Result<Vec<u8>, HostError> {
        self.vm
            .call(&Call::new(), target, data)
            .map_err(|_| HostError::CallFailed { target })
    }

    fn staticcall(&self, target: Address, data: &[u8]) -> Result<Vec<u8>, HostError> {
        self.vm
            .static_call(&Call::new().gas(STATIC_CALL_GAS), target, data)
            .map_err(|_| HostError::CallFailed { target })
    }

    fn balance_of(&self, token: Address, account: Address) -> Result<U256, HostError> {
        let data = IERC20::balanceOfCall { account }.abi_encode();
        let out = self.staticcall(token, &data)?;
        IERC20::balanceOfCall::abi_decode_returns(&out, true)
            .map(|ret| ret._0)
            .map_err(|_| HostError::MalformedReturn { target: token })
    }

    /// ERC20 calls may return nothing or a bool; only an explicit `false` is a refusal.
    fn expect_transfer_ok(token: Address, out: &[u8]) -> Result<(), HostError> {
        if out.is_empty() {
            return Ok(());
        }
        let ok = IERC20::transferCall::abi_decode_returns(out, true)
            .map_err(|_| HostError::MalformedReturn { target: token })?
            ._0;
        if ok {
            Ok(())
        } else {
            Err(HostError::Rejected { target: token })
        }
    }
}

impl BridgeHost for OnchainHost<'_> {
    fn block_number(&self) -> u64 {
        self.vm.block_number()
    }

    fn caller(&self) -> Address {
        self.vm.msg_sender()
    }

    fn recover_signer(&self, hash: B256, signature: &ValidatorSignature) -> Option<Address> {
        ecrecover(self.vm, hash, signature)
    }

    fn bridge_balance(&self, token: Address) -> Result<U256, HostError> {
        self.balance_of(token, self.bridge())
    }

    fn pull_fungible(
        &mut self,
        token: Address,
        from: Address,
        amount: U256,
    ) -> Result<U256, HostError> {
        let bridge = self.bridge();
        let before = self.balance_of(token, bridge)?;
        let data = IERC20::transferFromCall {
            from,
            to: bridge,
            amount,
        }
        .abi_encode();
        let out = self.call(token, &data)?;
        Self::expect_transfer_ok(token, &out)?;
        let after = self.balance_of(token, bridge)?;
        // Fee-on-transfer tokens deliver less than requested; a shrinking balance is refused.
        after
            .checked_sub(before)
            .ok_or(HostError::Rejected { target: token })
    }

    fn push_fungible(&mut self, token: Address, to: Address, amount: U256) -> Result<(), HostError> {
        let data = IERC20::transferCall { to, amount }.abi_encode();
        let out = self.call(token, &data)?;
        Self::expect_transfer_ok(token, &out)
    }

    fn pull_nft(&mut self, token: Address, from: Address, token_id: U256) -> Result<(), HostError> {
        let data = IERC721::transferFromCall {
            from,
            to: self.bridge(),
            tokenId: token_id,
        }
        .abi_encode();
        self.call(token, &data).map(|_| ())
    }

    fn push_nft(&mut self, token: Address, to: Address, token_id: U256) -> Result<(), HostError> {
        let data = IERC721::safeTransferFromCall {
            from: self.bridge(),
            to,
            tokenId: token_id,
        }
        .abi_encode();
        self.call(token, &data).map(|_| ())
    }

    fn execute(&mut self, call: &LogicCallCapability) -> Result<Bytes, HostError> {
        self.call(call.target, &call.payload).map(Bytes::from)
    }
}
