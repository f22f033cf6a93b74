//! Stylus entrypoint for the bridge.
//!
//! Storage lives in [`GravityState`] and is reached by the core only through [`BridgeStore`].
//! Every external method pairs that state with an [`OnchainHost`] over the VM, runs one core
//! operation and logs the resulting event. A core error reverts the whole call, which is what
//! makes each transition atomic on-chain.

use alloc::{string::String, vec::Vec};

use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, FixedBytes, B256, U256, U8},
    prelude::*,
    stylus_core::log,
};

use gravity_bridge_types::{
    AssetClass, BridgeConfig, BridgeError, BridgeEvent, LogicCall, TxBatch, ValidatorSignature,
    Valset, MAX_NONCE_JUMP, POWER_THRESHOLD,
};

use crate::{
    batch, custody,
    errors::GravityError,
    host::onchain::OnchainHost,
    interfaces::events::SolBridgeEvent,
    logic_call, registry,
    state::BridgeStore,
};

/// `(validators, powers, valsetNonce, rewardAmount, rewardToken)`
pub type ValsetArgs = (Vec<Address>, Vec<U256>, U256, U256, Address);

/// `(v, r, s)` per member of the signing set.
pub type SignatureArgs = Vec<(u8, FixedBytes<32>, FixedBytes<32>)>;

/// `(transferAmounts, transferTokenContracts, feeAmounts, feeTokenContracts,
/// logicContractAddress, payload, timeOut, invalidationId, invalidationNonce)`
pub type LogicCallArgs = (
    Vec<U256>,
    Vec<Address>,
    Vec<U256>,
    Vec<Address>,
    Address,
    Bytes,
    U256,
    FixedBytes<32>,
    U256,
);

const CLASS_FUNGIBLE: u8 = 1;
const CLASS_NON_FUNGIBLE: u8 = 2;

sol_storage! {
    #[entrypoint]
    pub struct Gravity {
        bool initialized;
        GravityState state;
    }

    pub struct GravityState {
        /// Deployment configuration.
        bytes32 gravity_id;
        uint256 power_threshold;
        uint256 max_nonce_jump;
        bool enforce_canonical_order;
        address nft_fee_token;

        bytes32 last_valset_checkpoint;
        uint256 last_valset_nonce;

        /// Replay guard: last batch nonce per token, last logic call nonce per invalidation id.
        mapping(address => uint256) last_batch_nonces;
        mapping(bytes32 => uint256) invalidation_mapping;

        uint256 last_event_nonce;
        uint256 last_erc721_event_nonce;

        /// Custody. Asset class tags: 0 unknown, 1 fungible, 2 non-fungible.
        mapping(address => uint8) asset_classes;
        mapping(address => uint256) custody;
        mapping(address => mapping(uint256 => bool)) nft_custody;
    }
}

#[public]
impl Gravity {
    /// Installs the deployment configuration and the genesis validator set (nonce 0). Runs as
    /// part of the deployment transaction.
    ///
    /// A zero `power_threshold` selects the default of 66% of `u32::MAX`. A zero
    /// `nft_fee_token` leaves NFT batches without a fee token.
    #[constructor]
    pub fn constructor(
        &mut self,
        gravity_id: FixedBytes<32>,
        power_threshold: u32,
        nft_fee_token: Address,
        validators: Vec<Address>,
        powers: Vec<U256>,
    ) -> Result<(), GravityError> {
        if self.initialized.get() {
            return Err(BridgeError::AlreadyInitialized.into());
        }
        let threshold = if power_threshold == 0 {
            POWER_THRESHOLD
        } else {
            power_threshold
        };

        let state = &mut self.state;
        state.gravity_id.set(gravity_id);
        state.power_threshold.set(U256::from(threshold));
        state.max_nonce_jump.set(MAX_NONCE_JUMP);
        state.enforce_canonical_order.set(true);
        state.nft_fee_token.set(nft_fee_token);

        let genesis = valset_from_args(
            (validators, powers, U256::ZERO, U256::ZERO, Address::ZERO),
            BridgeError::MalformedCurrentValidatorSet,
        )?;
        let event = registry::initialize(state, &genesis)?;
        self.initialized.set(true);
        self.emit(event);
        Ok(())
    }

    pub fn update_valset(
        &mut self,
        new_valset: ValsetArgs,
        current_valset: ValsetArgs,
        sigs: SignatureArgs,
    ) -> Result<(), GravityError> {
        self.require_initialized()?;
        let current = valset_from_args(current_valset, BridgeError::MalformedCurrentValidatorSet)?;
        let new_valset = valset_from_args(new_valset, BridgeError::MalformedNewValidatorSet)?;
        let signatures = signatures_from_args(sigs);

        let (state, mut host) = self.split();
        let event =
            registry::update_valset(state, &mut host, &new_valset, &current, &signatures)?;
        self.emit(event);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn submit_batch(
        &mut self,
        current_valset: ValsetArgs,
        sigs: SignatureArgs,
        amounts: Vec<U256>,
        destinations: Vec<Address>,
        fees: Vec<U256>,
        batch_nonce: U256,
        token_contract: Address,
        batch_timeout: U256,
    ) -> Result<(), GravityError> {
        self.require_initialized()?;
        let current = valset_from_args(current_valset, BridgeError::MalformedCurrentValidatorSet)?;
        let signatures = signatures_from_args(sigs);
        let tx_batch = TxBatch {
            tx_ids: amounts,
            destinations,
            fees,
            batch_nonce,
            token_contract,
            timeout: batch_timeout,
        };

        let (state, mut host) = self.split();
        let event = batch::submit_batch(state, &mut host, &current, &signatures, &tx_batch)?;
        self.emit(event);
        Ok(())
    }

    pub fn submit_logic_call(
        &mut self,
        current_valset: ValsetArgs,
        sigs: SignatureArgs,
        args: LogicCallArgs,
    ) -> Result<(), GravityError> {
        self.require_initialized()?;
        let current = valset_from_args(current_valset, BridgeError::MalformedCurrentValidatorSet)?;
        let signatures = signatures_from_args(sigs);
        let (
            transfer_amounts,
            transfer_token_contracts,
            fee_amounts,
            fee_token_contracts,
            logic_contract_address,
            payload,
            timeout,
            invalidation_id,
            invalidation_nonce,
        ) = args;
        let call = LogicCall {
            transfer_amounts,
            transfer_token_contracts,
            fee_amounts,
            fee_token_contracts,
            logic_contract_address,
            payload: payload.0.into(),
            timeout,
            invalidation_id,
            invalidation_nonce,
        };

        let (state, mut host) = self.split();
        let event = logic_call::submit_logic_call(state, &mut host, &current, &signatures, &call)?;
        self.emit(event);
        Ok(())
    }

    pub fn send_to_cosmos(
        &mut self,
        token_contract: Address,
        destination: String,
        amount: U256,
    ) -> Result<(), GravityError> {
        self.require_initialized()?;
        let (state, mut host) = self.split();
        let event = custody::lock_fungible(state, &mut host, token_contract, destination, amount)?;
        self.emit(event);
        Ok(())
    }

    pub fn send_erc721_to_cosmos(
        &mut self,
        token_contract: Address,
        destination: String,
        token_id: U256,
    ) -> Result<(), GravityError> {
        self.require_initialized()?;
        let (state, mut host) = self.split();
        let event = custody::lock_nft(state, &mut host, token_contract, destination, token_id)?;
        self.emit(event);
        Ok(())
    }

    /// Registers a Cosmos-originated token whose supply was minted to this contract.
    #[selector(name = "registerERC20")]
    pub fn register_erc20(
        &mut self,
        token_contract: Address,
        cosmos_denom: String,
        name: String,
        symbol: String,
        decimals: u8,
    ) -> Result<(), GravityError> {
        self.require_initialized()?;
        let (state, mut host) = self.split();
        let event = custody::register_erc20(
            state,
            &mut host,
            token_contract,
            cosmos_denom,
            name,
            symbol,
            decimals,
        )?;
        self.emit(event);
        Ok(())
    }

    pub fn last_batch_nonce(&self, token_contract: Address) -> U256 {
        self.state.last_batch_nonces.get(token_contract)
    }

    pub fn last_logic_call_nonce(&self, invalidation_id: FixedBytes<32>) -> U256 {
        self.state.invalidation_mapping.get(invalidation_id)
    }

    pub fn last_valset_checkpoint(&self) -> FixedBytes<32> {
        self.state.last_valset_checkpoint.get()
    }

    pub fn last_valset_nonce(&self) -> U256 {
        self.state.last_valset_nonce.get()
    }

    pub fn last_event_nonce(&self) -> U256 {
        self.state.last_event_nonce.get()
    }

    pub fn last_erc721_event_nonce(&self) -> U256 {
        self.state.last_erc721_event_nonce.get()
    }

    pub fn gravity_id(&self) -> FixedBytes<32> {
        self.state.gravity_id.get()
    }

    pub fn custody_balance(&self, token_contract: Address) -> U256 {
        self.state.custody.get(token_contract)
    }
}

impl Gravity {
    fn require_initialized(&self) -> Result<(), GravityError> {
        if self.initialized.get() {
            Ok(())
        } else {
            Err(BridgeError::NotInitialized.into())
        }
    }

    /// Mutable state next to a host over the same VM.
    fn split(&mut self) -> (&mut GravityState, OnchainHost<'_>) {
        (&mut self.state, OnchainHost::new(self.initialized.vm()))
    }

    fn emit(&self, event: BridgeEvent) {
        let vm = self.vm();
        match SolBridgeEvent::from(event) {
            SolBridgeEvent::ValsetUpdated(e) => log(vm, e),
            SolBridgeEvent::TransactionBatchExecuted(e) => log(vm, e),
            SolBridgeEvent::LogicCall(e) => log(vm, e),
            SolBridgeEvent::SendToCosmos(e) => log(vm, e),
            SolBridgeEvent::SendErc721ToCosmos(e) => log(vm, e),
            SolBridgeEvent::Erc20Deployed(e) => log(vm, e),
        }
    }
}

/// Powers arrive as `uint256`; one that does not fit in 32 bits makes the set malformed.
fn valset_from_args(args: ValsetArgs, malformed: BridgeError) -> Result<Valset, BridgeError> {
    let (validators, powers, nonce, reward_amount, reward_token) = args;
    let powers = powers
        .into_iter()
        .map(|power| u32::try_from(power).map_err(|_| malformed.clone()))
        .collect::<Result<Vec<u32>, _>>()?;
    Ok(Valset {
        validators,
        powers,
        nonce,
        reward_amount,
        reward_token,
    })
}

fn signatures_from_args(sigs: SignatureArgs) -> Vec<ValidatorSignature> {
    sigs.into_iter().map(ValidatorSignature::from).collect()
}

impl BridgeStore for GravityState {
    fn config(&self) -> BridgeConfig {
        let nft_fee_token = self.nft_fee_token.get();
        BridgeConfig {
            gravity_id: self.gravity_id.get(),
            power_threshold: self.power_threshold.get().saturating_to::<u32>(),
            max_nonce_jump: self.max_nonce_jump.get(),
            enforce_canonical_order: self.enforce_canonical_order.get(),
            nft_fee_token: (nft_fee_token != Address::ZERO).then_some(nft_fee_token),
        }
    }

    fn valset_checkpoint(&self) -> B256 {
        self.last_valset_checkpoint.get()
    }

    fn valset_nonce(&self) -> U256 {
        self.last_valset_nonce.get()
    }

    fn set_valset(&mut self, checkpoint: B256, nonce: U256) {
        self.last_valset_checkpoint.set(checkpoint);
        self.last_valset_nonce.set(nonce);
    }

    fn last_batch_nonce(&self, token: Address) -> U256 {
        self.last_batch_nonces.get(token)
    }

    fn set_last_batch_nonce(&mut self, token: Address, nonce: U256) {
        self.last_batch_nonces.insert(token, nonce);
    }

    fn last_logic_call_nonce(&self, invalidation_id: B256) -> U256 {
        self.invalidation_mapping.get(invalidation_id)
    }

    fn set_last_logic_call_nonce(&mut self, invalidation_id: B256, nonce: U256) {
        self.invalidation_mapping.insert(invalidation_id, nonce);
    }

    fn event_nonce(&self, class: AssetClass) -> U256 {
        match class {
            AssetClass::Fungible => self.last_event_nonce.get(),
            AssetClass::NonFungible => self.last_erc721_event_nonce.get(),
        }
    }

    fn set_event_nonce(&mut self, class: AssetClass, nonce: U256) {
        match class {
            AssetClass::Fungible => self.last_event_nonce.set(nonce),
            AssetClass::NonFungible => self.last_erc721_event_nonce.set(nonce),
        }
    }

    fn asset_class(&self, token: Address) -> Option<AssetClass> {
        match self.asset_classes.get(token).to::<u8>() {
            CLASS_FUNGIBLE => Some(AssetClass::Fungible),
            CLASS_NON_FUNGIBLE => Some(AssetClass::NonFungible),
            _ => None,
        }
    }

    fn register_asset(&mut self, token: Address, class: AssetClass) {
        let tag = match class {
            AssetClass::Fungible => CLASS_FUNGIBLE,
            AssetClass::NonFungible => CLASS_NON_FUNGIBLE,
        };
        self.asset_classes.insert(token, U8::from(tag));
    }

    fn custody_balance(&self, token: Address) -> U256 {
        self.custody.get(token)
    }

    fn set_custody_balance(&mut self, token: Address, amount: U256) {
        self.custody.insert(token, amount);
    }

    fn holds_nft(&self, token: Address, token_id: U256) -> bool {
        self.nft_custody.getter(token).get(token_id)
    }

    fn set_holds_nft(&mut self, token: Address, token_id: U256, held: bool) {
        self.nft_custody.setter(token).insert(token_id, held);
    }
}
