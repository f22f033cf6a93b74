//! Bridge state: the storage seam every operation goes through.

use alloc::collections::{BTreeMap, BTreeSet};

use alloy_primitives::{Address, B256, U256};
use gravity_bridge_types::{AssetClass, BridgeConfig};

/// Storage owned by the bridge, implemented by the Stylus contract and by [`BridgeState`].
pub trait BridgeStore {
    fn config(&self) -> BridgeConfig;

    fn valset_checkpoint(&self) -> B256;
    fn valset_nonce(&self) -> U256;
    fn set_valset(&mut self, checkpoint: B256, nonce: U256);

    fn last_batch_nonce(&self, token: Address) -> U256;
    fn set_last_batch_nonce(&mut self, token: Address, nonce: U256);

    fn last_logic_call_nonce(&self, invalidation_id: B256) -> U256;
    fn set_last_logic_call_nonce(&mut self, invalidation_id: B256, nonce: U256);

    fn event_nonce(&self, class: AssetClass) -> U256;
    fn set_event_nonce(&mut self, class: AssetClass, nonce: U256);

    fn asset_class(&self, token: Address) -> Option<AssetClass>;
    fn register_asset(&mut self, token: Address, class: AssetClass);

    fn custody_balance(&self, token: Address) -> U256;
    fn set_custody_balance(&mut self, token: Address, amount: U256);

    fn holds_nft(&self, token: Address, token_id: U256) -> bool;
    fn set_holds_nft(&mut self, token: Address, token_id: U256, held: bool);
}

/// In-memory bridge state. Cheap to clone, which is what [`crate::Bridge`] relies on to stage
/// a transition and commit it only on success.
#[derive(Clone, Debug, Default)]
pub struct BridgeState {
    config: BridgeConfig,
    valset_checkpoint: B256,
    valset_nonce: U256,
    batch_nonces: BTreeMap<Address, U256>,
    logic_call_nonces: BTreeMap<B256, U256>,
    event_nonces: BTreeMap<AssetClass, U256>,
    assets: BTreeMap<Address, AssetClass>,
    custody: BTreeMap<Address, U256>,
    nfts: BTreeSet<(Address, U256)>,
}

impl BridgeState {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

impl BridgeStore for BridgeState {
    fn config(&self) -> BridgeConfig {
        self.config.clone()
    }

    fn valset_checkpoint(&self) -> B256 {
        self.valset_checkpoint
    }

    fn valset_nonce(&self) -> U256 {
        self.valset_nonce
    }

    fn set_valset(&mut self, checkpoint: B256, nonce: U256) {
        self.valset_checkpoint = checkpoint;
        self.valset_nonce = nonce;
    }

    fn last_batch_nonce(&self, token: Address) -> U256 {
        self.batch_nonces.get(&token).copied().unwrap_or_default()
    }

    fn set_last_batch_nonce(&mut self, token: Address, nonce: U256) {
        self.batch_nonces.insert(token, nonce);
    }

    fn last_logic_call_nonce(&self, invalidation_id: B256) -> U256 {
        self.logic_call_nonces
            .get(&invalidation_id)
            .copied()
            .unwrap_or_default()
    }

    fn set_last_logic_call_nonce(&mut self, invalidation_id: B256, nonce: U256) {
        self.logic_call_nonces.insert(invalidation_id, nonce);
    }

    fn event_nonce(&self, class: AssetClass) -> U256 {
        self.event_nonces.get(&class).copied().unwrap_or_default()
    }

    fn set_event_nonce(&mut self, class: AssetClass, nonce: U256) {
        self.event_nonces.insert(class, nonce);
    }

    fn asset_class(&self, token: Address) -> Option<AssetClass> {
        self.assets.get(&token).copied()
    }

    fn register_asset(&mut self, token: Address, class: AssetClass) {
        self.assets.insert(token, class);
    }

    fn custody_balance(&self, token: Address) -> U256 {
        self.custody.get(&token).copied().unwrap_or_default()
    }

    fn set_custody_balance(&mut self, token: Address, amount: U256) {
        self.custody.insert(token, amount);
    }

    fn holds_nft(&self, token: Address, token_id: U256) -> bool {
        self.nfts.contains(&(token, token_id))
    }

    fn set_holds_nft(&mut self, token: Address, token_id: U256, held: bool) {
        if held {
            self.nfts.insert((token, token_id));
        } else {
            self.nfts.remove(&(token, token_id));
        }
    }
}
