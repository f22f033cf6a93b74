use alloy_primitives::{Address, B256, U256};

/// 66% of `u32::MAX`, the default signing power a transition needs.
pub const POWER_THRESHOLD: u32 = 2_834_678_415;

/// Two thirds of 2^32, for deployments that want a strict supermajority.
pub const TWO_THIRDS_POWER_THRESHOLD: u32 = 2_863_311_530;

/// Upper bound on how far a valset or batch nonce may jump in one submission.
pub const MAX_NONCE_JUMP: U256 = U256::from_limbs([1_000_000, 0, 0, 0]);

/// Per-deployment parameters, fixed at initialization.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct BridgeConfig {
    pub gravity_id: B256,
    pub power_threshold: u32,
    pub max_nonce_jump: U256,
    pub enforce_canonical_order: bool,
    /// Token that pays relayer fees on non-fungible batches.
    pub nft_fee_token: Option<Address>,
}

impl BridgeConfig {
    pub fn new(gravity_id: B256) -> Self {
        Self {
            gravity_id,
            ..Self::default()
        }
    }

    pub fn with_power_threshold(mut self, threshold: u32) -> Self {
        self.power_threshold = threshold;
        self
    }

    pub fn with_nft_fee_token(mut self, token: Address) -> Self {
        self.nft_fee_token = Some(token);
        self
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            gravity_id: B256::ZERO,
            power_threshold: POWER_THRESHOLD,
            max_nonce_jump: MAX_NONCE_JUMP,
            enforce_canonical_order: true,
            nft_fee_token: None,
        }
    }
}
