//! Shared fixtures: a 125-member validator set with deterministic keys, signing helpers and a
//! deployed in-memory bridge.

#![allow(dead_code)]

use alloy_primitives::{Address, B256, U256};
use gravity_bridge::Bridge;
use gravity_bridge_types::{
    canonical_cmp, gravity_id_from_str, BridgeConfig, Validator, ValidatorSignature, Valset,
};
use gravity_signer::{sign_digest, signer_address, MockHost};
use k256::ecdsa::SigningKey;

/// Power distribution of a realistic 125-validator set. Sums to 4,294,970,000, which is more
/// than `u32::MAX`, so a full tally wraps.
pub const EXAMPLE_POWERS: [u32; 125] = [
    303_654_379, 266_717_637, 261_134_176, 188_549_183, 176_952_764,
    174_805_279, 137_009_543, 134_003_064, 133_573_567, 130_137_591,
    105_656_262, 103_508_777, 96_207_328, 91_482_861, 83_322_418,
    75_161_975, 74_302_981, 73_014_490, 66_142_538, 63_995_053,
    59_700_083, 52_828_131, 51_110_143, 48_533_161, 47_244_670,
    45_956_179, 45_097_185, 44_667_688, 39_513_724, 38_654_730,
    37_795_736, 37_795_736, 37_795_736, 36_507_245, 36_507_245,
    36_077_748, 35_218_754, 30_064_790, 28_776_299, 27_487_808,
    25_340_323, 24_910_826, 24_051_832, 23_622_335, 22_333_844,
    22_333_844, 22_333_844, 21_474_850, 21_045_353, 18_897_868,
    18_038_874, 17_179_880, 16_750_383, 16_320_886, 15_891_389,
    15_891_389, 15_461_892, 15_032_395, 14_602_898, 14_173_401,
    14_173_401, 14_173_401, 13_743_904, 13_314_407, 12_884_910,
    12_884_910, 12_455_413, 12_025_916, 11_596_419, 11_166_922,
    10_737_425, 10_307_928, 9_878_431, 9_878_431, 9_448_934,
    9_448_934, 9_448_934, 9_019_437, 9_019_437, 8_589_940,
    8_160_443, 7_730_946, 7_301_449, 6_871_952, 6_012_958,
    6_012_958, 5_583_461, 5_583_461, 4_724_467, 4_294_970,
    4_294_970, 4_294_970, 4_294_970, 4_294_970, 3_865_473,
    3_435_976, 3_435_976, 3_006_479, 3_006_479, 3_006_479,
    2_576_982, 2_576_982, 2_147_485, 2_147_485, 2_147_485,
    2_147_485, 2_147_485, 2_147_485, 1_717_988, 1_717_988,
    1_288_491, 858_994, 429_497, 429_497, 429_497,
    429_497, 429_497, 429_497, 429_497, 429_497,
    429_497, 429_497, 429_497, 429_497, 429_497,
];

pub const BRIDGE: Address = Address::new([0xb0; 20]);
pub const RELAYER: Address = Address::new([0xee; 20]);
pub const USER: Address = Address::new([0xa1; 20]);
pub const TOKEN: Address = Address::new([0x70; 20]);

pub fn gravity_id() -> B256 {
    gravity_id_from_str("foo").unwrap()
}

pub fn config() -> BridgeConfig {
    BridgeConfig::new(gravity_id())
}

pub fn two_thirds_config() -> BridgeConfig {
    config().with_power_threshold(gravity_bridge_types::TWO_THIRDS_POWER_THRESHOLD)
}

fn key(index: u32) -> SigningKey {
    let mut bytes = [0u8; 32];
    bytes[0] = 0x01;
    bytes[28..].copy_from_slice(&index.to_be_bytes());
    SigningKey::from_slice(&bytes).unwrap()
}

/// Validator keys paired with their members, in canonical order.
#[derive(Clone)]
pub struct Signers {
    pub keys: Vec<SigningKey>,
    pub members: Vec<Validator>,
}

impl Signers {
    /// One fresh key per power, keys drawn from `first_key` upwards.
    pub fn new(powers: &[u32], first_key: u32) -> Self {
        let mut pairs: Vec<(SigningKey, Validator)> = powers
            .iter()
            .enumerate()
            .map(|(i, power)| {
                let key = key(first_key + i as u32);
                let address = signer_address(key.verifying_key());
                (
                    key,
                    Validator {
                        address,
                        power: *power,
                    },
                )
            })
            .collect();
        pairs.sort_by(|a, b| canonical_cmp(&a.1, &b.1));
        let (keys, members) = pairs.into_iter().unzip();
        Self { keys, members }
    }

    pub fn example() -> Self {
        Self::new(&EXAMPLE_POWERS, 1)
    }

    pub fn valset(&self, nonce: u64) -> Valset {
        Valset::new(self.members.iter().copied(), U256::from(nonce))
    }

    /// Same keys with new powers, re-sorted canonically.
    pub fn with_powers(&self, powers: impl Fn(usize, u32) -> u32) -> Self {
        let mut pairs: Vec<(SigningKey, Validator)> = self
            .keys
            .iter()
            .cloned()
            .zip(self.members.iter().enumerate().map(|(i, m)| Validator {
                address: m.address,
                power: powers(i, m.power),
            }))
            .collect();
        pairs.sort_by(|a, b| canonical_cmp(&a.1, &b.1));
        let (keys, members) = pairs.into_iter().unzip();
        Self { keys, members }
    }

    /// Every member signs `digest`.
    pub fn sign(&self, digest: B256) -> Vec<ValidatorSignature> {
        self.keys
            .iter()
            .map(|key| sign_digest(key, digest).unwrap())
            .collect()
    }

    /// Every member except those at `abstaining` positions signs `digest`.
    pub fn sign_except(&self, digest: B256, abstaining: &[usize]) -> Vec<ValidatorSignature> {
        let mut sigs = self.sign(digest);
        for i in abstaining {
            sigs[*i] = ValidatorSignature::ABSTAIN;
        }
        sigs
    }
}

/// A deployed bridge, the current signers and a mock chain.
pub struct Harness {
    pub bridge: Bridge,
    pub host: MockHost,
    pub signers: Signers,
    pub current: Valset,
}

impl Harness {
    pub fn deploy(config: BridgeConfig) -> Self {
        let signers = Signers::example();
        let current = signers.valset(0);
        let bridge = Bridge::initialize(config, &current).unwrap();
        let mut host = MockHost::new(BRIDGE);
        host.block_number = 1;
        host.caller = RELAYER;
        Self {
            bridge,
            host,
            signers,
            current,
        }
    }

    /// `USER` locks `amount` of `token` into the bridge.
    pub fn fund(&mut self, token: Address, amount: u64) {
        self.host.mint(token, USER, U256::from(amount));
        self.as_caller(USER, |h| {
            h.bridge
                .send_to_cosmos(&mut h.host, token, "cosmos1user", U256::from(amount))
                .unwrap();
        });
    }

    /// `USER` locks NFT `token_id` into the bridge.
    pub fn fund_nft(&mut self, token: Address, token_id: u64) {
        self.host.mint_nft(token, USER, U256::from(token_id));
        self.as_caller(USER, |h| {
            h.bridge
                .send_erc721_to_cosmos(&mut h.host, token, "cosmos1user", U256::from(token_id))
                .unwrap();
        });
    }

    pub fn as_caller<T>(&mut self, caller: Address, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = std::mem::replace(&mut self.host.caller, caller);
        let out = f(self);
        self.host.caller = previous;
        out
    }

    pub fn balance(&self, token: Address, holder: Address) -> U256 {
        self.host.balance_of(token, holder)
    }
}

/// Positions zeroed by the "not enough signatures" scenarios; leaves 2,807,621,889 power.
pub const NOT_ENOUGH: [usize; 9] = [1, 2, 3, 5, 6, 7, 9, 11, 13];

/// One abstention fewer than [`NOT_ENOUGH`]; clears either threshold.
pub const BARELY_ENOUGH: [usize; 8] = [1, 2, 3, 5, 6, 7, 9, 11];
