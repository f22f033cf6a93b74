//! Validator set representation.
//!
//! A set travels over the ABI as parallel `validators` / `powers` arrays, so the malformed shapes
//! the contract must reject (empty, mismatched lengths) stay representable here and are checked
//! explicitly by [`Valset::is_well_formed`].

use alloc::vec::Vec;
use core::cmp::Ordering;

use alloy_primitives::{Address, U256};

/// A single validator and its relative voting power.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Validator {
    pub address: Address,
    pub power: u32,
}

/// Validator set plus the metadata bound into its checkpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Valset {
    pub validators: Vec<Address>,
    pub powers: Vec<u32>,
    pub nonce: U256,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward_amount: U256,
    /// `Address::ZERO` means no reward token.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward_token: Address,
}

impl Valset {
    pub fn new(members: impl IntoIterator<Item = Validator>, nonce: U256) -> Self {
        let (validators, powers) = members.into_iter().map(|m| (m.address, m.power)).unzip();
        Self {
            validators,
            powers,
            nonce,
            reward_amount: U256::ZERO,
            reward_token: Address::ZERO,
        }
    }

    pub fn with_reward(mut self, amount: U256, token: Address) -> Self {
        self.reward_amount = amount;
        self.reward_token = token;
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Non-empty, with exactly one power per validator.
    pub fn is_well_formed(&self) -> bool {
        !self.validators.is_empty() && self.validators.len() == self.powers.len()
    }

    /// Members in set order. Only meaningful for a well-formed set; extra entries on either
    /// side are ignored.
    pub fn members(&self) -> impl Iterator<Item = Validator> + '_ {
        self.validators
            .iter()
            .zip(&self.powers)
            .map(|(&address, &power)| Validator { address, power })
    }

    /// True when members are strictly ordered by [`canonical_cmp`]. Duplicate addresses
    /// break strictness and are therefore rejected as well.
    pub fn is_canonically_ordered(&self) -> bool {
        let members: Vec<Validator> = self.members().collect();
        members
            .windows(2)
            .all(|pair| canonical_cmp(&pair[0], &pair[1]) == Ordering::Less)
    }

    /// Re-orders members canonically. Off-chain helper; the contract never re-sorts.
    pub fn sort_canonical(&mut self) {
        let mut members: Vec<Validator> = self.members().collect();
        members.sort_by(canonical_cmp);
        let (validators, powers) = members.into_iter().map(|m| (m.address, m.power)).unzip();
        self.validators = validators;
        self.powers = powers;
    }
}

/// Canonical member order shared by every party that computes checkpoints: power descending,
/// ties broken by address ascending.
pub fn canonical_cmp(a: &Validator, b: &Validator) -> Ordering {
    b.power
        .cmp(&a.power)
        .then_with(|| a.address.cmp(&b.address))
}
