//! File formats read and written by the `gravity-signer` CLI.

use std::{fs, path::Path};

use alloy_primitives::{Address, B256};
use anyhow::{anyhow, Context, Result};
use gravity_bridge_types::{ValidatorSignature, Valset};
use k256::ecdsa::SigningKey;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::signer::signer_address;

/// Signatures for one transition, aligned with the roster that produced them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransition {
    pub digest: B256,
    pub signers: usize,
    pub signatures: Vec<ValidatorSignature>,
}

impl SignedTransition {
    pub fn new(digest: B256, signatures: Vec<ValidatorSignature>) -> Self {
        let signers = signatures.iter().filter(|s| !s.is_abstention()).count();
        Self {
            digest,
            signers,
            signatures,
        }
    }
}

/// Reads a JSON document from `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

/// Parses a `0x`-prefixed or bare hex secp256k1 private key.
pub fn parse_signing_key(raw: &str) -> Result<SigningKey> {
    let bytes = hex::decode(raw.trim().trim_start_matches("0x")).context("decode private key hex")?;
    SigningKey::from_slice(&bytes).map_err(|e| anyhow!("invalid private key: {e}"))
}

/// Reads a JSON array of hex private keys.
pub fn read_keys(path: &Path) -> Result<Vec<SigningKey>> {
    let raw: Vec<String> = read_json(path)?;
    raw.iter()
        .enumerate()
        .map(|(i, key)| parse_signing_key(key).with_context(|| format!("key #{i}")))
        .collect()
}

/// Puts the members of `valset` in canonical order. The flag tells whether anything moved.
pub fn canonicalize(mut valset: Valset) -> (Valset, bool) {
    let reordered = !valset.is_canonically_ordered();
    if reordered {
        valset.sort_canonical();
    }
    (valset, reordered)
}

pub fn key_addresses(keys: &[SigningKey]) -> Vec<Address> {
    keys.iter()
        .map(|key| signer_address(key.verifying_key()))
        .collect()
}
