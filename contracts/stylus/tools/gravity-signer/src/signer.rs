use alloy_primitives::{Address, B256};
use gravity_bridge_types::{eth_signed_message_hash, ValidatorSignature, Valset};
use k256::{
    ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey},
    elliptic_curve::sec1::ToEncodedPoint,
};
use sha3::{Digest, Keccak256};

fn keccak256_bytes(bytes: &[u8]) -> B256 {
    let mut h = Keccak256::new();
    h.update(bytes);
    B256::from_slice(h.finalize().as_slice())
}

/// Ethereum address of a secp256k1 public key.
pub fn signer_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    // Skip the 0x04 SEC1 tag; the address is the low 20 bytes of keccak(x || y).
    let hash = keccak256_bytes(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Signs the personal-message hash of `digest`, the form the contract verifies.
pub fn sign_digest(
    signing_key: &SigningKey,
    digest: B256,
) -> Result<ValidatorSignature, k256::ecdsa::Error> {
    let hash = eth_signed_message_hash(digest);
    let (signature, recovery_id) = signing_key.sign_prehash_recoverable(hash.as_slice())?;
    let (r, s) = signature.split_bytes();
    Ok(ValidatorSignature {
        v: 27 + recovery_id.to_byte(),
        r: B256::from_slice(r.as_slice()),
        s: B256::from_slice(s.as_slice()),
    })
}

/// One signature per roster member, in roster order. Members we hold no key for abstain.
pub fn sign_for_roster(
    roster: &Valset,
    keys: &[SigningKey],
    digest: B256,
) -> Result<Vec<ValidatorSignature>, k256::ecdsa::Error> {
    let keyed: Vec<(Address, &SigningKey)> = keys
        .iter()
        .map(|key| (signer_address(key.verifying_key()), key))
        .collect();

    roster
        .validators
        .iter()
        .map(|member| {
            match keyed.iter().find(|(address, _)| address == member) {
                Some((_, key)) => sign_digest(key, digest),
                None => Ok(ValidatorSignature::ABSTAIN),
            }
        })
        .collect()
}

/// Off-chain `ecrecover`: same inputs and the same `v ∈ {27, 28}` rule as the precompile.
pub fn recover_signer(hash: B256, signature: &ValidatorSignature) -> Option<Address> {
    let recovery_id = RecoveryId::from_byte(signature.v.checked_sub(27)?)?;
    let mut rs = [0u8; 64];
    rs[..32].copy_from_slice(signature.r.as_slice());
    rs[32..].copy_from_slice(signature.s.as_slice());
    let signature = Signature::from_slice(&rs).ok()?;
    let key = VerifyingKey::recover_from_prehash(hash.as_slice(), &signature, recovery_id).ok()?;
    Some(signer_address(&key))
}
