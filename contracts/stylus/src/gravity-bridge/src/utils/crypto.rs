//! `ecrecover` through the EVM precompile.

use stylus_sdk::{
    alloy_primitives::{Address, B256},
    stylus_core::{
        calls::{context::Call, CallAccess},
        Host,
    },
};

use gravity_bridge_types::ValidatorSignature;

const ECRECOVER_GAS: u64 = 50_000;

pub const ECRECOVER: Address = Address::with_last_byte(1);

/// Precompile input: `hash`, then `v`, `r` and `s` as 32-byte words.
pub fn ecrecover_input(hash: B256, signature: &ValidatorSignature) -> [u8; 128] {
    let mut input = [0u8; 128];
    input[0..32].copy_from_slice(hash.as_slice());
    input[63] = signature.v;
    input[64..96].copy_from_slice(signature.r.as_slice());
    input[96..128].copy_from_slice(signature.s.as_slice());
    input
}

/// Recovers the signer of `hash` using the precompile at `0x01`.
///
/// The precompile answers with an empty buffer (or the zero address) for signatures it cannot
/// recover; both map to `None`.
pub fn ecrecover(vm: &dyn Host, hash: B256, signature: &ValidatorSignature) -> Option<Address> {
    let input = ecrecover_input(hash, signature);
    let out = vm
        .static_call(&Call::new().gas(ECRECOVER_GAS), ECRECOVER, &input)
        .ok()?;
    if out.len() < 32 {
        return None;
    }
    let recovered = Address::from_slice(&out[12..32]);
    (recovered != Address::ZERO).then_some(recovered)
}
