//! Signature verification and power accounting.

use alloy_primitives::B256;
use gravity_bridge_types::{
    eth_signed_message_hash, BridgeError, BridgeHost, ValidatorSignature, Valset,
};

/// Checks that the members of `roster` who signed `digest` carry at least `threshold` power.
///
/// `signatures[i]` belongs to `roster` member `i`; abstentions are skipped. Power accumulates
/// with 32-bit wraparound and the pass stops as soon as the threshold is reached, so later
/// signatures are never inspected. Returns the counted power.
pub fn verify_power<H: BridgeHost + ?Sized>(
    host: &H,
    roster: &Valset,
    digest: B256,
    signatures: &[ValidatorSignature],
    threshold: u32,
) -> Result<u32, BridgeError> {
    if signatures.len() != roster.len() {
        return Err(BridgeError::MalformedCurrentValidatorSet);
    }

    let signed_hash = eth_signed_message_hash(digest);
    let mut power: u32 = 0;
    for (member, signature) in roster.members().zip(signatures) {
        if signature.is_abstention() {
            continue;
        }
        if !signature.has_recoverable_v()
            || host.recover_signer(signed_hash, signature) != Some(member.address)
        {
            return Err(BridgeError::InvalidSignature);
        }
        power = power.wrapping_add(member.power);
        if power >= threshold {
            return Ok(power);
        }
    }

    meets_threshold(power, threshold)
}

/// Same accumulation rule applied to a set's own powers: a set that could never reach the
/// threshold even with every member signing is refused.
pub fn check_set_power(valset: &Valset, threshold: u32) -> Result<u32, BridgeError> {
    let mut power: u32 = 0;
    for member in valset.members() {
        power = power.wrapping_add(member.power);
        if power >= threshold {
            return Ok(power);
        }
    }
    meets_threshold(power, threshold)
}

/// Final check once every member has been counted. A zero threshold is met by no power at all.
fn meets_threshold(power: u32, threshold: u32) -> Result<u32, BridgeError> {
    if power < threshold {
        Err(BridgeError::InsufficientPower {
            actual: power,
            required: threshold,
        })
    } else {
        Ok(power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};
    use gravity_bridge_types::Validator;

    /// Treats `r` as the signer address so tests can forge recoveries without curve math.
    struct EchoRecovery;

    impl BridgeHost for EchoRecovery {
        fn block_number(&self) -> u64 {
            0
        }

        fn caller(&self) -> Address {
            Address::ZERO
        }

        fn recover_signer(&self, _hash: B256, signature: &ValidatorSignature) -> Option<Address> {
            Some(Address::from_slice(&signature.r[12..]))
        }
    }

    fn roster(powers: &[u32]) -> Valset {
        Valset::new(
            powers.iter().enumerate().map(|(i, power)| Validator {
                address: Address::with_last_byte(i as u8 + 1),
                power: *power,
            }),
            U256::ZERO,
        )
    }

    fn signed_by(address: Address) -> ValidatorSignature {
        ValidatorSignature::new(27, address.into_word(), B256::ZERO)
    }

    fn all_signed(set: &Valset) -> Vec<ValidatorSignature> {
        set.validators.iter().map(|a| signed_by(*a)).collect()
    }

    #[test]
    fn counts_power_until_threshold() {
        let set = roster(&[60, 30, 10]);
        let sigs = all_signed(&set);
        assert_eq!(verify_power(&EchoRecovery, &set, B256::ZERO, &sigs, 90), Ok(90));
    }

    #[test]
    fn abstentions_are_skipped() {
        let set = roster(&[60, 30, 10]);
        let mut sigs = all_signed(&set);
        sigs[1] = ValidatorSignature::ABSTAIN;
        assert_eq!(
            verify_power(&EchoRecovery, &set, B256::ZERO, &sigs, 90),
            Err(BridgeError::InsufficientPower {
                actual: 70,
                required: 90
            })
        );
    }

    #[test]
    fn zero_threshold_passes_with_everyone_abstaining() {
        let set = roster(&[60, 30, 10]);
        let sigs = vec![ValidatorSignature::ABSTAIN; 3];
        assert_eq!(verify_power(&EchoRecovery, &set, B256::ZERO, &sigs, 0), Ok(0));
        assert_eq!(check_set_power(&roster(&[]), 0), Ok(0));
    }

    #[test]
    fn abstaining_never_raises_invalid_signature() {
        let set = roster(&[40, 30, 20, 10]);
        let valid = all_signed(&set);
        for mask in 0u8..16 {
            let sigs: Vec<_> = valid
                .iter()
                .enumerate()
                .map(|(i, sig)| {
                    if mask & (1 << i) != 0 {
                        ValidatorSignature::ABSTAIN
                    } else {
                        *sig
                    }
                })
                .collect();
            let result = verify_power(&EchoRecovery, &set, B256::ZERO, &sigs, 101);
            assert!(matches!(result, Err(BridgeError::InsufficientPower { .. })));
        }
    }

    #[test]
    fn signature_from_wrong_member_is_rejected() {
        let set = roster(&[60, 30, 10]);
        let mut sigs = all_signed(&set);
        sigs[1] = sigs[0];
        assert_eq!(
            verify_power(&EchoRecovery, &set, B256::ZERO, &sigs, 100),
            Err(BridgeError::InvalidSignature)
        );
    }

    #[test]
    fn non_ethereum_v_is_rejected() {
        let set = roster(&[60, 30, 10]);
        let mut sigs = all_signed(&set);
        sigs[0].v = 1;
        assert_eq!(
            verify_power(&EchoRecovery, &set, B256::ZERO, &sigs, 100),
            Err(BridgeError::InvalidSignature)
        );
    }

    #[test]
    fn signatures_past_threshold_are_not_inspected() {
        let set = roster(&[60, 30, 10]);
        let mut sigs = all_signed(&set);
        sigs[2] = signed_by(Address::repeat_byte(0xee));
        assert_eq!(verify_power(&EchoRecovery, &set, B256::ZERO, &sigs, 90), Ok(90));
    }

    #[test]
    fn signature_count_must_match_roster() {
        let set = roster(&[60, 30, 10]);
        let mut sigs = all_signed(&set);
        sigs.pop();
        assert_eq!(
            verify_power(&EchoRecovery, &set, B256::ZERO, &sigs, 90),
            Err(BridgeError::MalformedCurrentValidatorSet)
        );
    }

    #[test]
    fn accumulation_wraps_at_32_bits() {
        let set = roster(&[u32::MAX, 2]);
        assert_eq!(
            check_set_power(&set, u32::MAX - 1),
            Ok(u32::MAX)
        );
        let wrapped = roster(&[u32::MAX - 10, 20]);
        assert_eq!(
            check_set_power(&wrapped, u32::MAX),
            Err(BridgeError::InsufficientPower {
                actual: 9,
                required: u32::MAX
            })
        );
    }
}
