mod common;

use alloy_primitives::{Address, U256};
use common::*;
use gravity_bridge::{Bridge, BridgeStore};
use gravity_bridge_types::{
    valset_checkpoint, BridgeError, BridgeEvent, ValidatorSignature, Valset, POWER_THRESHOLD,
    TWO_THIRDS_POWER_THRESHOLD,
};

/// The next set: same validators, three units of power moved from the first to the second.
fn next_signers(h: &Harness) -> Signers {
    h.signers.with_powers(|i, power| match i {
        0 => power - 3,
        1 => power + 3,
        _ => power,
    })
}

fn rotation(h: &Harness, nonce: u64) -> (Valset, Vec<ValidatorSignature>) {
    let new_valset = next_signers(h).valset(nonce);
    let sigs = h.signers.sign(valset_checkpoint(gravity_id(), &new_valset));
    (new_valset, sigs)
}

#[test]
fn rotates_to_a_new_set() {
    let mut h = Harness::deploy(config());
    let (new_valset, sigs) = rotation(&h, 1);

    let event = h
        .bridge
        .update_valset(&mut h.host, &new_valset, &h.current.clone(), &sigs)
        .unwrap();

    let checkpoint = valset_checkpoint(gravity_id(), &new_valset);
    assert_eq!(h.bridge.state().valset_checkpoint(), checkpoint);
    assert_eq!(h.bridge.state().valset_nonce(), U256::from(1));
    assert_eq!(
        event,
        BridgeEvent::ValsetUpdated {
            new_valset_nonce: U256::from(1),
            event_nonce: U256::from(2),
            reward_amount: U256::ZERO,
            reward_token: Address::ZERO,
            validators: new_valset.validators.clone(),
            powers: new_valset.powers.clone(),
            checkpoint,
        }
    );
    assert_eq!(h.bridge.events().len(), 2);
}

#[test]
fn new_set_signs_the_following_rotation() {
    let mut h = Harness::deploy(config());
    let (first, sigs) = rotation(&h, 1);
    let current = h.current.clone();
    h.bridge
        .update_valset(&mut h.host, &first, &current, &sigs)
        .unwrap();

    let next = next_signers(&h);
    let second = Signers::new(&EXAMPLE_POWERS, 1000).valset(2);
    let digest = valset_checkpoint(gravity_id(), &second);

    // The retired set no longer matches the stored checkpoint.
    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &second, &current, &h.signers.sign(digest)),
        Err(BridgeError::IncorrectCheckpoint)
    );
    h.bridge
        .update_valset(&mut h.host, &second, &first, &next.sign(digest))
        .unwrap();
    assert_eq!(h.bridge.state().valset_nonce(), U256::from(2));
}

#[test]
fn malformed_new_set_is_refused() {
    let mut h = Harness::deploy(config());
    let (mut new_valset, sigs) = rotation(&h, 1);
    new_valset.powers.pop();

    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &new_valset, &h.current.clone(), &sigs),
        Err(BridgeError::MalformedNewValidatorSet)
    );
}

#[test]
fn empty_new_set_is_refused() {
    let mut h = Harness::deploy(config());
    let (_, sigs) = rotation(&h, 1);
    let empty = Valset {
        nonce: U256::from(1),
        ..Valset::default()
    };

    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &empty, &h.current.clone(), &sigs),
        Err(BridgeError::MalformedNewValidatorSet)
    );
}

#[test]
fn malformed_current_set_is_refused() {
    let mut h = Harness::deploy(config());
    let (new_valset, sigs) = rotation(&h, 1);
    let mut current = h.current.clone();
    current.powers.pop();

    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &new_valset, &current, &sigs),
        Err(BridgeError::MalformedCurrentValidatorSet)
    );
}

#[test]
fn current_set_must_match_checkpoint() {
    let mut h = Harness::deploy(config());
    let (new_valset, sigs) = rotation(&h, 1);
    let mut current = h.current.clone();
    current.powers[0] += 1;

    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &new_valset, &current, &sigs),
        Err(BridgeError::IncorrectCheckpoint)
    );
}

#[test]
fn nonce_must_increase() {
    let mut h = Harness::deploy(config());
    let (new_valset, sigs) = rotation(&h, 0);

    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &new_valset, &h.current.clone(), &sigs),
        Err(BridgeError::InvalidValsetNonce {
            new: U256::ZERO,
            current: U256::ZERO
        })
    );
}

#[test]
fn resubmitting_an_applied_rotation_is_refused() {
    let mut h = Harness::deploy(config());
    let (new_valset, sigs) = rotation(&h, 1);
    let current = h.current.clone();
    h.bridge
        .update_valset(&mut h.host, &new_valset, &current, &sigs)
        .unwrap();

    // A second relayer racing with the same rotation now presents a stale current set.
    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &new_valset, &current, &sigs),
        Err(BridgeError::IncorrectCheckpoint)
    );
    // Presenting the applied set as current exposes the unchanged nonce.
    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &new_valset, &new_valset, &sigs),
        Err(BridgeError::InvalidValsetNonce {
            new: U256::from(1),
            current: U256::from(1)
        })
    );
}

#[test]
fn nonce_may_not_jump_too_far() {
    let mut h = Harness::deploy(config());
    let (new_valset, sigs) = rotation(&h, 1_000_001);

    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &new_valset, &h.current.clone(), &sigs),
        Err(BridgeError::InvalidValsetNonce {
            new: U256::from(1_000_001),
            current: U256::ZERO
        })
    );
}

#[test]
fn signature_from_wrong_validator_is_refused() {
    let mut h = Harness::deploy(config());
    let (new_valset, mut sigs) = rotation(&h, 1);
    sigs[1] = sigs[0];

    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &new_valset, &h.current.clone(), &sigs),
        Err(BridgeError::InvalidSignature)
    );
}

#[test]
fn zeroed_signature_is_an_abstention() {
    let mut h = Harness::deploy(config());
    let new_valset = next_signers(&h).valset(1);
    let sigs = h
        .signers
        .sign_except(valset_checkpoint(gravity_id(), &new_valset), &[3]);

    h.bridge
        .update_valset(&mut h.host, &new_valset, &h.current.clone(), &sigs)
        .unwrap();
}

#[test]
fn not_enough_signatures_under_two_thirds() {
    let mut h = Harness::deploy(two_thirds_config());
    let new_valset = next_signers(&h).valset(1);
    let digest = valset_checkpoint(gravity_id(), &new_valset);
    let current = h.current.clone();

    assert_eq!(
        h.bridge.update_valset(
            &mut h.host,
            &new_valset,
            &current,
            &h.signers.sign_except(digest, &NOT_ENOUGH)
        ),
        Err(BridgeError::InsufficientPower {
            actual: 2_807_621_889,
            required: TWO_THIRDS_POWER_THRESHOLD
        })
    );
    h.bridge
        .update_valset(
            &mut h.host,
            &new_valset,
            &current,
            &h.signers.sign_except(digest, &BARELY_ENOUGH),
        )
        .unwrap();
}

#[test]
fn not_enough_signatures_under_default_threshold() {
    let mut h = Harness::deploy(config());
    let new_valset = next_signers(&h).valset(1);
    let digest = valset_checkpoint(gravity_id(), &new_valset);

    assert_eq!(
        h.bridge.update_valset(
            &mut h.host,
            &new_valset,
            &h.current.clone(),
            &h.signers.sign_except(digest, &NOT_ENOUGH)
        ),
        Err(BridgeError::InsufficientPower {
            actual: 2_807_621_889,
            required: POWER_THRESHOLD
        })
    );
}

#[test]
fn new_set_must_be_able_to_pass_a_vote() {
    let mut h = Harness::deploy(two_thirds_config());
    let weak = h.signers.with_powers(|_, _| 5).valset(1);
    let sigs = h.signers.sign(valset_checkpoint(gravity_id(), &weak));

    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &weak, &h.current.clone(), &sigs),
        Err(BridgeError::InsufficientPower {
            actual: 625,
            required: TWO_THIRDS_POWER_THRESHOLD
        })
    );
}

#[test]
fn two_member_set_lacks_power() {
    let mut h = Harness::deploy(config());
    let small = Signers::new(&EXAMPLE_POWERS[..2], 500).valset(1);
    let sigs = h.signers.sign(valset_checkpoint(gravity_id(), &small));

    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &small, &h.current.clone(), &sigs),
        Err(BridgeError::InsufficientPower {
            actual: 570_372_016,
            required: 2_834_678_415
        })
    );
}

#[test]
fn new_set_must_be_canonically_ordered() {
    let mut h = Harness::deploy(config());
    let mut new_valset = next_signers(&h).valset(1);
    new_valset.validators.swap(0, 1);
    new_valset.powers.swap(0, 1);
    let sigs = h.signers.sign(valset_checkpoint(gravity_id(), &new_valset));

    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &new_valset, &h.current.clone(), &sigs),
        Err(BridgeError::NonCanonicalValidatorSet)
    );
}

#[test]
fn signature_count_must_match_current_set() {
    let mut h = Harness::deploy(config());
    let (new_valset, mut sigs) = rotation(&h, 1);
    sigs.pop();

    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &new_valset, &h.current.clone(), &sigs),
        Err(BridgeError::MalformedCurrentValidatorSet)
    );
}

#[test]
fn reward_is_paid_to_the_relayer() {
    let mut h = Harness::deploy(config());
    h.fund(TOKEN, 1_000);

    let new_valset = next_signers(&h)
        .valset(1)
        .with_reward(U256::from(100), TOKEN);
    let sigs = h.signers.sign(valset_checkpoint(gravity_id(), &new_valset));
    let event = h
        .bridge
        .update_valset(&mut h.host, &new_valset, &h.current.clone(), &sigs)
        .unwrap();

    assert_eq!(h.balance(TOKEN, RELAYER), U256::from(100));
    assert_eq!(h.balance(TOKEN, BRIDGE), U256::from(900));
    assert_eq!(h.bridge.state().custody_balance(TOKEN), U256::from(900));
    assert!(matches!(
        event,
        BridgeEvent::ValsetUpdated { reward_amount, reward_token, .. }
            if reward_amount == U256::from(100) && reward_token == TOKEN
    ));
}

#[test]
fn reward_in_unknown_token_aborts_rotation() {
    let mut h = Harness::deploy(config());
    let unknown = Address::repeat_byte(0x99);
    let new_valset = next_signers(&h)
        .valset(1)
        .with_reward(U256::from(100), unknown);
    let sigs = h.signers.sign(valset_checkpoint(gravity_id(), &new_valset));

    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &new_valset, &h.current.clone(), &sigs),
        Err(BridgeError::UnknownAsset(unknown))
    );
    assert_eq!(h.bridge.state().valset_nonce(), U256::ZERO);
    assert_eq!(
        h.bridge.state().valset_checkpoint(),
        valset_checkpoint(gravity_id(), &h.current)
    );
}

#[test]
fn reward_beyond_reserves_aborts_rotation() {
    let mut h = Harness::deploy(config());
    h.fund(TOKEN, 50);
    let new_valset = next_signers(&h)
        .valset(1)
        .with_reward(U256::from(100), TOKEN);
    let sigs = h.signers.sign(valset_checkpoint(gravity_id(), &new_valset));

    assert_eq!(
        h.bridge
            .update_valset(&mut h.host, &new_valset, &h.current.clone(), &sigs),
        Err(BridgeError::InsufficientReserves {
            token: TOKEN,
            available: U256::from(50),
            required: U256::from(100)
        })
    );
    assert_eq!(h.balance(TOKEN, RELAYER), U256::ZERO);
    assert_eq!(h.bridge.state().valset_nonce(), U256::ZERO);
}

#[test]
fn genesis_must_be_well_formed() {
    let signers = Signers::example();

    let mut malformed = signers.valset(0);
    malformed.powers.pop();
    assert_eq!(
        Bridge::initialize(config(), &malformed).err(),
        Some(BridgeError::MalformedCurrentValidatorSet)
    );
    assert_eq!(
        Bridge::initialize(config(), &Valset::default()).err(),
        Some(BridgeError::MalformedCurrentValidatorSet)
    );
}

#[test]
fn genesis_must_carry_enough_power() {
    let small = Signers::new(&EXAMPLE_POWERS[..2], 1).valset(0);
    assert_eq!(
        Bridge::initialize(two_thirds_config(), &small).err(),
        Some(BridgeError::InsufficientPower {
            actual: 570_372_016,
            required: TWO_THIRDS_POWER_THRESHOLD
        })
    );
}

#[test]
fn genesis_must_be_canonically_ordered() {
    let mut genesis = Signers::example().valset(0);
    genesis.validators.reverse();
    genesis.powers.reverse();
    assert_eq!(
        Bridge::initialize(config(), &genesis).err(),
        Some(BridgeError::NonCanonicalValidatorSet)
    );
}
