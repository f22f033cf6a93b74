//! Validator set registry: genesis and rotation.

use gravity_bridge_types::{
    valset_checkpoint, AssetClass, BridgeConfig, BridgeError, BridgeEvent, BridgeHost,
    ValidatorSignature, Valset,
};
use tracing::{debug, warn};

use crate::{custody, state::BridgeStore, verifier};

/// Shape, order and power rules every accepted set must satisfy. `malformed` is the error to
/// use for a shape failure, which depends on which argument the set came in as.
fn check_acceptable(
    config: &BridgeConfig,
    valset: &Valset,
    malformed: BridgeError,
) -> Result<(), BridgeError> {
    if !valset.is_well_formed() {
        return Err(malformed);
    }
    if config.enforce_canonical_order && !valset.is_canonically_ordered() {
        return Err(BridgeError::NonCanonicalValidatorSet);
    }
    verifier::check_set_power(valset, config.power_threshold)?;
    Ok(())
}

/// Confirms the claimed current set is well formed and is the one the registry holds.
pub fn check_current<S: BridgeStore + ?Sized>(
    store: &S,
    config: &BridgeConfig,
    current: &Valset,
) -> Result<(), BridgeError> {
    if !current.is_well_formed() {
        return Err(BridgeError::MalformedCurrentValidatorSet);
    }
    if valset_checkpoint(config.gravity_id, current) != store.valset_checkpoint() {
        return Err(BridgeError::IncorrectCheckpoint);
    }
    Ok(())
}

/// Installs the genesis set. No signatures are involved; the deployer vouches for it.
pub fn initialize<S: BridgeStore + ?Sized>(
    store: &mut S,
    genesis: &Valset,
) -> Result<BridgeEvent, BridgeError> {
    let config = store.config();
    check_acceptable(&config, genesis, BridgeError::MalformedCurrentValidatorSet)?;

    let checkpoint = valset_checkpoint(config.gravity_id, genesis);
    store.set_valset(checkpoint, genesis.nonce);
    let event_nonce = custody::next_event_nonce(store, AssetClass::Fungible)?;

    debug!(%checkpoint, members = genesis.len(), "genesis validator set installed");
    Ok(BridgeEvent::ValsetUpdated {
        new_valset_nonce: genesis.nonce,
        event_nonce,
        reward_amount: genesis.reward_amount,
        reward_token: genesis.reward_token,
        validators: genesis.validators.clone(),
        powers: genesis.powers.clone(),
        checkpoint,
    })
}

/// Replaces the current set with `new_valset` once the current set has signed its checkpoint.
/// A non-zero reward is paid to the submitter out of custody.
pub fn update_valset<S, H>(
    store: &mut S,
    host: &mut H,
    new_valset: &Valset,
    current: &Valset,
    signatures: &[ValidatorSignature],
) -> Result<BridgeEvent, BridgeError>
where
    S: BridgeStore + ?Sized,
    H: BridgeHost + ?Sized,
{
    let config = store.config();

    if !current.is_well_formed() {
        return Err(BridgeError::MalformedCurrentValidatorSet);
    }
    if !new_valset.is_well_formed() {
        return Err(BridgeError::MalformedNewValidatorSet);
    }
    check_current(store, &config, current)?;

    let current_nonce = store.valset_nonce();
    if new_valset.nonce <= current_nonce
        || new_valset.nonce > current_nonce.saturating_add(config.max_nonce_jump)
    {
        warn!(
            nonce = %new_valset.nonce,
            current = %current_nonce,
            "stale or out-of-range valset nonce"
        );
        return Err(BridgeError::InvalidValsetNonce {
            new: new_valset.nonce,
            current: current_nonce,
        });
    }
    check_acceptable(&config, new_valset, BridgeError::MalformedNewValidatorSet)?;

    let checkpoint = valset_checkpoint(config.gravity_id, new_valset);
    verifier::verify_power(&*host, current, checkpoint, signatures, config.power_threshold)?;

    if !new_valset.reward_amount.is_zero() {
        let relayer = host.caller();
        custody::release_fungible(
            store,
            host,
            new_valset.reward_token,
            relayer,
            new_valset.reward_amount,
        )?;
    }

    store.set_valset(checkpoint, new_valset.nonce);
    let event_nonce = custody::next_event_nonce(store, AssetClass::Fungible)?;

    debug!(nonce = %new_valset.nonce, %checkpoint, %event_nonce, "validator set rotated");
    Ok(BridgeEvent::ValsetUpdated {
        new_valset_nonce: new_valset.nonce,
        event_nonce,
        reward_amount: new_valset.reward_amount,
        reward_token: new_valset.reward_token,
        validators: new_valset.validators.clone(),
        powers: new_valset.powers.clone(),
        checkpoint,
    })
}
