//! Logic call executor: one delegated call with attached transfers, replay-protected per
//! invalidation id.

use alloy_primitives::U256;
use gravity_bridge_types::{
    logic_call_digest, AssetClass, BridgeError, BridgeEvent, BridgeHost, LogicCall,
    ValidatorSignature, Valset,
};
use tracing::debug;

use crate::{
    custody, registry,
    replay::{self, ReplayKey},
    state::BridgeStore,
    verifier,
};

/// Transfers the call's assets to the logic contract, runs it, then pays the submitter's fees.
/// A failing logic contract aborts the whole submission.
pub fn submit_logic_call<S, H>(
    store: &mut S,
    host: &mut H,
    current: &Valset,
    signatures: &[ValidatorSignature],
    call: &LogicCall,
) -> Result<BridgeEvent, BridgeError>
where
    S: BridgeStore + ?Sized,
    H: BridgeHost + ?Sized,
{
    let config = store.config();
    registry::check_current(store, &config, current)?;

    if call.transfer_amounts.len() != call.transfer_token_contracts.len() {
        return Err(BridgeError::InvalidLogicCallTransfers);
    }
    if call.fee_amounts.len() != call.fee_token_contracts.len() {
        return Err(BridgeError::InvalidLogicCallFees);
    }
    if call.timeout <= U256::from(host.block_number()) {
        return Err(BridgeError::LogicCallTimedOut);
    }

    replay::check_and_advance(
        store,
        ReplayKey::LogicCall(call.invalidation_id),
        call.invalidation_nonce,
        None,
    )?;

    let digest = logic_call_digest(config.gravity_id, call);
    verifier::verify_power(&*host, current, digest, signatures, config.power_threshold)?;

    let target = call.logic_contract_address;
    for (token, amount) in call.transfers() {
        custody::release_fungible(store, host, token, target, amount)?;
    }

    let return_data = host.execute(&call.capability())?;

    let executor = host.caller();
    for (token, amount) in call.fees() {
        custody::release_fungible(store, host, token, executor, amount)?;
    }
    let event_nonce = custody::next_event_nonce(store, AssetClass::Fungible)?;

    debug!(
        invalidation_id = %call.invalidation_id,
        nonce = %call.invalidation_nonce,
        %event_nonce,
        "logic call executed"
    );
    Ok(BridgeEvent::LogicCallExecuted {
        invalidation_id: call.invalidation_id,
        invalidation_nonce: call.invalidation_nonce,
        return_data,
        event_nonce,
        executor,
    })
}
