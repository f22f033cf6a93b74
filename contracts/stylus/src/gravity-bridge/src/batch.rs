//! Batch executor: withdrawals out of one token contract, authorized by the current set.

use alloy_primitives::U256;
use gravity_bridge_types::{
    batch_digest, AssetClass, BridgeError, BridgeEvent, BridgeHost, TxBatch, ValidatorSignature,
    Valset,
};
use tracing::debug;

use crate::{
    custody, registry,
    replay::{self, ReplayKey},
    state::BridgeStore,
    verifier,
};

/// Executes `batch` in full or not at all.
///
/// For a fungible token `tx_ids` are amounts and fees are paid in the same token. For a
/// non-fungible token `tx_ids` are token ids and fees are paid in the configured NFT fee token.
pub fn submit_batch<S, H>(
    store: &mut S,
    host: &mut H,
    current: &Valset,
    signatures: &[ValidatorSignature],
    batch: &TxBatch,
) -> Result<BridgeEvent, BridgeError>
where
    S: BridgeStore + ?Sized,
    H: BridgeHost + ?Sized,
{
    let config = store.config();
    registry::check_current(store, &config, current)?;

    if !batch.is_well_formed() {
        return Err(BridgeError::MalformedBatch);
    }
    let fee_total = batch.fee_total().ok_or(BridgeError::MalformedBatch)?;
    if batch.timeout <= U256::from(host.block_number()) {
        return Err(BridgeError::BatchTimedOut);
    }

    replay::check_and_advance(
        store,
        ReplayKey::Batch(batch.token_contract),
        batch.batch_nonce,
        Some(config.max_nonce_jump),
    )?;

    let digest = batch_digest(config.gravity_id, batch);
    verifier::verify_power(&*host, current, digest, signatures, config.power_threshold)?;

    let token = batch.token_contract;
    let class = store
        .asset_class(token)
        .ok_or(BridgeError::UnknownAsset(token))?;
    let fee_token = match class {
        AssetClass::Fungible => token,
        AssetClass::NonFungible => match config.nft_fee_token {
            Some(fee_token) => fee_token,
            None if fee_total.is_zero() => token,
            None => return Err(BridgeError::MalformedBatch),
        },
    };

    for (tx_id, destination) in batch.tx_ids.iter().zip(&batch.destinations) {
        match class {
            AssetClass::Fungible => {
                custody::release_fungible(store, host, token, *destination, *tx_id)?
            }
            AssetClass::NonFungible => {
                custody::release_nft(store, host, token, *destination, *tx_id)?
            }
        }
    }

    let executor = host.caller();
    custody::release_fungible(store, host, fee_token, executor, fee_total)?;
    let event_nonce = custody::next_event_nonce(store, class)?;

    debug!(%token, nonce = %batch.batch_nonce, txs = batch.tx_ids.len(), %event_nonce, "batch executed");
    Ok(BridgeEvent::TransactionBatchExecuted {
        batch_nonce: batch.batch_nonce,
        token,
        event_nonce,
        executor,
    })
}
