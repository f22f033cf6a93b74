//! Asset custody: lock-in on deposit, release on authorized withdrawal, and the per-class
//! event counters observed by the origin chain.

use alloc::string::String;

use alloy_primitives::{Address, U256};
use gravity_bridge_types::{AssetClass, BridgeError, BridgeEvent, BridgeHost};
use tracing::debug;

use crate::state::BridgeStore;

/// Advances and returns the event nonce for `class`.
pub fn next_event_nonce<S: BridgeStore + ?Sized>(
    store: &mut S,
    class: AssetClass,
) -> Result<U256, BridgeError> {
    let nonce = store
        .event_nonce(class)
        .checked_add(U256::from(1))
        .ok_or(BridgeError::EventNonceOverflow)?;
    store.set_event_nonce(class, nonce);
    Ok(nonce)
}

fn ensure_class<S: BridgeStore + ?Sized>(
    store: &S,
    token: Address,
    class: AssetClass,
) -> Result<(), BridgeError> {
    match store.asset_class(token) {
        Some(found) if found == class => Ok(()),
        Some(_) => Err(BridgeError::AssetClassMismatch(token)),
        None => Err(BridgeError::UnknownAsset(token)),
    }
}

fn register_or_check<S: BridgeStore + ?Sized>(
    store: &mut S,
    token: Address,
    class: AssetClass,
) -> Result<(), BridgeError> {
    match store.asset_class(token) {
        None => {
            store.register_asset(token, class);
            Ok(())
        }
        Some(_) => ensure_class(store, token, class),
    }
}

/// `sendToCosmos`: takes `amount` of a fungible token from the caller into custody.
pub fn lock_fungible<S, H>(
    store: &mut S,
    host: &mut H,
    token: Address,
    destination: String,
    amount: U256,
) -> Result<BridgeEvent, BridgeError>
where
    S: BridgeStore + ?Sized,
    H: BridgeHost + ?Sized,
{
    register_or_check(store, token, AssetClass::Fungible)?;
    let sender = host.caller();
    let received = host.pull_fungible(token, sender, amount)?;

    let balance = store.custody_balance(token).saturating_add(received);
    store.set_custody_balance(token, balance);
    let event_nonce = next_event_nonce(store, AssetClass::Fungible)?;

    debug!(%token, %sender, %received, %event_nonce, "locked fungible deposit");
    Ok(BridgeEvent::SendToCosmos {
        token,
        sender,
        destination,
        amount: received,
        event_nonce,
    })
}

/// `sendERC721ToCosmos`: takes one NFT from the caller into custody.
pub fn lock_nft<S, H>(
    store: &mut S,
    host: &mut H,
    token: Address,
    destination: String,
    token_id: U256,
) -> Result<BridgeEvent, BridgeError>
where
    S: BridgeStore + ?Sized,
    H: BridgeHost + ?Sized,
{
    register_or_check(store, token, AssetClass::NonFungible)?;
    let sender = host.caller();
    host.pull_nft(token, sender, token_id)?;

    store.set_holds_nft(token, token_id, true);
    let event_nonce = next_event_nonce(store, AssetClass::NonFungible)?;

    debug!(%token, %sender, %token_id, %event_nonce, "locked nft deposit");
    Ok(BridgeEvent::SendErc721ToCosmos {
        token,
        sender,
        destination,
        token_id,
        event_nonce,
    })
}

/// Registers a Cosmos-originated token whose supply was minted to the bridge. Whatever the
/// bridge already holds of it becomes custody, so withdrawals are paid out of that supply.
pub fn register_erc20<S, H>(
    store: &mut S,
    host: &mut H,
    token: Address,
    cosmos_denom: String,
    name: String,
    symbol: String,
    decimals: u8,
) -> Result<BridgeEvent, BridgeError>
where
    S: BridgeStore + ?Sized,
    H: BridgeHost + ?Sized,
{
    if store.asset_class(token).is_some() {
        return Err(BridgeError::AssetAlreadyRegistered(token));
    }
    let supply = host.bridge_balance(token)?;
    store.register_asset(token, AssetClass::Fungible);
    store.set_custody_balance(token, supply);
    let event_nonce = next_event_nonce(store, AssetClass::Fungible)?;

    debug!(%token, %cosmos_denom, %supply, %event_nonce, "registered cosmos-originated token");
    Ok(BridgeEvent::Erc20Deployed {
        cosmos_denom,
        token,
        name,
        symbol,
        decimals,
        event_nonce,
    })
}

/// Debits custody and pays `amount` of `token` to `to`. Zero amounts are a no-op.
pub fn release_fungible<S, H>(
    store: &mut S,
    host: &mut H,
    token: Address,
    to: Address,
    amount: U256,
) -> Result<(), BridgeError>
where
    S: BridgeStore + ?Sized,
    H: BridgeHost + ?Sized,
{
    if amount.is_zero() {
        return Ok(());
    }
    ensure_class(store, token, AssetClass::Fungible)?;
    let available = store.custody_balance(token);
    let remaining = available
        .checked_sub(amount)
        .ok_or(BridgeError::InsufficientReserves {
            token,
            available,
            required: amount,
        })?;
    store.set_custody_balance(token, remaining);
    host.push_fungible(token, to, amount)?;
    Ok(())
}

/// Removes `token_id` from custody and hands it to `to`.
pub fn release_nft<S, H>(
    store: &mut S,
    host: &mut H,
    token: Address,
    to: Address,
    token_id: U256,
) -> Result<(), BridgeError>
where
    S: BridgeStore + ?Sized,
    H: BridgeHost + ?Sized,
{
    ensure_class(store, token, AssetClass::NonFungible)?;
    if !store.holds_nft(token, token_id) {
        return Err(BridgeError::NftNotInCustody { token, token_id });
    }
    store.set_holds_nft(token, token_id, false);
    host.push_nft(token, to, token_id)?;
    Ok(())
}
