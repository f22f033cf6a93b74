//! Replay guard: per-key monotonic nonces.

use alloy_primitives::{Address, B256, U256};
use gravity_bridge_types::BridgeError;
use tracing::warn;

use crate::state::BridgeStore;

/// Partition a nonce belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayKey {
    /// One outstanding batch nonce per token contract.
    Batch(Address),
    /// Caller-chosen stream of logic calls.
    LogicCall(B256),
}

impl ReplayKey {
    fn last_used<S: BridgeStore + ?Sized>(&self, store: &S) -> U256 {
        match self {
            ReplayKey::Batch(token) => store.last_batch_nonce(*token),
            ReplayKey::LogicCall(id) => store.last_logic_call_nonce(*id),
        }
    }

    fn advance<S: BridgeStore + ?Sized>(&self, store: &mut S, nonce: U256) {
        match self {
            ReplayKey::Batch(token) => store.set_last_batch_nonce(*token, nonce),
            ReplayKey::LogicCall(id) => store.set_last_logic_call_nonce(*id, nonce),
        }
    }

    fn rejection(&self, new: U256, current: U256) -> BridgeError {
        match self {
            ReplayKey::Batch(_) => BridgeError::InvalidBatchNonce { new, current },
            ReplayKey::LogicCall(_) => BridgeError::InvalidLogicCallNonce { new, current },
        }
    }
}

/// Accepts `nonce` only if it is strictly above the last one used for `key` (and, when
/// `max_jump` is given, not further ahead than that), then records it.
pub fn check_and_advance<S: BridgeStore + ?Sized>(
    store: &mut S,
    key: ReplayKey,
    nonce: U256,
    max_jump: Option<U256>,
) -> Result<(), BridgeError> {
    let current = key.last_used(store);
    let too_far = max_jump.is_some_and(|jump| nonce > current.saturating_add(jump));
    if nonce <= current || too_far {
        // Also where a relayer that lost the race to submit ends up.
        warn!(?key, %nonce, %current, "stale or out-of-range nonce");
        return Err(key.rejection(nonce, current));
    }
    key.advance(store, nonce);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::BridgeState, testing::logged_levels};
    use gravity_bridge_types::BridgeConfig;
    use tracing::Level;

    fn store() -> BridgeState {
        BridgeState::new(BridgeConfig::default())
    }

    #[test]
    fn nonce_must_strictly_increase() {
        let mut s = store();
        let key = ReplayKey::Batch(Address::repeat_byte(1));

        assert_eq!(
            check_and_advance(&mut s, key, U256::ZERO, None),
            Err(BridgeError::InvalidBatchNonce {
                new: U256::ZERO,
                current: U256::ZERO
            })
        );
        check_and_advance(&mut s, key, U256::from(5), None).unwrap();
        for stale in [0u64, 4, 5] {
            assert_eq!(
                check_and_advance(&mut s, key, U256::from(stale), None),
                Err(BridgeError::InvalidBatchNonce {
                    new: U256::from(stale),
                    current: U256::from(5)
                })
            );
        }
        check_and_advance(&mut s, key, U256::from(6), None).unwrap();
        assert_eq!(s.last_batch_nonce(Address::repeat_byte(1)), U256::from(6));
    }

    #[test]
    fn keys_are_independent() {
        let mut s = store();
        let a = ReplayKey::LogicCall(B256::repeat_byte(1));
        let b = ReplayKey::LogicCall(B256::repeat_byte(2));

        check_and_advance(&mut s, a, U256::from(3), None).unwrap();
        check_and_advance(&mut s, b, U256::from(1), None).unwrap();
        assert_eq!(
            check_and_advance(&mut s, a, U256::from(1), None),
            Err(BridgeError::InvalidLogicCallNonce {
                new: U256::from(1),
                current: U256::from(3)
            })
        );
        assert_eq!(s.last_batch_nonce(Address::ZERO), U256::ZERO);
    }

    #[test]
    fn lost_race_is_logged_as_a_warning() {
        let mut s = store();
        let key = ReplayKey::Batch(Address::repeat_byte(1));
        check_and_advance(&mut s, key, U256::from(2), None).unwrap();

        let (result, levels) =
            logged_levels(|| check_and_advance(&mut s, key, U256::from(2), None));
        assert!(result.is_err());
        assert_eq!(levels, vec![Level::WARN]);
    }

    #[test]
    fn jump_bound_is_inclusive() {
        let mut s = store();
        let key = ReplayKey::Batch(Address::repeat_byte(7));
        let jump = Some(U256::from(10));

        assert!(check_and_advance(&mut s, key, U256::from(11), jump).is_err());
        check_and_advance(&mut s, key, U256::from(10), jump).unwrap();
        check_and_advance(&mut s, key, U256::from(20), jump).unwrap();
    }
}
