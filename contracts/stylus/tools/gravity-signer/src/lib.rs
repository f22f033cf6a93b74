//! Off-chain side of the Gravity bridge: builds the same digests as the contract, signs them
//! with validator keys and provides a mock host for exercising the core without a chain.

pub mod mock;
pub mod signer;
pub mod types;


pub use mock::MockHost;
pub use signer::{recover_signer, sign_digest, sign_for_roster, signer_address};
