//! Solidity ABI surface: token interfaces the bridge calls and the events it emits.

pub mod events;
pub mod tokens;
