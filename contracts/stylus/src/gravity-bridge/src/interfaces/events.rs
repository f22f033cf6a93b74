//! Events watched by the orchestrators on the origin chain.

use alloc::vec::Vec;

use stylus_sdk::{
    alloy_primitives::U256,
    alloy_sol_types::sol,
};

use gravity_bridge_types::BridgeEvent;

sol! {
    event ValsetUpdatedEvent(
        uint256 indexed newValsetNonce,
        uint256 eventNonce,
        uint256 rewardAmount,
        address rewardToken,
        address[] validators,
        uint256[] powers,
        bytes32 checkpoint
    );
    event TransactionBatchExecutedEvent(
        uint256 indexed batchNonce,
        address indexed token,
        uint256 eventNonce,
        address executor
    );
    event LogicCallEvent(
        bytes32 invalidationId,
        uint256 invalidationNonce,
        bytes returnData,
        uint256 eventNonce,
        address executor
    );
    event SendToCosmosEvent(
        address indexed tokenContract,
        address indexed sender,
        string destination,
        uint256 amount,
        uint256 eventNonce
    );
    event SendERC721ToCosmosEvent(
        address indexed tokenContract,
        address indexed sender,
        string destination,
        uint256 tokenId,
        uint256 eventNonce
    );
    event ERC20DeployedEvent(
        string cosmosDenom,
        address indexed tokenContract,
        string name,
        string symbol,
        uint8 decimals,
        uint256 eventNonce
    );
}

/// A bridge event in its Solidity form, ready to be logged.
pub enum SolBridgeEvent {
    ValsetUpdated(ValsetUpdatedEvent),
    TransactionBatchExecuted(TransactionBatchExecutedEvent),
    LogicCall(LogicCallEvent),
    SendToCosmos(SendToCosmosEvent),
    SendErc721ToCosmos(SendERC721ToCosmosEvent),
    Erc20Deployed(ERC20DeployedEvent),
}

impl From<BridgeEvent> for SolBridgeEvent {
    fn from(event: BridgeEvent) -> Self {
        match event {
            BridgeEvent::ValsetUpdated {
                new_valset_nonce,
                event_nonce,
                reward_amount,
                reward_token,
                validators,
                powers,
                checkpoint,
            } => SolBridgeEvent::ValsetUpdated(ValsetUpdatedEvent {
                newValsetNonce: new_valset_nonce,
                eventNonce: event_nonce,
                rewardAmount: reward_amount,
                rewardToken: reward_token,
                validators,
                powers: powers.into_iter().map(U256::from).collect::<Vec<_>>(),
                checkpoint,
            }),
            BridgeEvent::TransactionBatchExecuted {
                batch_nonce,
                token,
                event_nonce,
                executor,
            } => SolBridgeEvent::TransactionBatchExecuted(TransactionBatchExecutedEvent {
                batchNonce: batch_nonce,
                token,
                eventNonce: event_nonce,
                executor,
            }),
            BridgeEvent::LogicCallExecuted {
                invalidation_id,
                invalidation_nonce,
                return_data,
                event_nonce,
                executor,
            } => SolBridgeEvent::LogicCall(LogicCallEvent {
                invalidationId: invalidation_id,
                invalidationNonce: invalidation_nonce,
                returnData: return_data,
                eventNonce: event_nonce,
                executor,
            }),
            BridgeEvent::SendToCosmos {
                token,
                sender,
                destination,
                amount,
                event_nonce,
            } => SolBridgeEvent::SendToCosmos(SendToCosmosEvent {
                tokenContract: token,
                sender,
                destination,
                amount,
                eventNonce: event_nonce,
            }),
            BridgeEvent::SendErc721ToCosmos {
                token,
                sender,
                destination,
                token_id,
                event_nonce,
            } => SolBridgeEvent::SendErc721ToCosmos(SendERC721ToCosmosEvent {
                tokenContract: token,
                sender,
                destination,
                tokenId: token_id,
                eventNonce: event_nonce,
            }),
            BridgeEvent::Erc20Deployed {
                cosmos_denom,
                token,
                name,
                symbol,
                decimals,
                event_nonce,
            } => SolBridgeEvent::Erc20Deployed(ERC20DeployedEvent {
                cosmosDenom: cosmos_denom,
                tokenContract: token,
                name,
                symbol,
                decimals,
                eventNonce: event_nonce,
            }),
        }
    }
}
