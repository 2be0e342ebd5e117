//! View model for the token staking client
//! Projects rewards, classifies stakes and sequences stake/unstake transactions
//! against an external staking contract

pub mod account;
pub mod client;
pub mod notify;
pub mod rewards;
pub mod session;
pub mod staking;

use client::ClientError;
use stakeview_common::TokenAmount;
use thiserror::Error;

pub use account::{AccountView, StakeView};
pub use rewards::{project_reward, RewardProjector};
pub use session::Session;
pub use staking::{can_stake, can_unstake, classify, StakeStatus, StakeSubmission, SubmissionPhase};

/// Errors that can occur in staking operations
#[derive(Error, Debug)]
pub enum StakingError {
    #[error("Invalid input: {0}")]
    InputInvalid(String),

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: TokenAmount,
        available: TokenAmount,
    },

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Stake has already been withdrawn")]
    AlreadyWithdrawn,

    #[error("Transaction rejected by user")]
    TransactionRejectedByUser,

    #[error("Transaction reverted: {0}")]
    TransactionReverted(String),

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StakingError {
    /// Raised by local validation, before anything reaches the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InputInvalid(_)
                | Self::InsufficientBalance { .. }
                | Self::NotConnected
                | Self::AlreadyWithdrawn
                | Self::SubmissionInProgress
        )
    }
}

impl From<ClientError> for StakingError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Rejected => Self::TransactionRejectedByUser,
            ClientError::Reverted(reason) => Self::TransactionReverted(reason),
            ClientError::NotConnected => Self::NotConnected,
            other => Self::Rpc(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StakingError>;
