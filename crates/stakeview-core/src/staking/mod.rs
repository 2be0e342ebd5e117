//! Stake lifecycle, action guards and transaction sequencing

mod guard;
mod lifecycle;
mod submission;
pub mod types;
mod unstake;

pub use guard::{can_stake, can_unstake};
pub use lifecycle::classify;
pub use submission::StakeSubmission;
pub use types::{StakeStatus, SubmissionPhase};
pub use unstake::UnstakeTracker;

use {
    crate::{
        client::{TxHandle, TxOutcome, WalletClient},
        Result, StakingError,
    },
    tracing::debug,
};

/// Waits for `tx` and turns a revert into [`StakingError::TransactionReverted`].
async fn confirm(client: &dyn WalletClient, tx: &TxHandle) -> Result<u64> {
    match client.await_confirmation(tx).await? {
        TxOutcome::Confirmed { block } => {
            debug!("Transaction {} confirmed in block {}", tx, block);
            Ok(block)
        }
        TxOutcome::Reverted { reason } => Err(StakingError::TransactionReverted(reason)),
    }
}
