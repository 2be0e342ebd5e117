//! Local checks run before a stake or unstake transaction is sent

use {
    crate::{Result, StakingError},
    stakeview_common::{PeriodCatalog, StakeDraft, StakeRecord, TokenAmount, WalletState},
};

/// Returns the parsed amount if the draft can be submitted.
///
/// Checks in order: wallet connected, amount parses and is positive, period
/// exists, amount fits the available balance.
pub fn can_stake(draft: &StakeDraft, wallet: &WalletState, catalog: &PeriodCatalog) -> Result<TokenAmount> {
    if !wallet.is_connected() {
        return Err(StakingError::NotConnected);
    }

    let amount = draft
        .parse_amount()
        .map_err(|e| StakingError::InputInvalid(e.to_string()))?;
    if amount.is_zero() {
        return Err(StakingError::InputInvalid("amount must be greater than zero".into()));
    }

    if !catalog.contains(draft.period_index) {
        return Err(StakingError::InputInvalid(format!(
            "unknown staking period {}",
            draft.period_index
        )));
    }

    if amount > wallet.available_balance {
        return Err(StakingError::InsufficientBalance {
            requested: amount,
            available: wallet.available_balance,
        });
    }

    Ok(amount)
}

/// Only withdrawn stakes are refused here. Lock-up and other rules are left
/// to the contract, whose rejection comes back as a reverted transaction.
pub fn can_unstake(record: &StakeRecord) -> Result<()> {
    if !record.active {
        return Err(StakingError::AlreadyWithdrawn);
    }
    Ok(())
}
