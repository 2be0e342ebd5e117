//! Stake records read from the staking contract and the local stake draft

use {
    super::{amount::TokenAmount, period::StakingPeriod},
    crate::errors::Result,
    serde::{Deserialize, Serialize},
};

/// Snapshot of one entry of `getStakes(address)`.
///
/// `active` goes from `true` to `false` once, when the stake is withdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRecord {
    pub amount: TokenAmount,
    pub period_index: u32,
    /// Unix seconds at which the stake was created.
    pub timestamp_secs: i64,
    pub active: bool,
}

impl StakeRecord {
    pub fn new(amount: TokenAmount, period_index: u32, timestamp_secs: i64) -> Self {
        Self {
            amount,
            period_index,
            timestamp_secs,
            active: true,
        }
    }

    pub fn withdrawn(mut self) -> Self {
        self.active = false;
        self
    }

    /// Seconds since creation; zero if `now` precedes the stake.
    pub fn elapsed_secs(&self, now: i64) -> u64 {
        now.saturating_sub(self.timestamp_secs).max(0) as u64
    }

    pub fn matures_at(&self, period: &StakingPeriod) -> i64 {
        self.timestamp_secs
            .saturating_add(i64::try_from(period.duration_secs).unwrap_or(i64::MAX))
    }
}

/// What the user has typed into the stake form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeDraft {
    pub amount_input: String,
    pub period_index: u32,
}

impl StakeDraft {
    pub fn new(amount_input: impl Into<String>, period_index: u32) -> Self {
        Self {
            amount_input: amount_input.into(),
            period_index,
        }
    }

    pub fn parse_amount(&self) -> Result<TokenAmount> {
        self.amount_input.parse()
    }

    pub fn clear_amount(&mut self) {
        self.amount_input.clear();
    }
}
