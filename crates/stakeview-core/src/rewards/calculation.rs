//! Linear pro-rated reward math
//!
//! `reward = amount * apy_bps / 10_000 * multiplier / 100 * secs / SECONDS_PER_YEAR`,
//! computed as a single floored integer division over base units.

use stakeview_common::{
    PeriodCatalog, StakeRecord, StakingPeriod, TokenAmount, BPS_SCALE, MULTIPLIER_SCALE,
    SECONDS_PER_YEAR, U256,
};

/// Estimated reward for staking `amount` for the full period at
/// `period_index`. `None` when the period is not in the catalog.
pub fn project_reward(
    amount: TokenAmount,
    period_index: u32,
    base_apy_bps: u32,
    catalog: &PeriodCatalog,
) -> Option<TokenAmount> {
    let period = catalog.get(period_index)?;
    reward_for(amount, period, base_apy_bps, period.duration_secs)
}

/// Estimated reward accrued so far by an active stake. Elapsed time counts
/// up to the period duration. `None` for withdrawn stakes or unknown periods.
pub fn project_accrued(
    record: &StakeRecord,
    base_apy_bps: u32,
    catalog: &PeriodCatalog,
    now: i64,
) -> Option<TokenAmount> {
    if !record.active {
        return None;
    }
    let period = catalog.get(record.period_index)?;
    let elapsed = record.elapsed_secs(now).min(period.duration_secs);
    reward_for(record.amount, period, base_apy_bps, elapsed)
}

/// Base APY scaled by the period multiplier, in basis points.
pub fn effective_apy_bps(base_apy_bps: u32, period: &StakingPeriod) -> u64 {
    u64::from(base_apy_bps) * u64::from(period.reward_multiplier) / MULTIPLIER_SCALE
}

fn reward_for(
    amount: TokenAmount,
    period: &StakingPeriod,
    base_apy_bps: u32,
    accrual_secs: u64,
) -> Option<TokenAmount> {
    let numerator =
        U256::from(base_apy_bps) * U256::from(period.reward_multiplier) * U256::from(accrual_secs);
    let denominator =
        U256::from(BPS_SCALE) * U256::from(MULTIPLIER_SCALE) * U256::from(SECONDS_PER_YEAR);
    amount.checked_mul_div(numerator, denominator)
}
