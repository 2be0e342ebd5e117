//! Reward estimates shown before and during a stake
//!
//! Estimates are advisory. The staking contract computes the reward that is
//! actually paid when a stake is withdrawn.

mod calculation;

pub use calculation::{effective_apy_bps, project_accrued, project_reward};

use {
    serde::Serialize,
    stakeview_common::{PeriodCatalog, StakeRecord, TokenAmount, BPS_SCALE},
};

/// A period as offered in the stake form, e.g. `"90 Days (15% APY)"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodOption {
    pub index: u32,
    pub days: u64,
    pub multiplier: String,
    pub effective_apy_bps: u64,
    pub label: String,
}

/// Reward math bound to one snapshot of base APY and period catalog.
#[derive(Debug, Clone)]
pub struct RewardProjector {
    base_apy_bps: u32,
    catalog: PeriodCatalog,
}

impl RewardProjector {
    pub fn new(base_apy_bps: u32, catalog: PeriodCatalog) -> Self {
        Self {
            base_apy_bps,
            catalog,
        }
    }

    pub fn base_apy_bps(&self) -> u32 {
        self.base_apy_bps
    }

    pub fn catalog(&self) -> &PeriodCatalog {
        &self.catalog
    }

    pub fn project(&self, amount: TokenAmount, period_index: u32) -> Option<TokenAmount> {
        project_reward(amount, period_index, self.base_apy_bps, &self.catalog)
    }

    pub fn accrued(&self, record: &StakeRecord, now: i64) -> Option<TokenAmount> {
        project_accrued(record, self.base_apy_bps, &self.catalog, now)
    }

    pub fn options(&self) -> Vec<PeriodOption> {
        self.catalog
            .iter()
            .map(|period| {
                let apy = effective_apy_bps(self.base_apy_bps, period);
                PeriodOption {
                    index: period.index,
                    days: period.duration_days(),
                    multiplier: period.multiplier_label(),
                    effective_apy_bps: apy,
                    label: format!("{} Days ({} APY)", period.duration_days(), format_bps(apy)),
                }
            })
            .collect()
    }
}

/// `1500` -> `"15%"`, `1250` -> `"12.5%"`, `1234` -> `"12.34%"`.
pub fn format_bps(bps: u64) -> String {
    let per_cent = BPS_SCALE / 100;
    let whole = bps / per_cent;
    match bps % per_cent {
        0 => format!("{}%", whole),
        rem if rem % 10 == 0 => format!("{}.{}%", whole, rem / 10),
        rem => format!("{}.{:02}%", whole, rem),
    }
}
