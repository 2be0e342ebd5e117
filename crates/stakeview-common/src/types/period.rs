//! Staking periods and the index-addressed period catalog

use serde::{Deserialize, Serialize};

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// Denominator of [`StakingPeriod::reward_multiplier`]: 100 is 1.0x.
pub const MULTIPLIER_SCALE: u64 = 100;
/// Denominator of APY values given in basis points.
pub const BPS_SCALE: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingPeriod {
    pub index: u32,
    pub duration_secs: u64,
    /// Hundredths, so 150 is a 1.5x multiplier.
    pub reward_multiplier: u32,
}

impl StakingPeriod {
    pub fn new(index: u32, duration_secs: u64, reward_multiplier: u32) -> Self {
        Self {
            index,
            duration_secs,
            reward_multiplier,
        }
    }

    pub fn from_days(index: u32, days: u64, reward_multiplier: u32) -> Self {
        Self::new(index, days * SECONDS_PER_DAY, reward_multiplier)
    }

    pub fn duration_days(&self) -> u64 {
        self.duration_secs / SECONDS_PER_DAY
    }

    /// `"1.5x"`, `"3x"`, `"1.25x"`.
    pub fn multiplier_label(&self) -> String {
        let scale = MULTIPLIER_SCALE as u32;
        let whole = self.reward_multiplier / scale;
        let hundredths = self.reward_multiplier % scale;
        match hundredths {
            0 => format!("{}x", whole),
            h if h % 10 == 0 => format!("{}.{}x", whole, h / 10),
            h => format!("{}.{:02}x", whole, h),
        }
    }
}

/// Ordered set of periods where entry `i` has `index == i`.
///
/// The contract can append periods at any time, so nothing outside
/// [`PeriodCatalog::default`] assumes a fixed length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodCatalog(Vec<StakingPeriod>);

impl PeriodCatalog {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a catalog from `(duration_secs, reward_multiplier)` pairs,
    /// numbering them in order.
    pub fn from_entries(entries: impl IntoIterator<Item = (u64, u32)>) -> Self {
        let mut catalog = Self::new();
        for (duration_secs, multiplier) in entries {
            catalog.append(duration_secs, multiplier);
        }
        catalog
    }

    /// Adds a period at the next index and returns that index.
    pub fn append(&mut self, duration_secs: u64, reward_multiplier: u32) -> u32 {
        let index = self.0.len() as u32;
        self.0.push(StakingPeriod::new(index, duration_secs, reward_multiplier));
        index
    }

    pub fn get(&self, index: u32) -> Option<&StakingPeriod> {
        self.0
            .get(index as usize)
            .filter(|period| period.index == index)
    }

    pub fn contains(&self, index: u32) -> bool {
        self.get(index).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StakingPeriod> {
        self.0.iter()
    }

    /// Index of the first entry whose `index` does not match its position.
    pub fn first_misnumbered(&self) -> Option<usize> {
        self.0
            .iter()
            .enumerate()
            .find(|(position, period)| period.index as usize != *position)
            .map(|(position, _)| position)
    }
}

impl Default for PeriodCatalog {
    /// 30, 90, 180 and 365 days at 1.0x, 1.5x, 2.0x and 3.0x.
    fn default() -> Self {
        Self::from_entries([
            (30 * SECONDS_PER_DAY, 100),
            (90 * SECONDS_PER_DAY, 150),
            (180 * SECONDS_PER_DAY, 200),
            (365 * SECONDS_PER_DAY, 300),
        ])
    }
}

impl From<Vec<StakingPeriod>> for PeriodCatalog {
    fn from(periods: Vec<StakingPeriod>) -> Self {
        Self(periods)
    }
}
