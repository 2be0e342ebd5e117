//! Common data types used throughout stakeview

pub mod amount;
pub mod period;
pub mod stake;
pub mod wallet;

pub use amount::{TokenAmount, TOKEN_DECIMALS};
pub use period::{
    PeriodCatalog, StakingPeriod, BPS_SCALE, MULTIPLIER_SCALE, SECONDS_PER_DAY, SECONDS_PER_YEAR,
};
pub use stake::{StakeDraft, StakeRecord};
pub use wallet::{Address, WalletState};

pub use primitive_types::U256;
