//! Configuration types for the stakeview client

use {
    crate::{
        errors::{Error, Result},
        types::{Address, PeriodCatalog, TOKEN_DECIMALS},
    },
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
    tracing::debug,
};

/// Probe limit used when no configuration sets `max_periods`.
pub const DEFAULT_MAX_PERIODS: u32 = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub contracts: Option<ContractAddresses>,

    #[serde(default = "default_token_symbol")]
    pub token_symbol: String,

    /// Fractional digits shown for amounts and reward estimates.
    #[serde(default = "default_display_decimals")]
    pub display_decimals: u32,

    /// Used when the base APY has not been read from the contract.
    #[serde(default = "default_base_apy_bps")]
    pub default_base_apy_bps: u32,

    /// Used when the catalog has not been read from the contract.
    #[serde(default)]
    pub periods: PeriodCatalog,

    /// Upper bound on `stakingPeriods(i)` probes while loading the catalog.
    #[serde(default = "default_max_periods")]
    pub max_periods: u32,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    pub staking_token: Address,
    pub staking_contract: Address,
}

fn default_token_symbol() -> String {
    "STK".to_string()
}

fn default_display_decimals() -> u32 {
    2
}

fn default_base_apy_bps() -> u32 {
    1_000
}

fn default_max_periods() -> u32 {
    DEFAULT_MAX_PERIODS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            contracts: None,
            token_symbol: default_token_symbol(),
            display_decimals: default_display_decimals(),
            default_base_apy_bps: default_base_apy_bps(),
            periods: PeriodCatalog::default(),
            max_periods: default_max_periods(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str::<Self>(&contents)?;
        config.validate()?;
        debug!("Loaded client config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.periods.is_empty() {
            return Err(Error::Config("period catalog is empty".into()));
        }
        if let Some(position) = self.periods.first_misnumbered() {
            return Err(Error::Config(format!(
                "period at position {} has a mismatched index",
                position
            )));
        }
        if let Some(period) = self.periods.iter().find(|p| p.duration_secs == 0) {
            return Err(Error::Config(format!("period {} has zero duration", period.index)));
        }
        if self.display_decimals > TOKEN_DECIMALS {
            return Err(Error::Config(format!(
                "display_decimals {} exceeds token precision {}",
                self.display_decimals, TOKEN_DECIMALS
            )));
        }
        if self.max_periods == 0 {
            return Err(Error::Config("max_periods must be positive".into()));
        }
        Ok(())
    }
}
