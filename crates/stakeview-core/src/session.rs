//! Explicit client context: wallet collaborator, contract addresses and the
//! notification sink, plus the connected account.

use {
    crate::{
        client::{StakingContracts, WalletClient},
        notify::{Notification, Notifier},
        Result,
    },
    anyhow::anyhow,
    stakeview_common::{
        config::{ClientConfig, DEFAULT_MAX_PERIODS},
        Address, WalletState,
    },
    std::sync::Arc,
    tokio::sync::RwLock,
    tracing::info,
};

pub struct Session {
    client: Arc<dyn WalletClient>,
    contracts: StakingContracts,
    notifier: Arc<dyn Notifier>,
    address: RwLock<Option<Address>>,
    max_periods: u32,
}

impl Session {
    pub fn new(
        client: Arc<dyn WalletClient>,
        contracts: StakingContracts,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            contracts,
            notifier,
            address: RwLock::new(None),
            max_periods: DEFAULT_MAX_PERIODS,
        }
    }

    /// Session against the contracts named in `config`, probing at most
    /// `config.max_periods` catalog entries.
    pub fn from_config(
        client: Arc<dyn WalletClient>,
        notifier: Arc<dyn Notifier>,
        config: &ClientConfig,
    ) -> Result<Self> {
        let contracts = config
            .contracts
            .clone()
            .ok_or_else(|| anyhow!("no contract addresses configured"))?;
        Ok(Self::new(client, StakingContracts::from(contracts), notifier)
            .with_max_periods(config.max_periods))
    }

    pub fn with_max_periods(mut self, max_periods: u32) -> Self {
        self.max_periods = max_periods;
        self
    }

    pub fn client(&self) -> &dyn WalletClient {
        self.client.as_ref()
    }

    pub fn contracts(&self) -> &StakingContracts {
        &self.contracts
    }

    pub fn max_periods(&self) -> u32 {
        self.max_periods
    }

    pub fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    pub async fn connect(&self) -> Result<Address> {
        let address = self.client.connect().await?;
        info!("Connected wallet {}", address.short());
        *self.address.write().await = Some(address.clone());
        Ok(address)
    }

    pub async fn disconnect(&self) {
        if let Some(address) = self.address.write().await.take() {
            info!("Wallet disconnected");
            self.notify(Notification::info(
                "Wallet Disconnected",
                format!("{} is no longer connected", address.short()),
            ));
        }
    }

    pub async fn address(&self) -> Option<Address> {
        self.address.read().await.clone()
    }

    /// Current wallet state with a fresh `balanceOf` read.
    pub async fn wallet_state(&self) -> Result<WalletState> {
        match self.address().await {
            Some(address) => {
                let balance = self
                    .contracts
                    .balance_of(self.client(), &address)
                    .await?;
                Ok(WalletState::connected(address, balance))
            }
            None => Ok(WalletState::disconnected()),
        }
    }
}
