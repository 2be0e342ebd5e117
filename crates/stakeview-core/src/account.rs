//! Account snapshot for presentation
//!
//! An [`AccountView`] bundles what one screen needs: wallet state, the period
//! catalog and base APY read from the contract, and every stake with its
//! display status and reward estimate. Snapshots are rebuilt on demand with
//! [`refresh`] or continuously with [`watch_account`].

use {
    crate::{
        notify::Notification,
        rewards::RewardProjector,
        session::Session,
        staking::{can_unstake, classify, StakeStatus},
        Result,
    },
    futures::StreamExt,
    serde::Serialize,
    stakeview_common::{utils::current_timestamp, PeriodCatalog, StakeRecord, TokenAmount, WalletState, U256},
    tokio::sync::watch,
    tracing::{debug, info, warn},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StakeView {
    /// Position in `getStakes`, which is also the `unstake` argument.
    pub index: usize,
    pub record: StakeRecord,
    pub status: StakeStatus,
    pub matures_at: Option<i64>,
    pub accrued_reward: Option<TokenAmount>,
    pub can_unstake: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    pub wallet: WalletState,
    pub base_apy_bps: u32,
    pub catalog: PeriodCatalog,
    pub stakes: Vec<StakeView>,
    pub refreshed_at: i64,
}

impl AccountView {
    pub fn build(
        wallet: WalletState,
        base_apy_bps: u32,
        catalog: PeriodCatalog,
        records: Vec<StakeRecord>,
        now: i64,
    ) -> Self {
        let projector = RewardProjector::new(base_apy_bps, catalog.clone());
        let stakes = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| StakeView {
                index,
                status: classify(&record, &catalog, now),
                matures_at: catalog
                    .get(record.period_index)
                    .map(|period| record.matures_at(period)),
                accrued_reward: projector.accrued(&record, now),
                can_unstake: can_unstake(&record).is_ok(),
                record,
            })
            .collect();

        Self {
            wallet,
            base_apy_bps,
            catalog,
            stakes,
            refreshed_at: now,
        }
    }

    pub fn projector(&self) -> RewardProjector {
        RewardProjector::new(self.base_apy_bps, self.catalog.clone())
    }

    pub fn active_stakes(&self) -> impl Iterator<Item = &StakeView> {
        self.stakes.iter().filter(|stake| stake.status.is_active())
    }

    pub fn total_staked(&self) -> TokenAmount {
        self.active_stakes().fold(TokenAmount::ZERO, |total, stake| {
            total
                .checked_add(stake.record.amount)
                .unwrap_or_else(|| TokenAmount::from_base_units(U256::MAX))
        })
    }
}

pub async fn refresh(session: &Session) -> Result<AccountView> {
    refresh_at(session, current_timestamp()).await
}

/// [`refresh`] with an explicit clock.
pub async fn refresh_at(session: &Session, now: i64) -> Result<AccountView> {
    let client = session.client();
    let contracts = session.contracts();

    let catalog = contracts.load_catalog(client, session.max_periods()).await?;
    let base_apy_bps = contracts.base_apy_bps(client).await?;
    let wallet = session.wallet_state().await?;
    let records = match &wallet.address {
        Some(address) if wallet.is_connected() => contracts.get_stakes(client, address).await?,
        _ => Vec::new(),
    };

    let view = AccountView::build(wallet, base_apy_bps, catalog, records, now);
    debug!(
        "Refreshed account: {} periods, {} stakes ({} active)",
        view.catalog.len(),
        view.stakes.len(),
        view.active_stakes().count()
    );
    Ok(view)
}

/// Re-reads the balance and tells the user it was refreshed.
pub async fn refresh_balance(session: &Session) -> Result<WalletState> {
    let wallet = session.wallet_state().await?;
    session.notify(Notification::success(
        "Balance Updated",
        "Your balance has been refreshed",
    ));
    Ok(wallet)
}

/// Publishes a fresh [`AccountView`] now and on every new block.
///
/// A failed refresh is logged and the previous snapshot kept. Returns when
/// the block stream ends or every receiver has been dropped.
pub async fn watch_account(session: &Session, updates: watch::Sender<Option<AccountView>>) -> Result<()> {
    let mut blocks = session.client().subscribe_blocks().await?;

    match refresh(session).await {
        Ok(view) => {
            updates.send_replace(Some(view));
        }
        Err(err) => warn!("Initial account refresh failed: {}", err),
    }

    while let Some(block) = blocks.next().await {
        if updates.is_closed() {
            debug!("No account watchers left");
            break;
        }
        match refresh(session).await {
            Ok(view) => {
                updates.send_replace(Some(view));
            }
            Err(err) => warn!("Account refresh at block {} failed: {}", block, err),
        }
    }

    info!("Stopped watching account");
    Ok(())
}
