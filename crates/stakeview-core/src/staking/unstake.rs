use {
    super::{confirm, guard::can_unstake},
    crate::{client::TxHandle, notify::Notification, session::Session, Result, StakingError},
    stakeview_common::StakeRecord,
    std::collections::HashSet,
    tokio::sync::RwLock,
    tracing::{info, warn},
};

#[derive(Debug, Default)]
struct UnstakeState {
    pending: HashSet<usize>,
    withdrawn: HashSet<usize>,
}

/// Unstake requests for the stakes of one account, keyed by stake index.
///
/// Indices confirmed here stay withdrawn even if a later snapshot still
/// reports them active. Use a fresh tracker after switching accounts.
#[derive(Debug, Default)]
pub struct UnstakeTracker {
    state: RwLock<UnstakeState>,
}

impl UnstakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether stake `index` may be unstaked now.
    pub async fn check(&self, index: usize, record: &StakeRecord) -> Result<()> {
        let state = self.state.read().await;
        Self::check_locked(&state, index, record)
    }

    pub async fn is_pending(&self, index: usize) -> bool {
        self.state.read().await.pending.contains(&index)
    }

    pub async fn unstake(&self, session: &Session, index: usize, record: &StakeRecord) -> Result<TxHandle> {
        {
            let mut state = self.state.write().await;
            if let Err(err) = Self::check_locked(&state, index, record) {
                session.notify(Notification::error("Error", err.to_string()));
                return Err(err);
            }
            state.pending.insert(index);
        }

        info!("Unstaking stake #{}", index);
        let result = async {
            let tx = session.contracts().unstake(session.client(), index).await?;
            confirm(session.client(), &tx).await?;
            Ok::<_, StakingError>(tx)
        }
        .await;

        let mut state = self.state.write().await;
        state.pending.remove(&index);
        match result {
            Ok(tx) => {
                state.withdrawn.insert(index);
                session.notify(Notification::success(
                    "Unstake Successful",
                    format!("Stake #{} and its rewards have been withdrawn", index),
                ));
                Ok(tx)
            }
            Err(err) => {
                warn!("Unstake of #{} failed: {}", index, err);
                session.notify(Notification::error("Unstake Failed", err.to_string()));
                Err(err)
            }
        }
    }

    fn check_locked(state: &UnstakeState, index: usize, record: &StakeRecord) -> Result<()> {
        if state.withdrawn.contains(&index) {
            return Err(StakingError::AlreadyWithdrawn);
        }
        can_unstake(record)?;
        if state.pending.contains(&index) {
            return Err(StakingError::SubmissionInProgress);
        }
        Ok(())
    }
}
