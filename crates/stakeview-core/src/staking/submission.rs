//! Approve-then-stake submission of one stake draft
//!
//! The staking contract pulls tokens through an allowance, so the stake call
//! is only sent after the approval is confirmed on-chain. While either
//! transaction is out the draft is locked and a second `submit` is refused.
//! A failed step leaves the flow in `Failed` with the input intact; the next
//! edit or `submit` picks it up from there.

use {
    super::{confirm, guard::can_stake, types::SubmissionPhase},
    crate::{client::TxHandle, notify::Notification, session::Session, Result, StakingError},
    stakeview_common::{PeriodCatalog, StakeDraft, TokenAmount, WalletState},
    tokio::sync::{watch, RwLock},
    tracing::{debug, info, warn},
};

#[derive(Debug)]
struct FlowState {
    draft: StakeDraft,
    phase: SubmissionPhase,
    last_error: Option<String>,
}

pub struct StakeSubmission {
    state: RwLock<FlowState>,
    phase_tx: watch::Sender<SubmissionPhase>,
}

impl StakeSubmission {
    pub fn new(draft: StakeDraft) -> Self {
        let (phase_tx, _) = watch::channel(SubmissionPhase::Editing);
        Self {
            state: RwLock::new(FlowState {
                draft,
                phase: SubmissionPhase::Editing,
                last_error: None,
            }),
            phase_tx,
        }
    }

    /// Latest phase. `Failed` and `Confirmed` are held until the next edit or
    /// submission, so a slow receiver still sees how the last attempt ended.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionPhase> {
        self.phase_tx.subscribe()
    }

    pub async fn phase(&self) -> SubmissionPhase {
        self.state.read().await.phase
    }

    pub async fn draft(&self) -> StakeDraft {
        self.state.read().await.draft.clone()
    }

    /// Message of the most recent failed submission, cleared by the next one.
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    pub async fn set_amount(&self, input: impl Into<String>) -> Result<()> {
        let input = input.into();
        self.edit(move |draft| draft.amount_input = input).await
    }

    pub async fn select_period(&self, period_index: u32) -> Result<()> {
        self.edit(move |draft| draft.period_index = period_index).await
    }

    /// Discards the typed amount. Only possible before anything is submitted.
    pub async fn cancel(&self) -> Result<()> {
        self.edit(StakeDraft::clear_amount).await
    }

    pub async fn submit(
        &self,
        session: &Session,
        wallet: &WalletState,
        catalog: &PeriodCatalog,
    ) -> Result<TxHandle> {
        let (period_index, amount) = {
            let mut state = self.state.write().await;
            if state.phase.is_pending() {
                warn!("Submission already {}, refusing another", state.phase);
                return Err(StakingError::SubmissionInProgress);
            }
            let amount = match can_stake(&state.draft, wallet, catalog) {
                Ok(amount) => amount,
                Err(err) => {
                    session.notify(Notification::error("Error", err.to_string()));
                    return Err(err);
                }
            };
            state.last_error = None;
            self.set_phase(&mut state, SubmissionPhase::SubmittingApproval);
            (state.draft.period_index, amount)
        };

        info!("Staking {} in period {}", amount, period_index);
        let result = self.run(session, amount, period_index).await;

        let mut state = self.state.write().await;
        match result {
            Ok(tx) => {
                state.draft.clear_amount();
                self.set_phase(&mut state, SubmissionPhase::Confirmed);
                session.notify(Notification::success(
                    "Staking Successful",
                    "Your tokens have been staked",
                ));
                Ok(tx)
            }
            Err(err) => {
                let title = match state.phase {
                    SubmissionPhase::SubmittingApproval | SubmissionPhase::AwaitingApproval => {
                        "Approval Failed"
                    }
                    _ => "Staking Failed",
                };
                warn!("{} while {}: {}", title, state.phase, err);
                state.last_error = Some(err.to_string());
                self.set_phase(&mut state, SubmissionPhase::Failed);
                session.notify(Notification::error(title, err.to_string()));
                Err(err)
            }
        }
    }

    async fn run(&self, session: &Session, amount: TokenAmount, period_index: u32) -> Result<TxHandle> {
        let client = session.client();
        let contracts = session.contracts();

        let approval = contracts.approve(client, amount).await?;
        self.advance(SubmissionPhase::AwaitingApproval).await;
        confirm(client, &approval).await?;
        session.notify(Notification::success(
            "Approval Successful",
            "You can now stake your tokens",
        ));

        self.advance(SubmissionPhase::SubmittingStake).await;
        let stake = contracts.stake(client, amount, period_index).await?;
        self.advance(SubmissionPhase::AwaitingStakeConfirmation).await;
        confirm(client, &stake).await?;
        Ok(stake)
    }

    async fn edit(&self, apply: impl FnOnce(&mut StakeDraft)) -> Result<()> {
        let mut state = self.state.write().await;
        if state.phase.is_pending() {
            return Err(StakingError::SubmissionInProgress);
        }
        apply(&mut state.draft);
        self.set_phase(&mut state, SubmissionPhase::Editing);
        Ok(())
    }

    async fn advance(&self, phase: SubmissionPhase) {
        let mut state = self.state.write().await;
        self.set_phase(&mut state, phase);
    }

    fn set_phase(&self, state: &mut FlowState, phase: SubmissionPhase) {
        if state.phase != phase {
            debug!("Submission {} -> {}", state.phase, phase);
        }
        state.phase = phase;
        self.phase_tx.send_replace(phase);
    }
}

impl Default for StakeSubmission {
    fn default() -> Self {
        Self::new(StakeDraft::default())
    }
}
