use {
    serde::{Deserialize, Serialize},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// Display state of a stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StakeStatus {
    ActiveAccruing,
    ActiveMaturityReached,
    Withdrawn,
}

impl StakeStatus {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Withdrawn)
    }
}

impl Display for StakeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::ActiveAccruing => "Active",
            Self::ActiveMaturityReached => "Matured",
            Self::Withdrawn => "Withdrawn",
        })
    }
}

/// Progress of one stake draft through approve-then-stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionPhase {
    Editing,
    SubmittingApproval,
    AwaitingApproval,
    SubmittingStake,
    AwaitingStakeConfirmation,
    Confirmed,
    /// A transaction step was rejected or reverted. The draft keeps its input
    /// and is editable again; the next edit moves the flow to `Editing`.
    Failed,
}

impl SubmissionPhase {
    /// A transaction is out and the draft is locked.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            Self::SubmittingApproval
                | Self::AwaitingApproval
                | Self::SubmittingStake
                | Self::AwaitingStakeConfirmation
        )
    }
}

impl Display for SubmissionPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Editing => "editing",
            Self::SubmittingApproval => "submitting approval",
            Self::AwaitingApproval => "awaiting approval",
            Self::SubmittingStake => "submitting stake",
            Self::AwaitingStakeConfirmation => "awaiting stake confirmation",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        })
    }
}
