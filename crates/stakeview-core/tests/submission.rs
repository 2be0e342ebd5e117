mod common;

use common::{drain, session, Failure, MockWallet, START};
use stakeview_common::{StakeDraft, TokenAmount, WalletState};
use stakeview_core::account::refresh_at;
use stakeview_core::client::ContractFunction;
use stakeview_core::notify::NotificationLevel;
use stakeview_core::{StakeSubmission, StakingError, SubmissionPhase};
use std::sync::Arc;

#[tokio::test]
async fn test_approval_then_stake() {
    let wallet = MockWallet::new(1_000);
    let (session, mut notifications) = session(&wallet);
    session.connect().await.unwrap();
    let view = refresh_at(&session, START).await.unwrap();

    let flow = StakeSubmission::new(StakeDraft::new("100", 0));
    flow.submit(&session, &view.wallet, &view.catalog).await.unwrap();

    assert_eq!(wallet.writes(), vec![ContractFunction::Approve, ContractFunction::Stake]);
    assert_eq!(flow.phase().await, SubmissionPhase::Confirmed);
    assert_eq!(flow.draft().await.amount_input, "");
    assert_eq!(wallet.balance(), TokenAmount::from_tokens(900));

    let stakes = wallet.stakes();
    assert_eq!(stakes.len(), 1);
    assert_eq!(stakes[0].amount, TokenAmount::from_tokens(100));
    assert_eq!(stakes[0].period_index, 0);
    assert!(stakes[0].active);

    let titles: Vec<String> = drain(&mut notifications).into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["Approval Successful", "Staking Successful"]);
}

#[tokio::test]
async fn test_stake_revert_returns_to_editing_with_input() {
    let wallet = MockWallet::new(1_000);
    let (session, mut notifications) = session(&wallet);
    session.connect().await.unwrap();
    let view = refresh_at(&session, START).await.unwrap();
    wallet.fail_next(ContractFunction::Stake, Failure::Revert("paused".into()));

    let flow = StakeSubmission::new(StakeDraft::new("100", 2));
    let result = flow.submit(&session, &view.wallet, &view.catalog).await;

    assert!(matches!(result, Err(StakingError::TransactionReverted(reason)) if reason == "paused"));
    assert_eq!(wallet.writes(), vec![ContractFunction::Approve, ContractFunction::Stake]);
    assert_eq!(flow.phase().await, SubmissionPhase::Failed);
    assert_eq!(flow.draft().await, StakeDraft::new("100", 2));
    assert!(flow.last_error().await.unwrap().contains("paused"));
    assert!(wallet.stakes().is_empty());

    let sent = drain(&mut notifications);
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].title, "Approval Successful");
    assert_eq!(sent[1].level, NotificationLevel::Error);
    assert_eq!(sent[1].title, "Staking Failed");
}

#[tokio::test]
async fn test_failed_phase_reaches_subscribers() {
    let wallet = MockWallet::new(1_000);
    let (session, _notifications) = session(&wallet);
    session.connect().await.unwrap();
    let view = refresh_at(&session, START).await.unwrap();
    wallet.fail_next(ContractFunction::Stake, Failure::Revert("paused".into()));

    let flow = StakeSubmission::new(StakeDraft::new("100", 0));
    let mut phases = flow.subscribe();
    assert!(flow.submit(&session, &view.wallet, &view.catalog).await.is_err());

    assert!(phases.has_changed().unwrap());
    assert_eq!(*phases.borrow_and_update(), SubmissionPhase::Failed);

    flow.set_amount("120").await.unwrap();
    assert_eq!(*phases.borrow_and_update(), SubmissionPhase::Editing);
    assert_eq!(flow.draft().await, StakeDraft::new("120", 0));
    assert!(flow.last_error().await.unwrap().contains("paused"));
}

#[tokio::test]
async fn test_rejected_approval_never_sends_stake() {
    let wallet = MockWallet::new(1_000);
    let (session, mut notifications) = session(&wallet);
    session.connect().await.unwrap();
    let view = refresh_at(&session, START).await.unwrap();
    wallet.fail_next(ContractFunction::Approve, Failure::Reject);

    let flow = StakeSubmission::new(StakeDraft::new("10", 0));
    let result = flow.submit(&session, &view.wallet, &view.catalog).await;

    assert!(matches!(result, Err(StakingError::TransactionRejectedByUser)));
    assert_eq!(wallet.writes(), vec![ContractFunction::Approve]);
    assert_eq!(flow.phase().await, SubmissionPhase::Failed);
    assert_eq!(flow.draft().await.amount_input, "10");

    let sent = drain(&mut notifications);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Approval Failed");
}

#[tokio::test]
async fn test_reverted_approval_never_sends_stake() {
    let wallet = MockWallet::new(1_000);
    let (session, _notifications) = session(&wallet);
    session.connect().await.unwrap();
    let view = refresh_at(&session, START).await.unwrap();
    wallet.fail_next(ContractFunction::Approve, Failure::Revert("out of gas".into()));

    let flow = StakeSubmission::new(StakeDraft::new("10", 0));
    let result = flow.submit(&session, &view.wallet, &view.catalog).await;

    assert!(matches!(result, Err(StakingError::TransactionReverted(_))));
    assert_eq!(wallet.writes(), vec![ContractFunction::Approve]);
}

#[tokio::test]
async fn test_retry_after_failure_uses_preserved_input() {
    let wallet = MockWallet::new(1_000);
    let (session, _notifications) = session(&wallet);
    session.connect().await.unwrap();
    let view = refresh_at(&session, START).await.unwrap();
    wallet.fail_next(ContractFunction::Stake, Failure::Reject);

    let flow = StakeSubmission::new(StakeDraft::new("250", 1));
    assert!(flow.submit(&session, &view.wallet, &view.catalog).await.is_err());

    flow.submit(&session, &view.wallet, &view.catalog).await.unwrap();
    assert_eq!(flow.last_error().await, None);
    assert_eq!(wallet.stakes()[0].amount, TokenAmount::from_tokens(250));
    assert_eq!(wallet.stakes()[0].period_index, 1);
}

#[tokio::test]
async fn test_local_denials_skip_the_network() {
    let wallet = MockWallet::new(50);
    let (session, mut notifications) = session(&wallet);
    let catalog = refresh_at(&session, START).await.unwrap().catalog;

    let flow = StakeSubmission::new(StakeDraft::new("10", 0));
    let result = flow
        .submit(&session, &WalletState::disconnected(), &catalog)
        .await;
    assert!(matches!(result, Err(StakingError::NotConnected)));

    session.connect().await.unwrap();
    let wallet_state = session.wallet_state().await.unwrap();

    flow.set_amount("51").await.unwrap();
    let result = flow.submit(&session, &wallet_state, &catalog).await;
    assert!(matches!(result, Err(StakingError::InsufficientBalance { .. })));

    flow.set_amount("5").await.unwrap();
    flow.select_period(9).await.unwrap();
    let result = flow.submit(&session, &wallet_state, &catalog).await;
    assert!(matches!(result, Err(StakingError::InputInvalid(_))));

    assert!(wallet.writes().is_empty());
    assert_eq!(flow.phase().await, SubmissionPhase::Editing);
    assert!(drain(&mut notifications)
        .iter()
        .all(|n| n.level == NotificationLevel::Error));
}

#[tokio::test]
async fn test_second_submit_refused_while_pending() {
    let wallet = MockWallet::new(1_000);
    let (session, _notifications) = session(&wallet);
    let session = Arc::new(session);
    session.connect().await.unwrap();
    let view = refresh_at(&session, START).await.unwrap();

    let flow = Arc::new(StakeSubmission::new(StakeDraft::new("100", 0)));
    let mut phases = flow.subscribe();

    wallet.hold_confirmations();
    let first = {
        let (flow, session, view) = (flow.clone(), session.clone(), view.clone());
        tokio::spawn(async move { flow.submit(&session, &view.wallet, &view.catalog).await })
    };
    phases
        .wait_for(|phase| *phase == SubmissionPhase::AwaitingApproval)
        .await
        .unwrap();

    let second = flow.submit(&session, &view.wallet, &view.catalog).await;
    assert!(matches!(second, Err(StakingError::SubmissionInProgress)));
    assert!(matches!(flow.set_amount("1").await, Err(StakingError::SubmissionInProgress)));
    assert!(matches!(flow.cancel().await, Err(StakingError::SubmissionInProgress)));

    wallet.release_confirmations();
    first.await.unwrap().unwrap();

    assert_eq!(flow.phase().await, SubmissionPhase::Confirmed);
    assert_eq!(wallet.writes(), vec![ContractFunction::Approve, ContractFunction::Stake]);
    assert_eq!(wallet.stakes().len(), 1);
}

#[tokio::test]
async fn test_cancel_clears_input_before_submission() {
    let flow = StakeSubmission::new(StakeDraft::new("42", 3));
    flow.cancel().await.unwrap();
    assert_eq!(flow.draft().await, StakeDraft::new("", 3));
    assert_eq!(flow.phase().await, SubmissionPhase::Editing);
}
