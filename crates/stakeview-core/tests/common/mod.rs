#![allow(dead_code)]

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use stakeview_common::{Address, PeriodCatalog, StakeRecord, TokenAmount, U256};
use stakeview_core::client::{
    ClientError, ClientResult, ContractCall, ContractFunction, ContractValue, StakingContracts,
    TxHandle, TxOutcome, WalletClient,
};
use stakeview_core::notify::{ChannelNotifier, Notification};
use stakeview_core::Session;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};

pub const USER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const TOKEN: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const STAKING: &str = "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0";

pub const START: i64 = 1_700_000_000;

#[derive(Debug, Clone)]
pub enum Failure {
    /// The wallet refuses to sign.
    Reject,
    /// The transaction is mined but reverts.
    Revert(String),
}

struct Chain {
    balance: TokenAmount,
    allowance: TokenAmount,
    stakes: Vec<StakeRecord>,
    periods: PeriodCatalog,
    base_apy_bps: u32,
    block: u64,
    next_tx: u64,
    pending: HashMap<TxHandle, ContractCall>,
    failures: HashMap<ContractFunction, Failure>,
    writes: Vec<ContractFunction>,
}

/// In-memory token + staking contract pair behind the wallet interface.
///
/// State changes are applied when a transaction is confirmed, so a stake sent
/// before its approval is mined reverts like it would on-chain.
pub struct MockWallet {
    chain: Mutex<Chain>,
    gate: watch::Sender<bool>,
    blocks: Mutex<Vec<u64>>,
}

impl MockWallet {
    pub fn new(balance_tokens: u64) -> Arc<Self> {
        let (gate, _) = watch::channel(true);
        Arc::new(Self {
            chain: Mutex::new(Chain {
                balance: TokenAmount::from_tokens(balance_tokens),
                allowance: TokenAmount::ZERO,
                stakes: Vec::new(),
                periods: PeriodCatalog::default(),
                base_apy_bps: 1_000,
                block: 1,
                next_tx: 1,
                pending: HashMap::new(),
                failures: HashMap::new(),
                writes: Vec::new(),
            }),
            gate,
            blocks: Mutex::new(Vec::new()),
        })
    }

    pub fn fail_next(&self, function: ContractFunction, failure: Failure) {
        self.chain.lock().unwrap().failures.insert(function, failure);
    }

    /// Confirmations block until [`MockWallet::release_confirmations`].
    pub fn hold_confirmations(&self) {
        self.gate.send_replace(false);
    }

    pub fn release_confirmations(&self) {
        self.gate.send_replace(true);
    }

    pub fn writes(&self) -> Vec<ContractFunction> {
        self.chain.lock().unwrap().writes.clone()
    }

    pub fn balance(&self) -> TokenAmount {
        self.chain.lock().unwrap().balance
    }

    pub fn stakes(&self) -> Vec<StakeRecord> {
        self.chain.lock().unwrap().stakes.clone()
    }

    pub fn push_stake(&self, record: StakeRecord) {
        self.chain.lock().unwrap().stakes.push(record);
    }

    pub fn add_period(&self, duration_secs: u64, multiplier: u32) -> u32 {
        self.chain.lock().unwrap().periods.append(duration_secs, multiplier)
    }

    pub fn set_base_apy(&self, bps: u32) {
        self.chain.lock().unwrap().base_apy_bps = bps;
    }

    pub fn set_blocks(&self, blocks: Vec<u64>) {
        *self.blocks.lock().unwrap() = blocks;
    }
}

fn arg_uint(call: &ContractCall, position: usize) -> U256 {
    call.args[position].as_uint().expect("uint argument")
}

#[async_trait]
impl WalletClient for MockWallet {
    async fn connect(&self) -> ClientResult<Address> {
        Ok(USER.parse().unwrap())
    }

    async fn read(&self, call: &ContractCall) -> ClientResult<ContractValue> {
        let chain = self.chain.lock().unwrap();
        match call.function {
            ContractFunction::BalanceOf => Ok(ContractValue::Uint(chain.balance.base_units())),
            ContractFunction::BaseApy => Ok(ContractValue::uint(chain.base_apy_bps)),
            ContractFunction::GetStakes => Ok(ContractValue::List(
                chain
                    .stakes
                    .iter()
                    .map(|stake| {
                        ContractValue::Tuple(vec![
                            ContractValue::Uint(stake.amount.base_units()),
                            ContractValue::uint(stake.period_index),
                            ContractValue::uint(stake.timestamp_secs as u64),
                            ContractValue::Bool(stake.active),
                        ])
                    })
                    .collect(),
            )),
            ContractFunction::StakingPeriods => {
                let index = arg_uint(call, 0).low_u32();
                match chain.periods.get(index) {
                    Some(period) => Ok(ContractValue::Tuple(vec![
                        ContractValue::uint(period.duration_secs),
                        ContractValue::uint(period.reward_multiplier),
                    ])),
                    None => Err(ClientError::Reverted("invalid opcode".into())),
                }
            }
            other => Err(ClientError::Transport(format!("{} is not a view", other))),
        }
    }

    async fn write(&self, call: &ContractCall) -> ClientResult<TxHandle> {
        let mut chain = self.chain.lock().unwrap();
        chain.writes.push(call.function);
        if matches!(chain.failures.get(&call.function), Some(Failure::Reject)) {
            chain.failures.remove(&call.function);
            return Err(ClientError::Rejected);
        }
        let tx = TxHandle(format!("0x{:064x}", chain.next_tx));
        chain.next_tx += 1;
        chain.pending.insert(tx.clone(), call.clone());
        Ok(tx)
    }

    async fn await_confirmation(&self, tx: &TxHandle) -> ClientResult<TxOutcome> {
        let mut gate = self.gate.subscribe();
        let _ = gate.wait_for(|open| *open).await;

        let mut chain = self.chain.lock().unwrap();
        let call = chain
            .pending
            .remove(tx)
            .ok_or_else(|| ClientError::Transport(format!("unknown transaction {}", tx)))?;

        if let Some(Failure::Revert(reason)) = chain.failures.get(&call.function).cloned() {
            chain.failures.remove(&call.function);
            return Ok(TxOutcome::Reverted { reason });
        }

        let revert = |reason: &str| Ok(TxOutcome::Reverted { reason: reason.to_string() });
        match call.function {
            ContractFunction::Approve => {
                chain.allowance = TokenAmount::from_base_units(arg_uint(&call, 1));
            }
            ContractFunction::Stake => {
                let amount = TokenAmount::from_base_units(arg_uint(&call, 0));
                let period_index = arg_uint(&call, 1).low_u32();
                if amount > chain.allowance {
                    return revert("ERC20: insufficient allowance");
                }
                if amount > chain.balance {
                    return revert("ERC20: transfer amount exceeds balance");
                }
                if !chain.periods.contains(period_index) {
                    return revert("Invalid staking period");
                }
                chain.allowance = chain.allowance.checked_sub(amount).unwrap();
                chain.balance = chain.balance.checked_sub(amount).unwrap();
                chain.stakes.push(StakeRecord::new(amount, period_index, START));
            }
            ContractFunction::Unstake => {
                let index = arg_uint(&call, 0).as_usize();
                let amount = match chain.stakes.get(index) {
                    Some(stake) if stake.active => stake.amount,
                    _ => return revert("Stake not active"),
                };
                chain.stakes[index].active = false;
                chain.balance = chain.balance.checked_add(amount).unwrap();
            }
            other => {
                return Err(ClientError::Transport(format!("{} is not a write", other)));
            }
        }

        chain.block += 1;
        Ok(TxOutcome::Confirmed { block: chain.block })
    }

    async fn subscribe_blocks(&self) -> ClientResult<BoxStream<'static, u64>> {
        let blocks = self.blocks.lock().unwrap().clone();
        Ok(stream::iter(blocks).boxed())
    }
}

pub fn contracts() -> StakingContracts {
    StakingContracts::new(TOKEN.parse().unwrap(), STAKING.parse().unwrap())
}

pub fn session(wallet: &Arc<MockWallet>) -> (Session, mpsc::UnboundedReceiver<Notification>) {
    let (notifier, notifications) = ChannelNotifier::new();
    let session = Session::new(wallet.clone(), contracts(), Arc::new(notifier));
    (session, notifications)
}

pub fn drain(notifications: &mut mpsc::UnboundedReceiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(notification) = notifications.try_recv() {
        out.push(notification);
    }
    out
}
