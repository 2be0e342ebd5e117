//! Wallet/RPC collaborator interface
//!
//! The client core never talks to a chain directly. Everything goes through a
//! [`WalletClient`], which an embedding front-end backs with its wallet
//! library, and [`contracts::StakingContracts`] turns the untyped calls into
//! the token and staking contract surfaces.

pub mod contracts;

use {
    async_trait::async_trait,
    futures::stream::BoxStream,
    serde::{Deserialize, Serialize},
    stakeview_common::{Address, U256},
    std::fmt::{Display, Formatter, Result as FmtResult},
    thiserror::Error,
};

pub use contracts::StakingContracts;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("User rejected the request")]
    Rejected,

    #[error("Execution reverted: {0}")]
    Reverted(String),

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected return value from {function}: {detail}")]
    UnexpectedValue { function: String, detail: String },
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Contract functions used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractFunction {
    BalanceOf,
    Approve,
    GetStakes,
    StakingPeriods,
    BaseApy,
    Stake,
    Unstake,
}

impl ContractFunction {
    pub fn abi_name(&self) -> &'static str {
        match self {
            Self::BalanceOf => "balanceOf",
            Self::Approve => "approve",
            Self::GetStakes => "getStakes",
            Self::StakingPeriods => "stakingPeriods",
            Self::BaseApy => "baseAPY",
            Self::Stake => "stake",
            Self::Unstake => "unstake",
        }
    }
}

impl Display for ContractFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.abi_name())
    }
}

/// ABI-shaped values passed to and returned from contract calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractValue {
    Uint(U256),
    Bool(bool),
    Address(Address),
    Tuple(Vec<ContractValue>),
    List(Vec<ContractValue>),
}

impl ContractValue {
    pub fn uint(value: impl Into<U256>) -> Self {
        Self::Uint(value.into())
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Self::Address(address) => Some(address),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[ContractValue]> {
        match self {
            Self::Tuple(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ContractValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCall {
    pub contract: Address,
    pub function: ContractFunction,
    pub args: Vec<ContractValue>,
}

impl ContractCall {
    pub fn new(contract: Address, function: ContractFunction, args: Vec<ContractValue>) -> Self {
        Self {
            contract,
            function,
            args,
        }
    }
}

/// Hash of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHandle(pub String);

impl Display for TxHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxOutcome {
    Confirmed { block: u64 },
    Reverted { reason: String },
}

/// Wallet and chain access supplied by the embedding front-end.
#[async_trait]
pub trait WalletClient: Send + Sync + 'static {
    /// Ask the wallet for an account
    async fn connect(&self) -> ClientResult<Address>;

    /// Call a view function
    async fn read(&self, call: &ContractCall) -> ClientResult<ContractValue>;

    /// Sign and broadcast a state-changing call
    async fn write(&self, call: &ContractCall) -> ClientResult<TxHandle>;

    /// Wait until the transaction is mined. Timeouts are the implementor's concern.
    async fn await_confirmation(&self, tx: &TxHandle) -> ClientResult<TxOutcome>;

    /// New block numbers, used to re-issue watched reads
    async fn subscribe_blocks(&self) -> ClientResult<BoxStream<'static, u64>>;
}
