//! Typed access to the staking token and staking contract

use {
    super::{
        ClientError, ClientResult, ContractCall, ContractFunction, ContractValue, TxHandle,
        WalletClient,
    },
    stakeview_common::{
        config::ContractAddresses, Address, PeriodCatalog, StakeRecord, StakingPeriod,
        TokenAmount, U256,
    },
    tracing::debug,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingContracts {
    token: Address,
    staking: Address,
}

impl StakingContracts {
    pub fn new(token: Address, staking: Address) -> Self {
        Self { token, staking }
    }

    pub fn token(&self) -> &Address {
        &self.token
    }

    pub fn staking(&self) -> &Address {
        &self.staking
    }

    pub async fn balance_of(&self, client: &dyn WalletClient, owner: &Address) -> ClientResult<TokenAmount> {
        let call = ContractCall::new(
            self.token.clone(),
            ContractFunction::BalanceOf,
            vec![ContractValue::Address(owner.clone())],
        );
        let value = client.read(&call).await?;
        let units = value
            .as_uint()
            .ok_or_else(|| unexpected(ContractFunction::BalanceOf, "expected uint256"))?;
        Ok(TokenAmount::from_base_units(units))
    }

    pub async fn get_stakes(&self, client: &dyn WalletClient, owner: &Address) -> ClientResult<Vec<StakeRecord>> {
        let call = ContractCall::new(
            self.staking.clone(),
            ContractFunction::GetStakes,
            vec![ContractValue::Address(owner.clone())],
        );
        let value = client.read(&call).await?;
        let items = value
            .as_list()
            .ok_or_else(|| unexpected(ContractFunction::GetStakes, "expected a list of stakes"))?;
        items.iter().map(decode_stake).collect()
    }

    pub async fn staking_period(&self, client: &dyn WalletClient, index: u32) -> ClientResult<StakingPeriod> {
        let call = ContractCall::new(
            self.staking.clone(),
            ContractFunction::StakingPeriods,
            vec![ContractValue::uint(index)],
        );
        let value = client.read(&call).await?;
        let function = ContractFunction::StakingPeriods;
        match value.as_tuple() {
            Some([duration, multiplier]) => Ok(StakingPeriod::new(
                index,
                uint_field(function, duration, "duration")?,
                uint_field(function, multiplier, "rewardMultiplier")?,
            )),
            _ => Err(unexpected(function, "expected (duration, rewardMultiplier)")),
        }
    }

    pub async fn base_apy_bps(&self, client: &dyn WalletClient) -> ClientResult<u32> {
        let call = ContractCall::new(self.staking.clone(), ContractFunction::BaseApy, Vec::new());
        let value = client.read(&call).await?;
        uint_field(ContractFunction::BaseApy, &value, "baseAPY")
    }

    /// Reads `stakingPeriods(0..)` until an index reverts or `max_periods`
    /// entries have been read.
    pub async fn load_catalog(&self, client: &dyn WalletClient, max_periods: u32) -> ClientResult<PeriodCatalog> {
        let mut catalog = PeriodCatalog::new();
        for index in 0..max_periods {
            match self.staking_period(client, index).await {
                Ok(period) => {
                    catalog.append(period.duration_secs, period.reward_multiplier);
                }
                Err(ClientError::Reverted(_)) => break,
                Err(err) => return Err(err),
            }
        }
        debug!("Loaded {} staking periods", catalog.len());
        Ok(catalog)
    }

    /// Lets the staking contract pull `amount` from the caller.
    pub async fn approve(&self, client: &dyn WalletClient, amount: TokenAmount) -> ClientResult<TxHandle> {
        let call = ContractCall::new(
            self.token.clone(),
            ContractFunction::Approve,
            vec![
                ContractValue::Address(self.staking.clone()),
                ContractValue::Uint(amount.base_units()),
            ],
        );
        client.write(&call).await
    }

    pub async fn stake(&self, client: &dyn WalletClient, amount: TokenAmount, period_index: u32) -> ClientResult<TxHandle> {
        let call = ContractCall::new(
            self.staking.clone(),
            ContractFunction::Stake,
            vec![
                ContractValue::Uint(amount.base_units()),
                ContractValue::uint(period_index),
            ],
        );
        client.write(&call).await
    }

    pub async fn unstake(&self, client: &dyn WalletClient, stake_index: usize) -> ClientResult<TxHandle> {
        let call = ContractCall::new(
            self.staking.clone(),
            ContractFunction::Unstake,
            vec![ContractValue::uint(stake_index as u64)],
        );
        client.write(&call).await
    }
}

impl From<ContractAddresses> for StakingContracts {
    fn from(addresses: ContractAddresses) -> Self {
        Self::new(addresses.staking_token, addresses.staking_contract)
    }
}

fn decode_stake(value: &ContractValue) -> ClientResult<StakeRecord> {
    let function = ContractFunction::GetStakes;
    match value.as_tuple() {
        Some([amount, period_index, timestamp, active]) => Ok(StakeRecord {
            amount: TokenAmount::from_base_units(
                amount
                    .as_uint()
                    .ok_or_else(|| unexpected(function, "amount is not a uint"))?,
            ),
            period_index: uint_field(function, period_index, "periodIndex")?,
            timestamp_secs: uint_field(function, timestamp, "timestamp")?,
            active: active
                .as_bool()
                .ok_or_else(|| unexpected(function, "active is not a bool"))?,
        }),
        _ => Err(unexpected(function, "expected (amount, periodIndex, timestamp, active)")),
    }
}

fn uint_field<T: TryFrom<U256>>(function: ContractFunction, value: &ContractValue, field: &str) -> ClientResult<T> {
    let raw = value
        .as_uint()
        .ok_or_else(|| unexpected(function, &format!("{} is not a uint", field)))?;
    T::try_from(raw).map_err(|_| unexpected(function, &format!("{} is out of range", field)))
}

fn unexpected(function: ContractFunction, detail: &str) -> ClientError {
    ClientError::UnexpectedValue {
        function: function.to_string(),
        detail: detail.to_string(),
    }
}
