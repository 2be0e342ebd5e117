// crates/stakeview-core/src/main.rs

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use stakeview_common::{
    utils::{current_timestamp, format_date, format_remaining, format_timestamp},
    ClientConfig, StakeRecord, TokenAmount,
};
use stakeview_core::{classify, RewardProjector};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stakeview", about = "Offline reward estimates for the token staking client")]
struct Cli {
    /// JSON client configuration; built-in defaults are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base APY in basis points, overriding the configured default
    #[arg(long, global = true)]
    apy_bps: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project the reward for staking an amount for a full period
    Estimate {
        #[arg(long)]
        amount: String,
        #[arg(long)]
        period: u32,
    },
    /// List the staking periods with their effective APY
    Periods {
        #[arg(long)]
        json: bool,
    },
    /// Classify a stake and estimate what it has accrued so far
    Status {
        #[arg(long)]
        amount: String,
        #[arg(long)]
        period: u32,
        /// Unix seconds at which the stake was made
        #[arg(long)]
        staked_at: i64,
        /// Unix seconds to evaluate at; defaults to the current time
        #[arg(long)]
        now: Option<i64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref()).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &cli.config {
        info!("Loaded configuration from {}", path.display());
    }

    let base_apy_bps = cli.apy_bps.unwrap_or(config.default_base_apy_bps);
    let projector = RewardProjector::new(base_apy_bps, config.periods.clone());
    debug!("Using base APY {} bp over {} periods", base_apy_bps, projector.catalog().len());

    match cli.command {
        Command::Estimate { amount, period } => estimate(&config, &projector, &amount, period),
        Command::Periods { json } => periods(&projector, json),
        Command::Status {
            amount,
            period,
            staked_at,
            now,
        } => status(&config, &projector, &amount, period, staked_at, now),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ClientConfig> {
    match path {
        Some(path) => Ok(ClientConfig::from_file(path)?),
        None => Ok(ClientConfig::default()),
    }
}

fn estimate(config: &ClientConfig, projector: &RewardProjector, amount: &str, period: u32) -> Result<()> {
    let amount: TokenAmount = amount.parse().context("Invalid amount")?;
    let days = projector
        .catalog()
        .get(period)
        .map(|p| p.duration_days())
        .ok_or_else(|| anyhow!("Unknown staking period {}", period))?;
    let reward = projector
        .project(amount, period)
        .ok_or_else(|| anyhow!("Reward estimate unavailable for period {}", period))?;

    println!(
        "Estimated reward after {} days: {} Reward Tokens",
        days,
        reward.format_floor(config.display_decimals)
    );
    Ok(())
}

fn periods(projector: &RewardProjector, json: bool) -> Result<()> {
    let options = projector.options();
    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    println!("Available Staking Periods:");
    for option in options {
        println!("Period #{}: {} ({} multiplier)", option.index, option.label, option.multiplier);
    }
    Ok(())
}

fn status(
    config: &ClientConfig,
    projector: &RewardProjector,
    amount: &str,
    period: u32,
    staked_at: i64,
    now: Option<i64>,
) -> Result<()> {
    let amount: TokenAmount = amount.parse().context("Invalid amount")?;
    let now = now.unwrap_or_else(current_timestamp);
    let record = StakeRecord::new(amount, period, staked_at);

    println!("Amount: {} {}", amount, config.token_symbol);
    println!("Staked: {}", format_date(staked_at));
    println!("Status: {} (as of {})", classify(&record, projector.catalog(), now), format_timestamp(now));
    if let Some(period) = projector.catalog().get(period) {
        println!("Unlocks in: {}", format_remaining(now, record.matures_at(period)));
    }
    match projector.accrued(&record, now) {
        Some(reward) => println!(
            "Current reward: {} tokens",
            reward.format_floor(config.display_decimals)
        ),
        None => println!("Current reward: unavailable"),
    }
    Ok(())
}
