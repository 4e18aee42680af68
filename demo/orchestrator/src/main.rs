// Demo Orchestrator - walks a deterministic staking day end to end:
// two participants stake, accrue, claim, and exit, with the
// conservation probe checked at every step.

use anyhow::Context;
use staking_core::{AccountId, Clock, Config, ManualClock, StakingEngine, TokenLedger};
use std::sync::Arc;
use token_ledger::InMemoryTokenLedger;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const T0: u64 = 1_700_000_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Starting StakeRail demo...");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    info!(
        rate = config.reward_rate_per_hour,
        "Configuration loaded successfully"
    );

    // In-memory stand-ins for the two token ledgers
    let stake_token = Arc::new(InMemoryTokenLedger::new("STK"));
    let reward_token = Arc::new(InMemoryTokenLedger::new("RWD"));
    let clock = Arc::new(ManualClock::new(T0));

    let alice = AccountId::new("alice");
    let bob = AccountId::new("bob");
    let treasury = AccountId::new("rewards-treasury");

    stake_token.credit(&alice, 1_000)?;
    stake_token.credit(&bob, 500)?;
    reward_token.credit(&treasury, 1_000_000_000_000)?;
    reward_token.transfer_in(&treasury, 1_000_000_000_000).await?;

    let engine = StakingEngine::new(
        config,
        stake_token.clone() as Arc<dyn TokenLedger>,
        reward_token.clone() as Arc<dyn TokenLedger>,
    )?
    .with_clock(clock.clone());

    // Morning: both participants stake
    engine.stake(&alice, 100).await?;
    engine.stake(&bob, 300).await?;
    report(&engine, &stake_token, &clock)?;

    // One hour later alice doubles down; her first hour is banked first
    clock.advance(3_600);
    engine.stake(&alice, 100).await?;
    info!(
        account = %alice,
        banked = engine.available_rewards(&alice)?,
        "pending rewards banked before restake"
    );

    // Afternoon: another two hours of accrual, then payouts
    clock.advance(7_200);
    let alice_paid = engine.claim_rewards(&alice).await?;
    let bob_paid = engine.claim_rewards(&bob).await?;
    info!(alice_paid, bob_paid, "rewards claimed");
    report(&engine, &stake_token, &clock)?;

    // Evening: everyone exits; remaining accrual stays claimable
    engine.withdraw(&alice, 200).await?;
    engine.withdraw(&bob, 300).await?;
    report(&engine, &stake_token, &clock)?;

    info!(
        alice_rewards = reward_token.balance_of(&alice).await?,
        bob_rewards = reward_token.balance_of(&bob).await?,
        "Demo complete"
    );
    Ok(())
}

/// Log engine state and check the conservation probe
fn report(
    engine: &StakingEngine,
    stake_token: &InMemoryTokenLedger,
    clock: &ManualClock,
) -> anyhow::Result<()> {
    let total = engine.total_staked()?;
    let custody = stake_token.custody_balance();
    anyhow::ensure!(
        total == custody,
        "conservation violated: {} staked vs {} in custody",
        total,
        custody
    );
    info!(
        at = clock.now_unix() - T0,
        total_staked = total,
        custody,
        "conservation holds"
    );
    Ok(())
}
