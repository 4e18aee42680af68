//! Staking engine
//!
//! Owns the per-account records and enforces the accounting rules:
//! rewards are settled before any stake-size change, external transfers
//! are bracketed so a failure leaves no state behind, and every
//! mutating entry point is gated against re-entrant invocation.
//!
//! # Example
//!
//! ```no_run
//! use staking_core::{AccountId, Config, StakingEngine};
//! use token_ledger::InMemoryTokenLedger;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> staking_core::Result<()> {
//!     let stake_token = Arc::new(InMemoryTokenLedger::new("STK"));
//!     let reward_token = Arc::new(InMemoryTokenLedger::new("RWD"));
//!     let engine = StakingEngine::new(Config::default(), stake_token, reward_token)?;
//!
//!     let alice = AccountId::new("alice");
//!     engine.stake(&alice, 100).await?;
//!
//!     Ok(())
//! }
//! ```

use crate::{
    clock::{Clock, SystemClock},
    guard::ReentrancyGuard,
    metrics::Metrics,
    rewards,
    types::StakeAccount,
    Config, Error, Result,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use token_ledger::{AccountId, Amount, TokenLedger};
use tracing::{debug, info, warn};

/// Staking/reward accounting engine
///
/// One instance per deployment; instances are fully isolated, so tests
/// can run many in parallel. The engine never holds its state lock
/// across an external transfer, and the entry guard converts any
/// mutating callback during such a transfer into an immediate
/// rejection.
pub struct StakingEngine {
    /// Stake-token ledger capability
    stake_token: Arc<dyn TokenLedger>,

    /// Reward-token ledger capability
    reward_token: Arc<dyn TokenLedger>,

    /// Per-account records; absent key reads as a zero record
    accounts: Mutex<HashMap<AccountId, StakeAccount>>,

    /// Entry guard for mutating operations
    guard: ReentrancyGuard,

    /// Time source
    clock: Arc<dyn Clock>,

    /// Configuration
    config: Config,

    /// Prometheus metrics
    metrics: Metrics,
}

impl StakingEngine {
    /// Create an engine over the two token-ledger capabilities
    pub fn new(
        config: Config,
        stake_token: Arc<dyn TokenLedger>,
        reward_token: Arc<dyn TokenLedger>,
    ) -> Result<Self> {
        config.validate()?;
        let metrics = Metrics::new()?;

        Ok(Self {
            stake_token,
            reward_token,
            accounts: Mutex::new(HashMap::new()),
            guard: ReentrancyGuard::new(),
            clock: Arc::new(SystemClock),
            config,
            metrics,
        })
    }

    /// Replace the time source (deterministic clocks for tests/demos)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Stake `amount` tokens for `account`
    ///
    /// Pending rewards are folded into the banked balance before the
    /// stake size changes, so past accrual never retroactively applies
    /// to the new size. The caller's stake-token balance must cover the
    /// full amount.
    pub async fn stake(&self, account: &AccountId, amount: Amount) -> Result<()> {
        let _permit = self.enter()?;

        if amount == 0 {
            return Err(Error::InvalidAmount);
        }

        let balance = self.stake_token.balance_of(account).await?;
        if balance < amount {
            warn!(%account, amount, balance, "stake rejected: holdings do not cover amount");
            return Err(Error::InsufficientHoldings(format!(
                "{} holds {}, stake requires {}",
                account, balance, amount
            )));
        }

        let now = self.clock.now_unix();
        let current = self.snapshot(account);
        let updated = self.settled(&current, now)?;
        let updated = StakeAccount {
            staked_amount: updated
                .staked_amount
                .checked_add(amount)
                .ok_or_else(|| Error::AmountOverflow(format!("stake for {}", account)))?,
            ..updated
        };

        // All accounting mutations are committed only after the
        // transfer succeeds; a failure here leaves no trace.
        self.stake_token.transfer_in(account, amount).await?;
        self.commit(account, updated);

        self.metrics.record_stake();
        info!(%account, amount, "stake accepted");
        Ok(())
    }

    /// Withdraw `amount` staked tokens back to `account`
    ///
    /// Reward accrual for the withdrawn period is settled before the
    /// stake size shrinks. The amount must not exceed the staked
    /// balance.
    pub async fn withdraw(&self, account: &AccountId, amount: Amount) -> Result<()> {
        let _permit = self.enter()?;

        if amount == 0 {
            return Err(Error::InvalidAmount);
        }

        let current = self.snapshot(account);
        if current.staked_amount == 0 {
            warn!(%account, "withdraw rejected: no active stake");
            return Err(Error::NoActiveStake(account.to_string()));
        }
        if amount > current.staked_amount {
            warn!(
                %account,
                amount,
                staked = current.staked_amount,
                "withdraw rejected: amount exceeds stake"
            );
            return Err(Error::InsufficientStake(format!(
                "{} has {} staked, withdraw requires {}",
                account, current.staked_amount, amount
            )));
        }

        let now = self.clock.now_unix();
        let updated = self.settled(&current, now)?;
        let updated = StakeAccount {
            staked_amount: updated.staked_amount - amount,
            ..updated
        };

        self.stake_token.transfer_out(account, amount).await?;
        self.commit(account, updated);

        self.metrics.record_withdraw();
        info!(%account, amount, "withdraw complete");
        Ok(())
    }

    /// Pay out all pending and banked rewards for `account`
    ///
    /// Returns the amount paid. The record is zeroed and time-anchored
    /// before the external transfer is issued; if the transfer fails
    /// the prior record is restored exactly.
    pub async fn claim_rewards(&self, account: &AccountId) -> Result<Amount> {
        let _permit = self.enter()?;

        let now = self.clock.now_unix();
        let current = self.snapshot(account);
        let pending = rewards::accrued(
            current.staked_amount,
            self.reward_rate(),
            current.last_update_time,
            now,
        )?;
        let payable = current
            .unclaimed_rewards
            .checked_add(pending)
            .ok_or_else(|| Error::AmountOverflow(format!("claim for {}", account)))?;

        if payable == 0 {
            warn!(%account, "claim rejected: nothing to claim");
            return Err(Error::NothingToClaim(account.to_string()));
        }

        // Anchor before the transfer: a read during the in-flight
        // payout sees zero banked rewards accruing from `now`.
        let anchored = StakeAccount {
            unclaimed_rewards: 0,
            last_update_time: now.max(current.last_update_time),
            ..current.clone()
        };
        self.commit(account, anchored);

        if let Err(e) = self.reward_token.transfer_out(account, payable).await {
            self.commit(account, current);
            warn!(%account, payable, error = %e, "claim payout failed, record restored");
            return Err(e.into());
        }

        self.metrics.record_claim();
        info!(%account, payable, "rewards claimed");
        Ok(payable)
    }

    /// Rewards accrued since the account's last settlement point
    pub fn calculate_rewards(&self, account: &AccountId) -> Result<Amount> {
        let record = self.snapshot(account);
        rewards::accrued(
            record.staked_amount,
            self.reward_rate(),
            record.last_update_time,
            self.clock.now_unix(),
        )
    }

    /// Total payable if `claim_rewards` were called now
    pub fn available_rewards(&self, account: &AccountId) -> Result<Amount> {
        let record = self.snapshot(account);
        let pending = rewards::accrued(
            record.staked_amount,
            self.reward_rate(),
            record.last_update_time,
            self.clock.now_unix(),
        )?;
        record
            .unclaimed_rewards
            .checked_add(pending)
            .ok_or_else(|| Error::AmountOverflow(format!("available rewards for {}", account)))
    }

    /// Currently staked amount for `account`
    pub fn staked_tokens(&self, account: &AccountId) -> Amount {
        self.snapshot(account).staked_amount
    }

    /// Sum of all staked amounts
    ///
    /// Conservation probe: equals the stake-token custody balance at
    /// all times.
    pub fn total_staked(&self) -> Result<Amount> {
        let accounts = self.accounts.lock();
        accounts.values().try_fold(0 as Amount, |acc, record| {
            acc.checked_add(record.staked_amount)
                .ok_or_else(|| Error::AmountOverflow("total staked".to_string()))
        })
    }

    /// Metrics collector for this engine
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Acquire the entry guard or reject
    fn enter(&self) -> Result<crate::guard::EntryPermit<'_>> {
        self.guard.try_enter().ok_or_else(|| {
            self.metrics.record_reentrancy_rejected();
            warn!("mutating operation rejected: another is in flight");
            Error::ReentrancyRejected
        })
    }

    /// Copy of the account record (zero record when absent)
    fn snapshot(&self, account: &AccountId) -> StakeAccount {
        self.accounts.lock().get(account).cloned().unwrap_or_default()
    }

    /// Record with pending rewards folded into the banked balance and
    /// the settlement point advanced to `now`
    ///
    /// The settlement point never moves backwards, even if the host
    /// clock does.
    fn settled(&self, record: &StakeAccount, now: u64) -> Result<StakeAccount> {
        let pending = rewards::accrued(
            record.staked_amount,
            self.reward_rate(),
            record.last_update_time,
            now,
        )?;
        if pending > 0 {
            debug!(pending, "pending rewards folded into banked balance");
        }
        Ok(StakeAccount {
            staked_amount: record.staked_amount,
            unclaimed_rewards: record
                .unclaimed_rewards
                .checked_add(pending)
                .ok_or_else(|| Error::AmountOverflow("banked rewards".to_string()))?,
            last_update_time: now.max(record.last_update_time),
        })
    }

    /// Store the record, dropping it when it has become a zero record
    fn commit(&self, account: &AccountId, record: StakeAccount) {
        let mut accounts = self.accounts.lock();
        if record.is_empty() {
            accounts.remove(account);
        } else {
            accounts.insert(account.clone(), record);
        }
        self.metrics.set_accounts(accounts.len());
    }

    fn reward_rate(&self) -> Amount {
        Amount::from(self.config.reward_rate_per_hour)
    }
}
