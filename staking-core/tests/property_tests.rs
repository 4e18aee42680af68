//! Property-based tests for staking invariants
//!
//! These tests use proptest to verify critical invariants:
//! - Conservation: Σ(staked_amount) == stake-token custody balance
//! - Reward monotonicity: accrual never decreases as time advances
//! - Idempotent flush: repeated reads at one instant agree
//! - Zero-time no-op: no elapsed time means no accrual

use proptest::prelude::*;
use staking_core::{
    clock::ManualClock, rewards, AccountId, Amount, Config, StakingEngine, TokenLedger,
};
use std::sync::Arc;
use token_ledger::InMemoryTokenLedger;

const T0: u64 = 1_700_000_000;
const SEED_BALANCE: Amount = 1_000_000_000_000;
const NAMES: [&str; 3] = ["alice", "bob", "carol"];

/// One step of an adversarial, arbitrarily-ordered call sequence
#[derive(Debug, Clone)]
enum StakeOp {
    Stake(Amount),
    Withdraw(Amount),
    Claim,
    Advance(u64),
}

fn op_strategy() -> impl Strategy<Value = StakeOp> {
    prop_oneof![
        (1u128..500_000u128).prop_map(StakeOp::Stake),
        (1u128..500_000u128).prop_map(StakeOp::Withdraw),
        Just(StakeOp::Claim),
        (1u64..100_000u64).prop_map(StakeOp::Advance),
    ]
}

struct Harness {
    engine: StakingEngine,
    stake_token: Arc<InMemoryTokenLedger>,
    reward_token: Arc<InMemoryTokenLedger>,
    clock: Arc<ManualClock>,
}

/// Engine over in-memory ledgers: every named account seeded with stake
/// tokens, reward custody funded from a treasury.
async fn harness() -> Harness {
    let stake_token = Arc::new(InMemoryTokenLedger::new("STK"));
    let reward_token = Arc::new(InMemoryTokenLedger::new("RWD"));
    let clock = Arc::new(ManualClock::new(T0));

    for name in NAMES {
        stake_token.credit(&AccountId::new(name), SEED_BALANCE).unwrap();
    }

    let treasury = AccountId::new("treasury");
    let reward_pot: Amount = 1_000_000_000_000_000_000_000;
    reward_token.credit(&treasury, reward_pot).unwrap();
    reward_token.transfer_in(&treasury, reward_pot).await.unwrap();

    let engine = StakingEngine::new(
        Config::default(),
        stake_token.clone() as Arc<dyn TokenLedger>,
        reward_token.clone() as Arc<dyn TokenLedger>,
    )
    .unwrap()
    .with_clock(clock.clone());

    Harness {
        engine,
        stake_token,
        reward_token,
        clock,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: for any call sequence, the sum of staked amounts equals
    /// the custody balance after every single step, and no stake token
    /// is created or destroyed.
    #[test]
    fn prop_stake_conservation(ops in prop::collection::vec((0usize..3, op_strategy()), 1..40)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let h = harness().await;

            for (idx, op) in ops {
                let account = AccountId::new(NAMES[idx]);
                match op {
                    StakeOp::Stake(amount) => {
                        let _ = h.engine.stake(&account, amount).await;
                    }
                    StakeOp::Withdraw(amount) => {
                        let _ = h.engine.withdraw(&account, amount).await;
                    }
                    StakeOp::Claim => {
                        let _ = h.engine.claim_rewards(&account).await;
                    }
                    StakeOp::Advance(secs) => {
                        h.clock.advance(secs);
                    }
                }

                // Custody mirrors the accounting at every step
                prop_assert_eq!(
                    h.engine.total_staked().unwrap(),
                    h.stake_token.custody_balance()
                );

                // Stake tokens are conserved across external balances and custody
                let mut external: Amount = 0;
                for name in NAMES {
                    external += h.stake_token.balance_of(&AccountId::new(name)).await.unwrap();
                }
                prop_assert_eq!(
                    external + h.stake_token.custody_balance(),
                    SEED_BALANCE * NAMES.len() as Amount
                );
            }
            Ok(())
        })?;
    }

    /// Property: accrual is non-decreasing in time for a fixed record
    #[test]
    fn prop_reward_monotonicity(
        staked in 1u128..10_000_000u128,
        earlier in 0u64..1_000_000u64,
        delta in 0u64..1_000_000u64,
    ) {
        let rate: Amount = 100_000;
        let a = rewards::accrued(staked, rate, 0, earlier).unwrap();
        let b = rewards::accrued(staked, rate, 0, earlier + delta).unwrap();
        prop_assert!(b >= a);
    }

    /// Property: reading available rewards is a pure query; two reads at
    /// one instant agree
    #[test]
    fn prop_available_rewards_idempotent(
        staked in 1u128..1_000_000u128,
        elapsed in 0u64..1_000_000u64,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let h = harness().await;
            let alice = AccountId::new("alice");

            h.engine.stake(&alice, staked).await.unwrap();
            h.clock.advance(elapsed);

            let first = h.engine.available_rewards(&alice).unwrap();
            let second = h.engine.available_rewards(&alice).unwrap();
            prop_assert_eq!(first, second);
            Ok(())
        })?;
    }

    /// Property: zero elapsed time accrues exactly zero, whatever the stake
    #[test]
    fn prop_zero_time_no_op(staked in 0u128..u64::MAX as u128, at in 0u64..u64::MAX) {
        prop_assert_eq!(rewards::accrued(staked, 100_000, at, at).unwrap(), 0);
    }

    /// Property: accrual is linear in the staked amount
    #[test]
    fn prop_accrual_linear_in_stake(
        staked in 1u128..1_000_000u128,
        elapsed in 1u64..1_000_000u64,
    ) {
        let rate: Amount = 3_600; // one wei per token-second keeps division exact
        let single = rewards::accrued(staked, rate, 0, elapsed).unwrap();
        let double = rewards::accrued(staked * 2, rate, 0, elapsed).unwrap();
        prop_assert_eq!(double, single * 2);
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use staking_core::Error;

    #[tokio::test]
    async fn test_one_hour_accrual_and_claim() {
        let h = harness().await;
        let alice = AccountId::new("alice");

        h.engine.stake(&alice, 100).await.unwrap();
        h.clock.advance(3_600);

        // floor(3600 * 100 * 100_000 / 3600)
        assert_eq!(h.engine.calculate_rewards(&alice).unwrap(), 10_000_000);

        let paid = h.engine.claim_rewards(&alice).await.unwrap();
        assert_eq!(paid, 10_000_000);
        assert_eq!(h.reward_token.balance_of(&alice).await.unwrap(), 10_000_000);

        // Zeroed and anchored at T+3600: a fresh hour accrues the same again
        assert_eq!(h.engine.available_rewards(&alice).unwrap(), 0);
        h.clock.advance(3_600);
        assert_eq!(h.engine.calculate_rewards(&alice).unwrap(), 10_000_000);
    }

    #[tokio::test]
    async fn test_withdraw_with_no_stake_leaves_state_untouched() {
        let h = harness().await;
        let bob = AccountId::new("bob");

        let err = h.engine.withdraw(&bob, 1).await.unwrap_err();
        assert!(matches!(err, Error::NoActiveStake(_)));

        assert_eq!(h.engine.staked_tokens(&bob), 0);
        assert_eq!(h.engine.total_staked().unwrap(), 0);
        assert_eq!(h.stake_token.custody_balance(), 0);
        assert_eq!(h.stake_token.balance_of(&bob).await.unwrap(), SEED_BALANCE);
    }

    #[tokio::test]
    async fn test_two_step_stake_folds_pending_before_resize() {
        let h = harness().await;
        let carol = AccountId::new("carol");

        h.engine.stake(&carol, 50).await.unwrap();
        h.clock.advance(1_800);

        // 50 * 1800 * 100_000 / 3600 banked before the stake becomes 100
        h.engine.stake(&carol, 50).await.unwrap();
        assert_eq!(h.engine.staked_tokens(&carol), 100);
        assert_eq!(h.engine.available_rewards(&carol).unwrap(), 2_500_000);

        // Subsequent accrual applies the rate to 100, not 50
        h.clock.advance(3_600);
        assert_eq!(h.engine.calculate_rewards(&carol).unwrap(), 10_000_000);
        assert_eq!(h.engine.available_rewards(&carol).unwrap(), 12_500_000);
    }

    #[tokio::test]
    async fn test_claim_then_withdraw_full_cycle() {
        let h = harness().await;
        let alice = AccountId::new("alice");

        h.engine.stake(&alice, 1_000).await.unwrap();
        h.clock.advance(7_200);

        let paid = h.engine.claim_rewards(&alice).await.unwrap();
        assert_eq!(paid, 200_000_000);

        h.engine.withdraw(&alice, 1_000).await.unwrap();
        assert_eq!(h.stake_token.balance_of(&alice).await.unwrap(), SEED_BALANCE);
        assert_eq!(h.engine.total_staked().unwrap(), 0);
        assert_eq!(h.stake_token.custody_balance(), 0);
    }
}
