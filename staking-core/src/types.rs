//! Account records held by the engine

use serde::{Deserialize, Serialize};
use token_ledger::Amount;

/// Per-account staking record
///
/// Records spring into existence as zero records on first use; a record
/// with zero stake and zero unclaimed rewards is indistinguishable from
/// one that never existed, and the engine drops such records from its map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeAccount {
    /// Stake tokens currently held in custody for this account
    pub staked_amount: Amount,

    /// Rewards computed and banked but not yet paid out
    pub unclaimed_rewards: Amount,

    /// Unix time (seconds) at which pending rewards were last folded
    /// into `unclaimed_rewards`; never decreases
    pub last_update_time: u64,
}

impl StakeAccount {
    /// True when the record carries no balances.
    ///
    /// The timestamp is deliberately ignored: once both balances reach
    /// zero the record is dropped, so a later stake starts a fresh
    /// accrual window.
    pub fn is_empty(&self) -> bool {
        self.staked_amount == 0 && self.unclaimed_rewards == 0
    }
}
