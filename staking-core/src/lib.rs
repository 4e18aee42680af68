//! StakeRail Staking Core
//!
//! Staking/reward accounting engine: tracks per-account staked balances
//! in a stake token and accrues time-proportional rewards paid in a
//! reward token. Token movement itself is delegated to two
//! [`token_ledger::TokenLedger`] capabilities; this crate owns only the
//! accounting state machine.
//!
//! # Invariants
//!
//! - Conservation: Σ(staked_amount) == stake-token custody balance, always
//! - Reward settlement: pending rewards are flushed before any stake-size change
//! - Atomicity: a failed external transfer leaves no accounting state behind
//! - Timestamps: per-account last-update times never move backwards
//!
//! # Re-entrancy
//!
//! Every mutating entry point takes an engine-wide guard. A transfer
//! callback that re-enters `stake`, `withdraw`, or `claim_rewards` is
//! rejected immediately with no partial effect; read-only queries stay
//! callable throughout.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod guard;
pub mod metrics;
pub mod rewards;
pub mod types;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use engine::StakingEngine;
pub use error::{Error, Result};
pub use metrics::Metrics;
pub use token_ledger::{AccountId, Amount, TokenLedger};
pub use types::StakeAccount;
