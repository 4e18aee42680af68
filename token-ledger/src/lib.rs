//! StakeRail Token Ledger Interface
//!
//! Capability surface for the two fungible-token ledgers the staking
//! engine depends on. The engine never touches external balances
//! directly: it consumes a transfer-in capability, a transfer-out
//! capability, and a balance query, all behind the [`TokenLedger`]
//! trait so hosts can plug in whatever settlement backend they run.
//!
//! [`InMemoryTokenLedger`] is the reference implementation used by the
//! test suites and the demo orchestrator.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod error;
pub mod memory;
pub mod types;

use async_trait::async_trait;

// Re-exports
pub use error::{LedgerError, Result};
pub use memory::InMemoryTokenLedger;
pub use types::{AccountId, Amount};

/// A fungible-token ledger holding external balances plus a custody
/// balance owned by the consumer of this trait.
///
/// Implementations must apply each transfer atomically: either both
/// sides of the movement happen or the call fails with no effect.
#[async_trait]
pub trait TokenLedger: Send + Sync {
    /// Move `amount` from `from`'s external balance into custody.
    ///
    /// Fails with [`LedgerError::InsufficientBalance`] if `from` cannot
    /// cover the amount.
    async fn transfer_in(&self, from: &AccountId, amount: Amount) -> Result<()>;

    /// Move `amount` from custody to `to`'s external balance.
    ///
    /// Fails with [`LedgerError::InsufficientCustody`] if custody lacks
    /// the amount.
    async fn transfer_out(&self, to: &AccountId, amount: Amount) -> Result<()>;

    /// External balance held by `account`. Absent accounts read as zero.
    async fn balance_of(&self, account: &AccountId) -> Result<Amount>;
}
