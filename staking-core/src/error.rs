//! Error types for the staking engine

use thiserror::Error;

/// Result type for staking operations
pub type Result<T> = std::result::Result<T, Error>;

/// Staking engine errors
///
/// Every error is surfaced synchronously to the caller and always means
/// the operation left no partial state behind.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller's stake-token balance cannot cover the stake
    #[error("Insufficient holdings: {0}")]
    InsufficientHoldings(String),

    /// Withdraw attempted with no stake on record
    #[error("No active stake: {0}")]
    NoActiveStake(String),

    /// Withdraw amount exceeds the staked balance
    #[error("Insufficient stake: {0}")]
    InsufficientStake(String),

    /// Claim attempted with zero payable rewards
    #[error("Nothing to claim: {0}")]
    NothingToClaim(String),

    /// A guarded operation was invoked while one is already in flight
    #[error("Operation already in flight for this engine")]
    ReentrancyRejected,

    /// Zero-amount stake or withdraw
    #[error("Amount must be positive")]
    InvalidAmount,

    /// Arithmetic exceeded the representable range
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    /// Downstream token-ledger transfer failed; the operation was rolled back
    #[error("Transfer failed: {0}")]
    Transfer(#[from] token_ledger::LedgerError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Metrics registry error
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
