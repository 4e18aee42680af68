//! Error types for token-ledger operations

use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Token-ledger errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Sender balance cannot cover a transfer-in
    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    /// Custody cannot cover a transfer-out
    #[error("Insufficient custody: {0}")]
    InsufficientCustody(String),

    /// A balance would exceed the representable range
    #[error("Balance overflow: {0}")]
    BalanceOverflow(String),

    /// Downstream ledger rejected the operation
    #[error("Transfer rejected: {0}")]
    Rejected(String),
}
