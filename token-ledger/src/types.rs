//! Core types shared by ledger implementations and their consumers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token quantity.
///
/// All balances and reward quantities are unsigned 128-bit integers;
/// arithmetic on them is always checked, never wrapping.
pub type Amount = u128;

/// Account identifier (opaque to the ledger)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create new account ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
