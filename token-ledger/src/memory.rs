//! In-memory token ledger
//!
//! Reference implementation backing the test suites and the demo
//! orchestrator. External balances live in a map; the custody balance
//! is a single counter owned by whoever holds the ledger handle.

use crate::error::{LedgerError, Result};
use crate::types::{AccountId, Amount};
use crate::TokenLedger;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// In-memory fungible-token ledger
pub struct InMemoryTokenLedger {
    /// Token name (for log lines only)
    name: String,

    /// External balances by account
    balances: RwLock<HashMap<AccountId, Amount>>,

    /// Amount currently held in custody
    custody: RwLock<Amount>,
}

impl InMemoryTokenLedger {
    /// Create an empty ledger
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            balances: RwLock::new(HashMap::new()),
            custody: RwLock::new(0),
        }
    }

    /// Credit `amount` to `account`'s external balance (seeding helper)
    pub fn credit(&self, account: &AccountId, amount: Amount) -> Result<()> {
        let mut balances = self.balances.write();
        let balance = balances.entry(account.clone()).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow(account.to_string()))?;
        Ok(())
    }

    /// Amount currently held in custody
    pub fn custody_balance(&self) -> Amount {
        *self.custody.read()
    }

    /// Token name
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl TokenLedger for InMemoryTokenLedger {
    async fn transfer_in(&self, from: &AccountId, amount: Amount) -> Result<()> {
        let mut balances = self.balances.write();
        let balance = balances.entry(from.clone()).or_insert(0);
        if *balance < amount {
            return Err(LedgerError::InsufficientBalance(format!(
                "{} holds {} {}, transfer requires {}",
                from, balance, self.name, amount
            )));
        }

        let mut custody = self.custody.write();
        let new_custody = custody
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow(self.name.clone()))?;

        *balance -= amount;
        *custody = new_custody;

        debug!(token = %self.name, %from, amount, "transfer into custody");
        Ok(())
    }

    async fn transfer_out(&self, to: &AccountId, amount: Amount) -> Result<()> {
        // Lock order must match transfer_in: balances before custody.
        let mut balances = self.balances.write();
        let mut custody = self.custody.write();
        if *custody < amount {
            return Err(LedgerError::InsufficientCustody(format!(
                "custody holds {} {}, transfer requires {}",
                *custody, self.name, amount
            )));
        }

        let balance = balances.entry(to.clone()).or_insert(0);
        let new_balance = balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow(to.to_string()))?;

        *custody -= amount;
        *balance = new_balance;

        debug!(token = %self.name, %to, amount, "transfer out of custody");
        Ok(())
    }

    async fn balance_of(&self, account: &AccountId) -> Result<Amount> {
        Ok(self.balances.read().get(account).copied().unwrap_or(0))
    }
}
