//! Metrics collection for observability
//!
//! Prometheus counters for the engine's mutating operations.
//!
//! # Metrics
//!
//! - `staking_stakes_total` - Successful stake operations
//! - `staking_withdrawals_total` - Successful withdraw operations
//! - `staking_claims_total` - Successful reward claims
//! - `staking_reentrancy_rejected_total` - Mutations rejected by the entry guard
//! - `staking_accounts` - Accounts with a live record

use prometheus::{IntCounter, IntGauge, Registry};
use std::sync::Arc;

/// Metrics collector
///
/// Counters are registered on an owned registry so multiple engine
/// instances can coexist in one process.
#[derive(Clone)]
pub struct Metrics {
    /// Successful stakes
    pub stakes_total: IntCounter,

    /// Successful withdrawals
    pub withdrawals_total: IntCounter,

    /// Successful claims
    pub claims_total: IntCounter,

    /// Mutations rejected by the entry guard
    pub reentrancy_rejected_total: IntCounter,

    /// Accounts with a live record
    pub accounts: IntGauge,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let stakes_total =
            IntCounter::new("staking_stakes_total", "Successful stake operations")?;
        registry.register(Box::new(stakes_total.clone()))?;

        let withdrawals_total =
            IntCounter::new("staking_withdrawals_total", "Successful withdraw operations")?;
        registry.register(Box::new(withdrawals_total.clone()))?;

        let claims_total = IntCounter::new("staking_claims_total", "Successful reward claims")?;
        registry.register(Box::new(claims_total.clone()))?;

        let reentrancy_rejected_total = IntCounter::new(
            "staking_reentrancy_rejected_total",
            "Mutations rejected by the entry guard",
        )?;
        registry.register(Box::new(reentrancy_rejected_total.clone()))?;

        let accounts = IntGauge::new("staking_accounts", "Accounts with a live record")?;
        registry.register(Box::new(accounts.clone()))?;

        Ok(Self {
            stakes_total,
            withdrawals_total,
            claims_total,
            reentrancy_rejected_total,
            accounts,
            registry,
        })
    }

    /// Record a successful stake
    pub fn record_stake(&self) {
        self.stakes_total.inc();
    }

    /// Record a successful withdraw
    pub fn record_withdraw(&self) {
        self.withdrawals_total.inc();
    }

    /// Record a successful claim
    pub fn record_claim(&self) {
        self.claims_total.inc();
    }

    /// Record a guard rejection
    pub fn record_reentrancy_rejected(&self) {
        self.reentrancy_rejected_total.inc();
    }

    /// Update the live-account gauge
    pub fn set_accounts(&self, count: usize) {
        self.accounts.set(count as i64);
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
