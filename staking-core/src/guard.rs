//! Re-entrancy guard for mutating entry points
//!
//! A transfer issued by the engine may call back into the engine before
//! the original operation returns. The guard turns any such mutating
//! re-entry into an immediate rejection: acquisition never blocks or
//! queues, and the permit releases on every exit path including panics.

use std::sync::atomic::{AtomicBool, Ordering};

/// Engine-wide mutual-exclusion gate
///
/// Scoped to the engine, not to individual accounts: a callback staking
/// for a different account during an in-flight withdraw is rejected too.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    held: AtomicBool,
}

impl ReentrancyGuard {
    /// Create a released guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to acquire the guard
    ///
    /// Returns `None` without blocking when the guard is already held.
    pub fn try_enter(&self) -> Option<EntryPermit<'_>> {
        self.held
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| EntryPermit { guard: self })
    }
}

/// Proof of guard acquisition; releases the guard on drop
#[derive(Debug)]
pub struct EntryPermit<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for EntryPermit<'_> {
    fn drop(&mut self) {
        self.guard.held.store(false, Ordering::Release);
    }
}
