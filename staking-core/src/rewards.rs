//! Pure reward accrual math
//!
//! Rewards accrue linearly in staked amount and elapsed time:
//!
//! ```text
//! rewards = floor(elapsed_secs * staked_amount * rate_per_hour / 3600)
//! ```
//!
//! where the rate is denominated in reward-token wei per staked token
//! per hour. All arithmetic is checked u128; floor division loses at
//! most one hour-fraction of a single token's accrual.

use crate::error::{Error, Result};
use token_ledger::Amount;

/// Seconds per rate period
pub const SECONDS_PER_HOUR: u64 = 3_600;

/// Rewards accrued by `staked_amount` between `last_update_time` and `now`.
///
/// Returns 0 when no time has elapsed or nothing is staked. A clock
/// reading earlier than `last_update_time` counts as zero elapsed time
/// rather than wrapping.
pub fn accrued(
    staked_amount: Amount,
    rate_per_hour: Amount,
    last_update_time: u64,
    now: u64,
) -> Result<Amount> {
    if staked_amount == 0 {
        return Ok(0);
    }

    let elapsed = Amount::from(now.saturating_sub(last_update_time));
    elapsed
        .checked_mul(staked_amount)
        .and_then(|v| v.checked_mul(rate_per_hour))
        .map(|v| v / Amount::from(SECONDS_PER_HOUR))
        .ok_or_else(|| {
            Error::AmountOverflow(format!(
                "reward accrual over {} seconds on stake {}",
                elapsed, staked_amount
            ))
        })
}
