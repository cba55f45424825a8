//! Boosted working balance and kick eligibility.
//!
//! ```text
//! working = min(balance * M, balance + total_stake * v / V * (M - 1))
//! ```
//!
//! `M` is the maximum boost, `v` the user's vote weight and `V` the total vote
//! weight. The result never drops below `balance` and never exceeds
//! `balance * M`; it is monotone non-decreasing in `v`.

use serde::{Deserialize, Serialize};
use shared_types::{math, ArithmeticError, Timestamp, BPS, U256};

/// Default maximum boost, 2.5x.
pub const DEFAULT_MAX_BOOST_BPS: u32 = 25_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostParams {
    /// Maximum boost in basis points; `10_000` disables boosting.
    pub max_boost_bps: u32,
    /// Seconds after a user's last checkpoint after which anyone may kick them.
    pub kick_grace_period: Option<u64>,
}

impl Default for BoostParams {
    fn default() -> Self {
        Self {
            max_boost_bps: DEFAULT_MAX_BOOST_BPS,
            kick_grace_period: None,
        }
    }
}

impl BoostParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_boost_bps < BPS {
            return Err(format!(
                "max_boost_bps {} is below {BPS} (1x)",
                self.max_boost_bps
            ));
        }
        if self.kick_grace_period == Some(0) {
            return Err("kick_grace_period must be positive when set".into());
        }
        Ok(())
    }
}

/// Vote weights read at checkpoint time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoteSnapshot {
    pub user_weight: U256,
    pub total_weight: U256,
}

/// Working balance for `balance`, given the stake total after the change.
pub fn working_balance(
    balance: U256,
    total_stake: U256,
    votes: VoteSnapshot,
    params: &BoostParams,
) -> Result<U256, ArithmeticError> {
    if votes.user_weight.is_zero() || votes.total_weight.is_zero() || balance.is_zero() {
        return Ok(balance);
    }
    let max_boost = U256::from(params.max_boost_bps);
    let bps = U256::from(BPS);
    let cap = math::mul_div(balance, max_boost, bps, "boost cap")?;

    let stake_share = math::mul_div(total_stake, votes.user_weight, votes.total_weight, "boost share")?;
    let headroom = math::sub(max_boost, bps, "boost headroom")?;
    let extra = math::mul_div(stake_share, headroom, bps, "boost extra")?;
    let boosted = math::add(balance, extra, "boost")?;

    Ok(boosted.min(cap).max(balance))
}

/// Inputs to the kick eligibility check.
#[derive(Clone, Copy, Debug)]
pub struct KickInputs {
    pub user_weight: U256,
    pub last_lock_update: Option<Timestamp>,
    pub last_checkpoint: Timestamp,
    pub now: Timestamp,
}

/// A cached boost may be forced down once it can no longer be legitimate.
///
/// That is the case when the user's vote weight has decayed to zero, when
/// their lock changed after their last checkpoint, or when the configured
/// grace period since that checkpoint has elapsed.
pub fn kick_allowed(inputs: &KickInputs, params: &BoostParams) -> bool {
    if inputs.user_weight.is_zero() {
        return true;
    }
    if inputs
        .last_lock_update
        .is_some_and(|updated| updated > inputs.last_checkpoint)
    {
        return true;
    }
    params
        .kick_grace_period
        .is_some_and(|grace| inputs.now >= inputs.last_checkpoint.saturating_add(grace))
}
