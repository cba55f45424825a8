//! # Reward Integral Tracker
//!
//! Advances the [`IntegralJournal`] to the present and settles users against
//! it.
//!
//! ## Advance
//!
//! The interval since the journal head is cut at every week boundary. Each
//! week uses the relative weight sampled at its start; inside a week the
//! interval is further cut at emission rate changes. One entry is appended
//! per boundary crossed plus one at `now`.
//!
//! ```text
//! Δintegral = rate * relative_weight * dt / working_supply
//! ```
//!
//! Both `rate * weight` and the integral carry the 1e18 `PRECISION` scale.
//! With a zero working supply nothing accrues. After `max_weeks` boundary
//! entries the remaining interval is closed at `now` without accrual.

use crate::domain::journal::IntegralJournal;
use crate::domain::position::UserPosition;
use crate::ports::outbound::ShareWeight;
use shared_types::{
    math, next_week_boundary, week_start, ArithmeticError, EmissionRateSource, GaugeId, Timestamp,
    PRECISION, U256,
};
use tracing::warn;

/// Everything a journal advance reads.
pub struct AdvanceInputs<'a> {
    pub gauge: GaugeId,
    pub now: Timestamp,
    pub working_supply: U256,
    pub rate: &'a dyn EmissionRateSource,
    pub shares: &'a dyn ShareWeight,
    pub max_weeks: u32,
}

/// Integral accrued over `[from, to)` at a single relative weight.
fn accrue_window(
    from: Timestamp,
    to: Timestamp,
    weight: U256,
    inputs: &AdvanceInputs<'_>,
) -> Result<U256, ArithmeticError> {
    let mut accrued = U256::zero();
    if inputs.working_supply.is_zero() || weight.is_zero() {
        return Ok(accrued);
    }
    let mut cursor = from;
    while cursor < to {
        let segment_end = match inputs.rate.next_rate_change(cursor) {
            Some(change) if change > cursor && change < to => change,
            _ => to,
        };
        let rate = inputs.rate.rate_at(cursor);
        if !rate.is_zero() {
            let dt = U256::from(segment_end - cursor);
            let emitted = math::mul(math::mul(rate, weight, "rate weight")?, dt, "rate weight dt")?;
            let step = emitted / inputs.working_supply;
            accrued = math::add(accrued, step, "integrate_inv_supply")?;
        }
        cursor = segment_end;
    }
    Ok(accrued)
}

/// Appends journal entries up to `now`. Returns the number appended.
pub fn advance(journal: &mut IntegralJournal, inputs: &AdvanceInputs<'_>) -> Result<usize, ArithmeticError> {
    let head = *journal.head();
    if inputs.now <= head.timestamp {
        return Ok(0);
    }

    // Computed first so a failure leaves the journal untouched.
    let mut pending = Vec::new();
    let mut cursor = head.timestamp;
    let mut integral = head.integrate_inv_supply;
    let mut weeks = 0u32;
    while cursor < inputs.now {
        if weeks >= inputs.max_weeks {
            warn!(
                gauge = ?inputs.gauge,
                from = cursor,
                to = inputs.now,
                "checkpoint week limit reached, closing interval without accrual"
            );
            pending.push((inputs.now, integral));
            break;
        }
        let window_end = next_week_boundary(cursor).min(inputs.now);
        let weight = inputs.shares.relative_weight(&inputs.gauge, week_start(cursor));
        let accrued = accrue_window(cursor, window_end, weight, inputs)?;
        integral = math::add(integral, accrued, "integrate_inv_supply")?;
        pending.push((window_end, integral));
        cursor = window_end;
        weeks += 1;
    }

    let appended = pending.len();
    for (timestamp, value) in pending {
        journal.push(timestamp, value, inputs.working_supply);
    }
    Ok(appended)
}

/// Folds accrual since the user's last checkpoint into `integrate_fraction`.
///
/// Returns the amount newly accrued.
pub fn settle(position: &mut UserPosition, journal: &IntegralJournal) -> Result<U256, ArithmeticError> {
    let head = journal.head();
    let delta = math::sub(
        head.integrate_inv_supply,
        position.integrate_inv_supply_of,
        "integral delta",
    )?;
    let accrued = math::mul_div(position.working_balance, delta, PRECISION, "integrate_fraction")?;
    position.integrate_fraction = math::add(position.integrate_fraction, accrued, "integrate_fraction")?;
    position.integrate_inv_supply_of = head.integrate_inv_supply;
    position.integrate_checkpoint_of = head.timestamp;
    Ok(accrued)
}
