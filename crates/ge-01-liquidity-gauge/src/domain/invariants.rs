//! # Domain Invariants
//!
//! Accounting rules that hold after every successful gauge operation.

use super::boost::BoostParams;
use super::journal::IntegralJournal;
use super::position::UserPosition;
use shared_types::{BPS, U256};

/// Invariant: `working_supply == Σ working_balance`.
pub fn invariant_working_supply<'a>(
    positions: impl IntoIterator<Item = &'a UserPosition>,
    working_supply: U256,
) -> bool {
    sum(positions.into_iter().map(|p| p.working_balance)) == Some(working_supply)
}

/// Invariant: `total_stake == Σ balance`.
pub fn invariant_total_stake<'a>(
    positions: impl IntoIterator<Item = &'a UserPosition>,
    total_stake: U256,
) -> bool {
    sum(positions.into_iter().map(|p| p.balance)) == Some(total_stake)
}

/// Invariant: `balance <= working_balance <= balance * M` for a settled row.
pub fn invariant_working_bounds(position: &UserPosition, params: &BoostParams) -> bool {
    let cap = position
        .balance
        .checked_mul(U256::from(params.max_boost_bps))
        .map(|scaled| scaled / U256::from(BPS));
    position.working_balance >= position.balance && cap.is_some_and(|cap| position.working_balance <= cap)
}

/// Invariant: journal timestamps strictly increase and the integral never decreases.
pub fn invariant_journal_ordered(journal: &IntegralJournal) -> bool {
    let entries: Vec<_> = journal.iter().collect();
    entries.windows(2).all(|pair| {
        pair[1].period == pair[0].period + 1
            && pair[1].timestamp > pair[0].timestamp
            && pair[1].integrate_inv_supply >= pair[0].integrate_inv_supply
    })
}

fn sum(mut values: impl Iterator<Item = U256>) -> Option<U256> {
    values.try_fold(U256::zero(), |acc, v| acc.checked_add(v))
}
