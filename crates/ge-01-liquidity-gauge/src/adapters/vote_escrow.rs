//! # In-Memory Vote Escrow
//!
//! Linearly decaying lock weights:
//!
//! ```text
//! weight(at) = amount * (end - at) / MAX_LOCK_TIME   for at < end, else 0
//! ```
//!
//! Lock ends are rounded down to a week boundary.

use crate::ports::outbound::VoteWeight;
use parking_lot::RwLock;
use shared_types::{math, week_start, Address, ArithmeticError, Timestamp, U256};
use std::collections::HashMap;

/// Longest allowed lock, four years.
pub const MAX_LOCK_TIME: Timestamp = 4 * 365 * 86_400;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LockedBalance {
    pub amount: U256,
    pub end: Timestamp,
    /// Last time the lock was created or changed.
    pub updated: Timestamp,
}

impl LockedBalance {
    fn weight_at(&self, at: Timestamp) -> U256 {
        if at >= self.end {
            return U256::zero();
        }
        let remaining = (self.end - at).min(MAX_LOCK_TIME);
        math::mul_div(
            self.amount,
            U256::from(remaining),
            U256::from(MAX_LOCK_TIME),
            "lock weight",
        )
        .unwrap_or(U256::MAX)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryVoteEscrow {
    locks: RwLock<HashMap<Address, LockedBalance>>,
}

impl InMemoryVoteEscrow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks `amount` until `unlock_time`, replacing any expired lock.
    pub fn create_lock(&self, user: Address, amount: U256, unlock_time: Timestamp, now: Timestamp) {
        let end = week_start(unlock_time).min(week_start(now + MAX_LOCK_TIME));
        self.locks.write().insert(
            user,
            LockedBalance {
                amount,
                end,
                updated: now,
            },
        );
    }

    pub fn increase_amount(&self, user: Address, amount: U256, now: Timestamp) -> Result<(), ArithmeticError> {
        let mut locks = self.locks.write();
        let lock = locks.entry(user).or_default();
        lock.amount = math::add(lock.amount, amount, "locked amount")?;
        lock.updated = now;
        Ok(())
    }

    pub fn increase_unlock_time(&self, user: Address, unlock_time: Timestamp, now: Timestamp) {
        let mut locks = self.locks.write();
        let lock = locks.entry(user).or_default();
        lock.end = lock.end.max(week_start(unlock_time));
        lock.updated = now;
    }

    pub fn lock_of(&self, user: &Address) -> Option<LockedBalance> {
        self.locks.read().get(user).copied()
    }
}

impl VoteWeight for InMemoryVoteEscrow {
    fn balance_of(&self, user: &Address, at: Timestamp) -> U256 {
        self.locks
            .read()
            .get(user)
            .map(|lock| lock.weight_at(at))
            .unwrap_or_default()
    }

    fn total_supply(&self, at: Timestamp) -> U256 {
        self.locks
            .read()
            .values()
            .fold(U256::zero(), |acc, lock| acc.saturating_add(lock.weight_at(at)))
    }

    fn last_lock_update(&self, user: &Address) -> Option<Timestamp> {
        self.locks.read().get(user).map(|lock| lock.updated)
    }
}
