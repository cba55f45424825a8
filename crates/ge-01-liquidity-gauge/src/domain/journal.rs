//! # Integral Journal
//!
//! Append-only, time-ordered record of the cumulative integral of
//! `rate * relative_weight / working_supply`, scaled by `PRECISION`.
//!
//! Entry 0 is written at gauge creation with a zero integral. Later entries
//! are appended at each week boundary crossed and at the time of the
//! checkpoint that crossed them. Timestamps strictly increase and the
//! integral never decreases, so point-in-time lookups are a binary search.

use serde::{Deserialize, Serialize};
use shared_types::{Timestamp, U256};

/// One period boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub period: u64,
    pub timestamp: Timestamp,
    pub integrate_inv_supply: U256,
    /// Working supply that was in effect while this entry's interval accrued.
    pub working_supply: U256,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntegralJournal {
    entries: Vec<JournalEntry>,
    head: JournalEntry,
}

impl IntegralJournal {
    pub fn new(genesis: Timestamp) -> Self {
        let head = JournalEntry {
            period: 0,
            timestamp: genesis,
            integrate_inv_supply: U256::zero(),
            working_supply: U256::zero(),
        };
        Self {
            entries: vec![head],
            head,
        }
    }

    /// Latest entry.
    pub fn head(&self) -> &JournalEntry {
        &self.head
    }

    pub fn period(&self) -> u64 {
        self.head.period
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, period: u64) -> Option<&JournalEntry> {
        usize::try_from(period)
            .ok()
            .and_then(|index| self.entries.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    /// Appends a new period. Callers guarantee `timestamp > head.timestamp`
    /// and a non-decreasing integral.
    pub(crate) fn push(
        &mut self,
        timestamp: Timestamp,
        integrate_inv_supply: U256,
        working_supply: U256,
    ) -> &JournalEntry {
        debug_assert!(timestamp > self.head.timestamp);
        debug_assert!(integrate_inv_supply >= self.head.integrate_inv_supply);
        self.head = JournalEntry {
            period: self.head.period + 1,
            timestamp,
            integrate_inv_supply,
            working_supply,
        };
        self.entries.push(self.head);
        &self.head
    }

    /// Drops every entry from index `len` on, keeping at least genesis.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len.max(1));
        if let Some(last) = self.entries.last() {
            self.head = *last;
        }
    }

    /// Latest entry whose timestamp is `<= at`, or `None` before genesis.
    pub fn at(&self, at: Timestamp) -> Option<&JournalEntry> {
        let index = self.entries.partition_point(|entry| entry.timestamp <= at);
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Integral accrued between two recorded points in time.
    pub fn integral_between(&self, from: Timestamp, to: Timestamp) -> Option<U256> {
        let start = self.at(from)?;
        let end = self.at(to)?;
        end.integrate_inv_supply
            .checked_sub(start.integrate_inv_supply)
    }
}
