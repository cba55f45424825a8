//! Gauge registry and cumulative minted amounts.
//!
//! The registry owns the handle of every registered gauge, so a mint can
//! only ever checkpoint and read the gauge the admin registered under an id.
//! `minted[(user, gauge)]` only ever moves up to that gauge's reported
//! `integrate_fraction`, so `minted <= integrate_fraction` always holds.

use shared_types::{Address, GaugeHandle, GaugeId, U256};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Outcome of [`MintLedger::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    /// The same handle was already registered under this id.
    Unchanged,
    /// A different handle is registered under this id.
    Conflict,
}

#[derive(Clone, Default)]
pub struct MintLedger {
    registered: BTreeMap<GaugeId, GaugeHandle>,
    minted: HashMap<(Address, GaugeId), U256>,
}

impl fmt::Debug for MintLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MintLedger")
            .field("registered", &self.registered.keys().collect::<Vec<_>>())
            .field("minted", &self.minted.len())
            .finish()
    }
}

impl MintLedger {
    pub fn register(&mut self, gauge: GaugeId, handle: GaugeHandle) -> Registration {
        match self.registered.get(&gauge) {
            Some(existing) if Arc::ptr_eq(existing, &handle) => Registration::Unchanged,
            Some(_) => Registration::Conflict,
            None => {
                self.registered.insert(gauge, handle);
                Registration::Added
            }
        }
    }

    /// Returns `false` if the gauge was not registered.
    pub fn deregister(&mut self, gauge: &GaugeId) -> bool {
        self.registered.remove(gauge).is_some()
    }

    pub fn is_registered(&self, gauge: &GaugeId) -> bool {
        self.registered.contains_key(gauge)
    }

    /// The handle registered under `gauge`.
    pub fn handle(&self, gauge: &GaugeId) -> Option<GaugeHandle> {
        self.registered.get(gauge).cloned()
    }

    pub fn registered(&self) -> impl Iterator<Item = &GaugeId> {
        self.registered.keys()
    }

    pub fn minted(&self, user: &Address, gauge: &GaugeId) -> U256 {
        self.minted.get(&(*user, *gauge)).copied().unwrap_or_default()
    }

    pub fn record(&mut self, user: Address, gauge: GaugeId, total: U256) {
        self.minted.insert((user, gauge), total);
    }
}
