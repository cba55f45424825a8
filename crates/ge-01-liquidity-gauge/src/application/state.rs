//! Live gauge state.
//!
//! Operations change this struct in place through a
//! [`StagedWrite`](super::staged::StagedWrite), which records the prior value
//! of every row it touches and restores them if the operation fails.

use super::secondary::SecondaryRewardAdapter;
use crate::domain::{IntegralJournal, UserPosition};
use shared_types::{Address, Timestamp, U256};
use std::collections::HashMap;

#[derive(Debug)]
pub struct GaugeState {
    pub admin: Address,
    pub future_admin: Option<Address>,
    pub total_stake: U256,
    pub working_supply: U256,
    pub journal: IntegralJournal,
    pub positions: HashMap<Address, UserPosition>,
    /// `(owner, spender) -> amount`
    pub allowances: HashMap<(Address, Address), U256>,
    pub secondary: SecondaryRewardAdapter,
}

impl GaugeState {
    pub fn new(admin: Address, genesis: Timestamp) -> Self {
        Self {
            admin,
            future_admin: None,
            total_stake: U256::zero(),
            working_supply: U256::zero(),
            journal: IntegralJournal::new(genesis),
            positions: HashMap::new(),
            allowances: HashMap::new(),
            secondary: SecondaryRewardAdapter::default(),
        }
    }

    pub fn position(&self, user: &Address) -> UserPosition {
        self.positions.get(user).copied().unwrap_or_default()
    }

    pub fn position_mut(&mut self, user: Address) -> &mut UserPosition {
        self.positions.entry(user).or_default()
    }

    pub fn balance_of(&self, user: &Address) -> U256 {
        self.positions.get(user).map(|p| p.balance).unwrap_or_default()
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }
}
