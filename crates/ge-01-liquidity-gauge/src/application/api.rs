//! `LiquidityGaugeApi` over the service's inherent methods.

use super::secondary::{RewardPayout, RewardsSetup};
use super::service::LiquidityGauge;
use crate::domain::GaugeError;
use crate::ports::inbound::LiquidityGaugeApi;
use shared_types::{Address, U256};

impl LiquidityGaugeApi for LiquidityGauge {
    fn deposit(&mut self, caller: Address, amount: U256, recipient: Option<Address>, claim: bool) -> Result<(), GaugeError> {
        LiquidityGauge::deposit(self, caller, amount, recipient, claim)
    }

    fn withdraw(&mut self, caller: Address, amount: U256, claim: bool) -> Result<(), GaugeError> {
        LiquidityGauge::withdraw(self, caller, amount, claim)
    }

    fn transfer(&mut self, caller: Address, to: Address, amount: U256) -> Result<bool, GaugeError> {
        LiquidityGauge::transfer(self, caller, to, amount)
    }

    fn transfer_from(&mut self, spender: Address, from: Address, to: Address, amount: U256) -> Result<bool, GaugeError> {
        LiquidityGauge::transfer_from(self, spender, from, to, amount)
    }

    fn approve(&mut self, caller: Address, spender: Address, amount: U256) -> Result<bool, GaugeError> {
        LiquidityGauge::approve(self, caller, spender, amount)
    }

    fn increase_allowance(&mut self, caller: Address, spender: Address, added: U256) -> Result<bool, GaugeError> {
        LiquidityGauge::increase_allowance(self, caller, spender, added)
    }

    fn decrease_allowance(&mut self, caller: Address, spender: Address, subtracted: U256) -> Result<bool, GaugeError> {
        LiquidityGauge::decrease_allowance(self, caller, spender, subtracted)
    }

    fn user_checkpoint(&mut self, caller: Address, user: Address) -> Result<bool, GaugeError> {
        LiquidityGauge::user_checkpoint(self, caller, user)
    }

    fn kick(&mut self, caller: Address, user: Address) -> Result<(), GaugeError> {
        LiquidityGauge::kick(self, caller, user)
    }

    fn claim_rewards(&mut self, caller: Address, for_user: Option<Address>) -> Result<Vec<RewardPayout>, GaugeError> {
        LiquidityGauge::claim_rewards(self, caller, for_user)
    }

    fn set_rewards(&mut self, caller: Address, setup: RewardsSetup) -> Result<(), GaugeError> {
        LiquidityGauge::set_rewards(self, caller, setup)
    }

    fn commit_transfer_ownership(&mut self, caller: Address, new_admin: Address) -> Result<(), GaugeError> {
        LiquidityGauge::commit_transfer_ownership(self, caller, new_admin)
    }

    fn accept_transfer_ownership(&mut self, caller: Address) -> Result<(), GaugeError> {
        LiquidityGauge::accept_transfer_ownership(self, caller)
    }

    fn balance_of(&self, user: &Address) -> U256 {
        LiquidityGauge::balance_of(self, user)
    }

    fn total_supply(&self) -> U256 {
        LiquidityGauge::total_supply(self)
    }

    fn working_balance(&self, user: &Address) -> U256 {
        LiquidityGauge::working_balance(self, user)
    }

    fn working_supply(&self) -> U256 {
        LiquidityGauge::working_supply(self)
    }

    fn integrate_fraction(&self, user: &Address) -> U256 {
        LiquidityGauge::integrate_fraction(self, user)
    }
}
