//! # Inbound Port - LiquidityGaugeApi
//!
//! Primary driving port of the boosted stake ledger.
//!
//! ## Authorization
//!
//! | Method | Authorized Caller |
//! |--------|-------------------|
//! | `user_checkpoint` | the user, or the gauge's minter |
//! | `set_rewards`, `commit_transfer_ownership` | gauge admin |
//! | `accept_transfer_ownership` | committed future admin |
//! | everything else | anyone |

use crate::application::{RewardPayout, RewardsSetup};
use crate::domain::GaugeError;
use shared_types::{Address, U256};

pub trait LiquidityGaugeApi {
    /// Stakes `amount` from `caller` for `recipient` (default: `caller`).
    ///
    /// # Errors
    /// - `TransferFailed`: the deposit token could not be pulled from `caller`
    /// - `IncentiveCallFailed`: forwarding to the incentive contract failed
    fn deposit(&mut self, caller: Address, amount: U256, recipient: Option<Address>, claim: bool) -> Result<(), GaugeError>;

    /// # Errors
    /// - `InsufficientBalance`: `amount` exceeds `caller`'s stake
    fn withdraw(&mut self, caller: Address, amount: U256, claim: bool) -> Result<(), GaugeError>;

    fn transfer(&mut self, caller: Address, to: Address, amount: U256) -> Result<bool, GaugeError>;

    /// # Errors
    /// - `InsufficientAllowance`: unless the allowance is `U256::MAX`
    /// - `InsufficientBalance`
    fn transfer_from(&mut self, spender: Address, from: Address, to: Address, amount: U256) -> Result<bool, GaugeError>;

    fn approve(&mut self, caller: Address, spender: Address, amount: U256) -> Result<bool, GaugeError>;

    fn increase_allowance(&mut self, caller: Address, spender: Address, added: U256) -> Result<bool, GaugeError>;

    fn decrease_allowance(&mut self, caller: Address, spender: Address, subtracted: U256) -> Result<bool, GaugeError>;

    /// # Errors
    /// - `Unauthorized`: `caller` is neither `user` nor the minter
    fn user_checkpoint(&mut self, caller: Address, user: Address) -> Result<bool, GaugeError>;

    /// # Errors
    /// - `KickNotAllowed`: the cached boost may still be legitimate
    /// - `KickNotNeeded`: the cached boost is not above its recomputed value
    fn kick(&mut self, caller: Address, user: Address) -> Result<(), GaugeError>;

    fn claim_rewards(&mut self, caller: Address, for_user: Option<Address>) -> Result<Vec<RewardPayout>, GaugeError>;

    fn set_rewards(&mut self, caller: Address, setup: RewardsSetup) -> Result<(), GaugeError>;

    fn commit_transfer_ownership(&mut self, caller: Address, new_admin: Address) -> Result<(), GaugeError>;

    fn accept_transfer_ownership(&mut self, caller: Address) -> Result<(), GaugeError>;

    fn balance_of(&self, user: &Address) -> U256;

    fn total_supply(&self) -> U256;

    fn working_balance(&self, user: &Address) -> U256;

    fn working_supply(&self) -> U256;

    fn integrate_fraction(&self, user: &Address) -> U256;
}
