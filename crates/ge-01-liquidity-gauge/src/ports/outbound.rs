//! Outbound (Driven) ports for the liquidity gauge.
//!
//! The gauge only reads boost and emission-share inputs; it never writes to
//! the vote escrow or the weight registry.

use crate::domain::entry_points::Selector;
use crate::domain::errors::IncentiveError;
use shared_types::{Address, GaugeId, Timestamp, U256};

/// Vote-escrow boost source.
///
/// Both quantities decay over time and are only used to compute a boost ratio.
pub trait VoteWeight: Send + Sync {
    /// Voting weight of `user` at `at`.
    fn balance_of(&self, user: &Address, at: Timestamp) -> U256;

    /// Total voting weight at `at`.
    fn total_supply(&self, at: Timestamp) -> U256;

    /// Time `user` last created or changed their lock, if known.
    ///
    /// A lock change after the user's last checkpoint makes their cached
    /// working balance kickable.
    fn last_lock_update(&self, _user: &Address) -> Option<Timestamp> {
        None
    }
}

/// Emission-share registry.
pub trait ShareWeight: Send + Sync {
    /// Fraction of the global rate given to `gauge` at `at`, scaled by `PRECISION`.
    fn relative_weight(&self, gauge: &GaugeId, at: Timestamp) -> U256;

    /// Brings the registry's own history up to date for `gauge`.
    fn checkpoint_gauge(&self, _gauge: &GaugeId) {}
}

/// External incentive contract receiving forwarded principal.
///
/// Each call carries the selector configured by `set_rewards`; a contract
/// rejects selectors it does not expose. `stake` moves `amount` of the deposit
/// token out of `staker`'s custody, `withdraw` returns it and `claim` pays any
/// accrued reward tokens to `staker`.
pub trait IncentiveContract: Send + Sync {
    fn contract_id(&self) -> Address;

    fn stake(&self, selector: Selector, staker: &Address, amount: U256) -> Result<(), IncentiveError>;

    fn withdraw(&self, selector: Selector, staker: &Address, amount: U256) -> Result<(), IncentiveError>;

    fn claim(&self, selector: Selector, staker: &Address) -> Result<(), IncentiveError>;
}
