//! Cross-crate emission ports.
//!
//! | Trait | Implemented by | Consumed by |
//! |-------|----------------|-------------|
//! | [`EmissionRateSource`] | minter `RateSchedule` | gauge journal advance |
//! | [`MintableGauge`] | `LiquidityGauge` | minter `mint` |

use crate::entities::{Address, GaugeId, Timestamp, U256};
use crate::errors::CheckpointError;
use parking_lot::Mutex;
use std::sync::Arc;

/// Global emission rate over time, in reward units per second.
pub trait EmissionRateSource: Send + Sync {
    /// Rate in effect at `at`. Zero before issuance begins.
    fn rate_at(&self, at: Timestamp) -> U256;

    /// First time strictly after `after` at which the rate changes, if any.
    fn next_rate_change(&self, after: Timestamp) -> Option<Timestamp>;

    /// Time at which issuance begins.
    fn emission_start(&self) -> Timestamp;
}

/// A gauge as seen by the minter.
pub trait MintableGauge: Send {
    /// The gauge's own identifier.
    fn gauge_id(&self) -> GaugeId;

    /// Folds all accrual up to now into `user`'s cumulative fraction.
    ///
    /// Only `user` itself or the gauge's minter may call this.
    fn user_checkpoint(&mut self, caller: Address, user: Address) -> Result<(), CheckpointError>;

    /// Cumulative amount `user` has accrued, as of their last checkpoint.
    fn integrate_fraction(&self, user: &Address) -> U256;
}

/// A gauge shared between its host and the minter that registered it.
///
/// The minter only ever drives gauges through handles it was given at
/// registration time.
pub type GaugeHandle = Arc<Mutex<dyn MintableGauge>>;

/// A rate that never changes after `start`.
#[derive(Debug, Clone, Copy)]
pub struct FixedRate {
    pub rate: U256,
    pub start: Timestamp,
}

impl FixedRate {
    pub fn new(rate: U256, start: Timestamp) -> Self {
        Self { rate, start }
    }
}

impl EmissionRateSource for FixedRate {
    fn rate_at(&self, at: Timestamp) -> U256 {
        if at < self.start {
            U256::zero()
        } else {
            self.rate
        }
    }

    fn next_rate_change(&self, after: Timestamp) -> Option<Timestamp> {
        (after < self.start).then_some(self.start)
    }

    fn emission_start(&self) -> Timestamp {
        self.start
    }
}
