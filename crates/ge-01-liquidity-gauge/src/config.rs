//! # Gauge Configuration

use crate::domain::{BoostParams, GaugeError};
use serde::{Deserialize, Serialize};

/// Default cap on week boundaries crossed by one journal advance.
pub const DEFAULT_MAX_WEEKS_PER_CHECKPOINT: u32 = 500;

/// Liquidity gauge configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeConfig {
    /// Value-token name of the staked position.
    pub name: String,

    pub symbol: String,

    pub decimals: u8,

    /// Boost multiplier and kick window.
    pub boost: BoostParams,

    /// Week boundaries a single checkpoint may cross before the rest of the
    /// interval is closed without accrual.
    pub max_weeks_per_checkpoint: u32,

    /// Pull from the incentive contract before a transfer moves balances.
    /// Both parties' accrual up to the last pulled integral is credited even
    /// when this is `false`. Transfers never pay out.
    pub settle_rewards_on_transfer: bool,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            name: "Liquidity Gauge Deposit".into(),
            symbol: "gauge-deposit".into(),
            decimals: 18,
            boost: BoostParams::default(),
            max_weeks_per_checkpoint: DEFAULT_MAX_WEEKS_PER_CHECKPOINT,
            settle_rewards_on_transfer: true,
        }
    }
}

impl GaugeConfig {
    /// Names the staked position after the deposit token's symbol.
    pub fn for_lp_symbol(lp_symbol: &str) -> Self {
        Self {
            name: format!("{lp_symbol} Gauge Deposit"),
            symbol: format!("{lp_symbol}-gauge"),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GaugeError> {
        self.boost.validate().map_err(GaugeError::InvalidConfig)?;
        if self.max_weeks_per_checkpoint == 0 {
            return Err(GaugeError::InvalidConfig(
                "max_weeks_per_checkpoint must be positive".into(),
            ));
        }
        if self.symbol.is_empty() {
            return Err(GaugeError::InvalidConfig("symbol must not be empty".into()));
        }
        Ok(())
    }
}
