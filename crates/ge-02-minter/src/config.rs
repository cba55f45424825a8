//! Minter configuration.

use serde::{Deserialize, Serialize};
use shared_types::{Timestamp, U256};

/// Upper bound on gauges minted from in one `mint_many` call.
pub const DEFAULT_MAX_GAUGES_PER_BATCH: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinterConfig {
    /// Issuance begins here; the rate is zero before it.
    pub emission_start: Timestamp,
    /// Reward units per second from `emission_start`.
    pub initial_rate: U256,
    pub max_gauges_per_batch: usize,
}

impl Default for MinterConfig {
    fn default() -> Self {
        Self {
            emission_start: 0,
            initial_rate: U256::zero(),
            max_gauges_per_batch: DEFAULT_MAX_GAUGES_PER_BATCH,
        }
    }
}

impl MinterConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_gauges_per_batch == 0 {
            return Err("max_gauges_per_batch must be at least 1".to_string());
        }
        Ok(())
    }
}
