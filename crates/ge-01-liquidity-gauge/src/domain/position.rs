//! Per-user gauge rows.
//!
//! Rows are created on first interaction and never removed, so a user whose
//! balance returns to zero keeps their checkpoint history.

use serde::{Deserialize, Serialize};
use shared_types::{Timestamp, U256};

/// One user's stake and emission accounting inside a gauge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPosition {
    /// Raw deposited stake.
    pub balance: U256,
    /// Boosted stake, recomputed only at checkpoint time.
    pub working_balance: U256,
    /// Journal integral at the user's last checkpoint.
    pub integrate_inv_supply_of: U256,
    /// Journal time of the user's last checkpoint.
    pub integrate_checkpoint_of: Timestamp,
    /// Cumulative emission accrued; never decreases.
    pub integrate_fraction: U256,
}
