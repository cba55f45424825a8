//! Outbound ports for the minter.

use shared_types::{Address, TokenError, U256};

/// The reward token's issuance capability.
///
/// Only the minter holding the capability can create new units.
pub trait RewardIssuer: Send + Sync {
    fn token_id(&self) -> Address;

    fn issue(&self, minter: &Address, to: &Address, amount: U256) -> Result<(), TokenError>;
}
