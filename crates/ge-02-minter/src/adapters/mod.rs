//! Adapters for the minter's outbound ports.

use crate::ports::RewardIssuer;
use shared_types::{Address, InMemoryToken, TokenError, TokenLedger, U256};

impl RewardIssuer for InMemoryToken {
    fn token_id(&self) -> Address {
        TokenLedger::token_id(self)
    }

    fn issue(&self, minter: &Address, to: &Address, amount: U256) -> Result<(), TokenError> {
        InMemoryToken::issue(self, minter, to, amount)
    }
}
