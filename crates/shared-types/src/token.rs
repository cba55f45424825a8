//! Value-token port and its in-memory adapter.
//!
//! Used for the gauge's deposit token, for secondary reward tokens and
//! (through the minter's issuer adapter) for the primary reward token.

use crate::entities::{Address, U256};
use crate::errors::TokenError;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Standard value-token transfer surface.
pub trait TokenLedger: Send + Sync {
    /// The token's own address.
    fn token_id(&self) -> Address;

    /// Balance held by `owner`.
    fn balance_of(&self, owner: &Address) -> U256;

    /// Moves `amount` from `from` to `to`, acting as `from`.
    fn transfer(&self, from: &Address, to: &Address, amount: U256) -> Result<(), TokenError>;

    /// Moves `amount` from `from` to `to` using `spender`'s allowance.
    ///
    /// An allowance of `U256::MAX` is never decremented.
    fn transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), TokenError>;
}

#[derive(Debug, Default)]
struct TokenBook {
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
    total_supply: U256,
    minter: Option<Address>,
}

impl TokenBook {
    fn balance(&self, owner: &Address) -> U256 {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    fn move_balance(&mut self, from: &Address, to: &Address, amount: U256) -> Result<(), TokenError> {
        let available = self.balance(from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or(TokenError::BalanceOverflow { account: *to })?;
        self.balances.insert(*from, available - amount);
        self.balances.insert(*to, credited);
        Ok(())
    }
}

/// In-memory value token.
#[derive(Debug)]
pub struct InMemoryToken {
    id: Address,
    book: RwLock<TokenBook>,
}

impl InMemoryToken {
    pub fn new(id: Address) -> Self {
        Self {
            id,
            book: RwLock::new(TokenBook::default()),
        }
    }

    /// Grants the exclusive issuance capability to `minter`.
    pub fn set_minter(&self, minter: Address) {
        self.book.write().minter = Some(minter);
    }

    pub fn minter(&self) -> Option<Address> {
        self.book.read().minter
    }

    /// Creates `amount` new units for `to`, outside the issuance capability.
    ///
    /// Used to fund fixtures and external reward contracts.
    pub fn credit(&self, to: &Address, amount: U256) -> Result<(), TokenError> {
        let mut book = self.book.write();
        let total = book
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::BalanceOverflow { account: self.id })?;
        let balance = book
            .balance(to)
            .checked_add(amount)
            .ok_or(TokenError::BalanceOverflow { account: *to })?;
        book.total_supply = total;
        book.balances.insert(*to, balance);
        Ok(())
    }

    /// Creates `amount` new units for `to`; only the configured minter may call this.
    pub fn issue(&self, caller: &Address, to: &Address, amount: U256) -> Result<(), TokenError> {
        if self.book.read().minter != Some(*caller) {
            return Err(TokenError::NotPermitted { caller: *caller });
        }
        self.credit(to, amount)
    }

    /// Sets `spender`'s allowance over `owner`'s balance.
    pub fn approve(&self, owner: &Address, spender: &Address, amount: U256) {
        self.book.write().allowances.insert((*owner, *spender), amount);
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.book
            .read()
            .allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.book.read().total_supply
    }
}

impl TokenLedger for InMemoryToken {
    fn token_id(&self) -> Address {
        self.id
    }

    fn balance_of(&self, owner: &Address) -> U256 {
        self.book.read().balance(owner)
    }

    fn transfer(&self, from: &Address, to: &Address, amount: U256) -> Result<(), TokenError> {
        self.book.write().move_balance(from, to, amount)
    }

    fn transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        let mut book = self.book.write();
        let key = (*from, *spender);
        let allowance = book.allowances.get(&key).copied().unwrap_or_default();
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance {
                required: amount,
                available: allowance,
            });
        }
        book.move_balance(from, to, amount)?;
        if allowance != U256::MAX {
            book.allowances.insert(key, allowance - amount);
        }
        Ok(())
    }
}
