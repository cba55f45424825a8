//! # Error Types
//!
//! Error types shared across the gauge and minter crates.

use crate::entities::{Address, U256};
use thiserror::Error;

/// Checked arithmetic failure. Always fatal to the enclosing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// Result exceeded `U256::MAX`.
    #[error("arithmetic overflow in {op}")]
    Overflow { op: &'static str },

    /// Result would be negative.
    #[error("arithmetic underflow in {op}")]
    Underflow { op: &'static str },

    /// Divisor was zero.
    #[error("division by zero in {op}")]
    DivisionByZero { op: &'static str },
}

/// Failure of a value-token movement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Owner does not hold enough tokens.
    #[error("insufficient token balance: required {required}, available {available}")]
    InsufficientBalance { required: U256, available: U256 },

    /// Spender is not approved for enough tokens.
    #[error("insufficient token allowance: required {required}, available {available}")]
    InsufficientAllowance { required: U256, available: U256 },

    /// Receiving balance would overflow.
    #[error("token balance overflow for {account:?}")]
    BalanceOverflow { account: Address },

    /// Caller lacks the capability (e.g. minting).
    #[error("token operation not permitted for {caller:?}")]
    NotPermitted { caller: Address },
}

/// Failure reported by a gauge when asked to checkpoint a user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckpointError {
    /// Caller is neither the user nor the gauge's minter.
    #[error("unauthorized checkpoint of {user:?} by {caller:?}")]
    Unauthorized { caller: Address, user: Address },

    /// Accounting arithmetic failed.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    /// Any other gauge-side rejection.
    #[error("gauge rejected checkpoint: {0}")]
    Rejected(String),
}
