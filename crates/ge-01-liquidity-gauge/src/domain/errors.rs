//! Error types for the liquidity gauge.
//!
//! Every variant rejects the whole operation; no partial state is kept.

use shared_types::{Address, ArithmeticError, CheckpointError, TokenError, U256};
use thiserror::Error;

/// Failure reported by an external incentive contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncentiveError {
    #[error("incentive contract rejected {entry_point}: {reason}")]
    CallFailed {
        entry_point: &'static str,
        reason: String,
    },
}

/// All errors that can occur in gauge operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GaugeError {
    /// Checkpoint requested by someone other than the user or the minter.
    #[error("unauthorized: {caller:?} may not checkpoint {user:?}")]
    Unauthorized { caller: Address, user: Address },

    /// Admin-only operation called by a non-admin.
    #[error("admin only: {caller:?}")]
    AdminOnly { caller: Address },

    /// Withdraw or transfer exceeds the staked balance.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: U256, available: U256 },

    /// Delegated transfer exceeds the allowance.
    #[error("insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance { required: U256, available: U256 },

    /// Deposit or reward token movement failed.
    #[error("token transfer failed: {0}")]
    TransferFailed(#[from] TokenError),

    /// User's boost is still inside its valid window.
    #[error("kick not allowed for {user:?}")]
    KickNotAllowed { user: Address },

    /// Recomputed working balance is not lower than the cached one.
    #[error("kick not needed for {user:?}")]
    KickNotNeeded { user: Address },

    /// More secondary reward tokens than the gauge can track.
    #[error("too many reward tokens: {count} > {max}")]
    TooManyRewardTokens { count: usize, max: usize },

    /// Secondary reward wiring is inconsistent.
    #[error("invalid reward configuration: {0}")]
    InvalidRewardConfig(String),

    /// External incentive contract call failed.
    #[error(transparent)]
    IncentiveCallFailed(#[from] IncentiveError),

    /// Ownership acceptance without a committed admin.
    #[error("no pending admin")]
    NoPendingAdmin,

    /// Configuration failed validation.
    #[error("invalid gauge configuration: {0}")]
    InvalidConfig(String),

    /// Balance or integral arithmetic failed.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

impl From<GaugeError> for CheckpointError {
    fn from(err: GaugeError) -> Self {
        match err {
            GaugeError::Unauthorized { caller, user } => CheckpointError::Unauthorized { caller, user },
            GaugeError::Arithmetic(inner) => CheckpointError::Arithmetic(inner),
            other => CheckpointError::Rejected(other.to_string()),
        }
    }
}
