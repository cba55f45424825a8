//! Error types for the minter.

use shared_types::{Address, ArithmeticError, CheckpointError, GaugeId, TokenError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinterError {
    #[error("admin only: {caller:?}")]
    AdminOnly { caller: Address },

    #[error("gauge not registered: {gauge:?}")]
    GaugeNotRegistered { gauge: GaugeId },

    /// Another gauge handle is already registered under this id.
    #[error("gauge id already taken: {gauge:?}")]
    GaugeIdTaken { gauge: GaugeId },

    /// The gauge rejected the pre-mint checkpoint.
    #[error("gauge checkpoint failed: {0}")]
    Checkpoint(#[from] CheckpointError),

    /// The reward token refused to issue.
    #[error("issuance failed: {0}")]
    IssuanceFailed(#[from] TokenError),

    #[error("too many gauges in one batch: {count} > {max}")]
    TooManyGauges { count: usize, max: usize },

    #[error("invalid minter configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}
