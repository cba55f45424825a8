//! Domain layer for the liquidity gauge.
//!
//! Pure accounting over plain values. Collaborators are only read, through
//! borrowed port objects passed in by the application layer.

pub mod boost;
pub mod entry_points;
pub mod errors;
pub mod integral;
pub mod invariants;
pub mod journal;
pub mod position;
pub mod rewards;

pub use boost::{working_balance, BoostParams, KickInputs, VoteSnapshot, DEFAULT_MAX_BOOST_BPS};
pub use entry_points::{RewardEntryPoints, Selector};
pub use errors::{GaugeError, IncentiveError};
pub use journal::{IntegralJournal, JournalEntry};
pub use position::UserPosition;
pub use rewards::{RewardAccounts, RewardTotals, UserRewardRows, MAX_REWARD_TOKENS};
