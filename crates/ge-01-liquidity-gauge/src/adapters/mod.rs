//! In-memory adapters for the outbound ports.
//!
//! Used by tests and simulations that need a deterministic boost source and
//! weight registry.

pub mod share_weight;
pub mod vote_escrow;

pub use share_weight::FixedShareWeight;
pub use vote_escrow::{InMemoryVoteEscrow, LockedBalance, MAX_LOCK_TIME};
