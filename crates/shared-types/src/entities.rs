//! # Core Value Types
//!
//! Amounts are 256-bit unsigned integers, addresses are 20-byte
//! Ethereum-style identifiers and time is whole seconds since the epoch.

// Re-export the primitive types so downstream crates share one definition
pub use primitive_types::{H160, U256};

/// A 20-byte account, contract or token identifier.
pub type Address = H160;

/// Identifier of a liquidity gauge (its own address).
pub type GaugeId = Address;

/// Unix time in seconds.
pub type Timestamp = u64;

/// Length of one emission period.
pub const WEEK: Timestamp = 7 * 86_400;

/// Fixed-point scale used by every integral (1e18).
pub const PRECISION: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

/// Basis-point denominator.
pub const BPS: u32 = 10_000;

/// Returns the start of the week containing `ts`.
#[must_use]
pub fn week_start(ts: Timestamp) -> Timestamp {
    ts / WEEK * WEEK
}

/// Returns the first week boundary strictly after `ts`.
#[must_use]
pub fn next_week_boundary(ts: Timestamp) -> Timestamp {
    (ts / WEEK + 1) * WEEK
}

/// Builds a deterministic address from a small integer (test and fixture helper).
#[must_use]
pub fn address_from_low_u64(value: u64) -> Address {
    H160::from_low_u64_be(value)
}
