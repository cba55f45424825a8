//! # Shared Types Crate
//!
//! Amounts, addresses, time and the ports that cross crate boundaries in the
//! emission engine.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `U256`, `Timestamp` and the
//!   1e18 fixed-point `PRECISION` are defined once, here.
//! - **No wraparound**: every balance or integral update goes through
//!   [`math`], which fails instead of wrapping.
//! - **No crate cycles**: the gauge reads the emission rate through
//!   [`EmissionRateSource`] and the minter drives gauges through
//!   [`MintableGauge`]; neither crate depends on the other.

pub mod emission;
pub mod entities;
pub mod errors;
pub mod events;
pub mod math;
pub mod time;
pub mod token;

pub use emission::{EmissionRateSource, FixedRate, GaugeHandle, MintableGauge};
pub use entities::*;
pub use errors::*;
pub use events::{EventKind, EventSink, RecordingSink, TracingSink};
pub use time::{ManualClock, SystemTimeSource, TimeSource};
pub use token::{InMemoryToken, TokenLedger};
