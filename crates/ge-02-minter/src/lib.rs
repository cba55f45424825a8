//! # Reward Minter
//!
//! Issues the reward token to gauge depositors, at most once per unit
//! accrued.
//!
//! ## Invariants
//!
//! | Invariant | Enforced by |
//! |-----------|-------------|
//! | `minted[(user, gauge)] <= gauge.integrate_fraction(user)` | `Minter::mint` records only what the gauge reports |
//! | Only registered gauges mint | mints look up the handle stored by `add_gauge` |
//! | Nothing minted before `emission_start` | `Minter::mint` returns zero |
//! | Rate history is append-only | `RateSchedule::set_rate` |
//!
//! ## Dependencies
//!
//! | Port | Direction | Purpose |
//! |------|-----------|---------|
//! | `MintableGauge` | outbound | checkpoint a user, read accrued fraction |
//! | `RewardIssuer` | outbound | create reward token units |
//! | `EmissionRateSource` | provided | gauges read the rate through `RateSchedule` |

pub mod adapters;
pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

pub use config::{MinterConfig, DEFAULT_MAX_GAUGES_PER_BATCH};
pub use domain::{MintLedger, MinterError, RatePoint, RateSchedule, Registration};
pub use events::MinterEvent;
pub use ports::{MinterApi, RewardIssuer};
pub use service::{Minter, MinterPorts};
