//! Application layer: the gauge service and its all-or-nothing write path.

pub mod secondary;
pub mod service;
mod api;
mod staged;
pub mod state;


pub use secondary::{RewardPayout, RewardsSetup, SecondaryRewardAdapter};
pub use service::{GaugeIdentity, GaugePorts, LiquidityGauge, SharedGauge};
pub use state::GaugeState;
