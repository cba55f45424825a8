//! Ports (Hexagonal Architecture)
//!
//! Inbound ports are implemented by the gauge service; outbound ports are the
//! collaborators it reads from or forwards principal to.

pub mod inbound;
pub mod outbound;

pub use inbound::LiquidityGaugeApi;
pub use outbound::{IncentiveContract, ShareWeight, VoteWeight};
