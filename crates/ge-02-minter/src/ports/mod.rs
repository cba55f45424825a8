//! Ports (Hexagonal Architecture)

pub mod inbound;
pub mod outbound;

pub use inbound::MinterApi;
pub use outbound::RewardIssuer;
