//! # Integration Flows
//!
//! | Module | Covers |
//! |--------|--------|
//! | `minting` | deposit → accrue → mint, rate changes, registry checks |
//! | `boost` | vote-escrow boost and kick |
//! | `secondary_rewards` | forwarding to an incentive contract, claims, transfers |
//! | `invariants` | randomized operation sequences |
//! | `telemetry` | event metrics wired into both components |

pub mod boost;
pub mod invariants;
pub mod minting;
pub mod secondary_rewards;
