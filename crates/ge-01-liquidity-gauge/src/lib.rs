//! # Liquidity Gauge
//!
//! Boosted stake ledger for one incentivized pool. Tracks raw and boosted
//! ("working") stake per user, the time integral of emission per unit of
//! working stake, and the secondary rewards earned by forwarding principal
//! to an external incentive contract.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | `working_supply == Σ working_balance` after every operation | `application/staged.rs` - `update_liquidity_limit()` |
//! | `balance <= working_balance <= balance * max_boost` | `domain/boost.rs` - `working_balance()` |
//! | Journal timestamps strictly increase, integral never decreases | `domain/journal.rs` - `push()` |
//! | `integrate_fraction` never decreases | `domain/integral.rs` - `settle()` |
//! | Checkpoint before any balance change | `application/service.rs` - every mutating op |
//! | All-or-nothing operations | `application/staged.rs` - `StagedWrite` undo log |
//! | No arithmetic wraparound | `shared_types::math` |
//!
//! ## Checkpoint Flow
//!
//! ```text
//! op(user) ──→ advance journal to now ──→ settle(user) ──→ mutate balance
//!                 (once per op)            fraction +=        │
//!                                          wb * Δintegral     ↓
//!                                                  update_liquidity_limit(user)
//! ```
//!
//! ## Outbound Dependencies
//!
//! | Collaborator | Trait | Purpose |
//! |--------------|-------|---------|
//! | Vote escrow | `VoteWeight` | Boost inputs |
//! | Weight registry | `ShareWeight` | Gauge's share of the global rate |
//! | Minter | `EmissionRateSource` | Global rate over time |
//! | Deposit token | `TokenLedger` | Principal custody |
//! | Incentive contract | `IncentiveContract` | Secondary rewards |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/ - InMemoryVoteEscrow, FixedShareWeight               │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - LiquidityGaugeApi                          │
//! │  ports/outbound.rs - VoteWeight, ShareWeight, IncentiveContract │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  application/ - LiquidityGauge, StagedWrite, secondary adapter  │
//! │  domain/      - journal, integral, boost, reward accounts       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod events;
pub mod ports;

pub use adapters::{FixedShareWeight, InMemoryVoteEscrow};
pub use application::{
    GaugeIdentity, GaugePorts, LiquidityGauge, RewardPayout, RewardsSetup, SharedGauge,
};
pub use config::GaugeConfig;
pub use domain::{
    BoostParams, GaugeError, IncentiveError, JournalEntry, RewardEntryPoints, Selector,
    UserPosition, MAX_REWARD_TOKENS,
};
pub use events::GaugeEvent;
pub use ports::{IncentiveContract, LiquidityGaugeApi, ShareWeight, VoteWeight};
