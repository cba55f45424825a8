//! Events published by the gauge after an operation commits.

use crate::domain::RewardEntryPoints;
use serde::{Deserialize, Serialize};
use shared_types::{Address, EventKind, U256};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GaugeEvent {
    Deposit {
        provider: Address,
        value: U256,
    },
    Withdraw {
        provider: Address,
        value: U256,
    },
    Transfer {
        from: Address,
        to: Address,
        value: U256,
    },
    Approval {
        owner: Address,
        spender: Address,
        value: U256,
    },
    UpdateLiquidityLimit {
        user: Address,
        original_balance: U256,
        original_supply: U256,
        working_balance: U256,
        working_supply: U256,
    },
    RewardsConfigured {
        contract: Option<Address>,
        entry_points: RewardEntryPoints,
        tokens: Vec<Address>,
    },
    RewardPaid {
        user: Address,
        receiver: Address,
        token: Address,
        amount: U256,
    },
    CommitOwnership {
        admin: Address,
    },
    ApplyOwnership {
        admin: Address,
    },
}

impl EventKind for GaugeEvent {
    fn kind(&self) -> &'static str {
        match self {
            GaugeEvent::Deposit { .. } => "deposit",
            GaugeEvent::Withdraw { .. } => "withdraw",
            GaugeEvent::Transfer { .. } => "transfer",
            GaugeEvent::Approval { .. } => "approval",
            GaugeEvent::UpdateLiquidityLimit { .. } => "update_liquidity_limit",
            GaugeEvent::RewardsConfigured { .. } => "rewards_configured",
            GaugeEvent::RewardPaid { .. } => "reward_paid",
            GaugeEvent::CommitOwnership { .. } => "commit_ownership",
            GaugeEvent::ApplyOwnership { .. } => "apply_ownership",
        }
    }
}
