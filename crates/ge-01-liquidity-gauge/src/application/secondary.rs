//! # Secondary Reward Adapter
//!
//! Pass-through staking adapter: principal is forwarded to an external
//! incentive contract through the configured entry points, and rewards the
//! contract pays to the gauge are distributed by raw balance through
//! [`RewardAccounts`].
//!
//! The adapter is part of [`GaugeState`](super::state::GaugeState). A staged
//! write saves its wiring and totals with [`SecondaryRewardAdapter::snapshot`]
//! and each touched user's rows with [`SecondaryRewardAdapter::user_rows`],
//! so a failed operation restores both.

use crate::domain::{GaugeError, RewardAccounts, RewardEntryPoints, RewardTotals, UserRewardRows};
use crate::ports::outbound::IncentiveContract;
use serde::{Deserialize, Serialize};
use shared_types::{Address, GaugeId, TokenError, TokenLedger, U256};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// New wiring passed to `set_rewards`.
#[derive(Clone, Default)]
pub struct RewardsSetup {
    /// `None` detaches the gauge from any incentive contract.
    pub contract: Option<Arc<dyn IncentiveContract>>,
    pub entry_points: RewardEntryPoints,
    /// Tracked reward tokens; existing tokens must remain as a prefix.
    pub tokens: Vec<Arc<dyn TokenLedger>>,
}

/// A secondary reward transfer made to a user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPayout {
    pub token: Address,
    pub receiver: Address,
    pub amount: U256,
}

/// Payout recorded in the accounts but not yet transferred.
#[derive(Clone)]
pub(crate) struct PendingPayout {
    pub token: Arc<dyn TokenLedger>,
    pub user: Address,
    pub receiver: Address,
    pub amount: U256,
}

/// Wiring and per-token totals saved before a staged write touches them.
#[derive(Clone)]
pub(crate) struct SecondarySnapshot {
    contract: Option<Arc<dyn IncentiveContract>>,
    entry_points: RewardEntryPoints,
    token_ledgers: Vec<Arc<dyn TokenLedger>>,
    totals: RewardTotals,
}

#[derive(Default)]
pub struct SecondaryRewardAdapter {
    contract: Option<Arc<dyn IncentiveContract>>,
    entry_points: RewardEntryPoints,
    token_ledgers: Vec<Arc<dyn TokenLedger>>,
    accounts: RewardAccounts,
}

impl fmt::Debug for SecondaryRewardAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecondaryRewardAdapter")
            .field("contract", &self.contract_id())
            .field("entry_points", &self.entry_points)
            .field("tokens", &self.accounts.tokens())
            .finish()
    }
}

impl SecondaryRewardAdapter {
    pub fn contract_id(&self) -> Option<Address> {
        self.contract.as_ref().map(|c| c.contract_id())
    }

    pub fn entry_points(&self) -> RewardEntryPoints {
        self.entry_points
    }

    pub fn tokens(&self) -> &[Address] {
        self.accounts.tokens()
    }

    pub fn accounts(&self) -> &RewardAccounts {
        &self.accounts
    }

    /// True when at least one reward token is tracked.
    pub fn is_active(&self) -> bool {
        !self.token_ledgers.is_empty()
    }

    pub(crate) fn snapshot(&self) -> SecondarySnapshot {
        SecondarySnapshot {
            contract: self.contract.clone(),
            entry_points: self.entry_points,
            token_ledgers: self.token_ledgers.clone(),
            totals: self.accounts.totals(),
        }
    }

    pub(crate) fn restore(&mut self, snapshot: SecondarySnapshot) {
        self.contract = snapshot.contract;
        self.entry_points = snapshot.entry_points;
        self.token_ledgers = snapshot.token_ledgers;
        self.accounts.restore_totals(snapshot.totals);
    }

    pub(crate) fn user_rows(&self, user: &Address) -> UserRewardRows {
        self.accounts.user_rows(user)
    }

    pub(crate) fn restore_user_rows(&mut self, user: Address, rows: UserRewardRows) {
        self.accounts.restore_user_rows(user, rows);
    }

    /// Returns a payout whose transfer failed to `payout.user`'s claimable balance.
    pub(crate) fn refund(&mut self, payout: &PendingPayout) -> Result<(), GaugeError> {
        self.accounts
            .refund(payout.token.token_id(), payout.user, payout.amount)?;
        Ok(())
    }

    /// Claims from the incentive contract, then folds every token received
    /// since the last pull into its integral.
    pub fn pull(&mut self, gauge: &GaugeId, total_stake: U256) -> Result<(), GaugeError> {
        if let (Some(contract), Some(selector)) = (&self.contract, self.entry_points.claim) {
            contract.claim(selector, gauge)?;
        }
        for ledger in &self.token_ledgers {
            let token = ledger.token_id();
            let received = self
                .accounts
                .observe(token, ledger.balance_of(gauge), total_stake)?;
            if !received.is_zero() {
                debug!(?token, %received, "secondary rewards received");
            }
        }
        Ok(())
    }

    /// Credits `user`'s accrual at `balance` up to the last pull.
    pub fn settle_user(&mut self, user: Address, balance: U256) -> Result<(), GaugeError> {
        self.accounts.accrue(user, balance)?;
        Ok(())
    }

    /// Zeroes everything `user` can claim and returns the transfers to make.
    pub(crate) fn take_payouts(&mut self, user: Address, receiver: Address) -> Result<Vec<PendingPayout>, GaugeError> {
        let mut payouts = Vec::new();
        for ledger in &self.token_ledgers {
            let amount = self.accounts.take_claimable(ledger.token_id(), user)?;
            if !amount.is_zero() {
                payouts.push(PendingPayout {
                    token: Arc::clone(ledger),
                    user,
                    receiver,
                    amount,
                });
            }
        }
        Ok(payouts)
    }

    /// Stakes `amount` of principal into the incentive contract, if forwarding.
    pub fn forward(&self, gauge: &GaugeId, amount: U256) -> Result<(), GaugeError> {
        match (&self.contract, self.entry_points.stake) {
            (Some(contract), Some(selector)) if !amount.is_zero() => {
                contract.stake(selector, gauge, amount)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Withdraws `amount` of principal from the incentive contract, if forwarding.
    pub fn retract(&self, gauge: &GaugeId, amount: U256) -> Result<(), GaugeError> {
        match (&self.contract, self.entry_points.withdraw) {
            (Some(contract), Some(selector)) if !amount.is_zero() => {
                contract.withdraw(selector, gauge, amount)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Stored plus pending `token` reward for `user` at `balance`, as of the last pull.
    pub fn claimable_reward(&self, user: &Address, token: &Address, balance: U256) -> Result<U256, GaugeError> {
        let pending = self.accounts.pending(token, user, balance)?;
        Ok(self.accounts.claimable(token, user).saturating_add(pending))
    }

    pub fn claimed_reward(&self, user: &Address, token: &Address) -> U256 {
        self.accounts.claimed(token, user)
    }

    /// Replaces the wiring.
    ///
    /// Rewards due under the old wiring are pulled first. Principal is then
    /// retracted from the old contract and, when the new entry points forward
    /// principal, staked into the new one. The new stake and withdraw entry
    /// points are exercised and custody is checked after each call before the
    /// final stake.
    pub fn reconfigure(
        &mut self,
        gauge: &GaugeId,
        deposit_token: &dyn TokenLedger,
        total_stake: U256,
        setup: RewardsSetup,
    ) -> Result<(), GaugeError> {
        let tokens = Self::validate_setup(deposit_token, total_stake, &setup)?;

        self.pull(gauge, total_stake)?;
        if self.entry_points.forwards_principal() {
            self.retract(gauge, total_stake)?;
        }

        if let (Some(contract), true) = (&setup.contract, setup.entry_points.forwards_principal()) {
            if let Err(err) = verify_and_stake(contract.as_ref(), &setup.entry_points, gauge, deposit_token, total_stake) {
                if let Err(restore) = self.forward(gauge, total_stake) {
                    warn!(?gauge, error = %restore, "failed to restore principal to previous incentive contract");
                }
                return Err(err);
            }
        }

        self.accounts.set_tokens(&tokens)?;
        self.contract = setup.contract;
        self.entry_points = setup.entry_points;
        self.token_ledgers = setup.tokens;
        info!(
            ?gauge,
            contract = ?self.contract_id(),
            tokens = self.token_ledgers.len(),
            forwards = self.entry_points.forwards_principal(),
            "secondary rewards configured"
        );

        if self.contract.is_some() {
            self.pull(gauge, total_stake)?;
        }
        Ok(())
    }

    fn validate_setup(
        deposit_token: &dyn TokenLedger,
        total_stake: U256,
        setup: &RewardsSetup,
    ) -> Result<Vec<Address>, GaugeError> {
        setup.entry_points.validate()?;
        let tokens: Vec<Address> = setup.tokens.iter().map(|t| t.token_id()).collect();
        if tokens.contains(&deposit_token.token_id()) {
            return Err(GaugeError::InvalidRewardConfig(
                "deposit token cannot be a reward token".into(),
            ));
        }
        match &setup.contract {
            Some(_) if tokens.is_empty() => {
                return Err(GaugeError::InvalidRewardConfig(
                    "incentive contract requires at least one reward token".into(),
                ));
            }
            None if setup.entry_points != RewardEntryPoints::none() => {
                return Err(GaugeError::InvalidRewardConfig(
                    "entry points require an incentive contract".into(),
                ));
            }
            _ => {}
        }
        if setup.entry_points.forwards_principal() && total_stake.is_zero() {
            return Err(GaugeError::InvalidRewardConfig(
                "entry points can only be verified with a nonzero stake".into(),
            ));
        }
        Ok(tokens)
    }
}

/// Stakes, withdraws and re-stakes `amount`, checking custody after each call.
fn verify_and_stake(
    contract: &dyn IncentiveContract,
    entry_points: &RewardEntryPoints,
    gauge: &GaugeId,
    deposit_token: &dyn TokenLedger,
    amount: U256,
) -> Result<(), GaugeError> {
    let (Some(stake), Some(withdraw)) = (entry_points.stake, entry_points.withdraw) else {
        return Err(GaugeError::InvalidRewardConfig(
            "stake and withdraw entry points required".into(),
        ));
    };
    let held = deposit_token.balance_of(gauge);
    let staked = held.checked_sub(amount).ok_or(TokenError::InsufficientBalance {
        required: amount,
        available: held,
    })?;

    contract.stake(stake, gauge, amount)?;
    expect_custody(deposit_token, gauge, staked, "stake")?;
    contract.withdraw(withdraw, gauge, amount)?;
    expect_custody(deposit_token, gauge, held, "withdraw")?;
    contract.stake(stake, gauge, amount)?;
    expect_custody(deposit_token, gauge, staked, "stake")
}

fn expect_custody(
    deposit_token: &dyn TokenLedger,
    gauge: &GaugeId,
    expected: U256,
    entry_point: &str,
) -> Result<(), GaugeError> {
    let held = deposit_token.balance_of(gauge);
    if held != expected {
        return Err(GaugeError::InvalidRewardConfig(format!(
            "{entry_point} entry point left custody at {held}, expected {expected}"
        )));
    }
    Ok(())
}
