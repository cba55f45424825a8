//! # Staged Writes
//!
//! Every mutating gauge operation runs against a [`StagedWrite`], which
//! changes [`GaugeState`] in place and keeps an undo log: the scalars and
//! journal length as they were, plus the prior value of each position,
//! allowance and secondary reward row the first time it is touched. Dropping
//! an unfinished write restores all of it, so a failure at any step leaves
//! the gauge exactly as it was and the cost of an operation depends only on
//! what it touches.
//!
//! The journal is advanced at most once per operation, on the first
//! checkpoint, using the working supply in effect before the operation.
//!
//! [`StagedWrite::finish`] commits the state before transferring secondary
//! reward payouts. A payout whose transfer fails is returned to the user's
//! claimable balance.

use super::secondary::{PendingPayout, RewardPayout, RewardsSetup, SecondaryRewardAdapter, SecondarySnapshot};
use super::service::GaugeContext;
use super::state::GaugeState;
use crate::domain::integral::{self, AdvanceInputs};
use crate::domain::{working_balance, GaugeError, UserPosition, UserRewardRows, VoteSnapshot};
use crate::events::GaugeEvent;
use shared_types::{math, Address, Timestamp, TokenError, U256};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Prior values of everything a staged write has changed.
struct UndoLog {
    admin: Address,
    future_admin: Option<Address>,
    total_stake: U256,
    working_supply: U256,
    journal_len: usize,
    /// `None` means the row did not exist.
    positions: HashMap<Address, Option<UserPosition>>,
    allowances: HashMap<(Address, Address), Option<U256>>,
    secondary: Option<SecondarySnapshot>,
    reward_rows: HashMap<Address, UserRewardRows>,
}

impl UndoLog {
    fn new(state: &GaugeState) -> Self {
        Self {
            admin: state.admin,
            future_admin: state.future_admin,
            total_stake: state.total_stake,
            working_supply: state.working_supply,
            journal_len: state.journal.len(),
            positions: HashMap::new(),
            allowances: HashMap::new(),
            secondary: None,
            reward_rows: HashMap::new(),
        }
    }

    fn apply(self, state: &mut GaugeState) {
        state.admin = self.admin;
        state.future_admin = self.future_admin;
        state.total_stake = self.total_stake;
        state.working_supply = self.working_supply;
        state.journal.truncate(self.journal_len);
        for (user, position) in self.positions {
            match position {
                Some(position) => state.positions.insert(user, position),
                None => state.positions.remove(&user),
            };
        }
        for (key, allowance) in self.allowances {
            match allowance {
                Some(allowance) => state.allowances.insert(key, allowance),
                None => state.allowances.remove(&key),
            };
        }
        if let Some(snapshot) = self.secondary {
            state.secondary.restore(snapshot);
        }
        for (user, rows) in self.reward_rows {
            state.secondary.restore_user_rows(user, rows);
        }
    }
}

pub(crate) struct StagedWrite<'g> {
    ctx: &'g GaugeContext,
    state: &'g mut GaugeState,
    /// `None` once committed.
    undo: Option<UndoLog>,
    events: Vec<GaugeEvent>,
    payouts: Vec<PendingPayout>,
    now: Timestamp,
    advanced: bool,
    pulled: bool,
}

/// Output of a committed operation.
pub(crate) struct Committed {
    pub events: Vec<GaugeEvent>,
    pub payouts: Vec<RewardPayout>,
}

impl<'g> StagedWrite<'g> {
    pub fn new(ctx: &'g GaugeContext, state: &'g mut GaugeState) -> Self {
        Self {
            now: ctx.ports.clock.now(),
            ctx,
            undo: Some(UndoLog::new(state)),
            state,
            events: Vec::new(),
            payouts: Vec::new(),
            advanced: false,
            pulled: false,
        }
    }

    pub fn ctx(&self) -> &'g GaugeContext {
        self.ctx
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn state(&self) -> &GaugeState {
        &*self.state
    }

    pub fn emit(&mut self, event: GaugeEvent) {
        self.events.push(event);
    }

    // -------------------------------------------------------------------------
    // Tracked mutation
    // -------------------------------------------------------------------------

    pub fn position_mut(&mut self, user: Address) -> &mut UserPosition {
        let prior = self.state.positions.get(&user).copied();
        if let Some(undo) = self.undo.as_mut() {
            undo.positions.entry(user).or_insert(prior);
        }
        self.state.position_mut(user)
    }

    pub fn set_allowance(&mut self, owner: Address, spender: Address, value: U256) {
        let key = (owner, spender);
        let prior = self.state.allowances.get(&key).copied();
        if let Some(undo) = self.undo.as_mut() {
            undo.allowances.entry(key).or_insert(prior);
        }
        self.state.allowances.insert(key, value);
    }

    /// Adds `amount` to `user`'s balance and the total stake.
    pub fn credit_stake(&mut self, user: Address, amount: U256) -> Result<(), GaugeError> {
        self.state.total_stake = math::add(self.state.total_stake, amount, "total_stake")?;
        let position = self.position_mut(user);
        position.balance = math::add(position.balance, amount, "balance")?;
        Ok(())
    }

    /// Removes `amount` from `user`'s balance and the total stake.
    pub fn debit_stake(&mut self, user: Address, amount: U256) -> Result<(), GaugeError> {
        self.state.total_stake = math::sub(self.state.total_stake, amount, "total_stake")?;
        let position = self.position_mut(user);
        position.balance = math::sub(position.balance, amount, "balance")?;
        Ok(())
    }

    /// Moves `amount` of balance from `from` to `to` without changing the total.
    pub fn move_balance(&mut self, from: Address, to: Address, amount: U256) -> Result<(), GaugeError> {
        let sender = self.position_mut(from);
        sender.balance = math::sub(sender.balance, amount, "balance")?;
        let receiver = self.position_mut(to);
        receiver.balance = math::add(receiver.balance, amount, "balance")?;
        Ok(())
    }

    pub fn set_admin(&mut self, admin: Address) {
        self.state.admin = admin;
    }

    pub fn set_future_admin(&mut self, future_admin: Option<Address>) {
        self.state.future_admin = future_admin;
    }

    /// The secondary adapter, with its wiring and totals saved on first use.
    fn secondary_mut(&mut self) -> &mut SecondaryRewardAdapter {
        if let Some(undo) = self.undo.as_mut() {
            if undo.secondary.is_none() {
                undo.secondary = Some(self.state.secondary.snapshot());
            }
        }
        &mut self.state.secondary
    }

    /// Saves `user`'s secondary reward rows before they first change.
    fn save_reward_rows(&mut self, user: Address) {
        if let Some(undo) = self.undo.as_mut() {
            if !undo.reward_rows.contains_key(&user) {
                let rows = self.state.secondary.user_rows(&user);
                undo.reward_rows.insert(user, rows);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Checkpoints
    // -------------------------------------------------------------------------

    fn advance_journal(&mut self) -> Result<(), GaugeError> {
        if self.advanced {
            return Ok(());
        }
        let ctx = self.ctx;
        let ports = &ctx.ports;
        ports.share_weight.checkpoint_gauge(&ctx.gauge);
        let inputs = AdvanceInputs {
            gauge: ctx.gauge,
            now: self.now,
            working_supply: self.state.working_supply,
            rate: ports.emission_rate.as_ref(),
            shares: ports.share_weight.as_ref(),
            max_weeks: ctx.config.max_weeks_per_checkpoint,
        };
        let appended = integral::advance(&mut self.state.journal, &inputs)?;
        if appended > 0 {
            debug!(
                gauge = ?ctx.gauge,
                appended,
                period = self.state.journal.period(),
                integral = %self.state.journal.head().integrate_inv_supply,
                "integral journal advanced"
            );
        }
        self.advanced = true;
        Ok(())
    }

    /// Folds all accrual since `user`'s last checkpoint into their fraction.
    pub fn checkpoint(&mut self, user: Address) -> Result<(), GaugeError> {
        self.advance_journal()?;
        let mut position = self.state.position(&user);
        let accrued = integral::settle(&mut position, &self.state.journal)?;
        *self.position_mut(user) = position;
        if !accrued.is_zero() {
            debug!(?user, %accrued, total = %position.integrate_fraction, "checkpoint accrued");
        }
        Ok(())
    }

    /// Working balance `user` would have now, without storing it.
    pub fn recompute_working_balance(&self, user: &Address) -> Result<U256, GaugeError> {
        let votes = self.ctx.ports.vote_weight.as_ref();
        let snapshot = VoteSnapshot {
            user_weight: votes.balance_of(user, self.now),
            total_weight: votes.total_supply(self.now),
        };
        Ok(working_balance(
            self.state.balance_of(user),
            self.state.total_stake,
            snapshot,
            &self.ctx.config.boost,
        )?)
    }

    /// Recomputes `user`'s working balance and folds the change into the supply.
    pub fn update_liquidity_limit(&mut self, user: Address) -> Result<(), GaugeError> {
        let updated = self.recompute_working_balance(&user)?;
        let position = self.position_mut(user);
        let previous = position.working_balance;
        position.working_balance = updated;
        let original_balance = position.balance;
        self.state.working_supply =
            math::replace_in_total(self.state.working_supply, previous, updated, "working_supply")?;
        self.emit(GaugeEvent::UpdateLiquidityLimit {
            user,
            original_balance,
            original_supply: self.state.total_stake,
            working_balance: updated,
            working_supply: self.state.working_supply,
        });
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Secondary rewards
    // -------------------------------------------------------------------------

    /// Pulls secondary rewards, at most once per operation.
    pub fn pull_secondary(&mut self) -> Result<(), GaugeError> {
        if self.pulled {
            return Ok(());
        }
        let gauge = self.ctx.gauge;
        let total_stake = self.state.total_stake;
        self.secondary_mut().pull(&gauge, total_stake)?;
        self.pulled = true;
        Ok(())
    }

    /// Credits `user`'s secondary accrual against the last pulled integral.
    pub fn accrue_secondary(&mut self, user: Address) -> Result<(), GaugeError> {
        let balance = self.state.balance_of(&user);
        self.save_reward_rows(user);
        self.secondary_mut().settle_user(user, balance)
    }

    /// Pulls, then credits `user`'s secondary accrual at their current balance.
    pub fn settle_secondary(&mut self, user: Address) -> Result<(), GaugeError> {
        self.pull_secondary()?;
        self.accrue_secondary(user)
    }

    /// Settles `user` and schedules payout of everything they can claim.
    ///
    /// Custody is checked here so that the transfers made at commit cannot
    /// run short.
    pub fn pay_secondary(&mut self, user: Address, receiver: Address) -> Result<(), GaugeError> {
        self.settle_secondary(user)?;
        let payouts = self.secondary_mut().take_payouts(user, receiver)?;
        for payout in &payouts {
            let held = payout.token.balance_of(&self.ctx.gauge);
            if held < payout.amount {
                return Err(GaugeError::TransferFailed(TokenError::InsufficientBalance {
                    required: payout.amount,
                    available: held,
                }));
            }
        }
        self.payouts.extend(payouts);
        Ok(())
    }

    /// Replaces the incentive contract wiring.
    pub fn reconfigure_secondary(&mut self, setup: RewardsSetup) -> Result<(), GaugeError> {
        let ctx = self.ctx;
        let total_stake = self.state.total_stake;
        self.secondary_mut()
            .reconfigure(&ctx.gauge, ctx.ports.deposit_token.as_ref(), total_stake, setup)
    }

    // -------------------------------------------------------------------------
    // Principal
    // -------------------------------------------------------------------------

    /// Pulls `amount` of the deposit token from `payer` and forwards it.
    ///
    /// The payer is refunded if forwarding fails.
    pub fn receive_principal(&mut self, payer: Address, amount: U256) -> Result<(), GaugeError> {
        let ctx = self.ctx;
        let gauge = ctx.gauge;
        let token = ctx.ports.deposit_token.as_ref();
        token.transfer_from(&gauge, &payer, &gauge, amount)?;
        if let Err(err) = self.state.secondary.forward(&gauge, amount) {
            if let Err(refund) = token.transfer(&gauge, &payer, amount) {
                warn!(?payer, %amount, error = %refund, "deposit refund failed");
            }
            return Err(err);
        }
        Ok(())
    }

    /// Retracts `amount` from the incentive contract and pays it to `receiver`.
    ///
    /// The amount is re-staked if the payment fails.
    pub fn release_principal(&mut self, receiver: Address, amount: U256) -> Result<(), GaugeError> {
        let gauge = self.ctx.gauge;
        self.state.secondary.retract(&gauge, amount)?;
        if let Err(err) = self.ctx.ports.deposit_token.transfer(&gauge, &receiver, amount) {
            if let Err(restake) = self.state.secondary.forward(&gauge, amount) {
                warn!(?receiver, %amount, error = %restake, "re-stake after failed withdraw failed");
            }
            return Err(err.into());
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Commit
    // -------------------------------------------------------------------------

    /// Commits the state, then makes the scheduled payouts.
    pub fn finish(mut self) -> Committed {
        self.undo = None;
        let gauge = self.ctx.gauge;
        let mut events = std::mem::take(&mut self.events);
        let mut paid = Vec::with_capacity(self.payouts.len());
        for payout in std::mem::take(&mut self.payouts) {
            let token = payout.token.token_id();
            if let Err(err) = payout.token.transfer(&gauge, &payout.receiver, payout.amount) {
                warn!(user = ?payout.user, ?token, amount = %payout.amount, error = %err, "secondary reward transfer failed");
                if let Err(refund) = self.state.secondary.refund(&payout) {
                    warn!(user = ?payout.user, ?token, error = %refund, "unpaid secondary reward not restored");
                }
                continue;
            }
            debug!(user = ?payout.user, ?token, amount = %payout.amount, "secondary reward paid");
            events.push(GaugeEvent::RewardPaid {
                user: payout.user,
                receiver: payout.receiver,
                token,
                amount: payout.amount,
            });
            paid.push(RewardPayout {
                token,
                receiver: payout.receiver,
                amount: payout.amount,
            });
        }
        Committed { events, payouts: paid }
    }
}

impl Drop for StagedWrite<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            debug!(
                gauge = ?self.ctx.gauge,
                positions = undo.positions.len(),
                journal_len = undo.journal_len,
                "staged write rolled back"
            );
            undo.apply(self.state);
        }
    }
}
