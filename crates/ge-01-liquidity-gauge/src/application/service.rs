//! # Liquidity Gauge Service
//!
//! Wires the domain accounting to the deposit token, the vote escrow, the
//! weight registry, the emission rate and the incentive contract.
//!
//! ## Operation shape
//!
//! Each mutating operation runs through a staged write that logs the rows it
//! touches, checkpoints every user whose boosted balance it changes before
//! changing anything, and is rolled back unless every step succeeds.
//!
//! ## Exclusive access
//!
//! Mutations take `&mut self`. A host that shares a gauge across threads
//! wraps it in [`SharedGauge`].

use super::secondary::{RewardPayout, RewardsSetup};
use super::staged::{Committed, StagedWrite};
use super::state::GaugeState;
use crate::config::GaugeConfig;
use crate::domain::boost::{kick_allowed, KickInputs};
use crate::domain::invariants;
use crate::domain::{GaugeError, JournalEntry, RewardEntryPoints, UserPosition};
use crate::events::GaugeEvent;
use crate::ports::outbound::{ShareWeight, VoteWeight};
use parking_lot::Mutex;
use shared_types::{
    math, Address, CheckpointError, EmissionRateSource, EventSink, GaugeId, MintableGauge,
    TimeSource, Timestamp, TokenLedger, U256,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// A gauge shared between threads; the mutex serialises every operation.
pub type SharedGauge = Arc<Mutex<LiquidityGauge>>;

/// Addresses fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GaugeIdentity {
    /// The gauge's own address; holds deposit and reward token custody.
    pub gauge: GaugeId,
    /// The only caller besides the user that may checkpoint a user.
    pub minter: Address,
    pub admin: Address,
}

/// Collaborators the gauge reads from or moves tokens through.
#[derive(Clone)]
pub struct GaugePorts {
    pub deposit_token: Arc<dyn TokenLedger>,
    pub vote_weight: Arc<dyn VoteWeight>,
    pub share_weight: Arc<dyn ShareWeight>,
    pub emission_rate: Arc<dyn EmissionRateSource>,
    pub clock: Arc<dyn TimeSource>,
    pub events: Arc<dyn EventSink<GaugeEvent>>,
}

pub(crate) struct GaugeContext {
    pub gauge: GaugeId,
    pub minter: Address,
    pub config: GaugeConfig,
    pub ports: GaugePorts,
}

/// The boosted stake ledger.
pub struct LiquidityGauge {
    ctx: GaugeContext,
    state: GaugeState,
}

impl LiquidityGauge {
    pub fn new(identity: GaugeIdentity, config: GaugeConfig, ports: GaugePorts) -> Result<Self, GaugeError> {
        config.validate()?;
        let genesis = ports.clock.now();
        info!(
            gauge = ?identity.gauge,
            deposit_token = ?ports.deposit_token.token_id(),
            symbol = %config.symbol,
            "liquidity gauge created"
        );
        Ok(Self {
            state: GaugeState::new(identity.admin, genesis),
            ctx: GaugeContext {
                gauge: identity.gauge,
                minter: identity.minter,
                config,
                ports,
            },
        })
    }

    pub fn into_shared(self) -> SharedGauge {
        Arc::new(Mutex::new(self))
    }

    fn run<T>(
        &mut self,
        op: impl FnOnce(&mut StagedWrite<'_>) -> Result<T, GaugeError>,
    ) -> Result<(T, Vec<RewardPayout>), GaugeError> {
        let mut staged = StagedWrite::new(&self.ctx, &mut self.state);
        let out = op(&mut staged)?;
        let Committed { events, payouts } = staged.finish();
        for event in events {
            self.ctx.ports.events.publish(event);
        }
        Ok((out, payouts))
    }

    fn ensure_admin(&self, caller: &Address) -> Result<(), GaugeError> {
        if *caller != self.state.admin {
            return Err(GaugeError::AdminOnly { caller: *caller });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Stake
    // -------------------------------------------------------------------------

    /// Deposits `amount` of the deposit token from `caller` for `recipient`
    /// (default: `caller`), optionally paying out `recipient`'s secondary rewards.
    #[instrument(skip(self), fields(gauge = ?self.ctx.gauge))]
    pub fn deposit(
        &mut self,
        caller: Address,
        amount: U256,
        recipient: Option<Address>,
        claim: bool,
    ) -> Result<(), GaugeError> {
        let recipient = recipient.unwrap_or(caller);
        self.run(|w| {
            w.checkpoint(recipient)?;
            if !amount.is_zero() || claim {
                w.settle_secondary(recipient)?;
            }
            if claim {
                w.pay_secondary(recipient, recipient)?;
            }
            if !amount.is_zero() {
                w.credit_stake(recipient, amount)?;
                w.update_liquidity_limit(recipient)?;
                w.receive_principal(caller, amount)?;
            }
            w.emit(GaugeEvent::Deposit {
                provider: recipient,
                value: amount,
            });
            w.emit(GaugeEvent::Transfer {
                from: Address::zero(),
                to: recipient,
                value: amount,
            });
            Ok(())
        })?;
        info!(?caller, ?recipient, %amount, claim, "deposit");
        Ok(())
    }

    /// Withdraws `amount` of `caller`'s stake back to `caller`.
    #[instrument(skip(self), fields(gauge = ?self.ctx.gauge))]
    pub fn withdraw(&mut self, caller: Address, amount: U256, claim: bool) -> Result<(), GaugeError> {
        let available = self.state.balance_of(&caller);
        if amount > available {
            return Err(GaugeError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        self.run(|w| {
            w.checkpoint(caller)?;
            if !amount.is_zero() || claim {
                w.settle_secondary(caller)?;
            }
            if claim {
                w.pay_secondary(caller, caller)?;
            }
            if !amount.is_zero() {
                w.debit_stake(caller, amount)?;
                w.update_liquidity_limit(caller)?;
                w.release_principal(caller, amount)?;
            }
            w.emit(GaugeEvent::Withdraw {
                provider: caller,
                value: amount,
            });
            w.emit(GaugeEvent::Transfer {
                from: caller,
                to: Address::zero(),
                value: amount,
            });
            Ok(())
        })?;
        info!(?caller, %amount, claim, "withdraw");
        Ok(())
    }

    fn move_stake(w: &mut StagedWrite<'_>, from: Address, to: Address, amount: U256) -> Result<(), GaugeError> {
        let available = w.state().balance_of(&from);
        if amount > available {
            return Err(GaugeError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        w.checkpoint(from)?;
        w.checkpoint(to)?;
        if !amount.is_zero() {
            if w.ctx().config.settle_rewards_on_transfer {
                w.pull_secondary()?;
            }
            w.accrue_secondary(from)?;
            w.accrue_secondary(to)?;
            if from != to {
                w.move_balance(from, to, amount)?;
            }
            w.update_liquidity_limit(from)?;
            w.update_liquidity_limit(to)?;
        }
        w.emit(GaugeEvent::Transfer {
            from,
            to,
            value: amount,
        });
        Ok(())
    }

    #[instrument(skip(self), fields(gauge = ?self.ctx.gauge))]
    pub fn transfer(&mut self, caller: Address, to: Address, amount: U256) -> Result<bool, GaugeError> {
        self.run(|w| Self::move_stake(w, caller, to, amount))?;
        Ok(true)
    }

    /// Moves `amount` from `from` to `to` using `spender`'s allowance.
    ///
    /// An allowance of `U256::MAX` is never decremented.
    #[instrument(skip(self), fields(gauge = ?self.ctx.gauge))]
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<bool, GaugeError> {
        self.run(|w| {
            let allowance = w.state().allowance(&from, &spender);
            if allowance < amount {
                return Err(GaugeError::InsufficientAllowance {
                    required: amount,
                    available: allowance,
                });
            }
            if allowance != U256::MAX {
                w.set_allowance(from, spender, allowance - amount);
            }
            Self::move_stake(w, from, to, amount)
        })?;
        Ok(true)
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, value: U256) -> Result<bool, GaugeError> {
        self.run(|w| {
            w.set_allowance(owner, spender, value);
            w.emit(GaugeEvent::Approval {
                owner,
                spender,
                value,
            });
            Ok(())
        })?;
        Ok(true)
    }

    pub fn approve(&mut self, caller: Address, spender: Address, amount: U256) -> Result<bool, GaugeError> {
        self.set_allowance(caller, spender, amount)
    }

    pub fn increase_allowance(&mut self, caller: Address, spender: Address, added: U256) -> Result<bool, GaugeError> {
        let value = math::add(self.state.allowance(&caller, &spender), added, "allowance")?;
        self.set_allowance(caller, spender, value)
    }

    pub fn decrease_allowance(
        &mut self,
        caller: Address,
        spender: Address,
        subtracted: U256,
    ) -> Result<bool, GaugeError> {
        let current = self.state.allowance(&caller, &spender);
        let value = current
            .checked_sub(subtracted)
            .ok_or(GaugeError::InsufficientAllowance {
                required: subtracted,
                available: current,
            })?;
        self.set_allowance(caller, spender, value)
    }

    // -------------------------------------------------------------------------
    // Checkpoints
    // -------------------------------------------------------------------------

    /// Checkpoints `user` and refreshes their working balance.
    ///
    /// Only `user` itself or the minter may call this.
    pub fn user_checkpoint(&mut self, caller: Address, user: Address) -> Result<bool, GaugeError> {
        if caller != user && caller != self.ctx.minter {
            return Err(GaugeError::Unauthorized { caller, user });
        }
        self.run(|w| {
            w.checkpoint(user)?;
            w.update_liquidity_limit(user)
        })?;
        Ok(true)
    }

    /// Forces `user`'s cached boost down to its current value.
    #[instrument(skip(self), fields(gauge = ?self.ctx.gauge))]
    pub fn kick(&mut self, caller: Address, user: Address) -> Result<(), GaugeError> {
        let (before, after) = self.run(|w| {
            let cached = w.state().position(&user);
            let votes = w.ctx().ports.vote_weight.as_ref();
            let inputs = KickInputs {
                user_weight: votes.balance_of(&user, w.now()),
                last_lock_update: votes.last_lock_update(&user),
                last_checkpoint: cached.integrate_checkpoint_of,
                now: w.now(),
            };
            if !kick_allowed(&inputs, &w.ctx().config.boost) {
                return Err(GaugeError::KickNotAllowed { user });
            }
            let recomputed = w.recompute_working_balance(&user)?;
            if recomputed >= cached.working_balance {
                return Err(GaugeError::KickNotNeeded { user });
            }
            w.checkpoint(user)?;
            w.update_liquidity_limit(user)?;
            Ok((cached.working_balance, w.state().position(&user).working_balance))
        })?
        .0;
        info!(?caller, ?user, %before, %after, "working balance kicked");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Secondary rewards
    // -------------------------------------------------------------------------

    /// Pays out `for_user`'s (default: `caller`'s) secondary rewards to them.
    #[instrument(skip(self), fields(gauge = ?self.ctx.gauge))]
    pub fn claim_rewards(&mut self, caller: Address, for_user: Option<Address>) -> Result<Vec<RewardPayout>, GaugeError> {
        let user = for_user.unwrap_or(caller);
        let ((), payouts) = self.run(|w| w.pay_secondary(user, user))?;
        Ok(payouts)
    }

    /// Replaces the incentive contract wiring. Admin only.
    #[instrument(skip(self, setup), fields(gauge = ?self.ctx.gauge))]
    pub fn set_rewards(&mut self, caller: Address, setup: RewardsSetup) -> Result<(), GaugeError> {
        self.ensure_admin(&caller)?;
        self.run(|w| {
            w.reconfigure_secondary(setup)?;
            let secondary = &w.state().secondary;
            let event = GaugeEvent::RewardsConfigured {
                contract: secondary.contract_id(),
                entry_points: secondary.entry_points(),
                tokens: secondary.tokens().to_vec(),
            };
            w.emit(event);
            Ok(())
        })?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Ownership
    // -------------------------------------------------------------------------

    pub fn commit_transfer_ownership(&mut self, caller: Address, new_admin: Address) -> Result<(), GaugeError> {
        self.ensure_admin(&caller)?;
        self.run(|w| {
            w.set_future_admin(Some(new_admin));
            w.emit(GaugeEvent::CommitOwnership { admin: new_admin });
            Ok(())
        })?;
        info!(?new_admin, "gauge ownership transfer committed");
        Ok(())
    }

    /// Completes an ownership transfer; only the committed admin may call this.
    pub fn accept_transfer_ownership(&mut self, caller: Address) -> Result<(), GaugeError> {
        let pending = self.state.future_admin.ok_or(GaugeError::NoPendingAdmin)?;
        if caller != pending {
            return Err(GaugeError::AdminOnly { caller });
        }
        self.run(|w| {
            w.set_admin(pending);
            w.set_future_admin(None);
            w.emit(GaugeEvent::ApplyOwnership { admin: pending });
            Ok(())
        })?;
        info!(admin = ?pending, "gauge ownership transferred");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn gauge_id(&self) -> GaugeId {
        self.ctx.gauge
    }

    pub fn minter(&self) -> Address {
        self.ctx.minter
    }

    pub fn deposit_token(&self) -> Address {
        self.ctx.ports.deposit_token.token_id()
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.ctx.config
    }

    pub fn name(&self) -> &str {
        &self.ctx.config.name
    }

    pub fn symbol(&self) -> &str {
        &self.ctx.config.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.ctx.config.decimals
    }

    pub fn admin(&self) -> Address {
        self.state.admin
    }

    pub fn future_admin(&self) -> Option<Address> {
        self.state.future_admin
    }

    pub fn balance_of(&self, user: &Address) -> U256 {
        self.state.balance_of(user)
    }

    /// Total raw stake.
    pub fn total_supply(&self) -> U256 {
        self.state.total_stake
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.state.allowance(owner, spender)
    }

    pub fn working_balance(&self, user: &Address) -> U256 {
        self.state.position(user).working_balance
    }

    pub fn working_supply(&self) -> U256 {
        self.state.working_supply
    }

    pub fn position(&self, user: &Address) -> UserPosition {
        self.state.position(user)
    }

    /// Cumulative accrual as of `user`'s last checkpoint.
    pub fn integrate_fraction(&self, user: &Address) -> U256 {
        self.state.position(user).integrate_fraction
    }

    pub fn integrate_checkpoint_of(&self, user: &Address) -> Timestamp {
        self.state.position(user).integrate_checkpoint_of
    }

    pub fn integrate_inv_supply_of(&self, user: &Address) -> U256 {
        self.state.position(user).integrate_inv_supply_of
    }

    pub fn period(&self) -> u64 {
        self.state.journal.period()
    }

    pub fn period_timestamp(&self, period: u64) -> Option<Timestamp> {
        self.state.journal.entry(period).map(|e| e.timestamp)
    }

    pub fn integrate_inv_supply(&self, period: u64) -> Option<U256> {
        self.state.journal.entry(period).map(|e| e.integrate_inv_supply)
    }

    /// Time of the latest journal entry.
    pub fn integrate_checkpoint(&self) -> Timestamp {
        self.state.journal.head().timestamp
    }

    /// Latest journal entry at or before `at`.
    pub fn integral_at(&self, at: Timestamp) -> Option<JournalEntry> {
        self.state.journal.at(at).copied()
    }

    pub fn reward_contract(&self) -> Option<Address> {
        self.state.secondary.contract_id()
    }

    pub fn reward_entry_points(&self) -> RewardEntryPoints {
        self.state.secondary.entry_points()
    }

    pub fn reward_tokens(&self) -> Vec<Address> {
        self.state.secondary.tokens().to_vec()
    }

    /// Stored plus pending `token` reward for `user`, as of the last pull.
    pub fn claimable_reward(&self, user: &Address, token: &Address) -> Result<U256, GaugeError> {
        self.state
            .secondary
            .claimable_reward(user, token, self.state.balance_of(user))
    }

    pub fn claimed_reward(&self, user: &Address, token: &Address) -> U256 {
        self.state.secondary.claimed_reward(user, token)
    }

    /// True when the stake and working-supply sums and the journal ordering hold.
    pub fn invariants_hold(&self) -> bool {
        let positions = self.state.positions.values();
        invariants::invariant_working_supply(positions.clone(), self.state.working_supply)
            && invariants::invariant_total_stake(positions, self.state.total_stake)
            && invariants::invariant_journal_ordered(&self.state.journal)
    }
}

impl MintableGauge for LiquidityGauge {
    fn gauge_id(&self) -> GaugeId {
        self.ctx.gauge
    }

    fn user_checkpoint(&mut self, caller: Address, user: Address) -> Result<(), CheckpointError> {
        LiquidityGauge::user_checkpoint(self, caller, user)
            .map(|_| ())
            .map_err(CheckpointError::from)
    }

    fn integrate_fraction(&self, user: &Address) -> U256 {
        LiquidityGauge::integrate_fraction(self, user)
    }
}
