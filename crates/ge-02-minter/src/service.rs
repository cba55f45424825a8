//! # Minter Service
//!
//! The only holder of the reward token's issuance capability. For each
//! `(user, gauge)` pair it remembers how much it has already minted and
//! pays only the difference to what the gauge reports as accrued.
//!
//! Gauges are registered as handles and minted by id. The minter never
//! checkpoints or reads a gauge object handed to it at mint time.
//!
//! ## Mint flow
//!
//! ```text
//! mint(gauge_id, user)
//!   ├─ handle registered?           else GaugeNotRegistered
//!   ├─ gauge.user_checkpoint(minter, user)
//!   ├─ now < emission_start?        delta clamped to 0, nothing recorded
//!   ├─ delta = integrate_fraction - minted
//!   ├─ issue(delta)                 failure leaves minted unchanged
//!   └─ minted = integrate_fraction
//! ```

use crate::config::MinterConfig;
use crate::domain::{MintLedger, MinterError, RateSchedule, Registration};
use crate::events::MinterEvent;
use crate::ports::{MinterApi, RewardIssuer};
use shared_types::{
    math, Address, EmissionRateSource, EventSink, GaugeHandle, GaugeId, MintableGauge, TimeSource, U256,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Collaborators the minter issues through and reads time from.
#[derive(Clone)]
pub struct MinterPorts {
    pub issuer: Arc<dyn RewardIssuer>,
    pub clock: Arc<dyn TimeSource>,
    pub events: Arc<dyn EventSink<MinterEvent>>,
}

pub struct Minter {
    id: Address,
    admin: Address,
    config: MinterConfig,
    schedule: RateSchedule,
    ledger: MintLedger,
    ports: MinterPorts,
}

impl Minter {
    pub fn new(
        id: Address,
        admin: Address,
        config: MinterConfig,
        ports: MinterPorts,
    ) -> Result<Self, MinterError> {
        config.validate().map_err(MinterError::InvalidConfig)?;
        info!(
            minter = ?id,
            token = ?ports.issuer.token_id(),
            emission_start = config.emission_start,
            rate = %config.initial_rate,
            "minter created"
        );
        Ok(Self {
            id,
            admin,
            schedule: RateSchedule::new(config.emission_start, config.initial_rate),
            config,
            ledger: MintLedger::default(),
            ports,
        })
    }

    pub fn id(&self) -> Address {
        self.id
    }

    pub fn config(&self) -> &MinterConfig {
        &self.config
    }

    /// A handle on the rate history; gauges integrate against it.
    pub fn schedule(&self) -> RateSchedule {
        self.schedule.clone()
    }

    pub fn reward_token(&self) -> Address {
        self.ports.issuer.token_id()
    }

    pub fn registered_gauges(&self) -> Vec<GaugeId> {
        self.ledger.registered().copied().collect()
    }

    fn ensure_admin(&self, caller: &Address) -> Result<(), MinterError> {
        if *caller != self.admin {
            return Err(MinterError::AdminOnly { caller: *caller });
        }
        Ok(())
    }

    fn registered_handle(&self, gauge: &GaugeId) -> Result<GaugeHandle, MinterError> {
        self.ledger
            .handle(gauge)
            .ok_or(MinterError::GaugeNotRegistered { gauge: *gauge })
    }

    fn issuance_started(&self) -> bool {
        self.ports.clock.now() >= self.schedule.emission_start()
    }

    // -------------------------------------------------------------------------
    // Registry and parameters
    // -------------------------------------------------------------------------

    /// Registers `gauge` under the id it reports. Registering the same
    /// handle twice is a no-op; a different handle under a taken id is
    /// rejected.
    pub fn add_gauge(&mut self, caller: Address, gauge: GaugeHandle) -> Result<(), MinterError> {
        self.ensure_admin(&caller)?;
        let gauge_id = gauge.lock().gauge_id();
        match self.ledger.register(gauge_id, gauge) {
            Registration::Added => {
                info!(gauge = ?gauge_id, "gauge registered");
                self.ports.events.publish(MinterEvent::GaugeAdded { gauge: gauge_id });
                Ok(())
            }
            Registration::Unchanged => Ok(()),
            Registration::Conflict => Err(MinterError::GaugeIdTaken { gauge: gauge_id }),
        }
    }

    /// Deregisters `gauge`. Amounts already minted from it stay recorded;
    /// removing an unregistered gauge is a no-op.
    pub fn remove_gauge(&mut self, caller: Address, gauge: GaugeId) -> Result<(), MinterError> {
        self.ensure_admin(&caller)?;
        if self.ledger.deregister(&gauge) {
            info!(gauge = ?gauge, "gauge deregistered");
            self.ports.events.publish(MinterEvent::GaugeRemoved { gauge });
        }
        Ok(())
    }

    /// Changes the emission rate from now on.
    pub fn set_rate(&mut self, caller: Address, rate: U256) -> Result<(), MinterError> {
        self.ensure_admin(&caller)?;
        let effective_from = self.schedule.set_rate(self.ports.clock.now(), rate);
        info!(rate = %rate, effective_from, "emission rate changed");
        self.ports.events.publish(MinterEvent::RateChanged {
            rate,
            effective_from,
        });
        Ok(())
    }

    pub fn set_admin(&mut self, caller: Address, admin: Address) -> Result<(), MinterError> {
        self.ensure_admin(&caller)?;
        self.admin = admin;
        info!(admin = ?admin, "minter admin changed");
        self.ports.events.publish(MinterEvent::AdminChanged { admin });
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Minting
    // -------------------------------------------------------------------------

    /// Mints `for_user`'s (default: `caller`) unminted accrual on `gauge`.
    #[instrument(skip(self))]
    pub fn mint(&mut self, caller: Address, gauge: GaugeId, for_user: Option<Address>) -> Result<U256, MinterError> {
        let user = for_user.unwrap_or(caller);
        let handle = self.registered_handle(&gauge)?;
        let (owed, delta) = {
            let mut locked = handle.lock();
            self.owed_delta(&mut *locked, user, self.ledger.minted(&user, &gauge))?
        };
        if !self.issuance_started() {
            debug!(user = ?user, "issuance not started; nothing to mint");
            return Ok(U256::zero());
        }
        if delta.is_zero() {
            return Ok(U256::zero());
        }
        self.ports.issuer.issue(&self.id, &user, delta)?;
        self.record(user, gauge, owed);
        info!(user = ?user, amount = %delta, total = %owed, "minted");
        Ok(delta)
    }

    /// Mints `for_user`'s accrual across several gauges in one issuance.
    ///
    /// Every gauge must be registered; nothing is checkpointed otherwise.
    pub fn mint_many(
        &mut self,
        caller: Address,
        gauges: &[GaugeId],
        for_user: Option<Address>,
    ) -> Result<U256, MinterError> {
        let max = self.config.max_gauges_per_batch;
        if gauges.len() > max {
            return Err(MinterError::TooManyGauges {
                count: gauges.len(),
                max,
            });
        }
        let handles = gauges
            .iter()
            .map(|gauge| self.registered_handle(gauge).map(|handle| (*gauge, handle)))
            .collect::<Result<Vec<_>, _>>()?;
        let user = for_user.unwrap_or(caller);

        let mut totals: HashMap<GaugeId, U256> = HashMap::new();
        let mut issued = U256::zero();
        for (gauge_id, handle) in &handles {
            let already = totals
                .get(gauge_id)
                .copied()
                .unwrap_or_else(|| self.ledger.minted(&user, gauge_id));
            let (owed, delta) = {
                let mut locked = handle.lock();
                self.owed_delta(&mut *locked, user, already)?
            };
            issued = math::add(issued, delta, "mint_many total")?;
            totals.insert(*gauge_id, owed);
        }
        if !self.issuance_started() || issued.is_zero() {
            return Ok(U256::zero());
        }

        self.ports.issuer.issue(&self.id, &user, issued)?;
        for (gauge_id, owed) in totals {
            if owed != self.ledger.minted(&user, &gauge_id) {
                self.record(user, gauge_id, owed);
            }
        }
        info!(user = ?user, gauges = gauges.len(), amount = %issued, "minted from batch");
        Ok(issued)
    }

    fn owed_delta(
        &self,
        gauge: &mut dyn MintableGauge,
        user: Address,
        already: U256,
    ) -> Result<(U256, U256), MinterError> {
        gauge.user_checkpoint(self.id, user)?;
        let owed = gauge.integrate_fraction(&user);
        if owed < already {
            warn!(user = ?user, owed = %owed, minted = %already, "gauge reports less than minted");
            return Ok((already, U256::zero()));
        }
        Ok((owed, math::sub(owed, already, "mint delta")?))
    }

    fn record(&mut self, user: Address, gauge: GaugeId, owed: U256) {
        self.ledger.record(user, gauge, owed);
        self.ports.events.publish(MinterEvent::Minted {
            recipient: user,
            gauge,
            minted: owed,
        });
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn minted(&self, user: &Address, gauge: &GaugeId) -> U256 {
        self.ledger.minted(user, gauge)
    }

    /// Accrued but unminted as of `user`'s last checkpoint on `gauge`.
    pub fn mintable(&self, gauge: &GaugeId, user: &Address) -> Result<U256, MinterError> {
        let handle = self.registered_handle(gauge)?;
        let owed = handle.lock().integrate_fraction(user);
        Ok(owed.saturating_sub(self.ledger.minted(user, gauge)))
    }

    pub fn gauge_registered(&self, gauge: &GaugeId) -> bool {
        self.ledger.is_registered(gauge)
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    /// Rate in effect now.
    pub fn rate(&self) -> U256 {
        self.schedule.rate_at(self.ports.clock.now())
    }
}

impl MinterApi for Minter {
    fn add_gauge(&mut self, caller: Address, gauge: GaugeHandle) -> Result<(), MinterError> {
        Minter::add_gauge(self, caller, gauge)
    }

    fn remove_gauge(&mut self, caller: Address, gauge: GaugeId) -> Result<(), MinterError> {
        Minter::remove_gauge(self, caller, gauge)
    }

    fn set_rate(&mut self, caller: Address, rate: U256) -> Result<(), MinterError> {
        Minter::set_rate(self, caller, rate)
    }

    fn set_admin(&mut self, caller: Address, admin: Address) -> Result<(), MinterError> {
        Minter::set_admin(self, caller, admin)
    }

    fn mint(&mut self, caller: Address, gauge: GaugeId, for_user: Option<Address>) -> Result<U256, MinterError> {
        Minter::mint(self, caller, gauge, for_user)
    }

    fn mint_many(
        &mut self,
        caller: Address,
        gauges: &[GaugeId],
        for_user: Option<Address>,
    ) -> Result<U256, MinterError> {
        Minter::mint_many(self, caller, gauges, for_user)
    }

    fn minted(&self, user: &Address, gauge: &GaugeId) -> U256 {
        Minter::minted(self, user, gauge)
    }

    fn gauge_registered(&self, gauge: &GaugeId) -> bool {
        Minter::gauge_registered(self, gauge)
    }

    fn admin(&self) -> Address {
        Minter::admin(self)
    }

    fn rate(&self) -> U256 {
        Minter::rate(self)
    }
}
