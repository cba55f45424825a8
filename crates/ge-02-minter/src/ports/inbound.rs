//! Inbound port: the minter as seen by its callers.

use crate::domain::MinterError;
use shared_types::{Address, GaugeHandle, GaugeId, U256};

pub trait MinterApi {
    /// Registers the gauge behind `gauge` under its own id.
    fn add_gauge(&mut self, caller: Address, gauge: GaugeHandle) -> Result<(), MinterError>;

    fn remove_gauge(&mut self, caller: Address, gauge: GaugeId) -> Result<(), MinterError>;

    fn set_rate(&mut self, caller: Address, rate: U256) -> Result<(), MinterError>;

    fn set_admin(&mut self, caller: Address, admin: Address) -> Result<(), MinterError>;

    /// Mints everything `for_user` (default: `caller`) has accrued on the
    /// registered `gauge` and not yet received. Returns the amount newly minted.
    fn mint(&mut self, caller: Address, gauge: GaugeId, for_user: Option<Address>) -> Result<U256, MinterError>;

    fn mint_many(
        &mut self,
        caller: Address,
        gauges: &[GaugeId],
        for_user: Option<Address>,
    ) -> Result<U256, MinterError>;

    fn minted(&self, user: &Address, gauge: &GaugeId) -> U256;

    fn gauge_registered(&self, gauge: &GaugeId) -> bool;

    fn admin(&self) -> Address;

    fn rate(&self) -> U256;
}
