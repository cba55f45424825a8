//! Domain layer for the minter.

pub mod errors;
pub mod ledger;
pub mod schedule;

pub use errors::MinterError;
pub use ledger::{MintLedger, Registration};
pub use schedule::{RatePoint, RateSchedule};
