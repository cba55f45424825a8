//! Events published by the minter after each committed change.

use serde::{Deserialize, Serialize};
use shared_types::{Address, EventKind, GaugeId, Timestamp, U256};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinterEvent {
    Minted {
        recipient: Address,
        gauge: GaugeId,
        /// Cumulative amount minted to `recipient` from `gauge`.
        minted: U256,
    },
    RateChanged {
        rate: U256,
        effective_from: Timestamp,
    },
    GaugeAdded {
        gauge: GaugeId,
    },
    GaugeRemoved {
        gauge: GaugeId,
    },
    AdminChanged {
        admin: Address,
    },
}

impl EventKind for MinterEvent {
    fn kind(&self) -> &'static str {
        match self {
            MinterEvent::Minted { .. } => "minted",
            MinterEvent::RateChanged { .. } => "rate_changed",
            MinterEvent::GaugeAdded { .. } => "gauge_added",
            MinterEvent::GaugeRemoved { .. } => "gauge_removed",
            MinterEvent::AdminChanged { .. } => "admin_changed",
        }
    }
}
