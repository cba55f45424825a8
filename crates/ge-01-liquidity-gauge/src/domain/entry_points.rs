//! Entry-point bundle for the external incentive contract.
//!
//! Packed layout (32 bytes): `[0..4]` stake, `[4..8]` withdraw, `[8..12]`
//! claim, remainder zero. An all-zero selector disables that entry point.

use crate::domain::errors::GaugeError;
use serde::{Deserialize, Serialize};

/// 4-byte function selector.
pub type Selector = [u8; 4];

const SELECTOR_LEN: usize = 4;
const PACKED_LEN: usize = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardEntryPoints {
    pub stake: Option<Selector>,
    pub withdraw: Option<Selector>,
    pub claim: Option<Selector>,
}

fn selector_at(packed: &[u8; PACKED_LEN], index: usize) -> Option<Selector> {
    let start = index * SELECTOR_LEN;
    let mut selector = [0u8; SELECTOR_LEN];
    selector.copy_from_slice(&packed[start..start + SELECTOR_LEN]);
    (selector != [0u8; SELECTOR_LEN]).then_some(selector)
}

impl RewardEntryPoints {
    /// Bundle with no entry points: principal stays in the gauge.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_packed(packed: &[u8; PACKED_LEN]) -> Self {
        Self {
            stake: selector_at(packed, 0),
            withdraw: selector_at(packed, 1),
            claim: selector_at(packed, 2),
        }
    }

    /// Parses a hex bundle, with or without `0x`, right-padding to 32 bytes.
    pub fn from_hex(input: &str) -> Result<Self, GaugeError> {
        let digits = input.strip_prefix("0x").unwrap_or(input);
        let bytes = hex::decode(digits)
            .map_err(|e| GaugeError::InvalidRewardConfig(format!("entry points: {e}")))?;
        if bytes.len() > PACKED_LEN {
            return Err(GaugeError::InvalidRewardConfig(format!(
                "entry points: {} bytes exceeds {PACKED_LEN}",
                bytes.len()
            )));
        }
        let mut packed = [0u8; PACKED_LEN];
        packed[..bytes.len()].copy_from_slice(&bytes);
        Ok(Self::from_packed(&packed))
    }

    pub fn to_packed(&self) -> [u8; PACKED_LEN] {
        let mut packed = [0u8; PACKED_LEN];
        for (index, selector) in [self.stake, self.withdraw, self.claim].iter().enumerate() {
            if let Some(selector) = selector {
                let start = index * SELECTOR_LEN;
                packed[start..start + SELECTOR_LEN].copy_from_slice(selector);
            }
        }
        packed
    }

    /// True when principal is forwarded to the incentive contract.
    pub fn forwards_principal(&self) -> bool {
        self.stake.is_some()
    }

    /// Stake and withdraw must be configured together.
    pub fn validate(&self) -> Result<(), GaugeError> {
        match (self.stake, self.withdraw) {
            (Some(_), None) => Err(GaugeError::InvalidRewardConfig(
                "stake entry point without withdraw".into(),
            )),
            (None, Some(_)) => Err(GaugeError::InvalidRewardConfig(
                "withdraw entry point without stake".into(),
            )),
            _ => Ok(()),
        }
    }
}
