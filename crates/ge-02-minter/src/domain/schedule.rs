//! # Emission Rate Schedule
//!
//! Append-only history of `(effective_from, rate)` points. The first point
//! sits at the emission start; a change never rewrites history before the
//! last recorded point, so gauges whose journals lag behind still integrate
//! each rate exactly over the interval it was in effect.
//!
//! The schedule is cheap to clone and every clone sees the same history:
//! the minter writes it, gauges read it through [`EmissionRateSource`].

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared_types::{EmissionRateSource, Timestamp, U256};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatePoint {
    pub effective_from: Timestamp,
    pub rate: U256,
}

#[derive(Debug)]
struct Points {
    start: Timestamp,
    points: Vec<RatePoint>,
}

#[derive(Clone, Debug)]
pub struct RateSchedule {
    inner: Arc<RwLock<Points>>,
}

impl RateSchedule {
    pub fn new(emission_start: Timestamp, initial_rate: U256) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Points {
                start: emission_start,
                points: vec![RatePoint {
                    effective_from: emission_start,
                    rate: initial_rate,
                }],
            })),
        }
    }

    /// Sets the rate from `at` onward and returns the effective time.
    ///
    /// The effective time is never earlier than the emission start or the
    /// last recorded change; a change at the same time replaces it.
    pub fn set_rate(&self, at: Timestamp, rate: U256) -> Timestamp {
        let mut inner = self.inner.write();
        let start = inner.start;
        let last = inner
            .points
            .last()
            .map(|p| p.effective_from)
            .unwrap_or(start);
        let effective_from = at.max(start).max(last);
        match inner.points.last_mut() {
            Some(point) if point.effective_from == effective_from => point.rate = rate,
            _ => inner.points.push(RatePoint {
                effective_from,
                rate,
            }),
        }
        effective_from
    }

    pub fn points(&self) -> Vec<RatePoint> {
        self.inner.read().points.clone()
    }
}

impl EmissionRateSource for RateSchedule {
    fn rate_at(&self, at: Timestamp) -> U256 {
        let inner = self.inner.read();
        let index = inner.points.partition_point(|p| p.effective_from <= at);
        index
            .checked_sub(1)
            .and_then(|i| inner.points.get(i))
            .map(|p| p.rate)
            .unwrap_or_default()
    }

    fn next_rate_change(&self, after: Timestamp) -> Option<Timestamp> {
        let inner = self.inner.read();
        let index = inner.points.partition_point(|p| p.effective_from <= after);
        inner.points.get(index).map(|p| p.effective_from)
    }

    fn emission_start(&self) -> Timestamp {
        self.inner.read().start
    }
}
