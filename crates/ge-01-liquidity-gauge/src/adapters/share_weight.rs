//! Weight registry with explicitly set per-gauge weights.

use crate::ports::outbound::ShareWeight;
use parking_lot::RwLock;
use shared_types::{GaugeId, Timestamp, PRECISION, U256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
pub struct FixedShareWeight {
    default_weight: U256,
    weights: RwLock<HashMap<GaugeId, U256>>,
    checkpoints: AtomicUsize,
}

impl FixedShareWeight {
    pub fn new(default_weight: U256) -> Self {
        Self {
            default_weight,
            weights: RwLock::new(HashMap::new()),
            checkpoints: AtomicUsize::new(0),
        }
    }

    /// Every gauge receives the whole rate.
    pub fn full() -> Self {
        Self::new(PRECISION)
    }

    pub fn set_weight(&self, gauge: GaugeId, weight: U256) {
        self.weights.write().insert(gauge, weight);
    }

    /// Number of `checkpoint_gauge` calls received.
    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.load(Ordering::Relaxed)
    }
}

impl Default for FixedShareWeight {
    fn default() -> Self {
        Self::full()
    }
}

impl ShareWeight for FixedShareWeight {
    fn relative_weight(&self, gauge: &GaugeId, _at: Timestamp) -> U256 {
        self.weights
            .read()
            .get(gauge)
            .copied()
            .unwrap_or(self.default_weight)
    }

    fn checkpoint_gauge(&self, _gauge: &GaugeId) {
        self.checkpoints.fetch_add(1, Ordering::Relaxed);
    }
}
