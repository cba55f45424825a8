//! Event publication port.
//!
//! Components buffer events during an operation and publish them only
//! after the operation has committed.

use parking_lot::Mutex;
use std::fmt::Debug;

/// Receives committed domain events.
pub trait EventSink<E>: Send + Sync {
    fn publish(&self, event: E);
}

/// Short stable name of an event variant, used as a metrics label.
pub trait EventKind {
    fn kind(&self) -> &'static str;
}

/// Keeps every published event in memory.
#[derive(Debug)]
pub struct RecordingSink<E> {
    events: Mutex<Vec<E>>,
}

impl<E> RecordingSink<E> {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<E> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl<E: Clone> RecordingSink<E> {
    pub fn events(&self) -> Vec<E> {
        self.events.lock().clone()
    }

    pub fn last(&self) -> Option<E> {
        self.events.lock().last().cloned()
    }
}

impl<E> Default for RecordingSink<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Send> EventSink<E> for RecordingSink<E> {
    fn publish(&self, event: E) {
        self.events.lock().push(event);
    }
}

/// Logs every event at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl<E: Debug + Send> EventSink<E> for TracingSink {
    fn publish(&self, event: E) {
        tracing::debug!(event = ?event, "event published");
    }
}
