//! Missing-uncle sink adapter
//!
//! Records every `MissingUnclesEvent` for the sync layer to drain.

use crate::events::MissingUnclesEvent;
use crate::ports::MissingUncleSink;
use async_trait::async_trait;

/// In-memory missing-uncle sink
pub struct InMemoryMissingUncleSink {
    events: parking_lot::RwLock<Vec<MissingUnclesEvent>>,
}

impl InMemoryMissingUncleSink {
    pub fn new() -> Self {
        Self {
            events: parking_lot::RwLock::new(Vec::new()),
        }
    }

    pub fn get_events(&self) -> Vec<MissingUnclesEvent> {
        self.events.read().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.read().len()
    }

    /// Remove and return all recorded events
    pub fn drain(&self) -> Vec<MissingUnclesEvent> {
        std::mem::take(&mut *self.events.write())
    }
}

impl Default for InMemoryMissingUncleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MissingUncleSink for InMemoryMissingUncleSink {
    async fn notify_missing_uncles(&self, event: MissingUnclesEvent) -> Result<(), String> {
        self.events.write().push(event);
        Ok(())
    }
}
