//! Event Bus adapter
//!
//! Implements the EventBus port by recording every published event

use crate::events::RegistryEvent;
use crate::ports::EventBus;

/// In-memory event bus adapter for testing and single-process deployments
pub struct InMemoryEventBus {
    events: parking_lot::RwLock<Vec<RegistryEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            events: parking_lot::RwLock::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.read().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.read().len()
    }

    pub fn last_event(&self) -> Option<RegistryEvent> {
        self.events.read().last().cloned()
    }

    pub fn clear(&self) {
        self.events.write().clear();
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus for InMemoryEventBus {
    fn publish(&self, event: RegistryEvent) -> Result<(), String> {
        self.events.write().push(event);
        Ok(())
    }
}
