//! Event bus collecting clock events between frames

use crate::event::CycleEvent;

/// A simple event queue that the clock feeds and the UI drains
pub struct EventBus {
    events: Vec<CycleEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: CycleEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = CycleEvent>) {
        self.events.extend(events);
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<CycleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otto_core::Phase;

    #[test]
    fn test_push_and_drain() {
        let mut bus = EventBus::new();
        assert!(bus.is_empty());

        bus.push(CycleEvent::PhaseChanged {
            from: Phase::Intake,
            to: Phase::Compression,
            angle: 180.0,
        });
        bus.extend([CycleEvent::CycleCompleted { cycles: 1 }]);

        assert_eq!(bus.len(), 2);
        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(events[0].is_phase_change());
        assert!(bus.is_empty());
    }

    #[test]
    fn test_drain_clears() {
        let mut bus = EventBus::new();
        bus.push(CycleEvent::CycleCompleted { cycles: 3 });

        let _ = bus.drain();
        assert!(bus.drain().is_empty());
    }
}
