//! Events surfaced by the cycle clock

use otto_core::Phase;
use serde::Serialize;

/// Something observable that happened while the crank advanced
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CycleEvent {
    /// The crank crossed a stroke boundary
    PhaseChanged {
        from: Phase,
        to: Phase,
        /// Angle right after the step that crossed the boundary
        angle: f64,
    },
    /// The crank wrapped through 720° and a new cycle began
    CycleCompleted { cycles: u64 },
}

impl CycleEvent {
    pub fn is_phase_change(&self) -> bool {
        matches!(self, CycleEvent::PhaseChanged { .. })
    }
}
