//! Otto Runtime - Animation loop infrastructure
//!
//! Provides the building blocks the host UI drives once per display frame:
//! - `CycleClock` - fixed-timestep accumulator that owns the crank state
//! - `CycleEvent` / `EventBus` - phase transitions surfaced by the clock
//! - `FrameScheduler` / `FrameHandle` - cancellable per-frame task

mod clock;
mod event;
mod event_bus;
mod scheduler;

pub use clock::{CycleClock, MAX_FRAME_MS};
pub use event::CycleEvent;
pub use event_bus::EventBus;
pub use scheduler::{FrameHandle, FrameScheduler};
