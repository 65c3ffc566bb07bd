//! Per-frame task scheduling
//!
//! The host asks for one redraw per display frame for as long as a
//! [`FrameHandle`] is alive. Dropping the handle (on any exit path,
//! including `?` returns and unwinding) cancels the repeating request.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;
use tracing::debug;

/// Decides whether another frame should be requested and measures frame time
pub struct FrameScheduler {
    live_handles: Rc<Cell<usize>>,
    last_frame: Option<Instant>,
    frames: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            live_handles: Rc::new(Cell::new(0)),
            last_frame: None,
            frames: 0,
        }
    }

    /// Start the repeating frame callback. It stays scheduled until the
    /// returned handle is cancelled or dropped.
    pub fn schedule(&mut self) -> FrameHandle {
        self.live_handles.set(self.live_handles.get() + 1);
        self.last_frame = None;
        debug!(live = self.live_handles.get(), "frame loop scheduled");
        FrameHandle {
            live_handles: Rc::clone(&self.live_handles),
            cancelled: false,
        }
    }

    /// True while at least one handle is alive
    pub fn is_active(&self) -> bool {
        self.live_handles.get() > 0
    }

    /// Frames begun since creation
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Mark the start of a frame and return the milliseconds since the
    /// previous one (0 for the first frame after scheduling).
    ///
    /// Returns `None` once the loop has been cancelled.
    pub fn begin_frame(&mut self) -> Option<f64> {
        self.begin_frame_at(Instant::now())
    }

    /// Same as [`FrameScheduler::begin_frame`] with an explicit timestamp
    pub fn begin_frame_at(&mut self, now: Instant) -> Option<f64> {
        if !self.is_active() {
            self.last_frame = None;
            return None;
        }
        let elapsed_ms = match self.last_frame {
            Some(last) => now.saturating_duration_since(last).as_secs_f64() * 1000.0,
            None => 0.0,
        };
        self.last_frame = Some(now);
        self.frames += 1;
        Some(elapsed_ms)
    }
}

/// Disposal hook for a scheduled frame loop
#[must_use = "dropping the handle cancels the frame loop immediately"]
pub struct FrameHandle {
    live_handles: Rc<Cell<usize>>,
    cancelled: bool,
}

impl FrameHandle {
    /// Cancel explicitly; equivalent to dropping the handle
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.cancelled {
            self.cancelled = true;
            self.live_handles
                .set(self.live_handles.get().saturating_sub(1));
            debug!(live = self.live_handles.get(), "frame loop cancelled");
        }
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        self.release();
    }
}
