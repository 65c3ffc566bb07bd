//! Frame rate and clock statistics, toggled with F1

use otto_runtime::CycleClock;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Rolling one-second frame counter
pub struct RenderStats {
    frame_times: VecDeque<Instant>,
    fps: f32,
    last_update: Instant,
    pub visible: bool,
}

impl Default for RenderStats {
    fn default() -> Self {
        Self {
            frame_times: VecDeque::new(),
            fps: 0.0,
            last_update: Instant::now(),
            visible: false,
        }
    }
}

impl RenderStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self) {
        self.record_frame_at(Instant::now());
    }

    pub fn record_frame_at(&mut self, now: Instant) {
        self.frame_times.push_back(now);

        let cutoff = now.checked_sub(Duration::from_secs(1)).unwrap_or(now);
        while self.frame_times.front().is_some_and(|&t| t < cutoff) {
            self.frame_times.pop_front();
        }

        // Refresh the shown value four times a second
        if now.duration_since(self.last_update) > Duration::from_millis(250) {
            self.fps = self.frame_times.len() as f32;
            self.last_update = now;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn ui(&self, ui: &mut egui::Ui, clock: &CycleClock) {
        ui.horizontal(|ui| {
            ui.monospace(format!("FPS: {:.0}", self.fps));
            if self.fps > 0.0 {
                ui.monospace(format!("Frame: {:.1}ms", 1000.0 / self.fps));
            }
            ui.separator();
            ui.monospace(format!("Cycles: {}", clock.cycles()));
            ui.monospace(format!("Step: {:.1}ms", clock.config().step_ms()));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_frames_in_last_second() {
        let mut stats = RenderStats::new();
        let start = Instant::now();
        for i in 0..30 {
            stats.record_frame_at(start + Duration::from_millis(i * 20));
        }
        // Last refresh happened at 520ms with 27 frames recorded
        assert_eq!(stats.fps(), 27.0);

        stats.record_frame_at(start + Duration::from_millis(1500));
        // Only frames newer than 500ms survive
        assert_eq!(stats.fps(), 6.0);
    }
}
