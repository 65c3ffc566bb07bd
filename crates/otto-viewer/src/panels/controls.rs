//! Start/stop, speed and manual rotation controls

use crate::input::{ViewerAction, COARSE_STEP, FINE_STEP};
use otto_runtime::CycleClock;

/// Stateless control strip; clicks come back as actions
#[derive(Default)]
pub struct ControlPanel;

impl ControlPanel {
    pub fn new() -> Self {
        Self
    }

    /// Draw the controls for the current clock state
    pub fn ui(&self, ui: &mut egui::Ui, clock: &CycleClock) -> Vec<ViewerAction> {
        let mut actions = Vec::new();
        let running = clock.is_running();
        let min = clock.config().min_speed as i32;
        let max = clock.config().max_speed as i32;

        ui.horizontal(|ui| {
            let label = if running { "Stop Engine" } else { "Start Engine" };
            if ui.button(label).clicked() {
                actions.push(ViewerAction::ToggleRunning);
            }

            ui.separator();
            ui.label("Speed:");
            let mut speed = clock.speed() as i32;
            let slider = egui::Slider::new(&mut speed, min..=max).suffix("x");
            if ui.add_enabled(running, slider).changed() {
                actions.push(ViewerAction::SetSpeed(speed));
            }
        });

        ui.horizontal(|ui| {
            ui.label("Rotate:");
            for delta in [-FINE_STEP, -COARSE_STEP, COARSE_STEP, FINE_STEP] {
                let text = format!("{delta:+}°");
                if ui.add_enabled(!running, egui::Button::new(text)).clicked() {
                    actions.push(ViewerAction::Rotate(delta));
                }
            }
        });

        actions
    }
}
