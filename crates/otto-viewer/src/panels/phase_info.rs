//! Current stroke heading and the static cycle explanation

use otto_core::{CrankState, Phase};

pub fn phase_header(ui: &mut egui::Ui, state: &CrankState) {
    let phase = state.phase();
    ui.heading(phase.label());
    ui.label(phase.description());
    ui.monospace(format!("Crank angle: {}°", state.rounded_angle()));
}

pub fn cycle_explanation(ui: &mut egui::Ui, current: Phase) {
    egui::CollapsingHeader::new("Otto Cycle Explanation")
        .default_open(true)
        .show(ui, |ui| {
            for (i, phase) in Phase::ALL.iter().enumerate() {
                let text = format!("{}. {}: {}", i + 1, phase.label(), phase.summary());
                if *phase == current {
                    ui.strong(text);
                } else {
                    ui.label(text);
                }
            }
        });
}
