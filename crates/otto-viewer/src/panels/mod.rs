//! GUI panels for the viewer

mod controls;
mod phase_info;
mod render_stats;

pub use controls::ControlPanel;
pub use phase_info::{cycle_explanation, phase_header};
pub use render_stats::RenderStats;
