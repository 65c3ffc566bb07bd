//! Otto Render - Turns crank angles into 2D drawing instructions
//!
//! The renderer is backend-agnostic: it builds a [`Frame`] of draw commands
//! which is then replayed onto a [`DrawSurface`].
//! - `KinematicRenderer` - Geometry, valves, spark and gas effects per frame
//! - `Theme` - Swappable color palettes (`classic`, `dark`, or custom)
//! - `CountingSurface` - Tally of draw calls, handy in tests

mod effects;
mod error;
mod frame;
mod renderer;
pub mod shapes;
mod surface;
mod theme;

pub use effects::{
    lerp_color, sample_markers, Marker, PhaseEffect, CHARGE_MARKERS, SMOKE_MARKERS,
};
pub use error::RenderError;
pub use frame::{DrawCommand, DrawItem, Frame, Part};
pub use renderer::KinematicRenderer;
pub use surface::{CountingSurface, DrawSurface};
pub use theme::{Theme, ThemeSetting};
