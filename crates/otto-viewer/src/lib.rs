//! Otto Viewer - egui desktop front end for the Otto cycle simulator
//!
//! Opens a window with the animated engine canvas, start/stop and speed
//! controls, manual rotation buttons, the current stroke description and an
//! optional stats strip. With `--watch` the config file is hot-reloaded.
//! [`HeadlessContext`] paints the same canvas offscreen for snapshots.

pub mod app;
pub mod canvas;
pub mod config;
mod context;
pub mod headless;
pub mod input;
pub mod panels;

pub use app::run;
pub use config::{ViewerConfig, ViewerOptions};
pub use context::{ContextError, RenderContext};
pub use headless::HeadlessContext;
