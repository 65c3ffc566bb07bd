//! Single-frame image snapshot command

use anyhow::{Context, Result};
use otto_core::{normalize_angle, EngineLayout, Phase};
use otto_render::{Frame, KinematicRenderer, Theme};
use otto_viewer::headless::{snapshot_size, HeadlessContext};
use otto_viewer::ViewerOptions;
use std::path::PathBuf;

pub struct SnapshotArgs {
    pub angle: f64,
    pub seed: u64,
    pub theme: Option<String>,
    pub scale: f32,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
}

/// Build the frame for an angle with seeded marker noise
pub fn snapshot_frame(angle: f64, seed: u64, layout: EngineLayout, theme: Theme) -> Frame {
    let angle = normalize_angle(angle);
    let mut renderer = KinematicRenderer::seeded(layout, theme, seed);
    renderer.render(angle, Phase::from_angle(angle))
}

pub fn run(args: SnapshotArgs) -> Result<()> {
    let options = ViewerOptions {
        config_path: args.config,
        theme: args.theme,
        ..ViewerOptions::default()
    };
    let config = options.load_config()?;
    let theme = config.resolved_theme()?;

    let frame = snapshot_frame(args.angle, args.seed, config.sim.layout, theme);
    let (width, height) = snapshot_size(&frame, args.scale);

    let ctx = pollster::block_on(HeadlessContext::new(width, height))
        .context("Failed to create headless render context")?;
    ctx.paint(&frame, args.scale);

    // Read back pixels
    let pixels = pollster::block_on(ctx.read_pixels()).context("Failed to read rendered pixels")?;

    // Encode; the format follows the output extension
    let img = image::RgbaImage::from_raw(width, height, pixels)
        .context("Failed to create image from pixel data")?;
    img.save(&args.output)
        .with_context(|| format!("Failed to save image to {}", args.output.display()))?;

    println!(
        "Rendered {}x{} image to {} ({} at {}°)",
        width,
        height,
        args.output.display(),
        frame.phase,
        frame.angle_degrees.round()
    );
    Ok(())
}
