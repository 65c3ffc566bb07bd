//! Headless clock trace command

use anyhow::{Context, Result};
use otto_core::{EngineGeometry, Phase, Point, SimConfig, DEFAULT_CONFIG_FILE};
use otto_runtime::{CycleClock, CycleEvent};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub struct TraceArgs {
    pub steps: u32,
    pub speed: i32,
    pub start: f64,
    pub format: String,
    pub config: Option<PathBuf>,
}

/// Kinematics after one logical step
#[derive(Debug, Clone, Serialize)]
pub struct TraceRow {
    pub step: u32,
    pub angle: f64,
    pub phase: Phase,
    pub piston_y: f64,
    pub crank_pin: Point,
    pub spark: bool,
    pub events: Vec<CycleEvent>,
}

#[derive(Serialize)]
struct TraceDocument<'a> {
    step: &'a [TraceRow],
}

pub fn run(args: TraceArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SimConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
    };

    tracing::debug!(steps = args.steps, speed = args.speed, start = args.start, "tracing clock");
    let rows = build_trace(&config, args.start, args.speed, args.steps)?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        "toml" => print!(
            "{}",
            toml::to_string_pretty(&TraceDocument { step: &rows })
                .context("Failed to serialize trace")?
        ),
        _ => print_text(&rows),
    }
    Ok(())
}

/// Run a clock from `start` for `steps` logical steps
pub fn build_trace(
    config: &SimConfig,
    start: f64,
    speed: i32,
    steps: u32,
) -> Result<Vec<TraceRow>> {
    let mut clock = CycleClock::with_config(config.clock)?.with_speed(speed);
    clock.rotate(start);
    clock.start();

    let rows = (1..=steps)
        .map(|step| {
            let events = clock.step();
            let geometry = EngineGeometry::compute(clock.angle_degrees(), &config.layout);
            TraceRow {
                step,
                angle: geometry.angle_degrees,
                phase: geometry.phase,
                piston_y: geometry.piston_y,
                crank_pin: geometry.crank_pin,
                spark: geometry.spark_active,
                events,
            }
        })
        .collect();
    Ok(rows)
}

fn print_text(rows: &[TraceRow]) {
    println!(
        "{:>5}  {:>7}  {:<20}  {:>8}  {:>18}  spark",
        "step", "angle", "phase", "piston_y", "crank pin"
    );
    for row in rows {
        println!(
            "{:>5}  {:>6.1}°  {:<20}  {:>8.2}  ({:>7.2}, {:>7.2})  {}",
            row.step,
            row.angle,
            row.phase.label(),
            row.piston_y,
            row.crank_pin.x,
            row.crank_pin.y,
            if row.spark { "*" } else { "" }
        );
        for event in &row.events {
            match event {
                CycleEvent::PhaseChanged { from, to, angle } => {
                    println!("       -> {from} to {to} at {angle:.1}°");
                }
                CycleEvent::CycleCompleted { cycles } => {
                    println!("       -> cycle {cycles} complete");
                }
            }
        }
    }
}
