//! Otto CLI - run, trace and snapshot the four-stroke cycle simulator

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{init, snapshot, trace, view};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "otto")]
#[command(about = "Interactive four-stroke Otto cycle engine simulator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive engine viewer
    View {
        /// Path to config file (defaults to ./otto.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Reload the config file when it changes
        #[arg(long)]
        watch: bool,

        /// Color theme (classic or dark)
        #[arg(long, value_parser = parse_theme)]
        theme: Option<String>,

        /// Initial speed multiplier
        #[arg(long)]
        speed: Option<i32>,

        /// Start with the engine running
        #[arg(long)]
        run: bool,
    },

    /// Step the clock headlessly and print the kinematics of each step
    Trace {
        /// Number of logical steps to run
        #[arg(long, default_value = "90")]
        steps: u32,

        /// Speed multiplier
        #[arg(long, default_value = "1")]
        speed: i32,

        /// Starting crank angle in degrees
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        start: f64,

        /// Output format (text, json or toml)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,

        /// Path to config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render a single frame to an image file
    Snapshot {
        /// Crank angle in degrees
        #[arg(long, allow_hyphen_values = true)]
        angle: f64,

        /// Seed for the gas marker noise
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Color theme (classic or dark)
        #[arg(long, value_parser = parse_theme)]
        theme: Option<String>,

        /// Pixels per logical canvas unit (the canvas is 200x320)
        #[arg(long, default_value = "2", value_parser = parse_scale)]
        scale: f32,

        /// Output image path; the extension picks the format
        #[arg(short, long, default_value = "snapshot.png")]
        output: PathBuf,

        /// Path to config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write a default otto.toml
    Init {
        /// File or directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_theme(s: &str) -> Result<String, String> {
    match s.to_ascii_lowercase().as_str() {
        "classic" | "light" | "dark" => Ok(s.to_ascii_lowercase()),
        _ => Err(format!("unknown theme '{}'; valid values: classic, dark", s)),
    }
}

fn parse_scale(s: &str) -> Result<f32, String> {
    let scale: f32 = s.parse().map_err(|_| format!("invalid scale '{}'", s))?;
    if scale > 0.0 && scale <= 8.0 {
        Ok(scale)
    } else {
        Err(format!("scale must be in (0, 8], got {}", scale))
    }
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" | "toml" => Ok(s.to_string()),
        _ => Err(format!(
            "unknown format '{}'; valid values: text, json, toml",
            s
        )),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,otto=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::View {
            config,
            watch,
            theme,
            speed,
            run,
        } => view::run(view::ViewArgs {
            config,
            watch,
            theme,
            speed,
            run,
        }),
        Commands::Trace {
            steps,
            speed,
            start,
            format,
            config,
        } => trace::run(trace::TraceArgs {
            steps,
            speed,
            start,
            format,
            config,
        }),
        Commands::Snapshot {
            angle,
            seed,
            theme,
            scale,
            output,
            config,
        } => snapshot::run(snapshot::SnapshotArgs {
            angle,
            seed,
            theme,
            scale,
            output,
            config,
        }),
        Commands::Init { path, force } => init::run(&path, force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_start_angle_parses() {
        let cli = Cli::try_parse_from(["otto", "trace", "--start", "-90", "--format", "json"])
            .unwrap();
        match cli.command {
            Commands::Trace { start, format, .. } => {
                assert_eq!(start, -90.0);
                assert_eq!(format, "json");
            }
            _ => panic!("expected trace"),
        }
    }

    #[test]
    fn snapshot_scale_is_bounded() {
        let cli = Cli::try_parse_from(["otto", "snapshot", "--angle", "-15", "--scale", "1.5"])
            .unwrap();
        match cli.command {
            Commands::Snapshot {
                angle,
                scale,
                output,
                ..
            } => {
                assert_eq!(angle, -15.0);
                assert_eq!(scale, 1.5);
                assert_eq!(output, PathBuf::from("snapshot.png"));
            }
            _ => panic!("expected snapshot"),
        }
        assert!(Cli::try_parse_from(["otto", "snapshot", "--angle", "0", "--scale", "0"]).is_err());
        assert!(Cli::try_parse_from(["otto", "snapshot", "--angle", "0", "--scale", "NaN"]).is_err());
    }

    #[test]
    fn bad_theme_is_rejected() {
        assert!(Cli::try_parse_from(["otto", "view", "--theme", "neon"]).is_err());
    }
}
