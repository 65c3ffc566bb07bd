//! Interactive viewer command

use anyhow::Result;
use otto_viewer::ViewerOptions;
use std::path::PathBuf;

pub struct ViewArgs {
    pub config: Option<PathBuf>,
    pub watch: bool,
    pub theme: Option<String>,
    pub speed: Option<i32>,
    pub run: bool,
}

pub fn run(args: ViewArgs) -> Result<()> {
    otto_viewer::run(ViewerOptions {
        config_path: args.config,
        watch: args.watch,
        theme: args.theme,
        speed: args.speed,
        run: args.run,
    })
}
