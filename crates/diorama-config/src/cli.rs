//! Command-line argument parsing for the diorama baker.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Diorama baker command-line arguments.
///
/// CLI values override settings loaded from `diorama.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "diorama", about = "Bake the diorama's procedural content")]
pub struct CliArgs {
    /// Fixed random seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of galaxy stars.
    #[arg(long)]
    pub stars: Option<u32>,

    /// Platform texture edge length in pixels.
    #[arg(long)]
    pub texture_size: Option<u32>,

    /// Directory receiving baked textures.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(stars) = args.stars {
            self.galaxy.count = stars;
        }
        if let Some(size) = args.texture_size {
            self.platform.texture_size = size;
        }
        if let Some(ref dir) = args.output {
            self.output.directory = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
