//! Bakes the diorama's procedural content: galaxy point cloud, stone and
//! pillar textures, perturbed platform geometry, and glyph disc textures.
//!
//! Configuration is loaded from `diorama.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p diorama-demo -- --seed 42 --output baked`.

mod bake;

use clap::Parser;
use diorama_config::{CliArgs, Config, default_config_dir};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => match default_config_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    diorama_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let mut rng = match config.seed {
        Some(seed) => {
            info!("Using fixed seed {seed}");
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };

    match bake::bake_all(&mut rng, &config) {
        Ok(manifest) => info!(
            "Baked {} textures into {}",
            manifest.textures.len(),
            config.output.directory.display()
        ),
        Err(e) => {
            error!("Bake failed: {e}");
            std::process::exit(1);
        }
    }
}
