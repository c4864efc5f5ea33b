//! Configuration system for the diorama generators.
//!
//! Generator parameters persist to disk as a RON file. Supports CLI overrides
//! via clap and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, GalaxyConfig, GlyphConfig, OutputConfig, PlatformConfig,
    default_config_dir,
};
pub use error::ConfigError;
