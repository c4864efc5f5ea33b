//! Generator parameters with the diorama's stock values and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name used inside the config directory.
pub const CONFIG_FILE_NAME: &str = "diorama.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Fixed random seed. `None` draws fresh entropy each run, so every run
    /// produces a slightly different diorama.
    pub seed: Option<u64>,
    /// Spiral galaxy backdrop.
    pub galaxy: GalaxyConfig,
    /// Stone platform and pillars.
    pub platform: PlatformConfig,
    /// Rotating glyph discs.
    pub glyphs: GlyphConfig,
    /// Where baked artifacts are written.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Spiral galaxy point-cloud parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Number of stars.
    pub count: u32,
    /// Outer radius of the disc in scene units.
    pub radius: f32,
    /// Number of spiral arms.
    pub arm_count: u32,
    /// Extra angle per unit radius; higher winds the arms tighter.
    pub arm_tightness: f32,
    /// Maximum vertical dispersion at the core.
    pub height_scale: f32,
}

/// Platform texture and pillar geometry parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlatformConfig {
    /// Edge length of the platform albedo and bump textures in pixels.
    pub texture_size: u32,
    /// Edge length of the pillar texture in pixels.
    pub pillar_texture_size: u32,
    /// Number of flutes carved around each pillar.
    pub flute_count: u32,
    /// Relative radial depth of each flute.
    pub fluting_depth: f32,
    /// Height of the platform stone blocks.
    pub thickness: f32,
}

/// Glyph disc texture parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlyphConfig {
    /// Edge length of each disc texture in pixels.
    pub texture_size: u32,
    /// On-texture height of a ring glyph in pixels.
    pub glyph_px: u32,
    /// Glyph ink color as RGBA.
    pub color: [u8; 4],
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving baked PNG textures.
    pub directory: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            count: 20_000,
            radius: 50.0,
            arm_count: 4,
            arm_tightness: 0.3,
            height_scale: 5.0,
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            texture_size: 2048,
            pillar_texture_size: 512,
            flute_count: 12,
            fluting_depth: 0.04,
            thickness: 2.5,
        }
    }
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            texture_size: 2048,
            glyph_px: 164,
            color: [0, 255, 255, 255],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("baked"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Default per-user config directory, e.g. `~/.config/diorama` on Linux.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("diorama"))
        .ok_or(ConfigError::NoConfigDir)
}

impl Config {
    /// Load config from the given directory, or write and return the defaults.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(ron::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("count: 20000"));
        assert!(ron_str.contains("flute_count: 12"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.seed = Some(7);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(galaxy: (count: 10))").unwrap();
        assert_eq!(config.galaxy.count, 10);
        assert_eq!(config.galaxy.arm_count, 4);
        assert_eq!(config.platform, PlatformConfig::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_unknown_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.galaxy.count = 500;
        config.glyphs.color = [255, 0, 255, 200];
        config.output.directory = PathBuf::from("/tmp/out");

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_unreadable_config_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_invalid_ron_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
