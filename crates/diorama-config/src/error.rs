//! Errors raised while locating, reading, or writing `diorama.ron`.

use std::path::PathBuf;

/// Configuration failures. Generator code never sees these; only the
/// application layer that owns the config file does.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The platform has no per-user configuration directory.
    #[error("no user configuration directory is available on this platform")]
    NoConfigDir,

    /// Reading the config file failed.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the config file (or creating its directory) failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not valid RON for [`crate::Config`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serializing the in-memory config failed.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}
