//! Configuration error types.

use std::path::PathBuf;

/// Errors raised while loading, parsing or validating a harness config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The TOML input did not parse.
    #[error("invalid TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The JSON input did not parse, or JSON output could not be produced.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// The config could not be rendered as TOML.
    #[error("failed to render config as TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// The config parsed but holds inconsistent values.
    #[error("invalid config: {0}")]
    Invalid(String),
}
