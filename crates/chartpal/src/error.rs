//! Error types for the chartpal crate.

use std::io;
use std::path::PathBuf;

use chartpal_engine::{ColorError, ConfigError};
use thiserror::Error;

/// Errors from editing a [`ColorConfig`](crate::project::ColorConfig).
#[derive(Debug, Error)]
pub enum ProjectError {
    /// No color set has this id.
    #[error("unknown color set '{0}'")]
    UnknownSet(String),

    /// A color index past the end of the palette.
    #[error("color index {index} out of range (palette has {len} colors)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The set already holds as many colors as its size allows.
    #[error("set '{name}' is limited to {size} colors")]
    SetFull { name: String, size: usize },

    /// Removing would leave the palette empty.
    #[error("a palette must keep at least one color")]
    LastColor,

    /// Set names must contain something besides whitespace.
    #[error("set name cannot be empty")]
    EmptyName,

    /// A generated palette with no colors cannot replace an existing one.
    #[error("generated palette is empty")]
    EmptyPalette,

    #[error(transparent)]
    InvalidColor(#[from] ColorError),
}

/// Errors from encoding or decoding a share token.
#[derive(Debug, Error)]
pub enum ShareError {
    /// The token is not valid URL-safe base64.
    #[error("share token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Compression or decompression failed.
    #[error("share token could not be (de)compressed: {0}")]
    Compression(#[source] io::Error),

    /// The decompressed payload is not a color configuration.
    #[error("share token does not contain a color configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The state decoded but has no light or no dark colors.
    #[error("share token holds an empty palette")]
    EmptyPalette,
}

/// Errors from loading the configuration file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid YAML for the settings schema.
    #[error("invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The thresholds are out of range.
    #[error("invalid thresholds: {0}")]
    Thresholds(#[from] ConfigError),
}

/// Result type for project operations.
pub type Result<T> = std::result::Result<T, ProjectError>;
