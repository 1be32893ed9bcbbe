//! Chartpal - accessible chart palettes as CSS, from the command line.
//!
//! This crate wraps the [`chartpal_engine`] generator and the
//! [`chartpal_css`] importer/exporter with what a tool needs around them:
//!
//! - [`project`]: a default palette plus named, size-limited color sets
//! - [`share`]: compact URL-safe tokens that carry a whole project
//! - [`settings`]: the optional YAML config file
//! - [`cli`]: the `chartpal` command line
//!
//! # Share tokens
//!
//! ```rust
//! use chartpal::{decode_state, encode_state, ColorConfig};
//!
//! let mut config = ColorConfig::default();
//! config.light = vec!["#E11D48".into(), "#2563EB".into()];
//! config.dark = vec!["#FB7185".into(), "#60A5FA".into()];
//!
//! let token = encode_state(&config).unwrap();
//! assert_eq!(decode_state(&token).unwrap(), config);
//! ```

pub mod cli;
mod error;
pub mod project;
pub mod settings;
pub mod share;
pub mod swatch;

// Re-export public API
pub use error::{ProjectError, Result, SettingsError, ShareError};
pub use project::{ColorConfig, ColorSet, DEFAULT_SET_NAME};
pub use settings::Settings;
pub use share::{decode_state, encode_state};
