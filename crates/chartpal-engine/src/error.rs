//! Error types for the engine crate.
//!
//! The generator itself never fails: malformed pool entries are skipped and
//! short pools are filled by synthesis or repetition. These errors surface
//! only from the building blocks callers may use directly (hex parsing and
//! threshold validation).

use thiserror::Error;

/// A color value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The value is not a 3- or 6-digit hex color.
    #[error("invalid hex color '{0}' (expected #rgb or #rrggbb)")]
    InvalidHex(String),
}

/// Invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A luminance cutoff lies outside `0.0..=1.0`.
    #[error("{name} must be within 0.0..=1.0, got {value}")]
    OutOfRange { name: &'static str, value: f64 },

    /// The dark-mode band is empty or inverted.
    #[error("dark_min_luminance ({min}) must be below dark_max_luminance ({max})")]
    InvertedDarkBand { min: f64, max: f64 },
}

/// Result type for color parsing.
pub type Result<T> = std::result::Result<T, ColorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_hex_display_names_the_value() {
        let err = ColorError::InvalidHex("#12".to_string());
        assert!(err.to_string().contains("#12"));
    }

    #[test]
    fn inverted_band_display() {
        let err = ConfigError::InvertedDarkBand { min: 0.8, max: 0.2 };
        let msg = err.to_string();
        assert!(msg.contains("0.8"));
        assert!(msg.contains("0.2"));
    }
}
