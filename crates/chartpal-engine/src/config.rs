//! Tunable thresholds for mode suitability and selection.
//!
//! The luminance cutoffs were settled empirically rather than derived from
//! WCAG AA/AAA targets, so they are data rather than constants. The defaults
//! are the canonical values; callers can override any subset (every field has
//! a serde default, so a config file may name only what it changes).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Luminance cutoffs and selection tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// Light-mode colors must have luminance strictly below this (rejects
    /// near-white).
    pub light_max_luminance: f64,
    /// Dark-mode colors must have luminance strictly above this (rejects
    /// near-black).
    pub dark_min_luminance: f64,
    /// Dark-mode colors must have luminance strictly below this (rejects
    /// harsh near-white).
    pub dark_max_luminance: f64,
    /// Candidates scoring at least `tie_window * best` in a selection round
    /// are treated as near-ties and reordered by the seed.
    pub tie_window: f64,
    /// Amplitude of the seeded perturbation applied to near-tie scores.
    pub jitter: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            light_max_luminance: 0.70,
            dark_min_luminance: 0.25,
            dark_max_luminance: 0.80,
            tie_window: 0.95,
            jitter: 0.2,
        }
    }
}

impl Thresholds {
    /// Checks that every value is in range and the dark band is non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = [
            ("light_max_luminance", self.light_max_luminance),
            ("dark_min_luminance", self.dark_min_luminance),
            ("dark_max_luminance", self.dark_max_luminance),
            ("tie_window", self.tie_window),
            ("jitter", self.jitter),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }
        if self.dark_min_luminance >= self.dark_max_luminance {
            return Err(ConfigError::InvertedDarkBand {
                min: self.dark_min_luminance,
                max: self.dark_max_luminance,
            });
        }
        Ok(())
    }
}
