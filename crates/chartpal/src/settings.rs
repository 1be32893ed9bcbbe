//! Optional YAML configuration file.
//!
//! Every key is optional; command-line flags override file values.
//!
//! ```yaml
//! count: 6
//! scheme: cool
//! strict: true
//! thresholds:
//!   light_max_luminance: 0.65
//! ```

use std::fs;
use std::path::Path;

use chartpal_engine::{ColorScheme, Thresholds};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SettingsError;

/// Series count when neither a flag nor the file sets one.
pub const DEFAULT_COUNT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub count: Option<usize>,
    pub scheme: Option<ColorScheme>,
    pub strict: Option<bool>,
    pub thresholds: Thresholds,
}

impl Settings {
    /// Reads and validates a settings file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_yaml(&text)
    }

    /// Parses and validates settings from YAML text. Empty text yields the
    /// defaults.
    pub fn from_yaml(text: &str) -> Result<Self, SettingsError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(text)?;
        settings.thresholds.validate()?;
        Ok(settings)
    }

    pub fn count(&self, flag: Option<usize>) -> usize {
        flag.or(self.count).unwrap_or(DEFAULT_COUNT)
    }

    pub fn scheme(&self, flag: Option<ColorScheme>) -> ColorScheme {
        flag.or(self.scheme).unwrap_or_default()
    }

    /// A `--strict` flag can only turn strict mode on.
    pub fn strict(&self, flag: bool) -> bool {
        flag || self.strict.unwrap_or(false)
    }
}
