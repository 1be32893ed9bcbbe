//! The editable palette project: a default palette plus named color sets.
//!
//! A [`ColorConfig`] is what a share token stores. It holds the default
//! palette inline (`light`/`dark`), the names imported colors came with, and
//! any number of [`ColorSet`]s, which are alternative palettes with a size
//! limit. Operations address a palette by set id, with `None` meaning the
//! default palette.
//!
//! The JSON field names are camelCase so tokens stay compatible across
//! versions of the tool.

use chartpal_css::{ColorNames, ModeColors};
use chartpal_engine::colorspace::normalize_hex;
use chartpal_engine::{ColorMode, ColorScheme, NamedColor, PaletteRequest, PaletteResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProjectError, Result};

/// Name of the default palette until it is renamed.
pub const DEFAULT_SET_NAME: &str = "Default Set";

/// Placeholders used when a palette is grown from nothing.
const PLACEHOLDER_LIGHT: &str = "#000000";
const PLACEHOLDER_DARK: &str = "#FFFFFF";

fn default_set_name() -> String {
    DEFAULT_SET_NAME.to_string()
}

/// A palette project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorConfig {
    pub light: Vec<String>,
    pub dark: Vec<String>,
    /// Imported color value to the name it was imported under.
    #[serde(default)]
    pub names: ColorNames,
    #[serde(default)]
    pub sets: Vec<ColorSet>,
    #[serde(default = "default_set_name")]
    pub default_set_name: String,
    #[serde(default)]
    pub strict_mode: bool,
}

/// An alternative palette with a fixed maximum size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSet {
    pub id: String,
    pub name: String,
    pub size: usize,
    pub light: Vec<String>,
    pub dark: Vec<String>,
    #[serde(default)]
    pub strict_mode: bool,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: vec![PLACEHOLDER_LIGHT.to_string()],
            dark: vec![PLACEHOLDER_DARK.to_string()],
            names: ColorNames::new(),
            sets: Vec::new(),
            default_set_name: default_set_name(),
            strict_mode: false,
        }
    }
}

/// Mutable view of one palette.
struct PaletteMut<'a> {
    name: &'a str,
    light: &'a mut Vec<String>,
    dark: &'a mut Vec<String>,
    strict_mode: &'a mut bool,
    limit: Option<usize>,
}

impl ColorConfig {
    /// Starts a project from imported colors.
    ///
    /// Named colors win: the palette starts from the first one and every
    /// name is remembered. Otherwise the first light and dark mode colors
    /// are used. Imported projects start in strict mode. Returns `None` when
    /// nothing was imported.
    pub fn from_import(named: &[NamedColor], modes: &ModeColors) -> Option<Self> {
        if let Some(first) = named.first() {
            let names = named
                .iter()
                .map(|c| (c.value.clone(), c.name.clone()))
                .collect();
            return Some(Self {
                light: vec![first.value.clone()],
                dark: vec![first.value.clone()],
                names,
                strict_mode: true,
                ..Self::default()
            });
        }

        if modes.light.is_empty() && modes.dark.is_empty() {
            return None;
        }
        Some(Self {
            light: vec![modes
                .light
                .first()
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER_LIGHT.to_string())],
            dark: vec![modes
                .dark
                .first()
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER_DARK.to_string())],
            strict_mode: true,
            ..Self::default()
        })
    }

    /// The pool to generate from, rebuilt from the remembered names.
    pub fn available_colors(&self) -> Vec<NamedColor> {
        self.names
            .iter()
            .map(|(value, name)| NamedColor::new(name, value))
            .collect()
    }

    pub fn set(&self, id: &str) -> Result<&ColorSet> {
        self.sets
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ProjectError::UnknownSet(id.to_string()))
    }

    /// Light and dark colors of a palette.
    pub fn colors(&self, set: Option<&str>) -> Result<(&[String], &[String])> {
        match set {
            None => Ok((&self.light, &self.dark)),
            Some(id) => {
                let s = self.set(id)?;
                Ok((&s.light, &s.dark))
            }
        }
    }

    /// Display name of a palette.
    pub fn set_name(&self, set: Option<&str>) -> Result<&str> {
        match set {
            None => Ok(&self.default_set_name),
            Some(id) => Ok(&self.set(id)?.name),
        }
    }

    pub fn strict_mode(&self, set: Option<&str>) -> Result<bool> {
        match set {
            None => Ok(self.strict_mode),
            Some(id) => Ok(self.set(id)?.strict_mode),
        }
    }

    fn palette_mut(&mut self, set: Option<&str>) -> Result<PaletteMut<'_>> {
        match set {
            None => Ok(PaletteMut {
                name: &self.default_set_name,
                light: &mut self.light,
                dark: &mut self.dark,
                strict_mode: &mut self.strict_mode,
                limit: None,
            }),
            Some(id) => {
                let s = self
                    .sets
                    .iter_mut()
                    .find(|s| s.id == id)
                    .ok_or_else(|| ProjectError::UnknownSet(id.to_string()))?;
                Ok(PaletteMut {
                    name: &s.name,
                    light: &mut s.light,
                    dark: &mut s.dark,
                    strict_mode: &mut s.strict_mode,
                    limit: Some(s.size),
                })
            }
        }
    }

    /// Replaces one color.
    pub fn set_color(
        &mut self,
        set: Option<&str>,
        mode: ColorMode,
        index: usize,
        color: &str,
    ) -> Result<()> {
        let color = normalize_hex(color)?;
        let palette = self.palette_mut(set)?;
        let colors = match mode {
            ColorMode::Light => palette.light,
            ColorMode::Dark => palette.dark,
        };
        let len = colors.len();
        let slot = colors
            .get_mut(index)
            .ok_or(ProjectError::IndexOutOfRange { index, len })?;
        *slot = color;
        Ok(())
    }

    /// Appends a copy of the last color pair.
    pub fn add_color(&mut self, set: Option<&str>) -> Result<()> {
        let palette = self.palette_mut(set)?;
        if let Some(size) = palette.limit {
            if palette.light.len() >= size {
                return Err(ProjectError::SetFull {
                    name: palette.name.to_string(),
                    size,
                });
            }
        }
        let light = palette
            .light
            .last()
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_LIGHT.to_string());
        let dark = palette
            .dark
            .last()
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_DARK.to_string());
        palette.light.push(light);
        palette.dark.push(dark);
        Ok(())
    }

    /// Removes the color pair at `index`. The last pair is never removed.
    pub fn remove_color(&mut self, set: Option<&str>, index: usize) -> Result<()> {
        let palette = self.palette_mut(set)?;
        let len = palette.light.len();
        if len <= 1 {
            return Err(ProjectError::LastColor);
        }
        if index >= len {
            return Err(ProjectError::IndexOutOfRange { index, len });
        }
        palette.light.remove(index);
        if index < palette.dark.len() {
            palette.dark.remove(index);
        }
        Ok(())
    }

    /// Replaces a palette with generated colors.
    pub fn apply_palette(&mut self, set: Option<&str>, result: &PaletteResult) -> Result<()> {
        if result.light.is_empty() || result.dark.is_empty() {
            return Err(ProjectError::EmptyPalette);
        }
        let palette = self.palette_mut(set)?;
        *palette.light = result.light.clone();
        *palette.dark = result.dark.clone();
        Ok(())
    }

    pub fn set_strict_mode(&mut self, set: Option<&str>, enabled: bool) -> Result<()> {
        let palette = self.palette_mut(set)?;
        *palette.strict_mode = enabled;
        Ok(())
    }

    /// Builds a generation request sized to the palette's current length.
    pub fn request(
        &self,
        set: Option<&str>,
        available: &[NamedColor],
        scheme: ColorScheme,
        seed: u64,
    ) -> Result<PaletteRequest> {
        let (light, _) = self.colors(set)?;
        Ok(PaletteRequest {
            available_colors: available.to_vec(),
            count: light.len(),
            seed,
            scheme,
            strict_mode: self.strict_mode(set)?,
        })
    }

    /// Creates a new set copied from `from`, named `"<name> <n>"` with the
    /// next free number (starting at 2). Returns the new set's id.
    pub fn create_set(&mut self, from: Option<&str>) -> Result<String> {
        let base = self.set_name(from)?.to_string();
        let next = self
            .sets
            .iter()
            .filter_map(|s| numbered_suffix(&s.name, &base))
            .max()
            .map_or(2, |n| (n + 1).max(2));
        let name = format!("{} {}", base, next);
        self.push_copy(from, name)
    }

    /// Copies a palette into a new set named `"<name> (Copy)"`. Returns the
    /// new set's id.
    pub fn duplicate_set(&mut self, from: Option<&str>) -> Result<String> {
        let name = format!("{} (Copy)", self.set_name(from)?);
        self.push_copy(from, name)
    }

    fn push_copy(&mut self, from: Option<&str>, name: String) -> Result<String> {
        let (light, dark) = self.colors(from)?;
        let (light, dark) = (light.to_vec(), dark.to_vec());
        let size = match from {
            None => light.len(),
            Some(id) => self.set(id)?.size,
        };
        let strict_mode = self.strict_mode(from)?;
        let id = self.next_set_id();
        debug!(%id, %name, size, "creating color set");
        self.sets.push(ColorSet {
            id: id.clone(),
            name,
            size,
            light,
            dark,
            strict_mode,
        });
        Ok(id)
    }

    fn next_set_id(&self) -> String {
        let next = self
            .sets
            .iter()
            .filter_map(|s| s.id.strip_prefix("set-")?.parse::<u64>().ok())
            .max()
            .map_or(1, |n| n + 1);
        format!("set-{}", next)
    }

    /// Renames a palette. The name is trimmed and must not be empty.
    pub fn rename_set(&mut self, set: Option<&str>, name: &str) -> Result<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ProjectError::EmptyName);
        }
        match set {
            None => self.default_set_name = trimmed.to_string(),
            Some(id) => {
                let s = self
                    .sets
                    .iter_mut()
                    .find(|s| s.id == id)
                    .ok_or_else(|| ProjectError::UnknownSet(id.to_string()))?;
                s.name = trimmed.to_string();
            }
        }
        Ok(())
    }

    pub fn delete_set(&mut self, id: &str) -> Result<()> {
        let before = self.sets.len();
        self.sets.retain(|s| s.id != id);
        if self.sets.len() == before {
            return Err(ProjectError::UnknownSet(id.to_string()));
        }
        Ok(())
    }
}

/// `Some(1)` for `base` itself, `Some(n)` for `"<base> <n>"`.
fn numbered_suffix(name: &str, base: &str) -> Option<u64> {
    let rest = name.strip_prefix(base)?;
    if rest.is_empty() {
        return Some(1);
    }
    let digits = rest.strip_prefix(' ')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(light: &[&str], dark: &[&str]) -> ColorConfig {
        ColorConfig {
            light: light.iter().map(|s| s.to_string()).collect(),
            dark: dark.iter().map(|s| s.to_string()).collect(),
            ..ColorConfig::default()
        }
    }

    // =====================================================================
    // Import
    // =====================================================================

    #[test]
    fn import_prefers_named_colors() {
        let named = vec![
            NamedColor::new("brand", "#E11D48"),
            NamedColor::new("sky", "#0EA5E9"),
        ];
        let config = ColorConfig::from_import(&named, &ModeColors::default()).unwrap();
        assert_eq!(config.light, vec!["#E11D48"]);
        assert_eq!(config.dark, vec!["#E11D48"]);
        assert_eq!(config.names.get("#0EA5E9").map(String::as_str), Some("sky"));
        assert!(config.strict_mode);
    }

    #[test]
    fn import_falls_back_to_mode_colors() {
        let modes = ModeColors {
            light: vec!["#111111".into()],
            dark: vec![],
        };
        let config = ColorConfig::from_import(&[], &modes).unwrap();
        assert_eq!(config.light, vec!["#111111"]);
        assert_eq!(config.dark, vec!["#FFFFFF"]);
    }

    #[test]
    fn import_of_nothing_is_none() {
        assert!(ColorConfig::from_import(&[], &ModeColors::default()).is_none());
    }

    #[test]
    fn available_colors_come_from_names() {
        let mut config = ColorConfig::default();
        config.names.insert("#E11D48".into(), "brand".into());
        let available = config.available_colors();
        assert_eq!(available, vec![NamedColor::new("brand", "#E11D48")]);
    }

    // =====================================================================
    // Editing colors
    // =====================================================================

    #[test]
    fn set_color_normalizes() {
        let mut config = project(&["#111111"], &["#EEEEEE"]);
        config.set_color(None, ColorMode::Dark, 0, "abc").unwrap();
        assert_eq!(config.dark, vec!["#AABBCC"]);
    }

    #[test]
    fn set_color_rejects_bad_index_and_value() {
        let mut config = project(&["#111111"], &["#EEEEEE"]);
        assert!(matches!(
            config.set_color(None, ColorMode::Light, 3, "#000"),
            Err(ProjectError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert!(matches!(
            config.set_color(None, ColorMode::Light, 0, "nope"),
            Err(ProjectError::InvalidColor(_))
        ));
    }

    #[test]
    fn add_color_copies_last_pair() {
        let mut config = project(&["#111111", "#222222"], &["#EEEEEE", "#DDDDDD"]);
        config.add_color(None).unwrap();
        assert_eq!(config.light.last().unwrap(), "#222222");
        assert_eq!(config.dark.last().unwrap(), "#DDDDDD");
    }

    #[test]
    fn add_color_respects_set_size() {
        let mut config = project(&["#111111"], &["#EEEEEE"]);
        let id = config.create_set(None).unwrap();
        let err = config.add_color(Some(&id)).unwrap_err();
        assert!(matches!(err, ProjectError::SetFull { size: 1, .. }));
    }

    #[test]
    fn remove_color_keeps_last_pair() {
        let mut config = project(&["#111111", "#222222"], &["#EEEEEE", "#DDDDDD"]);
        config.remove_color(None, 0).unwrap();
        assert_eq!(config.light, vec!["#222222"]);
        assert_eq!(config.dark, vec!["#DDDDDD"]);
        assert!(matches!(
            config.remove_color(None, 0),
            Err(ProjectError::LastColor)
        ));
    }

    #[test]
    fn apply_palette_replaces_colors() {
        let mut config = ColorConfig::default();
        let result = PaletteResult {
            light: vec!["#E11D48".into(), "#2563EB".into()],
            dark: vec!["#FB7185".into(), "#60A5FA".into()],
        };
        config.apply_palette(None, &result).unwrap();
        assert_eq!(config.light, result.light);
        assert_eq!(config.dark, result.dark);
        assert!(matches!(
            config.apply_palette(None, &PaletteResult::default()),
            Err(ProjectError::EmptyPalette)
        ));
    }

    #[test]
    fn request_is_sized_to_palette() {
        let mut config = project(&["#111111", "#222222", "#333333"], &["#EEEEEE"; 3]);
        config.set_strict_mode(None, true).unwrap();
        let req = config
            .request(None, &config.available_colors(), ColorScheme::Cool, 9)
            .unwrap();
        assert_eq!(req.count, 3);
        assert_eq!(req.seed, 9);
        assert_eq!(req.scheme, ColorScheme::Cool);
        assert!(req.strict_mode);
    }

    // =====================================================================
    // Sets
    // =====================================================================

    #[test]
    fn create_set_numbers_from_two() {
        let mut config = project(&["#111111"], &["#EEEEEE"]);
        let first = config.create_set(None).unwrap();
        let second = config.create_set(None).unwrap();
        assert_eq!(config.set(&first).unwrap().name, "Default Set 2");
        assert_eq!(config.set(&second).unwrap().name, "Default Set 3");
        assert_ne!(first, second);
    }

    #[test]
    fn create_set_copies_colors_and_size() {
        let mut config = project(&["#111111", "#222222"], &["#EEEEEE", "#DDDDDD"]);
        config.strict_mode = true;
        let id = config.create_set(None).unwrap();
        let set = config.set(&id).unwrap();
        assert_eq!(set.size, 2);
        assert_eq!(set.light, config.light);
        assert!(set.strict_mode);
    }

    #[test]
    fn duplicate_set_appends_copy() {
        let mut config = project(&["#111111"], &["#EEEEEE"]);
        config.rename_set(None, "Brand").unwrap();
        let id = config.duplicate_set(None).unwrap();
        assert_eq!(config.set(&id).unwrap().name, "Brand (Copy)");
        let again = config.duplicate_set(Some(&id)).unwrap();
        assert_eq!(config.set(&again).unwrap().name, "Brand (Copy) (Copy)");
    }

    #[test]
    fn rename_trims_and_rejects_blank() {
        let mut config = ColorConfig::default();
        let id = config.create_set(None).unwrap();
        config.rename_set(Some(&id), "  Accents  ").unwrap();
        assert_eq!(config.set_name(Some(&id)).unwrap(), "Accents");
        assert!(matches!(
            config.rename_set(Some(&id), "   "),
            Err(ProjectError::EmptyName)
        ));
    }

    #[test]
    fn delete_set_removes_only_that_set() {
        let mut config = ColorConfig::default();
        let a = config.create_set(None).unwrap();
        let b = config.create_set(None).unwrap();
        config.delete_set(&a).unwrap();
        assert_eq!(config.sets.len(), 1);
        assert_eq!(config.sets[0].id, b);
        assert!(matches!(
            config.delete_set(&a),
            Err(ProjectError::UnknownSet(_))
        ));
    }

    #[test]
    fn unknown_set_is_an_error() {
        let config = ColorConfig::default();
        assert!(matches!(
            config.colors(Some("set-404")),
            Err(ProjectError::UnknownSet(_))
        ));
    }

    #[test]
    fn numbered_suffix_matches_base_only() {
        assert_eq!(numbered_suffix("Brand", "Brand"), Some(1));
        assert_eq!(numbered_suffix("Brand 7", "Brand"), Some(7));
        assert_eq!(numbered_suffix("Brandy 7", "Brand"), None);
        assert_eq!(numbered_suffix("Brand x", "Brand"), None);
    }

    // =====================================================================
    // Serialization
    // =====================================================================

    #[test]
    fn json_uses_camel_case() {
        let json = serde_json::to_string(&ColorConfig::default()).unwrap();
        assert!(json.contains("\"defaultSetName\":\"Default Set\""));
        assert!(json.contains("\"strictMode\":false"));
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let config: ColorConfig =
            serde_json::from_str(r##"{"light":["#111111"],"dark":["#EEEEEE"]}"##).unwrap();
        assert_eq!(config.default_set_name, "Default Set");
        assert!(config.sets.is_empty());
        assert!(!config.strict_mode);
    }
}
