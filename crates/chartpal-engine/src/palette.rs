//! The palette orchestrator: one request in, aligned light/dark colors out.
//!
//! [`generate_accessible_palette`] is the entry point callers are expected to
//! use. It turns the request's named colors into a pool, then routes to one
//! of three paths:
//!
//! | Pool | `strict_mode` | Light | Dark |
//! |------|---------------|-------|------|
//! | empty | any | synthesized | derived |
//! | present | `false` | selected, synthesis may top up | derived |
//! | present | `true` | selected from the pool only | nearest pool color |
//!
//! In strict mode every emitted color is literally a pool color. In every
//! mode `light.len() == dark.len() == count`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::colorspace::Rgb;
use crate::config::Thresholds;
use crate::dark::pair_all;
use crate::mode::{conform, ColorMode};
use crate::scheme::{synthesize, ColorScheme};
use crate::select::Selector;

/// Colors that mean "unset" and never enter a pool.
pub const RESERVED_SENTINELS: [Rgb; 2] = [Rgb::BLACK, Rgb::WHITE];

/// A labelled input color. Names are free-form (often a CSS variable name
/// without the leading `--`); values may repeat across names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    pub value: String,
}

impl NamedColor {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Everything one generation depends on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaletteRequest {
    pub available_colors: Vec<NamedColor>,
    pub count: usize,
    pub seed: u64,
    pub scheme: ColorScheme,
    pub strict_mode: bool,
}

/// Index-aligned series colors for both display modes, as `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaletteResult {
    pub light: Vec<String>,
    pub dark: Vec<String>,
}

impl PaletteResult {
    pub fn len(&self) -> usize {
        self.light.len()
    }

    pub fn is_empty(&self) -> bool {
        self.light.is_empty()
    }

    /// Iterates `(light, dark)` pairs in series order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.light
            .iter()
            .zip(&self.dark)
            .map(|(l, d)| (l.as_str(), d.as_str()))
    }
}

/// Parses, filters and deduplicates the request colors.
///
/// Malformed values are skipped with a warning, the sentinels are dropped
/// and duplicates keep their first position.
pub fn build_pool(colors: &[NamedColor]) -> Vec<Rgb> {
    let mut seen = HashSet::new();
    let mut pool = Vec::with_capacity(colors.len());
    for color in colors {
        let rgb = match Rgb::from_hex(&color.value) {
            Ok(rgb) => rgb,
            Err(err) => {
                warn!(name = %color.name, %err, "skipping color");
                continue;
            }
        };
        if RESERVED_SENTINELS.contains(&rgb) {
            continue;
        }
        if seen.insert(rgb) {
            pool.push(rgb);
        }
    }
    pool
}

/// Generates a palette with the default [`Thresholds`].
pub fn generate_accessible_palette(request: &PaletteRequest) -> PaletteResult {
    generate_with(request, &Thresholds::default())
}

/// Generates a palette with caller-supplied thresholds.
pub fn generate_with(request: &PaletteRequest, thresholds: &Thresholds) -> PaletteResult {
    if request.count == 0 {
        return PaletteResult::default();
    }

    let pool = build_pool(&request.available_colors);
    debug!(
        inputs = request.available_colors.len(),
        pool = pool.len(),
        count = request.count,
        seed = request.seed,
        scheme = %request.scheme,
        strict = request.strict_mode,
        "generating palette"
    );

    let (light, dark) = if pool.is_empty() {
        let light: Vec<Rgb> = synthesize(request.scheme, request.count, request.seed)
            .into_iter()
            .map(|c| conform(c, ColorMode::Light, thresholds))
            .collect();
        let dark = pair_all(&light, None, thresholds);
        (light, dark)
    } else {
        let selector = Selector {
            scheme: request.scheme,
            seed: request.seed,
            mode: ColorMode::Light,
            allow_synthesis: !request.strict_mode,
            thresholds,
        };
        let light = selector.select(&pool, request.count);
        let source = request.strict_mode.then_some(pool.as_slice());
        let dark = pair_all(&light, source, thresholds);
        (light, dark)
    };

    PaletteResult {
        light: light.into_iter().map(Rgb::to_hex).collect(),
        dark: dark.into_iter().map(Rgb::to_hex).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorspace::{hex_to_hsl, hue_distance};

    fn named(values: &[&str]) -> Vec<NamedColor> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| NamedColor::new(format!("color-{}", i + 1), *v))
            .collect()
    }

    fn request(values: &[&str], count: usize, seed: u64, strict: bool) -> PaletteRequest {
        PaletteRequest {
            available_colors: named(values),
            count,
            seed,
            scheme: ColorScheme::Mixed,
            strict_mode: strict,
        }
    }

    // =====================================================================
    // Pool construction
    // =====================================================================

    #[test]
    fn pool_drops_sentinels_and_malformed() {
        let pool = build_pool(&named(&["#000000", "#ff0000", "oops", "#FFF", "#00ff00"]));
        assert_eq!(pool, vec![Rgb(255, 0, 0), Rgb(0, 255, 0)]);
    }

    #[test]
    fn pool_dedupes_keeping_first_position() {
        let pool = build_pool(&named(&["#0000ff", "#FF0000", "#00F", "#ff0000"]));
        assert_eq!(pool, vec![Rgb(0, 0, 255), Rgb(255, 0, 0)]);
    }

    // =====================================================================
    // Generation paths
    // =====================================================================

    #[test]
    fn zero_count_is_empty() {
        let result = generate_accessible_palette(&request(&["#FF0000"], 0, 1, false));
        assert!(result.is_empty());
        assert!(result.dark.is_empty());
    }

    #[test]
    fn empty_pool_synthesizes_evenly_spaced_hues() {
        let result = generate_accessible_palette(&request(&[], 3, 0, false));
        assert_eq!(result.light.len(), 3);
        assert_eq!(result.dark.len(), 3);
        for (i, hex) in result.light.iter().enumerate() {
            let hsl = hex_to_hsl(hex).unwrap();
            let expected = i as f64 * 120.0;
            assert!(
                hue_distance(hsl.h, expected) < 3.0,
                "{} has hue {}, expected ~{}",
                hex,
                hsl.h,
                expected
            );
        }
    }

    #[test]
    fn strict_single_red_repeats() {
        let result = generate_accessible_palette(&request(&["#FF0000"], 5, 1, true));
        assert_eq!(result.light, vec!["#FF0000"; 5]);
        assert_eq!(result.dark, vec!["#FF0000"; 5]);
    }

    #[test]
    fn only_sentinels_behaves_like_empty_pool() {
        let sentinels = generate_accessible_palette(&request(&["#000000", "#ffffff"], 4, 9, true));
        let empty = generate_accessible_palette(&request(&[], 4, 9, true));
        assert_eq!(sentinels, empty);
    }

    #[test]
    fn strict_output_is_contained_in_pool() {
        let values = ["#E11D48", "#2563EB", "#16A34A", "#CA8A04", "#7C3AED", "#0891B2"];
        let pool: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        for seed in 0..10 {
            let result = generate_accessible_palette(&request(&values, 8, seed, true));
            assert_eq!(result.len(), 8);
            for hex in result.light.iter().chain(&result.dark) {
                assert!(pool.contains(hex), "{} not in pool", hex);
            }
        }
    }

    #[test]
    fn non_strict_tops_up_short_pool() {
        let result = generate_accessible_palette(&request(&["#E11D48", "#2563EB"], 6, 3, false));
        assert_eq!(result.light.len(), 6);
        assert_eq!(result.dark.len(), 6);
    }

    #[test]
    fn output_is_uppercase_hex() {
        let result = generate_accessible_palette(&request(&["#abcdef", "#123456"], 4, 2, false));
        for hex in result.light.iter().chain(&result.dark) {
            assert_eq!(hex.len(), 7);
            assert!(hex.starts_with('#'));
            assert_eq!(hex, &hex.to_uppercase());
        }
    }

    #[test]
    fn generation_is_reproducible() {
        let req = request(&["#E11D48", "#2563EB", "#16A34A", "#CA8A04"], 5, 42, false);
        assert_eq!(
            generate_accessible_palette(&req),
            generate_accessible_palette(&req)
        );
    }

    #[test]
    fn pairs_walks_series_in_order() {
        let result = PaletteResult {
            light: vec!["#111111".into(), "#222222".into()],
            dark: vec!["#AAAAAA".into(), "#BBBBBB".into()],
        };
        let pairs: Vec<_> = result.pairs().collect();
        assert_eq!(pairs, vec![("#111111", "#AAAAAA"), ("#222222", "#BBBBBB")]);
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let req: PaletteRequest =
            serde_json::from_str(r#"{"count": 4, "scheme": "warm", "strictMode": true}"#).unwrap();
        assert_eq!(req.count, 4);
        assert_eq!(req.scheme, ColorScheme::Warm);
        assert!(req.strict_mode);
        assert!(req.available_colors.is_empty());
        assert_eq!(req.seed, 0);
    }
}
