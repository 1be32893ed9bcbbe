//! Display modes and per-mode readability.
//!
//! A chart color is judged against the background it will sit on. On a light
//! background anything near-white disappears; on a dark background near-black
//! disappears and near-white glares. [`ColorMode::is_suitable`] encodes those
//! bands using the configured [`Thresholds`], and [`conform`] pulls a color
//! into its band by moving lightness only, so hue and saturation (the
//! color's identity) survive.

use serde::{Deserialize, Serialize};

use crate::colorspace::Rgb;
use crate::config::Thresholds;

/// The background a color is displayed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Light background, dark series colors.
    Light,
    /// Dark background, mid-to-light series colors.
    Dark,
}

impl ColorMode {
    /// Whether a color with the given luminance is readable in this mode.
    pub fn is_suitable(self, luminance: f64, thresholds: &Thresholds) -> bool {
        match self {
            ColorMode::Light => luminance < thresholds.light_max_luminance,
            ColorMode::Dark => {
                luminance > thresholds.dark_min_luminance
                    && luminance < thresholds.dark_max_luminance
            }
        }
    }

    /// Relative luminance of the background this mode assumes.
    pub fn background_luminance(self) -> f64 {
        match self {
            ColorMode::Light => 1.0,
            ColorMode::Dark => 0.0,
        }
    }

    /// Upper luminance bound (exclusive) for this mode.
    fn ceiling(self, thresholds: &Thresholds) -> f64 {
        match self {
            ColorMode::Light => thresholds.light_max_luminance,
            ColorMode::Dark => thresholds.dark_max_luminance,
        }
    }
}

/// Moves `color` into the luminance band of `mode` by adjusting HSL
/// lightness, staying as close to the original lightness as possible.
///
/// Colors that are already suitable are returned unchanged. Luminance is
/// monotonic in HSL lightness for a fixed hue and saturation, so a binary
/// search over lightness finds the band edge.
pub fn conform(color: Rgb, mode: ColorMode, thresholds: &Thresholds) -> Rgb {
    let luminance = color.luminance();
    if mode.is_suitable(luminance, thresholds) {
        return color;
    }

    let hsl = color.to_hsl();
    let too_bright = luminance >= mode.ceiling(thresholds);
    let (mut lo, mut hi) = if too_bright {
        (0.0, hsl.l)
    } else {
        (hsl.l, 100.0)
    };

    let mut best = None;
    for _ in 0..32 {
        let mid = (lo + hi) * 0.5;
        let candidate = hsl.with_lightness(mid).to_rgb();
        let lum = candidate.luminance();
        if mode.is_suitable(lum, thresholds) {
            best = Some(candidate);
            // Step back toward the original lightness.
            if too_bright {
                lo = mid;
            } else {
                hi = mid;
            }
        } else if lum >= mode.ceiling(thresholds) {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    best.unwrap_or(color)
}
