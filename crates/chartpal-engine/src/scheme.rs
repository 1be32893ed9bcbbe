//! Color schemes: membership tests and algorithmic synthesis.
//!
//! A [`ColorScheme`] is a constraint family over hue and saturation. It plays
//! two roles:
//!
//! - **Classification** filters an imported pool down to colors that belong
//!   to the scheme ([`classify`]).
//! - **Synthesis** invents new colors inside the scheme when the pool cannot
//!   supply enough ([`synthesize`]).
//!
//! | Scheme | Membership | Synthesized hues |
//! |--------|------------|------------------|
//! | `warm` | hue in `[0,60] ∪ [300,360]` | phase-spread across both warm bands |
//! | `cool` | hue in `(60,300)` | swept across a band anchored at 180° |
//! | `neutral` | saturation `≤ 30` | evenly around the circle, low saturation |
//! | `monochromatic` | any | one hue, tint/shade ladder |
//! | `mixed` | any | evenly spaced by `360/count` |
//!
//! Synthesis starts from a base hue derived from the seed by the golden
//! angle (`|seed × 137.508| mod 360`), so consecutive seeds land on
//! well-separated hue families.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::colorspace::{Hsl, Rgb};
use crate::rng::SeededRng;

/// The golden angle in degrees.
pub const GOLDEN_ANGLE: f64 = 137.508;

/// Distance kept from the edges of the warm bands and the cool sweep, so a
/// synthesized hue still classifies correctly after 8-bit rounding.
const HUE_INSET: f64 = 2.0;

/// Width of the cool sweep starting at 180°.
const COOL_SWEEP: f64 = 120.0 - 2.0 * HUE_INSET;

/// Saturation and lightness band of the monochromatic ladder, in percent.
const MONO_LOW: f64 = 35.0;
const MONO_HIGH: f64 = 65.0;

/// Reach of the ladder's shared seeded offset.
const MONO_JITTER: f64 = 2.0;

/// A named hue/saturation constraint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Mixed,
    Warm,
    Cool,
    Neutral,
    Monochromatic,
}

impl ColorScheme {
    /// All schemes, in display order.
    pub const ALL: [ColorScheme; 5] = [
        ColorScheme::Mixed,
        ColorScheme::Warm,
        ColorScheme::Cool,
        ColorScheme::Neutral,
        ColorScheme::Monochromatic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Mixed => "mixed",
            ColorScheme::Warm => "warm",
            ColorScheme::Cool => "cool",
            ColorScheme::Neutral => "neutral",
            ColorScheme::Monochromatic => "monochromatic",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ColorScheme::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == lower)
            .ok_or_else(|| {
                format!(
                    "unknown color scheme '{}' (expected one of: mixed, warm, cool, neutral, monochromatic)",
                    s
                )
            })
    }
}

/// Whether a color belongs to `scheme`.
///
/// `monochromatic` and `mixed` accept everything here; their constraints
/// are applied during synthesis and selection instead.
pub fn classify(hsl: &Hsl, scheme: ColorScheme) -> bool {
    match scheme {
        ColorScheme::Warm => (0.0..=60.0).contains(&hsl.h) || (300.0..=360.0).contains(&hsl.h),
        ColorScheme::Cool => hsl.h > 60.0 && hsl.h < 300.0,
        ColorScheme::Neutral => hsl.s <= 30.0,
        ColorScheme::Monochromatic | ColorScheme::Mixed => true,
    }
}

/// The seed's starting hue: `|seed × 137.508| mod 360`.
pub fn base_hue(seed: u64) -> f64 {
    (seed as f64 * GOLDEN_ANGLE).abs() % 360.0
}

/// Generates `count` colors inside `scheme`, reproducibly for a given seed.
pub fn synthesize(scheme: ColorScheme, count: usize, seed: u64) -> Vec<Rgb> {
    if count == 0 {
        return Vec::new();
    }

    let mut rng = SeededRng::new(seed);
    let base = base_hue(seed);
    let n = count as f64;

    match scheme {
        ColorScheme::Warm => {
            // Both warm bands laid end to end form one arc; walk it by phase.
            let arc = 120.0 - 2.0 * HUE_INSET;
            let half = arc / 2.0;
            (0..count)
                .map(|i| {
                    let pos = (base / 3.0 + i as f64 * arc / n) % arc;
                    let hue = if pos < half {
                        pos
                    } else {
                        pos + 360.0 - arc
                    };
                    Hsl::new(hue, rng.range(65.0, 85.0), rng.range(45.0, 65.0)).to_rgb()
                })
                .collect()
        }
        ColorScheme::Cool => (0..count)
            .map(|i| {
                let hue = 180.0 + (base / 3.0 + i as f64 * COOL_SWEEP / n) % COOL_SWEEP;
                Hsl::new(hue, rng.range(60.0, 80.0), rng.range(45.0, 60.0)).to_rgb()
            })
            .collect(),
        ColorScheme::Neutral => (0..count)
            .map(|i| {
                let hue = base + i as f64 * 360.0 / n;
                Hsl::new(hue, rng.range(15.0, 30.0), rng.range(40.0, 60.0)).to_rgb()
            })
            .collect(),
        ColorScheme::Monochromatic => {
            // One shared offset keeps the ladder monotone. The ramp is inset
            // by the offset's reach so the ladder stays within 35..=65.
            let offset = rng.range(-MONO_JITTER, MONO_JITTER);
            (0..count)
                .map(|i| {
                    let t = if count > 1 {
                        i as f64 / (count - 1) as f64
                    } else {
                        0.5
                    };
                    let ramp = MONO_LOW + MONO_JITTER
                        + (MONO_HIGH - MONO_LOW - 2.0 * MONO_JITTER) * t
                        + offset;
                    Hsl::new(base, ramp, ramp).to_rgb()
                })
                .collect()
        }
        ColorScheme::Mixed => (0..count)
            .map(|i| {
                let hue = base + i as f64 * 360.0 / n;
                Hsl::new(hue, rng.range(65.0, 85.0), rng.range(45.0, 60.0)).to_rgb()
            })
            .collect(),
    }
}
