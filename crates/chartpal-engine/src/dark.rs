//! Dark-mode counterparts for light-mode series colors.
//!
//! Every light color gets exactly one dark partner at the same index, so a
//! chart keeps its series identity when the page switches theme. The partner
//! keeps the hue. How it gets there depends on strictness:
//!
//! - **Non-strict** inverts lightness into a mid band and boosts saturation a
//!   little, then pulls the result into the dark-mode luminance band.
//! - **Strict** may only use colors from the imported pool, so it looks for
//!   the pool color nearest to a darker shade of the light color.

use crate::colorspace::{Hsl, Rgb};
use crate::config::Thresholds;
use crate::mode::{conform, ColorMode};

/// How far the strict target is darkened from the light color.
const STRICT_DARKEN: f64 = 20.0;
/// Lowest lightness the strict target may reach.
const STRICT_FLOOR: f64 = 20.0;

/// Returns the dark-mode partner of `light`.
///
/// With a non-empty `source_pool` the result is always a member of the pool;
/// otherwise it is derived from `light` and is suitable for dark mode.
pub fn pair_for_dark(light: Rgb, source_pool: Option<&[Rgb]>, thresholds: &Thresholds) -> Rgb {
    match source_pool {
        Some(pool) if !pool.is_empty() => nearest_in_pool(light, pool),
        _ => derive(light, thresholds),
    }
}

/// Pairs every light color, preserving order.
pub fn pair_all(light: &[Rgb], source_pool: Option<&[Rgb]>, thresholds: &Thresholds) -> Vec<Rgb> {
    light
        .iter()
        .map(|&c| pair_for_dark(c, source_pool, thresholds))
        .collect()
}

fn derive(light: Rgb, thresholds: &Thresholds) -> Rgb {
    let hsl = light.to_hsl();
    let paired = Hsl::new(
        hsl.h,
        (hsl.s + 10.0).min(100.0),
        (100.0 - hsl.l).clamp(30.0, 60.0),
    );
    conform(paired.to_rgb(), ColorMode::Dark, thresholds)
}

fn nearest_in_pool(light: Rgb, pool: &[Rgb]) -> Rgb {
    let hsl = light.to_hsl();
    let target = hsl.with_lightness((hsl.l - STRICT_DARKEN).max(STRICT_FLOOR));

    let mut best = pool[0];
    let mut best_distance = f64::INFINITY;
    for &candidate in pool {
        let d = target.distance(&candidate.to_hsl());
        // Strictly less: the first of equally distant colors wins.
        if d < best_distance {
            best = candidate;
            best_distance = d;
        }
    }
    best
}
