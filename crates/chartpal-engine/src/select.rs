//! Contrast-aware selection of series colors from a candidate pool.
//!
//! Chart series must be told apart at a glance, so the selector picks colors
//! that are far apart in luminance contrast rather than merely different in
//! hue:
//!
//! 1. Keep pool colors that belong to the scheme and suit the display mode.
//! 2. If that leaves fewer than `count`, top up with synthesized colors
//!    (pulled into the mode's luminance band first). When synthesis is not
//!    allowed the filters relax instead, so only literal pool colors appear.
//! 3. Greedy max-min: each round takes the candidate whose *minimum*
//!    contrast ratio against everything already picked is highest. The first
//!    round has nothing to compare against, so it scores candidates against
//!    the mode's background instead (the most readable color leads). Near-ties
//!    (within [`Thresholds::tie_window`] of the best) are perturbed by the
//!    seed, so different seeds explore different but still high-contrast
//!    selections.
//! 4. If candidates run out, the picks repeat in a seeded order rather than
//!    leaving the result short.
//!
//! Output order is selection order; downstream it becomes series order.

use std::collections::HashSet;

use tracing::debug;

use crate::colorspace::{contrast_ratio, Rgb};
use crate::config::Thresholds;
use crate::mode::{conform, ColorMode};
use crate::rng::SeededRng;
use crate::scheme::{classify, synthesize, ColorScheme};

/// Per-mode stream salt so light and dark selections with one seed differ.
const LIGHT_SALT: u64 = 0x4c49_4748_54;
const DARK_SALT: u64 = 0x4441_524b;

/// Selection parameters for one pass over a pool.
#[derive(Debug, Clone, Copy)]
pub struct Selector<'a> {
    pub scheme: ColorScheme,
    pub seed: u64,
    pub mode: ColorMode,
    /// Whether synthesized colors may fill a short pool.
    pub allow_synthesis: bool,
    pub thresholds: &'a Thresholds,
}

impl<'a> Selector<'a> {
    /// Picks `count` colors from `pool`.
    ///
    /// Returns fewer than `count` colors only when the pool is empty and
    /// synthesis is disallowed, in which case the result is empty.
    pub fn select(&self, pool: &[Rgb], count: usize) -> Vec<Rgb> {
        if count == 0 {
            return Vec::new();
        }

        let candidates = self.candidates(pool, count);
        debug!(
            mode = ?self.mode,
            scheme = %self.scheme,
            pool = pool.len(),
            candidates = candidates.len(),
            count,
            "selecting colors"
        );
        if candidates.is_empty() {
            return Vec::new();
        }

        let salt = match self.mode {
            ColorMode::Light => LIGHT_SALT,
            ColorMode::Dark => DARK_SALT,
        };
        let mut rng = SeededRng::new(self.seed).fork(salt);

        let mut remaining: Vec<(Rgb, f64)> =
            candidates.into_iter().map(|c| (c, c.luminance())).collect();
        remaining.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        let mut selected: Vec<(Rgb, f64)> = Vec::with_capacity(count);
        while selected.len() < count && !remaining.is_empty() {
            let pick = self.pick(&remaining, &selected, &mut rng);
            selected.push(remaining.remove(pick));
        }

        let mut out: Vec<Rgb> = selected.into_iter().map(|(c, _)| c).collect();
        if out.len() < count {
            debug!(
                distinct = out.len(),
                count, "pool exhausted, repeating picks"
            );
            let mut order = out.clone();
            rng.shuffle(&mut order);
            let mut cycle = order.iter().cycle();
            while out.len() < count {
                match cycle.next() {
                    Some(c) => out.push(*c),
                    None => break,
                }
            }
        }
        out
    }

    /// Builds the deduplicated candidate list for this pass.
    fn candidates(&self, pool: &[Rgb], count: usize) -> Vec<Rgb> {
        let suitable = |c: &Rgb| self.mode.is_suitable(c.luminance(), self.thresholds);
        let in_scheme = |c: &Rgb| classify(&c.to_hsl(), self.scheme);

        let mut candidates: Vec<Rgb> = pool
            .iter()
            .copied()
            .filter(|c| in_scheme(c) && suitable(c))
            .collect();

        if candidates.len() < count {
            if self.allow_synthesis {
                let synthesized = synthesize(self.scheme, count, self.seed)
                    .into_iter()
                    .map(|c| conform(c, self.mode, self.thresholds));
                candidates.extend(synthesized);
            } else if candidates.is_empty() {
                debug!(scheme = %self.scheme, "no pool color fits the scheme, relaxing");
                candidates = pool.iter().copied().filter(|c| suitable(c)).collect();
                if candidates.is_empty() {
                    candidates = pool.to_vec();
                }
            }
        }

        let mut seen = HashSet::new();
        candidates.retain(|c| seen.insert(*c));
        candidates
    }

    /// Index into `remaining` of the next pick.
    fn pick(&self, remaining: &[(Rgb, f64)], selected: &[(Rgb, f64)], rng: &mut SeededRng) -> usize {
        let scores: Vec<f64> = remaining
            .iter()
            .map(|&(_, lum)| min_contrast(lum, selected, self.mode.background_luminance()))
            .collect();
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let floor = best * self.thresholds.tie_window;

        let mut pick = 0;
        let mut pick_score = f64::NEG_INFINITY;
        for (i, &score) in scores.iter().enumerate() {
            if score < floor {
                continue;
            }
            let adjusted = score * (1.0 + self.thresholds.jitter * rng.next_signed());
            if adjusted > pick_score {
                pick = i;
                pick_score = adjusted;
            }
        }
        pick
    }
}

/// Minimum contrast ratio of `lum` against every selected color, or against
/// the background when nothing is selected yet.
fn min_contrast(lum: f64, selected: &[(Rgb, f64)], background: f64) -> f64 {
    selected
        .iter()
        .map(|&(_, other)| contrast_ratio(lum, other))
        .reduce(f64::min)
        .unwrap_or_else(|| contrast_ratio(lum, background))
}

/// Picks `count` colors for `mode` with default thresholds and synthesis
/// allowed.
pub fn select(
    pool: &[Rgb],
    count: usize,
    scheme: ColorScheme,
    seed: u64,
    mode: ColorMode,
) -> Vec<Rgb> {
    let thresholds = Thresholds::default();
    Selector {
        scheme,
        seed,
        mode,
        allow_synthesis: true,
        thresholds: &thresholds,
    }
    .select(pool, count)
}
