//! Hex, RGB and HSL conversion plus WCAG luminance and contrast.
//!
//! Everything the engine does to a color happens in one of two spaces:
//!
//! - **HSL** for manipulation. Hue shifts, saturation boosts and lightness
//!   ramps are single-field edits in HSL, which is why synthesis and
//!   dark-mode pairing work there.
//! - **Relative luminance** for judgement. Whether a color is readable on a
//!   light or dark background, and how distinguishable two colors are, is
//!   decided by the WCAG 2.x luminance and contrast-ratio formulas.
//!
//! Hex strings are the interchange format at the crate boundary. They are
//! accepted case-insensitively, with or without `#`, in 3- or 6-digit form,
//! and always printed as uppercase `#RRGGBB`.
//!
//! # Example
//!
//! ```rust
//! use chartpal_engine::colorspace::{contrast_ratio, hex_to_hsl, hsl_to_hex, Rgb};
//!
//! let hsl = hex_to_hsl("#ff0000").unwrap();
//! assert_eq!(hsl.h.round(), 0.0);
//! assert_eq!(hsl_to_hex(hsl.h, hsl.s, hsl.l), "#FF0000");
//!
//! let ratio = contrast_ratio(Rgb::BLACK.luminance(), Rgb::WHITE.luminance());
//! assert!((ratio - 21.0).abs() < 0.01);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{ColorError, Result};

// ─── RGB type ───────────────────────────────────────────────────────────────

/// An 8-bit sRGB color triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#000000`.
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// `#FFFFFF`.
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Parses a hex color: `#rgb`, `#rrggbb`, `rgb` or `rrggbb`, any case.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHex(hex.to_string()))
        };

        match digits.len() {
            // 3-digit hex: #rgb -> #rrggbb
            3 => Ok(Rgb(
                channel(&digits[0..1])? * 17,
                channel(&digits[1..2])? * 17,
                channel(&digits[2..3])? * 17,
            )),
            6 => Ok(Rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(ColorError::InvalidHex(hex.to_string())),
        }
    }

    /// Formats as uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Converts to HSL (unrounded; hue in `[0, 360)`).
    pub fn to_hsl(self) -> Hsl {
        let r = self.0 as f64 / 255.0;
        let g = self.1 as f64 / 255.0;
        let b = self.2 as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl::new(0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl::new((h * 60.0).rem_euclid(360.0), s * 100.0, l * 100.0)
    }

    /// WCAG relative luminance of this color.
    pub fn luminance(self) -> f64 {
        relative_luminance(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

// ─── HSL type ───────────────────────────────────────────────────────────────

/// Hue (degrees), saturation and lightness (percent).
///
/// Derived on demand from [`Rgb`]; never stored as the source of truth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, `0.0..360.0`.
    pub h: f64,
    /// Saturation in percent, `0.0..=100.0`.
    pub s: f64,
    /// Lightness in percent, `0.0..=100.0`.
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Converts to RGB. Hue wraps modulo 360; saturation and lightness clamp
    /// to `[0, 100]`.
    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.0);
        let s = self.s.clamp(0.0, 100.0) / 100.0;
        let l = self.l.clamp(0.0, 100.0) / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let sector = h / 60.0;
        let x = c * (1.0 - (sector % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match sector as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb(to_channel(r + m), to_channel(g + m), to_channel(b + m))
    }

    /// Returns a copy with a different lightness.
    pub fn with_lightness(self, l: f64) -> Self {
        Self { l, ..self }
    }

    /// Unweighted L1 distance in HSL space, with circular hue.
    pub fn distance(&self, other: &Hsl) -> f64 {
        hue_distance(self.h, other.h) + (self.s - other.s).abs() + (self.l - other.l).abs()
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Hex helpers ────────────────────────────────────────────────────────────

/// Parses a hex color and converts it to HSL.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl> {
    Rgb::from_hex(hex).map(Rgb::to_hsl)
}

/// Converts HSL components to an uppercase `#RRGGBB` string.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    Hsl::new(h, s, l).to_rgb().to_hex()
}

/// Normalizes any accepted hex spelling to uppercase `#RRGGBB`.
pub fn normalize_hex(hex: &str) -> Result<String> {
    Rgb::from_hex(hex).map(Rgb::to_hex)
}

// ─── Luminance and contrast ────────────────────────────────────────────────

/// Linearizes one sRGB channel (0–255) with the WCAG 2.x breakpoint.
fn srgb_to_linear(c: u8) -> f64 {
    let c = c as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance per WCAG 2.x, in `[0.0, 1.0]`.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let r = srgb_to_linear(rgb.0);
    let g = srgb_to_linear(rgb.1);
    let b = srgb_to_linear(rgb.2);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// WCAG contrast ratio between two luminances, in `[1.0, 21.0]`.
///
/// Symmetric in its arguments.
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    (lighter + 0.05) / (darker + 0.05)
}

/// Circular distance between two hues, in `[0.0, 180.0]`.
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
