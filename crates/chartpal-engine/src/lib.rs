//! Chartpal engine - deterministic, accessible chart palettes.
//!
//! Given a pool of input colors (or none), a count, a scheme and a seed, the
//! engine produces `count` light-mode series colors and `count` index-aligned
//! dark-mode partners that are distinguishable from each other and readable
//! on their background.
//!
//! - Colors are picked by greedy max-min WCAG contrast, so series differ in
//!   luminance and not only in hue
//! - Schemes (`warm`, `cool`, `neutral`, `monochromatic`, `mixed`) constrain
//!   both filtering and synthesis
//! - Strict mode never invents a color: output is drawn from the pool only
//! - The same request and seed always produce the same bytes
//!
//! # Quick Start
//!
//! ```rust
//! use chartpal_engine::{generate_accessible_palette, ColorScheme, NamedColor, PaletteRequest};
//!
//! let request = PaletteRequest {
//!     available_colors: vec![
//!         NamedColor::new("rose", "#E11D48"),
//!         NamedColor::new("blue", "#2563EB"),
//!         NamedColor::new("green", "#16A34A"),
//!     ],
//!     count: 3,
//!     seed: 7,
//!     scheme: ColorScheme::Mixed,
//!     strict_mode: true,
//! };
//!
//! let palette = generate_accessible_palette(&request);
//! assert_eq!(palette.light.len(), 3);
//! assert_eq!(palette.dark.len(), 3);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! named colors ─▶ pool (parse, drop #000000/#FFFFFF, dedupe)
//!                   │
//!                   ├─ empty ───────▶ synthesize ─────────────▶ light
//!                   └─ present ─────▶ scheme/mode filter
//!                                      └─▶ greedy max-min ─────▶ light
//! light ─▶ dark pairing (derived, or nearest pool color if strict) ─▶ dark
//! ```
//!
//! The building blocks ([`colorspace`], [`scheme`], [`select`], [`dark`]) are
//! public for inspection tools and tests; [`generate_accessible_palette`] is
//! the entry point.

pub mod colorspace;
pub mod config;
pub mod dark;
mod error;
pub mod mode;
pub mod palette;
pub mod rng;
pub mod scheme;
pub mod select;

// Re-export public API
pub use colorspace::{contrast_ratio, hex_to_hsl, hsl_to_hex, relative_luminance, Hsl, Rgb};
pub use config::Thresholds;
pub use dark::pair_for_dark;
pub use error::{ColorError, ConfigError, Result};
pub use mode::ColorMode;
pub use palette::{
    build_pool, generate_accessible_palette, generate_with, NamedColor, PaletteRequest,
    PaletteResult, RESERVED_SENTINELS,
};
pub use scheme::{classify, synthesize, ColorScheme};
pub use select::Selector;
