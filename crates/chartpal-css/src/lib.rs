//! CSS import and export for chartpal palettes.
//!
//! - [`import`] reads custom-property colors from existing stylesheets
//!   (hex, shadcn-style HSL triples, `hsl()` functions, `var()` references)
//! - [`export`] renders palettes as `:root` / `.dark` custom-property blocks
//!
//! ```rust
//! use chartpal_css::{css_for_palette, parse_mode_colors, ColorNames};
//!
//! let light = vec!["#E11D48".to_string(), "#2563EB".to_string()];
//! let dark = vec!["#FB7185".to_string(), "#60A5FA".to_string()];
//! let css = css_for_palette(&light, &dark, &ColorNames::new());
//!
//! let modes = parse_mode_colors(&css);
//! assert_eq!(modes.light, light);
//! assert_eq!(modes.dark, dark);
//! ```

pub mod export;
pub mod import;

// Re-export public API
pub use export::{
    css_for_all, css_for_palette, export_filename, ColorNames, ExportScope, PaletteBlock,
};
pub use import::{parse_mode_colors, parse_named_colors, ModeColors};
