//! Writing palettes back out as CSS custom properties.
//!
//! A palette becomes one `:root` block for light mode and one `.dark` block
//! for dark mode, index-aligned:
//!
//! ```css
//! :root {
//!   --primary: #E11D48; /* primary */
//!   --chart-2: #2563EB;
//! }
//!
//! .dark {
//!   --primary: #FB7185; /* primary */
//!   --chart-2: #60A5FA;
//! }
//! ```
//!
//! Colors that were imported under a name keep it (and repeat it in a
//! trailing comment). Everything else is numbered by position.

use std::collections::BTreeMap;

/// Maps an uppercase `#RRGGBB` color to the name it was imported under.
pub type ColorNames = BTreeMap<String, String>;

/// One named palette to export.
#[derive(Debug, Clone, Copy)]
pub struct PaletteBlock<'a> {
    pub name: &'a str,
    pub light: &'a [String],
    pub dark: &'a [String],
}

/// What an export covers, for choosing a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope<'a> {
    /// The default palette.
    Default,
    /// A single named color set.
    Set(&'a str),
    /// The default palette and every set.
    All,
}

/// Renders a light/dark pair of blocks.
pub fn css_for_palette(light: &[String], dark: &[String], names: &ColorNames) -> String {
    format!(
        ":root {{\n{}\n}}\n\n.dark {{\n{}\n}}",
        declarations(light, names),
        declarations(dark, names)
    )
}

/// Renders the default palette followed by every custom set, each under a
/// comment header.
pub fn css_for_all(default: PaletteBlock<'_>, sets: &[PaletteBlock<'_>], names: &ColorNames) -> String {
    let mut css = format!(
        "/* {} */\n{}\n",
        default.name,
        css_for_palette(default.light, default.dark, names)
    );

    if !sets.is_empty() {
        css.push_str("\n/* Custom Sets */\n");
        for set in sets {
            css.push_str(&format!("\n/* {} */\n", set.name));
            css.push_str(&css_for_palette(set.light, set.dark, names));
            css.push('\n');
        }
    }
    css
}

/// Suggested file name for an export.
pub fn export_filename(scope: ExportScope<'_>) -> String {
    match scope {
        ExportScope::Default => "chart-colors.css".to_string(),
        ExportScope::Set(name) => format!("{}-colors.css", slug(name)),
        ExportScope::All => "all-chart-colors.css".to_string(),
    }
}

fn declarations(colors: &[String], names: &ColorNames) -> String {
    colors
        .iter()
        .enumerate()
        .map(|(i, color)| match names.get(color) {
            Some(name) => format!("  --{}: {}; /* {} */", name, color, name),
            None => format!("  --chart-{}: {};", i + 1, color),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lowercases and joins whitespace runs with `-`.
fn slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
