//! Terminal swatches for palette listings.

use chartpal_engine::Rgb;
use console::{Color, Style};

/// Width of one swatch block, in cells.
const SWATCH_WIDTH: usize = 4;

/// Converts an RGB color to the nearest ANSI 256-color palette index.
///
/// Grays map onto the 24-step grayscale ramp, everything else onto the
/// 6×6×6 color cube.
pub fn rgb_to_ansi256(rgb: Rgb) -> u8 {
    let Rgb(r, g, b) = rgb;
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

/// A solid block in `rgb`, or blank space when styling is off.
pub fn swatch(rgb: Rgb) -> String {
    Style::new()
        .bg(Color::Color256(rgb_to_ansi256(rgb)))
        .apply_to(" ".repeat(SWATCH_WIDTH))
        .to_string()
}
