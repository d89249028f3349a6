//! Deterministic text metrics.
//!
//! Glyph advances come from a fixed proportional table rather than real font
//! files, so layouts measure the same on every machine. Widths are close to
//! Helvetica for printable ASCII.

use crate::defaults;
use crate::types::{Font, FontStyle};

/// Advance of each printable ASCII glyph (0x20..=0x7e), in table units.
/// A digit is 91 units wide; anything outside the table counts as 100.
const ADVANCE: [u8; 95] = [
    45, 55, 62, 115, 90, 132, 125, 40, // ' ' .. '\''
    55, 55, 71, 115, 45, 48, 45, 50, // '(' .. '/'
    91, 91, 91, 91, 91, 91, 91, 91, // '0' .. '7'
    91, 91, 50, 50, 120, 120, 120, 78, // '8' .. '?'
    142, 102, 105, 110, 115, 105, 98, 105, // '@' .. 'G'
    125, 58, 58, 107, 95, 145, 125, 115, // 'H' .. 'O'
    95, 115, 107, 95, 97, 118, 102, 150, // 'P' .. 'W'
    100, 93, 100, 58, 50, 58, 119, 72, // 'X' .. '_'
    72, 86, 92, 80, 92, 85, 52, 92, // '`' .. 'g'
    92, 47, 47, 88, 48, 135, 92, 86, // 'h' .. 'o'
    92, 92, 69, 75, 58, 92, 80, 121, // 'p' .. 'w'
    81, 80, 76, 91, 49, 91, 118, // 'x' .. '~'
];

/// Sum of glyph advances in table units.
pub fn text_units(text: &str) -> u32 {
    text.chars()
        .map(|c| match c {
            ' '..='~' => ADVANCE[c as usize - 0x20] as u32,
            _ => 100,
        })
        .sum()
}

/// Text width in points.
pub fn text_width(text: &str, font: &Font, char_width: f64) -> f64 {
    let width = text_units(text) as f64 * char_width * font.size();
    match font.style {
        FontStyle::Bold => width * defaults::BOLD_WIDEN,
        _ => width,
    }
}

/// Line height in points. Empty text still occupies a line.
pub fn text_height(font: &Font) -> f64 {
    font.size() * defaults::LINE_HEIGHT
}
