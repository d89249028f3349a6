//! Default values used across the layout engine

use crate::types::{Color, Font, FontFamily, FontStyle, LineStyle};

// Page geometry (points)
pub const PAGE_WIDTH: f64 = 595.0; // A4
pub const PAGE_HEIGHT: f64 = 842.0;
/// Share of the page width available to regions; the rest is split left/right.
pub const PAGE_WIDTH_RATIO: f64 = 0.94;
/// Share of the page height available to regions; the rest is split top/bottom.
pub const PAGE_HEIGHT_RATIO: f64 = 0.96;

// Text placement
/// Baseline offset below the top of a text box, as a fraction of text height.
pub const BASELINE: f64 = 0.85;
/// Signature subtitles sit a little lower under their line.
pub const SIGNATURE_BASELINE: f64 = 0.9;

// Text metrics for the reference surface
/// Width of one glyph-table unit, as a fraction of the font size.
pub const CHAR_WIDTH: f64 = 0.0055;
/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.15;
/// Widening applied to bold text.
pub const BOLD_WIDEN: f64 = 1.1;

// Charts
/// Gap reserved around axis markers and legends.
pub const MARKER_PADDING: f64 = 0.025;
/// Growth of the value window beyond the data extremes, as a fraction of the extreme.
pub const VALUE_HEADROOM: f64 = 0.01;
pub const MARKER_FONT: Font = Font::const_new(FontFamily::Helvetica, FontStyle::Regular, 8.0);
/// Vertical gap between a series point and its marker image.
pub const POINT_MARKER_GAP: f64 = 0.025;

// Signature and comment lines
pub const RULE_COLOR: Color = Color::DARK_GREY;
pub const RULE_STYLE: LineStyle = LineStyle::const_new(RULE_COLOR, 0.5, 1.0);
pub const CAPTION_FONT: Font = Font::const_new(FontFamily::Helvetica, FontStyle::Regular, 8.0);
