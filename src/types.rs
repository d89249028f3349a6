//! Value types shared by the layout engine.
//!
//! Everything here is `Copy` and validated on construction: a `LineStyle`
//! with a zero thickness or a `Font` with a negative size cannot exist.

use std::fmt;

use glam::{DVec2, dvec2};

use crate::errors::ValidationError;

// ============================================================================
// Pages and modes
// ============================================================================

/// Identifier of a page on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u32);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a surface renders: plain output, or with debug overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingMode {
    #[default]
    Normal,
    /// Outline every region
    Boxed,
    /// Draw placement overlays (requested box, gravitated box, fitted box)
    Calibration,
    /// Both of the above
    BoxedCalibration,
}

impl DrawingMode {
    pub fn is_boxed(self) -> bool {
        matches!(self, DrawingMode::Boxed | DrawingMode::BoxedCalibration)
    }

    pub fn is_calibration(self) -> bool {
        matches!(
            self,
            DrawingMode::Calibration | DrawingMode::BoxedCalibration
        )
    }
}

// ============================================================================
// Colors
// ============================================================================

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    // Material palette. Calibration overlays use red, green and orange.
    pub const RED: Color = Color::rgb(244, 67, 54);
    pub const PINK: Color = Color::rgb(233, 30, 99);
    pub const PURPLE: Color = Color::rgb(156, 39, 176);
    pub const INDIGO: Color = Color::rgb(63, 81, 181);
    pub const BLUE: Color = Color::rgb(33, 150, 243);
    pub const TEAL: Color = Color::rgb(0, 150, 136);
    pub const GREEN: Color = Color::rgb(76, 175, 80);
    pub const AMBER: Color = Color::rgb(255, 193, 7);
    pub const ORANGE: Color = Color::rgb(255, 152, 0);
    pub const BROWN: Color = Color::rgb(121, 85, 72);
    pub const GREY: Color = Color::rgb(158, 158, 158);
    pub const LIGHT_GREY: Color = Color::rgb(238, 238, 238);
    pub const DARK_GREY: Color = Color::rgb(66, 66, 66);

    /// Same color with a different alpha channel.
    pub const fn with_alpha(self, a: u8) -> Color {
        Color { a, ..self }
    }

    /// Composite this color over an opaque background, dropping alpha.
    pub fn over(self, background: Color) -> Color {
        let alpha = self.a as f64 / 255.0;
        let mix = |fg: u8, bg: u8| (fg as f64 * alpha + bg as f64 * (1.0 - alpha)).round() as u8;
        Color::rgb(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "rgb({},{},{})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

// ============================================================================
// Absolute rectangles
// ============================================================================

/// An axis-aligned rectangle in surface units (points, pixels...)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn min(&self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    pub fn max(&self) -> DVec2 {
        dvec2(self.x + self.width, self.y + self.height)
    }

    pub fn size(&self) -> DVec2 {
        dvec2(self.width, self.height)
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    pub fn contains(&self, p: DVec2) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }
}

// ============================================================================
// Fonts and text
// ============================================================================

/// Font families every surface must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    Arial,
    #[default]
    Helvetica,
    Times,
    Verdana,
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontFamily::Arial => "Arial",
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Times => "Times",
            FontFamily::Verdana => "Verdana",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    Underline,
    Strikeout,
}

/// Family, style and size in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub family: FontFamily,
    pub style: FontStyle,
    size: f64,
}

impl Font {
    pub fn new(family: FontFamily, style: FontStyle, size: f64) -> Result<Font, ValidationError> {
        let size = ValidationError::check_positive("font size", size)?;
        Ok(Font {
            family,
            style,
            size,
        })
    }

    /// Unchecked constructor for the crate's own constants.
    pub(crate) const fn const_new(family: FontFamily, style: FontStyle, size: f64) -> Font {
        Font {
            family,
            style,
            size,
        }
    }

    pub fn size(&self) -> f64 {
        self.size
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} {}pt", self.family, self.style, self.size)
    }
}

/// A font together with the color to draw it in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub color: Color,
}

impl TextStyle {
    pub fn new(family: FontFamily, style: FontStyle, size: f64) -> Result<TextStyle, ValidationError> {
        Ok(TextStyle {
            font: Font::new(family, style, size)?,
            color: Color::BLACK,
        })
    }

    pub fn with_color(mut self, color: Color) -> TextStyle {
        self.color = color;
        self
    }
}

// ============================================================================
// Lines
// ============================================================================

/// Color, thickness and dash fraction of a stroke.
///
/// `units_on` is the fraction of the stroke that is inked: `1.0` is a solid
/// line, `0.25` draws one unit in four.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    thickness: f64,
    units_on: f64,
}

impl LineStyle {
    /// Black, thickness 1, solid.
    pub const DEFAULT: LineStyle = LineStyle::const_new(Color::BLACK, 1.0, 1.0);
    /// Black, thickness 0.5, one unit in four inked.
    pub const DEFAULT_DASHED: LineStyle = LineStyle::const_new(Color::BLACK, 0.5, 0.25);

    pub fn new(color: Color, thickness: f64, units_on: f64) -> Result<LineStyle, ValidationError> {
        let thickness = ValidationError::check_positive("line thickness", thickness)?;
        let units_on = ValidationError::check_range("units on", units_on, 0.0, 1.0)?;
        Ok(LineStyle {
            color,
            thickness,
            units_on,
        })
    }

    /// A solid line of thickness 1 in `color`.
    pub const fn solid(color: Color) -> LineStyle {
        LineStyle::const_new(color, 1.0, 1.0)
    }

    pub(crate) const fn const_new(color: Color, thickness: f64, units_on: f64) -> LineStyle {
        LineStyle {
            color,
            thickness,
            units_on,
        }
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn units_on(&self) -> f64 {
        self.units_on
    }

    pub fn is_solid(&self) -> bool {
        self.units_on >= 1.0
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_style_rejects_bad_values() {
        assert!(LineStyle::new(Color::BLACK, 0.0, 1.0).is_err());
        assert!(LineStyle::new(Color::BLACK, -1.0, 1.0).is_err());
        assert!(LineStyle::new(Color::BLACK, 1.0, 1.5).is_err());
        assert!(LineStyle::new(Color::BLACK, 1.0, -0.1).is_err());
        assert!(LineStyle::new(Color::BLACK, 2.0, 0.0).is_ok());
    }

    #[test]
    fn line_style_presets() {
        assert!(LineStyle::DEFAULT.is_solid());
        assert!(!LineStyle::DEFAULT_DASHED.is_solid());
        assert_eq!(LineStyle::DEFAULT_DASHED.thickness(), 0.5);
        assert_eq!(LineStyle::DEFAULT_DASHED.units_on(), 0.25);
    }

    #[test]
    fn font_size_must_be_positive() {
        assert!(Font::new(FontFamily::Times, FontStyle::Bold, 0.0).is_err());
        let style = TextStyle::new(FontFamily::Arial, FontStyle::Regular, 12.0).unwrap();
        assert_eq!(style.color, Color::BLACK);
        assert_eq!(style.font.size(), 12.0);
    }

    #[test]
    fn alpha_blends_over_white() {
        let half_red = Color::rgb(255, 0, 0).with_alpha(128);
        assert_eq!(half_red.over(Color::WHITE), Color::rgb(255, 127, 127));
        assert_eq!(Color::RED.over(Color::WHITE), Color::RED);
    }

    #[test]
    fn drawing_mode_flags() {
        assert!(DrawingMode::BoxedCalibration.is_boxed());
        assert!(DrawingMode::BoxedCalibration.is_calibration());
        assert!(!DrawingMode::Boxed.is_calibration());
        assert!(!DrawingMode::Normal.is_boxed());
    }
}
