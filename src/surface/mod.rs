//! The drawing-surface contract.
//!
//! A [`Surface`] owns pages. Selecting a region of a page hands out a
//! [`Canvas`]: a short-lived handle that borrows the surface mutably and is
//! the only way to draw. Every coordinate crossing this boundary is
//! normalized to the selected region; backends convert to absolute units.
//!
//! The stroke helpers at the bottom of this module (margin mapping, stroke
//! clamping, dash patterns) are shared by every backend.

pub mod metrics;
pub mod recording;

use std::path::Path;
use std::sync::Arc;

use glam::{DVec2, dvec2};

use crate::defaults;
use crate::errors::{RenderError, ValidationError};
use crate::normalized::NormalizedBox;
use crate::types::{Color, DrawingMode, Font, LineStyle, PageId, Rect};

pub use recording::{DrawCommand, RecordingCanvas, RecordingSurface, SurfaceOptions};

// ============================================================================
// Images
// ============================================================================

/// Where image pixels come from
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// An image file the surface loads itself
    File(std::path::PathBuf),
    /// Decoded RGBA pixels held in memory
    Raster(Arc<Raster>),
}

impl ImageSource {
    pub fn file(path: impl Into<std::path::PathBuf>) -> Result<ImageSource, ValidationError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyImagePath);
        }
        Ok(ImageSource::File(path))
    }

    /// Human-readable name, used in errors and display lists.
    pub fn name(&self) -> String {
        match self {
            ImageSource::File(path) => path.display().to_string(),
            ImageSource::Raster(raster) => format!("raster {}x{}", raster.width, raster.height),
        }
    }
}

/// In-memory RGBA image
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    /// Resolution used to convert pixels into points.
    dpi: f64,
    pixels: Vec<u8>,
}

impl Raster {
    /// Wrap `width` x `height` RGBA pixels at 72 dpi, one point per pixel.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Raster, ValidationError> {
        ValidationError::check_positive("raster width", width as f64)?;
        ValidationError::check_positive("raster height", height as f64)?;
        if pixels.len() != width as usize * height as usize * 4 {
            return Err(ValidationError::RasterSize {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Raster {
            width,
            height,
            dpi: 72.0,
            pixels,
        })
    }

    pub fn with_dpi(mut self, dpi: f64) -> Result<Raster, ValidationError> {
        self.dpi = ValidationError::check_positive("raster dpi", dpi)?;
        Ok(self)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Natural size in points.
    pub fn point_size(&self) -> DVec2 {
        dvec2(self.width as f64, self.height as f64) * (72.0 / self.dpi)
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Page management and region selection.
pub trait Surface {
    /// Drawing handle for one selected region
    type Canvas<'a>: Canvas
    where
        Self: 'a;

    fn mode(&self) -> DrawingMode;

    /// Switch the drawing mode, returning the surface for chaining.
    fn set_mode(&mut self, mode: DrawingMode) -> &mut Self;

    /// Add a page. Returns false, changing nothing, if `id` already exists.
    fn add_page(&mut self, id: PageId) -> bool;

    /// Page ids in insertion order.
    fn pages(&self) -> Vec<PageId>;

    /// Select a sub-area of a page for drawing.
    fn select_region(
        &mut self,
        area: &NormalizedBox,
        page: PageId,
    ) -> Result<Self::Canvas<'_>, RenderError>;

    /// Select the whole drawable area of a page.
    fn select_page(&mut self, page: PageId) -> Result<Self::Canvas<'_>, RenderError> {
        self.select_region(&NormalizedBox::FULL, page)
    }

    /// Write the document to `destination`. Returns whether that succeeded.
    fn finalize(&mut self, destination: &Path) -> bool;
}

/// Drawing and measuring within the selected region.
///
/// All positions are normalized to the region. Text is positioned by its
/// baseline-left point.
pub trait Canvas {
    /// The selected region in absolute units.
    fn rect(&self) -> Rect;

    fn mode(&self) -> DrawingMode;

    fn color(&self) -> Color;

    fn set_color(&mut self, color: Color);

    fn font(&self) -> Font;

    fn set_font(&mut self, font: Font);

    /// Width of `text` in the current font, normalized to the region width.
    fn text_width(&self, text: &str) -> f64;

    /// Height of `text` in the current font, normalized to the region height.
    fn text_height(&self, text: &str) -> f64;

    /// Natural image height, normalized to the region height.
    fn image_height(&self, image: &ImageSource) -> Result<f64, RenderError>;

    /// Image width over height, in absolute units.
    fn image_aspect_ratio(&self, image: &ImageSource) -> Result<f64, RenderError>;

    fn thickness_to_width(&self, thickness: f64) -> f64 {
        thickness / self.rect().width
    }

    fn thickness_to_height(&self, thickness: f64) -> f64 {
        thickness / self.rect().height
    }

    /// Write `text` with its baseline-left at `(x, y)`, both in [0, 1].
    fn write_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError>;

    /// Stroke the segment `line` with the current color.
    fn draw_line(
        &mut self,
        line: &NormalizedBox,
        thickness: f64,
        units_on: f64,
    ) -> Result<(), RenderError>;

    fn draw_image(&mut self, image: &ImageSource, area: &NormalizedBox) -> Result<(), RenderError>;

    /// Fill `area` with the current color.
    fn fill_rect(&mut self, area: &NormalizedBox) -> Result<(), RenderError>;

    /// Outline `area` with the current color.
    fn stroke_rect(
        &mut self,
        area: &NormalizedBox,
        thickness: f64,
        units_on: f64,
    ) -> Result<(), RenderError>;
}

/// Stroke `line` in `style`, switching to its color first.
pub fn stroke_line(
    canvas: &mut dyn Canvas,
    line: &NormalizedBox,
    style: &LineStyle,
) -> Result<(), RenderError> {
    canvas.set_color(style.color);
    canvas.draw_line(line, style.thickness(), style.units_on())
}

/// Fill `area` in `color`.
pub fn fill_rect(canvas: &mut dyn Canvas, area: &NormalizedBox, color: Color) -> Result<(), RenderError> {
    canvas.set_color(color);
    canvas.fill_rect(area)
}

// ============================================================================
// Stroke geometry
// ============================================================================

/// Absolute rectangle for `area` on a page, after the page margins.
///
/// Regions share `width_ratio` x `height_ratio` of the page, centered.
pub fn region_rect(page: DVec2, width_ratio: f64, height_ratio: f64, area: &NormalizedBox) -> Rect {
    let usable = page * dvec2(width_ratio, height_ratio);
    let offset = (page - usable) / 2.0;
    area.to_absolute(&Rect::new(offset.x, offset.y, usable.x, usable.y))
}

/// Default A4 region mapping.
pub fn default_region_rect(area: &NormalizedBox) -> Rect {
    region_rect(
        dvec2(defaults::PAGE_WIDTH, defaults::PAGE_HEIGHT),
        defaults::PAGE_WIDTH_RATIO,
        defaults::PAGE_HEIGHT_RATIO,
        area,
    )
}

/// Pull a stroke endpoint inside `rect` so a stroke of half-width `half`
/// centered on it stays within the rectangle.
///
/// The point is first clamped into the rectangle, then shifted by the
/// overhang on each side. A stroke wider than the rectangle on an axis is
/// centered on that axis.
pub fn bind_point(p: DVec2, half: f64, rect: &Rect) -> DVec2 {
    let (min, max) = (rect.min(), rect.max());
    dvec2(
        bind_axis(p.x, half, min.x, max.x),
        bind_axis(p.y, half, min.y, max.y),
    )
}

fn bind_axis(v: f64, half: f64, lo: f64, hi: f64) -> f64 {
    if 2.0 * half >= hi - lo {
        return (lo + hi) / 2.0;
    }
    v.clamp(lo + half, hi - half)
}

/// On/off lengths, in multiples of the stroke thickness, for a dashed stroke.
///
/// `length` is the absolute length being stroked. Returns `None` for a
/// solid stroke (`units_on >= 1`).
pub fn dash_pattern(length: f64, thickness: f64, units_on: f64) -> Option<[f64; 2]> {
    if units_on >= 1.0 {
        return None;
    }
    let units = (length / thickness).max(1.0);
    let on = units_on * units;
    let off = units - on;
    if on <= 0.0 {
        return Some([1.0, units]);
    }
    Some([(on / off).max(1.0), (off / on).max(1.0)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_checks_pixel_count() {
        let raster = Raster::new(2, 2, vec![0; 16]).unwrap();
        assert_eq!((raster.width(), raster.height()), (2, 2));
        assert_eq!(raster.pixels().len(), 16);
        assert_eq!(raster.dpi(), 72.0);
        assert_eq!(
            Raster::new(2, 2, vec![0; 12]).unwrap_err(),
            ValidationError::RasterSize {
                width: 2,
                height: 2,
                len: 12
            }
        );
        assert!(Raster::new(0, 2, Vec::new()).is_err());
    }

    #[test]
    fn raster_point_size_follows_dpi() {
        let raster = Raster::new(40, 20, vec![0; 40 * 20 * 4]).unwrap();
        assert_eq!(raster.point_size(), dvec2(40.0, 20.0));
        let sharp = raster.with_dpi(144.0).unwrap();
        assert_eq!(sharp.point_size(), dvec2(20.0, 10.0));
        assert!(sharp.with_dpi(0.0).is_err());
    }

    #[test]
    fn full_region_is_inset_page() {
        let r = default_region_rect(&NormalizedBox::FULL);
        assert!((r.x - 595.0 * 0.03).abs() < 1e-9);
        assert!((r.y - 842.0 * 0.02).abs() < 1e-9);
        assert!((r.width - 595.0 * 0.94).abs() < 1e-9);
        assert!((r.height - 842.0 * 0.96).abs() < 1e-9);
    }

    #[test]
    fn region_rect_maps_sub_area() {
        let area = NormalizedBox::new(0.5, 0.0, 1.0, 0.5).unwrap();
        let r = region_rect(dvec2(200.0, 100.0), 1.0, 1.0, &area);
        assert_eq!(r, Rect::new(100.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn bind_point_pulls_stroke_inside() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(bind_point(dvec2(0.0, 50.0), 2.0, &rect), dvec2(2.0, 50.0));
        assert_eq!(bind_point(dvec2(100.0, 100.0), 2.0, &rect), dvec2(98.0, 98.0));
        assert_eq!(bind_point(dvec2(-10.0, 120.0), 0.5, &rect), dvec2(0.5, 99.5));
        assert_eq!(bind_point(dvec2(40.0, 60.0), 2.0, &rect), dvec2(40.0, 60.0));
    }

    #[test]
    fn bound_points_stay_in_rect() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        for (x, y) in [(0.0, 0.0), (50.0, 70.0), (10.0, 60.0), (25.0, 35.0)] {
            let p = bind_point(dvec2(x, y), 1.5, &rect);
            assert!(rect.contains(p), "{p} escaped {rect:?}");
        }
    }

    #[test]
    fn oversized_stroke_is_centered() {
        let rect = Rect::new(10.0, 0.0, 4.0, 100.0);
        assert_eq!(bind_point(dvec2(10.0, 0.0), 3.0, &rect), dvec2(12.0, 3.0));
        assert_eq!(bind_point(dvec2(14.0, 100.0), 3.0, &rect), dvec2(12.0, 97.0));
        let flat = Rect::new(0.0, 50.0, 100.0, 0.0);
        assert_eq!(bind_point(dvec2(40.0, 50.0), 0.5, &flat), dvec2(40.0, 50.0));
    }

    #[test]
    fn dash_pattern_half_on() {
        assert_eq!(dash_pattern(10.0, 1.0, 0.5), Some([1.0, 1.0]));
        assert_eq!(dash_pattern(10.0, 1.0, 1.0), None);
    }

    #[test]
    fn dash_pattern_quarter_on() {
        // 20 units: 5 on, 15 off
        assert_eq!(dash_pattern(20.0, 1.0, 0.25), Some([1.0, 3.0]));
    }

    #[test]
    fn dash_pattern_never_on() {
        assert_eq!(dash_pattern(20.0, 2.0, 0.0), Some([1.0, 10.0]));
    }
}
