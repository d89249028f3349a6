//! In-memory surface that records absolute draw commands.
//!
//! `RecordingSurface` implements the full surface contract: page margins,
//! stroke clamping, dash patterns and deterministic text metrics. Instead
//! of rasterizing, each page keeps a display list, and `finalize` writes a
//! readable dump of it.

use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use glam::{DVec2, dvec2};

use super::{Canvas, ImageSource, Surface, bind_point, dash_pattern, metrics, region_rect};
use crate::defaults;
use crate::errors::{RenderError, ValidationError};
use crate::log::{debug, trace, warn};
use crate::normalized::NormalizedBox;
use crate::types::{Color, DrawingMode, Font, PageId, Rect};

/// Page size, margins and text metrics of a [`RecordingSurface`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceOptions {
    /// Page size in points.
    pub page_size: DVec2,
    /// Share of the page width regions may use.
    pub width_ratio: f64,
    /// Share of the page height regions may use.
    pub height_ratio: f64,
    /// Width of one glyph-table unit as a fraction of the font size.
    pub char_width: f64,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        SurfaceOptions {
            page_size: dvec2(defaults::PAGE_WIDTH, defaults::PAGE_HEIGHT),
            width_ratio: defaults::PAGE_WIDTH_RATIO,
            height_ratio: defaults::PAGE_HEIGHT_RATIO,
            char_width: defaults::CHAR_WIDTH,
        }
    }
}

impl SurfaceOptions {
    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_size = dvec2(width, height);
        self
    }

    /// Use the whole page, with no margins.
    pub fn without_margins(mut self) -> Self {
        self.width_ratio = 1.0;
        self.height_ratio = 1.0;
        self
    }

    pub fn with_margins(mut self, width_ratio: f64, height_ratio: f64) -> Self {
        self.width_ratio = width_ratio;
        self.height_ratio = height_ratio;
        self
    }

    pub fn with_char_width(mut self, char_width: f64) -> Self {
        self.char_width = char_width;
        self
    }
}

// ============================================================================
// Display list
// ============================================================================

/// One primitive in absolute page units
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        text: String,
        /// Baseline-left point.
        at: DVec2,
        font: Font,
        color: Color,
    },
    Line {
        from: DVec2,
        to: DVec2,
        thickness: f64,
        dash: Option<[f64; 2]>,
        color: Color,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        thickness: f64,
        dash: Option<[f64; 2]>,
        color: Color,
    },
    Image {
        name: String,
        rect: Rect,
    },
}

impl DrawCommand {
    /// Short name of the primitive.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Text { .. } => "text",
            DrawCommand::Line { .. } => "line",
            DrawCommand::FillRect { .. } => "fill",
            DrawCommand::StrokeRect { .. } => "stroke",
            DrawCommand::Image { .. } => "image",
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            DrawCommand::Text { color, .. }
            | DrawCommand::Line { color, .. }
            | DrawCommand::FillRect { color, .. }
            | DrawCommand::StrokeRect { color, .. } => Some(*color),
            DrawCommand::Image { .. } => None,
        }
    }
}

fn fmt_dash(dash: &Option<[f64; 2]>) -> String {
    match dash {
        None => "solid".to_string(),
        Some([on, off]) => format!("dash {on:.2}/{off:.2}"),
    }
}

fn fmt_rect(r: &Rect) -> String {
    format!("[{:.2}, {:.2}, {:.2}x{:.2}]", r.x, r.y, r.width, r.height)
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Text {
                text,
                at,
                font,
                color,
            } => write!(f, "text {text:?} at ({:.2}, {:.2}) {font} {color}", at.x, at.y),
            DrawCommand::Line {
                from,
                to,
                thickness,
                dash,
                color,
            } => write!(
                f,
                "line ({:.2}, {:.2}) -> ({:.2}, {:.2}) width {thickness} {} {color}",
                from.x,
                from.y,
                to.x,
                to.y,
                fmt_dash(dash)
            ),
            DrawCommand::FillRect { rect, color } => write!(f, "fill {} {color}", fmt_rect(rect)),
            DrawCommand::StrokeRect {
                rect,
                thickness,
                dash,
                color,
            } => write!(
                f,
                "stroke {} width {thickness} {} {color}",
                fmt_rect(rect),
                fmt_dash(dash)
            ),
            DrawCommand::Image { name, rect } => write!(f, "image {name:?} {}", fmt_rect(rect)),
        }
    }
}

/// A page and everything drawn on it
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub commands: Vec<DrawCommand>,
}

// ============================================================================
// Surface
// ============================================================================

/// Surface that keeps a display list per page
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    options: SurfaceOptions,
    mode: DrawingMode,
    pages: Vec<Page>,
    /// Natural size in points of images known by path.
    images: HashMap<PathBuf, DVec2>,
    color: Color,
    font: Font,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        RecordingSurface::with_options(SurfaceOptions::default())
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SurfaceOptions) -> Self {
        RecordingSurface {
            options,
            mode: DrawingMode::Normal,
            pages: Vec::new(),
            images: HashMap::new(),
            color: Color::BLACK,
            font: defaults::CAPTION_FONT,
        }
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    /// Make an image file known, with its natural size in points.
    pub fn register_image(
        &mut self,
        path: impl Into<PathBuf>,
        width: f64,
        height: f64,
    ) -> Result<(), ValidationError> {
        ValidationError::check_positive("image width", width)?;
        ValidationError::check_positive("image height", height)?;
        self.images.insert(path.into(), dvec2(width, height));
        Ok(())
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    /// Commands recorded on page `id`, in drawing order.
    pub fn commands(&self, id: PageId) -> &[DrawCommand] {
        self.page(id).map(|p| p.commands.as_slice()).unwrap_or(&[])
    }

    /// Human-readable dump of every page.
    pub fn display_list(&self) -> String {
        let mut out = String::new();
        for page in &self.pages {
            let _ = writeln!(out, "page {}", page.id);
            for cmd in &page.commands {
                let _ = writeln!(out, "  {cmd}");
            }
        }
        out
    }

    fn image_size(&self, image: &ImageSource) -> Result<DVec2, RenderError> {
        match image {
            ImageSource::File(path) => {
                self.images
                    .get(path)
                    .copied()
                    .ok_or_else(|| RenderError::UnknownImage {
                        name: image.name(),
                    })
            }
            ImageSource::Raster(raster) => Ok(raster.point_size()),
        }
    }
}

impl Surface for RecordingSurface {
    type Canvas<'a> = RecordingCanvas<'a>;

    fn mode(&self) -> DrawingMode {
        self.mode
    }

    fn set_mode(&mut self, mode: DrawingMode) -> &mut Self {
        debug!(?mode, "drawing mode");
        self.mode = mode;
        self
    }

    fn add_page(&mut self, id: PageId) -> bool {
        if self.page(id).is_some() {
            trace!(page = %id, "page already exists");
            return false;
        }
        debug!(page = %id, "adding page");
        self.pages.push(Page {
            id,
            commands: Vec::new(),
        });
        true
    }

    fn pages(&self) -> Vec<PageId> {
        self.pages.iter().map(|p| p.id).collect()
    }

    fn select_region(
        &mut self,
        area: &NormalizedBox,
        page: PageId,
    ) -> Result<RecordingCanvas<'_>, RenderError> {
        let index = self
            .pages
            .iter()
            .position(|p| p.id == page)
            .ok_or(RenderError::UnknownPage(page))?;
        let rect = region_rect(
            self.options.page_size,
            self.options.width_ratio,
            self.options.height_ratio,
            area,
        );
        debug!(page = %page, area = %area, ?rect, "selected region");
        Ok(RecordingCanvas {
            surface: self,
            page: index,
            rect,
        })
    }

    fn finalize(&mut self, destination: &Path) -> bool {
        match std::fs::write(destination, self.display_list()) {
            Ok(()) => {
                debug!(path = %destination.display(), pages = self.pages.len(), "finalized");
                true
            }
            Err(_err) => {
                warn!(path = %destination.display(), error = %_err, "failed to write display list");
                false
            }
        }
    }
}

// ============================================================================
// Canvas
// ============================================================================

/// Drawing handle for one region of a [`RecordingSurface`] page
#[derive(Debug)]
pub struct RecordingCanvas<'a> {
    surface: &'a mut RecordingSurface,
    page: usize,
    rect: Rect,
}

impl RecordingCanvas<'_> {
    fn push(&mut self, cmd: DrawCommand) {
        trace!(%cmd, "draw");
        self.surface.pages[self.page].commands.push(cmd);
    }

    fn point(&self, x: f64, y: f64) -> DVec2 {
        self.rect.min() + dvec2(x, y) * self.rect.size()
    }

    fn check_stroke(thickness: f64, units_on: f64) -> Result<(), ValidationError> {
        ValidationError::check_positive("line thickness", thickness)?;
        ValidationError::check_range("units on", units_on, 0.0, 1.0)?;
        Ok(())
    }
}

impl Canvas for RecordingCanvas<'_> {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn mode(&self) -> DrawingMode {
        self.surface.mode
    }

    fn color(&self) -> Color {
        self.surface.color
    }

    fn set_color(&mut self, color: Color) {
        self.surface.color = color;
    }

    fn font(&self) -> Font {
        self.surface.font
    }

    fn set_font(&mut self, font: Font) {
        self.surface.font = font;
    }

    fn text_width(&self, text: &str) -> f64 {
        metrics::text_width(text, &self.surface.font, self.surface.options.char_width)
            / self.rect.width
    }

    fn text_height(&self, _text: &str) -> f64 {
        metrics::text_height(&self.surface.font) / self.rect.height
    }

    fn image_height(&self, image: &ImageSource) -> Result<f64, RenderError> {
        Ok(self.surface.image_size(image)?.y / self.rect.height)
    }

    fn image_aspect_ratio(&self, image: &ImageSource) -> Result<f64, RenderError> {
        let size = self.surface.image_size(image)?;
        Ok(size.x / size.y)
    }

    fn write_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError> {
        ValidationError::check_range("text x", x, 0.0, 1.0)?;
        ValidationError::check_range("text y", y, 0.0, 1.0)?;
        let at = self.point(x, y);
        self.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            font: self.surface.font,
            color: self.surface.color,
        });
        Ok(())
    }

    fn draw_line(
        &mut self,
        line: &NormalizedBox,
        thickness: f64,
        units_on: f64,
    ) -> Result<(), RenderError> {
        Self::check_stroke(thickness, units_on)?;
        let half = thickness / 2.0;
        let (from, to) = line.absolute_points(&self.rect);
        let dash = dash_pattern(line.absolute_length(&self.rect), thickness, units_on);
        self.push(DrawCommand::Line {
            from: bind_point(from, half, &self.rect),
            to: bind_point(to, half, &self.rect),
            thickness,
            dash,
            color: self.surface.color,
        });
        Ok(())
    }

    fn draw_image(&mut self, image: &ImageSource, area: &NormalizedBox) -> Result<(), RenderError> {
        // Unknown images fail here rather than when the document is written.
        self.surface.image_size(image)?;
        self.push(DrawCommand::Image {
            name: image.name(),
            rect: area.to_absolute(&self.rect),
        });
        Ok(())
    }

    fn fill_rect(&mut self, area: &NormalizedBox) -> Result<(), RenderError> {
        self.push(DrawCommand::FillRect {
            rect: area.to_absolute(&self.rect),
            color: self.surface.color,
        });
        Ok(())
    }

    fn stroke_rect(
        &mut self,
        area: &NormalizedBox,
        thickness: f64,
        units_on: f64,
    ) -> Result<(), RenderError> {
        Self::check_stroke(thickness, units_on)?;
        let abs = area.to_absolute(&self.rect);
        let half = thickness / 2.0;
        let min = bind_point(abs.min(), half, &self.rect);
        let max = bind_point(abs.max(), half, &self.rect);
        let perimeter = 2.0 * (abs.width + abs.height);
        self.push(DrawCommand::StrokeRect {
            rect: Rect::new(min.x, min.y, max.x - min.x, max.y - min.y),
            thickness,
            dash: dash_pattern(perimeter, thickness, units_on),
            color: self.surface.color,
        });
        Ok(())
    }
}
