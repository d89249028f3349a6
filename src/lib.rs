//! Lay out text, lines, images, signature blocks and charts on pages.
//!
//! Every position is a [`NormalizedBox`]: a pair of points expressed as
//! fractions of a containing area. A [`Region`] places such a box on a
//! page and holds [`Element`]s; drawing a region selects it on a
//! [`Surface`] and renders each element through the returned [`Canvas`].
//!
//! ```
//! use pagebox::{
//!     FontFamily, FontStyle, LineElement, LineStyle, NormalizedBox, PageId, RecordingSurface,
//!     Region, TextConfig, TextStyle,
//! };
//!
//! let style = TextStyle::new(FontFamily::Helvetica, FontStyle::Bold, 12.0)?;
//! let region = Region::full_page(PageId(1))
//!     .with(TextConfig::new("Quarterly report", style).centered().build()?)
//!     .with(LineElement::new(NormalizedBox::LINE_BOTTOM, LineStyle::DEFAULT));
//!
//! let mut surface = RecordingSurface::new();
//! region.draw(&mut surface)?;
//! assert_eq!(surface.commands(PageId(1)).len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod log;

pub mod defaults;
pub mod elements;
pub mod errors;
pub mod normalized;
pub mod placement;
pub mod region;
pub mod surface;
pub mod types;

pub use elements::{
    AxisLimits, Chart, ChartConfig, CommentsConfig, CommentsElement, Element, FitPolicy, GridMode,
    HorizontalLine, ImageConfig, ImageElement, LabelFn, Legend, LineElement, Placement, Render,
    Series, SignatureConfig, SignatureElement, TextConfig, TextElement, VerticalLine,
};
pub use errors::{RenderError, ValidationError};
pub use normalized::NormalizedBox;
pub use placement::{Gravity, GravitySet, ScaleStrategy, fit_image};
pub use region::{Region, draw_regions};
pub use surface::{Canvas, ImageSource, Raster, RecordingSurface, Surface, SurfaceOptions};
pub use types::{
    Color, DrawingMode, Font, FontFamily, FontStyle, LineStyle, PageId, Rect, TextStyle,
};
