//! Visual elements a region can hold.
//!
//! Every element is built from an immutable `*Config` value whose `build`
//! validates it once. A built element only needs a [`Canvas`] to render.

mod chart;
mod comments;
mod image;
mod line;
mod signature;
mod text;

use enum_dispatch::enum_dispatch;

use crate::errors::RenderError;
use crate::normalized::NormalizedBox;
use crate::surface::{Canvas, fill_rect};
use crate::types::Color;

pub use chart::{
    AxisLimits, Chart, ChartConfig, GridMode, HorizontalFill, HorizontalLine, LabelFn, Legend,
    PointMarker, Series, VerticalLine,
};
pub use comments::{CommentsConfig, CommentsElement};
pub use image::{ImageConfig, ImageElement};
pub use line::LineElement;
pub use signature::{SignatureConfig, SignatureElement};
pub use text::{FitPolicy, Placement, TextConfig, TextElement};

/// Draw onto the selected region of a surface
#[enum_dispatch]
pub trait Render {
    fn render(&self, canvas: &mut dyn Canvas) -> Result<(), RenderError>;
}

/// Any element a region can hold
#[enum_dispatch(Render)]
#[derive(Debug, Clone)]
pub enum Element {
    Text(TextElement),
    Line(LineElement),
    Image(ImageElement),
    Signature(SignatureElement),
    Comments(CommentsElement),
    Chart(Chart),
}

impl Element {
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Text(_) => "text",
            Element::Line(_) => "line",
            Element::Image(_) => "image",
            Element::Signature(_) => "signature",
            Element::Comments(_) => "comments",
            Element::Chart(_) => "chart",
        }
    }
}

/// Calibration overlay: fill `area` in `color` when the canvas is calibrating.
pub(crate) fn mark(canvas: &mut dyn Canvas, area: &NormalizedBox, color: Color) -> Result<(), RenderError> {
    if canvas.mode().is_calibration() {
        fill_rect(canvas, area, color)?;
    }
    Ok(())
}
