//! Single-line text.

use crate::defaults;
use crate::errors::{RenderError, ValidationError};
use crate::log::trace;
use crate::normalized::NormalizedBox;
use crate::placement::GravitySet;
use crate::surface::Canvas;
use crate::types::{Color, TextStyle};

use super::{Render, mark};

/// Where the text box goes before gravity is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Top-left corner of the text at `(x, y)`
    StartAt { x: f64, y: f64 },
    /// Centered inside a box
    CenterIn(NormalizedBox),
    /// Centered in the region
    Centered,
}

/// What to do when the text is larger than the space it was given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitPolicy {
    /// Fail with [`RenderError::TextOverflow`]
    #[default]
    Strict,
    /// Clamp the position into the region and draw anyway
    Lenient,
}

/// Configuration of a [`TextElement`]
#[derive(Debug, Clone, PartialEq)]
pub struct TextConfig {
    text: String,
    style: TextStyle,
    placement: Placement,
    gravity: GravitySet,
    fit: FitPolicy,
}

impl TextConfig {
    /// Text at the top-left of the region, no gravity, strict fitting.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        TextConfig {
            text: text.into(),
            style,
            placement: Placement::StartAt { x: 0.0, y: 0.0 },
            gravity: GravitySet::NONE,
            fit: FitPolicy::Strict,
        }
    }

    /// A version label such as `build v1.4.2`.
    pub fn version(prefix: &str, major: u32, minor: u32, patch: u32, style: TextStyle) -> Self {
        TextConfig::new(format!("{prefix}v{major}.{minor}.{patch}"), style)
    }

    pub fn start_at(mut self, x: f64, y: f64) -> Self {
        self.placement = Placement::StartAt { x, y };
        self
    }

    pub fn center_in(mut self, area: NormalizedBox) -> Self {
        self.placement = Placement::CenterIn(area);
        self
    }

    pub fn centered(mut self) -> Self {
        self.placement = Placement::Centered;
        self
    }

    pub fn gravity(mut self, gravity: impl Into<GravitySet>) -> Self {
        self.gravity = gravity.into();
        self
    }

    pub fn fit(mut self, fit: FitPolicy) -> Self {
        self.fit = fit;
        self
    }

    pub fn build(self) -> Result<TextElement, ValidationError> {
        if let Placement::StartAt { x, y } = self.placement {
            ValidationError::check_range("text start x", x, 0.0, 1.0)?;
            ValidationError::check_range("text start y", y, 0.0, 1.0)?;
        }
        Ok(TextElement { config: self })
    }
}

/// A line of text placed by start point or centering, then pulled by gravity
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    config: TextConfig,
}

impl TextElement {
    pub fn text(&self) -> &str {
        &self.config.text
    }

    pub fn style(&self) -> &TextStyle {
        &self.config.style
    }

    fn overflow(&self, axis: &'static str, extent: f64, available: f64) -> Result<(), RenderError> {
        if self.config.fit == FitPolicy::Strict && extent > available {
            return Err(RenderError::TextOverflow {
                text: self.config.text.clone(),
                axis,
                extent,
                available,
            });
        }
        Ok(())
    }

    /// Requested text box and top-left text position inside it.
    fn layout(&self, w: f64, h: f64) -> Result<(NormalizedBox, f64, f64), RenderError> {
        let (x, y) = match self.config.placement {
            Placement::StartAt { x, y } => {
                self.overflow("width", x + w, 1.0)?;
                self.overflow("height", y + h, 1.0)?;
                (x, y)
            }
            Placement::CenterIn(area) => {
                self.overflow("width", w, area.width())?;
                self.overflow("height", h, area.height())?;
                let (x, y) = centered_in(&area, w, h);
                return Ok((area, x, y));
            }
            Placement::Centered => (0.5 - w / 2.0, 0.5 - h / 2.0),
        };
        Ok((clamped_box(x, y, w, h)?, x, y))
    }
}

fn centered_in(area: &NormalizedBox, w: f64, h: f64) -> (f64, f64) {
    (
        area.min_x() + area.width() / 2.0 - w / 2.0,
        area.min_y() + area.height() / 2.0 - h / 2.0,
    )
}

fn clamped_box(x: f64, y: f64, w: f64, h: f64) -> Result<NormalizedBox, ValidationError> {
    let clamp = |v: f64| v.clamp(0.0, 1.0);
    NormalizedBox::new(clamp(x), clamp(y), clamp(x + w), clamp(y + h))
}

impl Render for TextElement {
    fn render(&self, canvas: &mut dyn Canvas) -> Result<(), RenderError> {
        let TextConfig {
            text,
            style,
            gravity,
            ..
        } = &self.config;

        canvas.set_font(style.font);
        let w = canvas.text_width(text);
        let h = canvas.text_height(text);
        self.overflow("width", w, 1.0)?;
        self.overflow("height", h, 1.0)?;

        let (requested, mut x, mut y) = self.layout(w, h)?;
        mark(canvas, &requested, Color::RED)?;

        if !gravity.is_empty() {
            let pulled = gravity.apply(&requested)?;
            mark(canvas, &pulled, Color::GREEN)?;
            (x, y) = centered_in(&pulled, w, h);
        }

        x = x.max(0.0);
        y = y.max(0.0);
        let baseline = (y + h * defaults::BASELINE).min(1.0);
        trace!(%text, x, baseline, "placing text");

        let color = if canvas.mode().is_calibration() {
            Color::BLACK
        } else {
            style.color
        };
        canvas.set_color(color);
        canvas.write_text(text, x.min(1.0), baseline)
    }
}
