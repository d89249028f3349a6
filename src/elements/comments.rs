//! Ruled comment areas, optionally titled.

use crate::defaults;
use crate::errors::{RenderError, ValidationError};
use crate::log::trace;
use crate::normalized::NormalizedBox;
use crate::surface::{Canvas, stroke_line};
use crate::types::{LineStyle, TextStyle};

use super::Render;

/// Rounding slack when deciding whether one more line fits.
const FIT_SLACK: f64 = 1e-9;

/// Configuration of a [`CommentsElement`]
#[derive(Debug, Clone, PartialEq)]
pub struct CommentsConfig {
    line_spacing: f64,
    title: Option<(String, TextStyle)>,
    lines: Option<usize>,
    line_width: f64,
    line_style: LineStyle,
    start: (f64, f64),
}

impl CommentsConfig {
    /// Full-width dark grey rules, as many as fit, starting at the top-left.
    pub fn new(line_spacing: f64) -> Self {
        CommentsConfig {
            line_spacing,
            title: None,
            lines: None,
            line_width: 1.0,
            line_style: defaults::RULE_STYLE,
            start: (0.0, 0.0),
        }
    }

    pub fn title(mut self, title: impl Into<String>, style: TextStyle) -> Self {
        self.title = Some((title.into(), style));
        self
    }

    /// Draw exactly `count` rules instead of filling the region.
    pub fn lines(mut self, count: usize) -> Self {
        self.lines = Some(count);
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    pub fn line_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }

    pub fn start_at(mut self, x: f64, y: f64) -> Self {
        self.start = (x, y);
        self
    }

    pub fn build(self) -> Result<CommentsElement, ValidationError> {
        let spacing = ValidationError::check_positive("line spacing", self.line_spacing)?;
        ValidationError::check_range("line spacing", spacing, 0.0, 1.0)?;
        let width = ValidationError::check_positive("line width", self.line_width)?;
        ValidationError::check_range("line width", width, 0.0, 1.0)?;
        let (x, y) = self.start;
        ValidationError::check_range("comments start x", x, 0.0, 1.0)?;
        ValidationError::check_range("comments start y", y, 0.0, 1.0)?;
        if x + width > 1.0 {
            return Err(ValidationError::Overflow {
                what: "comment lines",
                start: x,
                extent: width,
            });
        }
        Ok(CommentsElement { config: self })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentsElement {
    config: CommentsConfig,
}

impl CommentsElement {
    /// Vertical positions of the rules when the first one sits at `first`.
    fn rule_positions(&self, first: f64) -> Vec<f64> {
        let spacing = self.config.line_spacing;
        match self.config.lines {
            Some(count) => (0..count).map(|k| first + k as f64 * spacing).collect(),
            None => (0..)
                .map(|k| first + k as f64 * spacing)
                .take_while(|y| *y <= 1.0 + FIT_SLACK)
                .collect(),
        }
    }
}

impl Render for CommentsElement {
    fn render(&self, canvas: &mut dyn Canvas) -> Result<(), RenderError> {
        let CommentsConfig {
            line_spacing,
            title,
            line_width,
            line_style,
            start: (x, mut y),
            ..
        } = self.config.clone();

        if let Some((title, style)) = &title {
            canvas.set_font(style.font);
            canvas.set_color(style.color);
            let h = canvas.text_height(title);
            canvas.write_text(title, x, y + h * defaults::BASELINE)?;
            y += h * defaults::BASELINE + line_spacing;
        }

        let rules = self.rule_positions(y);
        trace!(count = rules.len(), first = y, "ruling comment lines");
        for ry in rules {
            let rule = NormalizedBox::new(x, ry, x + line_width, ry)?;
            stroke_line(canvas, &rule, &line_style)?;
        }
        Ok(())
    }
}
