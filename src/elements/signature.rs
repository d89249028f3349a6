//! Signature lines: a rule with a caption underneath.

use crate::defaults;
use crate::errors::{RenderError, ValidationError};
use crate::normalized::NormalizedBox;
use crate::surface::{Canvas, stroke_line};
use crate::types::{LineStyle, TextStyle};

use super::Render;

/// Configuration of a [`SignatureElement`]
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureConfig {
    line_width: f64,
    subtitle: String,
    line_style: LineStyle,
    text_style: TextStyle,
    start: (f64, f64),
}

impl SignatureConfig {
    /// A dark grey rule `line_width` wide at the top-left, captioned in 8pt Helvetica.
    pub fn new(line_width: f64, subtitle: impl Into<String>) -> Self {
        SignatureConfig {
            line_width,
            subtitle: subtitle.into(),
            line_style: defaults::RULE_STYLE,
            text_style: TextStyle {
                font: defaults::CAPTION_FONT,
                color: defaults::RULE_COLOR,
            },
            start: (0.0, 0.0),
        }
    }

    pub fn line_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }

    pub fn text_style(mut self, style: TextStyle) -> Self {
        self.text_style = style;
        self
    }

    pub fn start_at(mut self, x: f64, y: f64) -> Self {
        self.start = (x, y);
        self
    }

    pub fn build(self) -> Result<SignatureElement, ValidationError> {
        let (x, y) = self.start;
        ValidationError::check_range("signature start x", x, 0.0, 1.0)?;
        ValidationError::check_range("signature start y", y, 0.0, 1.0)?;
        let width = ValidationError::check_positive("signature width", self.line_width)?;
        ValidationError::check_range("signature width", width, 0.0, 1.0)?;
        if x + width > 1.0 {
            return Err(ValidationError::Overflow {
                what: "signature line",
                start: x,
                extent: width,
            });
        }
        let line = NormalizedBox::new(x, y, x + width, y)?;
        Ok(SignatureElement { config: self, line })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureElement {
    config: SignatureConfig,
    line: NormalizedBox,
}

impl Render for SignatureElement {
    fn render(&self, canvas: &mut dyn Canvas) -> Result<(), RenderError> {
        let SignatureConfig {
            subtitle,
            line_style,
            text_style,
            start: (x, y),
            ..
        } = &self.config;

        stroke_line(canvas, &self.line, line_style)?;

        canvas.set_color(text_style.color);
        canvas.set_font(text_style.font);
        let h = canvas.text_height(subtitle);
        canvas.write_text(subtitle, *x, y + h * defaults::SIGNATURE_BASELINE)
    }
}
