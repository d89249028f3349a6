//! Straight line segments.

use crate::errors::RenderError;
use crate::normalized::NormalizedBox;
use crate::surface::{Canvas, stroke_line};
use crate::types::LineStyle;

use super::Render;

/// A segment between the two points of a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineElement {
    pub line: NormalizedBox,
    pub style: LineStyle,
}

impl LineElement {
    pub fn new(line: NormalizedBox, style: LineStyle) -> Self {
        LineElement { line, style }
    }

    /// Solid black line of thickness 1.
    pub fn plain(line: NormalizedBox) -> Self {
        LineElement::new(line, LineStyle::DEFAULT)
    }
}

impl Render for LineElement {
    fn render(&self, canvas: &mut dyn Canvas) -> Result<(), RenderError> {
        stroke_line(canvas, &self.line, &self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface, Surface};
    use crate::types::{Color, PageId};

    #[test]
    fn draws_in_its_own_style() {
        let mut s = RecordingSurface::new();
        s.add_page(PageId(1));
        let style = LineStyle::new(Color::TEAL, 2.0, 0.5).unwrap();
        LineElement::new(NormalizedBox::LINE_BOTTOM, style)
            .render(&mut s.select_page(PageId(1)).unwrap())
            .unwrap();
        match &s.commands(PageId(1))[0] {
            DrawCommand::Line {
                thickness,
                dash,
                color,
                ..
            } => {
                assert_eq!(*thickness, 2.0);
                assert!(dash.is_some());
                assert_eq!(*color, Color::TEAL);
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }
}
