//! Regions: an area of a page and the elements drawn into it.

use crate::elements::{Element, Render};
use crate::errors::RenderError;
use crate::log::{debug, trace};
use crate::normalized::NormalizedBox;
use crate::surface::{Canvas, Surface};
use crate::types::{Color, PageId};

/// An area of one page holding elements in drawing order.
///
/// Later elements draw over earlier ones. Drawing never mutates the region,
/// so drawing it twice onto identical surfaces yields identical output.
#[derive(Debug, Clone)]
pub struct Region {
    area: NormalizedBox,
    page: PageId,
    elements: Vec<Element>,
}

impl Region {
    pub fn new(area: NormalizedBox, page: PageId) -> Self {
        Region {
            area,
            page,
            elements: Vec::new(),
        }
    }

    /// A region covering the whole drawable area of `page`.
    pub fn full_page(page: PageId) -> Self {
        Region::new(NormalizedBox::FULL, page)
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    pub fn with(mut self, element: impl Into<Element>) -> Self {
        self.push(element);
        self
    }

    pub fn area(&self) -> &NormalizedBox {
        &self.area
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Draw every element onto `surface`, adding the page if needed.
    ///
    /// The first failing element aborts the rest of the region.
    pub fn draw<S: Surface>(&self, surface: &mut S) -> Result<(), RenderError> {
        surface.add_page(self.page);
        let mut canvas = surface.select_region(&self.area, self.page)?;

        if canvas.mode().is_boxed() {
            canvas.set_color(Color::BLACK);
            canvas.stroke_rect(&NormalizedBox::FULL, 1.0, 1.0)?;
        }

        for (_index, element) in self.elements.iter().enumerate() {
            trace!(index = _index, kind = element.kind(), "rendering element");
            element.render(&mut canvas)?;
        }
        debug!(page = %self.page, area = %self.area, count = self.elements.len(), "region drawn");
        Ok(())
    }
}

/// Draw `regions` in order; regions drawn later overlay earlier ones.
pub fn draw_regions<S: Surface>(surface: &mut S, regions: &[Region]) -> Result<(), RenderError> {
    for region in regions {
        region.draw(surface)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{LineElement, TextConfig};
    use crate::surface::{DrawCommand, RecordingSurface, SurfaceOptions};
    use crate::types::{DrawingMode, FontFamily, FontStyle, LineStyle, Rect, TextStyle};

    fn surface() -> RecordingSurface {
        RecordingSurface::with_options(
            SurfaceOptions::default()
                .with_page_size(200.0, 100.0)
                .without_margins(),
        )
    }

    fn title() -> Element {
        let style = TextStyle::new(FontFamily::Helvetica, FontStyle::Bold, 10.0).unwrap();
        TextConfig::new("Title", style).build().unwrap().into()
    }

    fn kinds(s: &RecordingSurface, page: PageId) -> Vec<&'static str> {
        s.commands(page).iter().map(|c| c.kind()).collect()
    }

    #[test]
    fn text_then_line_draws_two_calls_in_order() {
        let mut s = surface();
        let region = Region::full_page(PageId(1))
            .with(title())
            .with(LineElement::new(NormalizedBox::LINE_TOP, LineStyle::DEFAULT));
        region.draw(&mut s).unwrap();
        assert_eq!(kinds(&s, PageId(1)), vec!["text", "line"]);
    }

    #[test]
    fn draw_adds_missing_page() {
        let mut s = surface();
        Region::full_page(PageId(4)).draw(&mut s).unwrap();
        assert_eq!(s.pages(), vec![PageId(4)]);
    }

    #[test]
    fn boxed_mode_outlines_region_first() {
        let mut s = surface();
        s.set_mode(DrawingMode::Boxed);
        let area = NormalizedBox::new(0.0, 0.0, 0.5, 1.0).unwrap();
        Region::new(area, PageId(1))
            .with(LineElement::plain(NormalizedBox::LINE_BOTTOM))
            .draw(&mut s)
            .unwrap();
        match &s.commands(PageId(1))[0] {
            DrawCommand::StrokeRect { rect, color, dash, .. } => {
                assert_eq!(*rect, Rect::new(0.5, 0.5, 99.0, 99.0));
                assert_eq!(*color, Color::BLACK);
                assert_eq!(*dash, None);
            }
            other => panic!("expected the outline first, got {other:?}"),
        }
        assert_eq!(kinds(&s, PageId(1)), vec!["stroke", "line"]);
    }

    #[test]
    fn failing_element_aborts_the_rest() {
        let mut s = surface();
        let big = TextStyle::new(FontFamily::Times, FontStyle::Regular, 200.0).unwrap();
        let region = Region::full_page(PageId(1))
            .with(LineElement::plain(NormalizedBox::LINE_TOP))
            .with(TextConfig::new("far too large", big).build().unwrap())
            .with(LineElement::plain(NormalizedBox::LINE_BOTTOM));
        let err = region.draw(&mut s).unwrap_err();
        assert!(matches!(err, RenderError::TextOverflow { .. }), "{err:?}");
        assert_eq!(kinds(&s, PageId(1)), vec!["line"]);
    }

    #[test]
    fn drawing_is_repeatable() {
        let region = Region::full_page(PageId(1))
            .with(title())
            .with(LineElement::plain(NormalizedBox::LINE_LEFT));
        let (mut a, mut b) = (surface(), surface());
        region.draw(&mut a).unwrap();
        region.draw(&mut b).unwrap();
        assert_eq!(a.display_list(), b.display_list());
        assert_eq!(region.elements().len(), 2);
    }

    #[test]
    fn later_regions_overlay_earlier_ones() {
        let mut s = surface();
        let left = NormalizedBox::new(0.0, 0.0, 0.5, 1.0).unwrap();
        let right = NormalizedBox::new(0.5, 0.0, 1.0, 1.0).unwrap();
        let regions = [
            Region::new(left, PageId(1)).with(title()),
            Region::new(right, PageId(1)).with(LineElement::plain(NormalizedBox::LINE_TOP)),
        ];
        draw_regions(&mut s, &regions).unwrap();
        assert_eq!(kinds(&s, PageId(1)), vec!["text", "line"]);
    }
}
