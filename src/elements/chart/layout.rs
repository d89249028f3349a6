//! Chart rendering.
//!
//! Axis labels are measured first; their tallest x label and widest y label
//! carve the plot area out of the region. Everything else is positioned
//! against that area and drawn back to front: markers, background, grid,
//! fill band, reference lines, series, legends, border.

use crate::defaults::{self, MARKER_PADDING as PAD};
use crate::errors::RenderError;
use crate::log::{debug, trace, warn};
use crate::normalized::NormalizedBox;
use crate::surface::{Canvas, fill_rect, stroke_line};
use crate::types::{Color, LineStyle};

use super::{Chart, GridMode, Series};
use crate::elements::Render;

/// Keeps grid lines off the plot border.
const GRID_SLACK: f64 = 1e-9;

/// Plot-area geometry shared by every drawing step
struct Frame {
    plot: NormalizedBox,
    /// Value window after headroom.
    min: f64,
    max: f64,
    /// Width of the x window in samples.
    points: usize,
    /// Centers of the x-axis markers.
    x_ticks: Vec<f64>,
    /// Centers of the y-axis markers.
    y_ticks: Vec<f64>,
}

impl Frame {
    /// Horizontal position of sample `index` of the x window.
    fn x(&self, index: f64) -> f64 {
        self.plot.min_x() + index / (self.points - 1) as f64 * self.plot.width()
    }

    /// Vertical position of `value`; larger values sit higher.
    fn y(&self, value: f64) -> f64 {
        let ratio = 1.0 - (value - self.min) / (self.max - self.min);
        self.plot.min_y() + ratio * self.plot.height()
    }

    fn holds(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn vertical(&self, x: f64) -> Result<NormalizedBox, RenderError> {
        Ok(NormalizedBox::new(x, self.plot.min_y(), x, self.plot.max_y())?)
    }

    fn horizontal(&self, y: f64) -> Result<NormalizedBox, RenderError> {
        Ok(NormalizedBox::new(self.plot.min_x(), y, self.plot.max_x(), y)?)
    }
}

/// Value window with a little headroom so extremes don't sit on the border.
fn value_window(lower: f64, upper: f64) -> (f64, f64) {
    let max = upper + upper.abs() * defaults::VALUE_HEADROOM;
    let min = lower - lower.abs() * defaults::VALUE_HEADROOM;
    if max > min {
        (min, max)
    } else {
        // Flat all-zero data: open a unit window around it.
        (min - 0.5, max + 0.5)
    }
}

/// Interior fractions `i / (n + 1)` for `i` in `1..=n`.
fn fractions(n: usize) -> Vec<f64> {
    (1..=n).map(|i| i as f64 / (n + 1) as f64).collect()
}

struct Label {
    text: String,
    width: f64,
    height: f64,
}

fn measure(canvas: &dyn Canvas, text: String) -> Label {
    Label {
        width: canvas.text_width(&text),
        height: canvas.text_height(&text),
        text,
    }
}

impl Render for Chart {
    fn render(&self, canvas: &mut dyn Canvas) -> Result<(), RenderError> {
        let config = &self.config;
        let (min, max) = value_window(self.y_window.0, self.y_window.1);
        let (x0, x1) = self.x_window;
        let points = x1 - x0;

        // ====================================================================
        // Marker reservation
        // ====================================================================

        canvas.set_font(defaults::MARKER_FONT);

        let x_fracs = fractions(config.x_markers);
        let x_labels: Vec<Label> = x_fracs
            .iter()
            .map(|f| {
                // Truncates, so distinct markers land on distinct samples.
                let index = x0 + (f * points as f64) as usize;
                measure(&*canvas, config.x_label.label(index))
            })
            .collect();
        let reserve_h = x_labels
            .iter()
            .map(|l| l.height)
            .chain(config.vertical_lines.iter().map(|v| canvas.text_height(&v.label)))
            .map(|h| h + PAD)
            .fold(0.0, f64::max);

        let y_fracs = fractions(config.y_markers);
        let y_labels: Vec<Label> = y_fracs
            .iter()
            .map(|f| measure(&*canvas, config.y_label.label(min + f * (max - min))))
            .collect();
        let reserve_w = y_labels
            .iter()
            .map(|l| l.width)
            .chain(config.horizontal_lines.iter().map(|h| canvas.text_width(&h.label)))
            .map(|w| w + PAD)
            .fold(0.0, f64::max);

        let plot = NormalizedBox::new(reserve_w, 0.0, 1.0, 1.0 - reserve_h)?;
        let frame = Frame {
            plot,
            min,
            max,
            points,
            x_ticks: x_fracs
                .iter()
                .map(|f| plot.min_x() + f * plot.width())
                .collect(),
            y_ticks: y_fracs
                .iter()
                .map(|f| plot.min_y() + (1.0 - f) * plot.height())
                .collect(),
        };
        debug!(%plot, min, max, points, "chart frame");

        // ====================================================================
        // Axis markers
        // ====================================================================

        canvas.set_color(Color::BLACK);
        for (label, cx) in x_labels.iter().zip(&frame.x_ticks) {
            let x = (cx - label.width / 2.0).max(0.0);
            canvas.write_text(&label.text, x, 1.0 - PAD / 2.0)?;
        }
        for (label, cy) in y_labels.iter().zip(&frame.y_ticks) {
            let baseline = cy - label.height / 2.0 + label.height * defaults::BASELINE;
            canvas.write_text(&label.text, PAD / 2.0, baseline.min(1.0))?;
        }

        // ====================================================================
        // Decorations
        // ====================================================================

        if let Some(color) = config.background {
            fill_rect(canvas, &frame.plot, color)?;
        }
        if let Some((style, mode)) = &config.grid {
            draw_grid(canvas, &frame, style, *mode)?;
        }
        if let Some(fill) = &config.fill {
            if frame.holds(fill.from) && frame.holds(fill.to) {
                let band = NormalizedBox::new(
                    frame.plot.min_x(),
                    frame.y(fill.to),
                    frame.plot.max_x(),
                    frame.y(fill.from),
                )?;
                fill_rect(canvas, &band, fill.color)?;
            } else {
                debug!(from = fill.from, to = fill.to, "fill band outside value window");
            }
        }

        for line in &config.horizontal_lines {
            if !frame.holds(line.value) {
                debug!(value = line.value, "horizontal line outside value window");
                continue;
            }
            let y = frame.y(line.value);
            canvas.set_color(Color::BLACK);
            canvas.set_font(defaults::MARKER_FONT);
            let h = canvas.text_height(&line.label);
            let baseline = (y - h / 2.0 + h * defaults::BASELINE).clamp(0.0, 1.0);
            canvas.write_text(&line.label, PAD / 2.0, baseline)?;
            stroke_line(canvas, &frame.horizontal(y)?, &line.style)?;
        }

        for line in &config.vertical_lines {
            if line.index < 0 || line.index >= points as i64 {
                debug!(index = line.index, "vertical line outside x window");
                continue;
            }
            let x = frame.x(line.index as f64);
            canvas.set_color(Color::BLACK);
            canvas.set_font(defaults::MARKER_FONT);
            let w = canvas.text_width(&line.label);
            canvas.write_text(&line.label, (x - w / 2.0).max(0.0), 1.0 - PAD / 2.0)?;
            stroke_line(canvas, &frame.vertical(x)?, &line.style)?;
        }

        // ====================================================================
        // Series
        // ====================================================================

        for series in &config.series {
            draw_series(canvas, &frame, series)?;
        }

        // ====================================================================
        // Legends and border
        // ====================================================================

        for legend in &config.legends {
            canvas.set_color(legend.style.color);
            canvas.set_font(legend.style.font);
            let h = canvas.text_height(&legend.text);
            if let Err(_err) = canvas.write_text(&legend.text, legend.x, legend.y + h * defaults::BASELINE) {
                warn!(legend = %legend.text, error = %_err, "legend does not fit, skipped");
            }
        }

        if let Some(style) = &config.border {
            canvas.set_color(style.color);
            canvas.stroke_rect(&frame.plot, style.thickness(), style.units_on())?;
        }
        Ok(())
    }
}

fn draw_grid(
    canvas: &mut dyn Canvas,
    frame: &Frame,
    style: &LineStyle,
    mode: GridMode,
) -> Result<(), RenderError> {
    let plot = &frame.plot;
    let mut lines = Vec::new();
    match mode {
        GridMode::AgainstMarkers { x, y } => {
            if x {
                for cx in &frame.x_ticks {
                    lines.push(frame.vertical(*cx)?);
                }
            }
            if y {
                for cy in &frame.y_ticks {
                    lines.push(frame.horizontal(*cy)?);
                }
            }
        }
        GridMode::Count {
            vertical,
            horizontal,
        } => {
            for f in fractions(vertical) {
                lines.push(frame.vertical(plot.min_x() + f * plot.width())?);
            }
            for f in fractions(horizontal) {
                lines.push(frame.horizontal(plot.min_y() + f * plot.height())?);
            }
        }
        GridMode::Square { vertical } => {
            let step_x = 1.0 / (vertical + 1) as f64;
            // Same absolute spacing on both axes.
            let step_y = step_x * plot.aspect_ratio() * canvas.rect().aspect_ratio();
            let steps = |step: f64| {
                (1..)
                    .map(move |k| k as f64 * step)
                    .take_while(|offset| *offset < 1.0 - GRID_SLACK)
            };
            for offset in steps(step_x) {
                lines.push(frame.vertical(plot.min_x() + offset * plot.width())?);
            }
            for offset in steps(step_y) {
                lines.push(frame.horizontal(plot.max_y() - offset * plot.height())?);
            }
        }
    }

    trace!(count = lines.len(), ?mode, "grid lines");
    canvas.set_color(style.color);
    for line in &lines {
        canvas.draw_line(line, style.thickness(), style.units_on())?;
    }
    Ok(())
}

fn draw_series(canvas: &mut dyn Canvas, frame: &Frame, series: &Series) -> Result<(), RenderError> {
    let values = &series.values;
    for i in 1..values.len() {
        let segment = NormalizedBox::new(
            frame.x((i - 1) as f64),
            frame.y(values[i - 1]),
            frame.x(i as f64),
            frame.y(values[i]),
        )?;
        stroke_line(canvas, &segment, &series.style)?;
    }

    let region_ratio = canvas.rect().aspect_ratio();
    for marker in &series.markers {
        let Some(value) = values.get(marker.index) else {
            debug!(index = marker.index, "point marker clipped by x window");
            continue;
        };
        let (px, py) = (frame.x(marker.index as f64), frame.y(*value));
        let h = canvas.image_height(&marker.image)?;
        let w = h * canvas.image_aspect_ratio(&marker.image)? / region_ratio;

        // Above the point, or below it when there is no room.
        let mut top = py - h - defaults::POINT_MARKER_GAP;
        if top < 0.0 {
            top = py + defaults::POINT_MARKER_GAP;
        }
        let area = NormalizedBox::new(
            (px - w / 2.0).max(0.0),
            top.min(1.0),
            (px + w / 2.0).min(1.0),
            (top + h).min(1.0),
        )?;
        canvas.draw_image(&marker.image, &area)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::chart::{
        AxisLimits, ChartConfig, HorizontalLine, Legend, VerticalLine,
    };
    use crate::surface::{DrawCommand, ImageSource, RecordingSurface, Surface, SurfaceOptions};
    use crate::types::{FontFamily, FontStyle, PageId, TextStyle};
    use glam::DVec2;

    const SERIES: LineStyle = LineStyle::solid(Color::BLUE);
    const GRID: LineStyle = LineStyle::solid(Color::LIGHT_GREY);

    fn surface(width: f64, height: f64) -> RecordingSurface {
        let mut s = RecordingSurface::with_options(
            SurfaceOptions::default()
                .with_page_size(width, height)
                .without_margins(),
        );
        s.add_page(PageId(1));
        s
    }

    fn render(s: &mut RecordingSurface, chart: Chart) {
        chart.render(&mut s.select_page(PageId(1)).unwrap()).unwrap();
    }

    fn lines_in(s: &RecordingSurface, color: Color) -> Vec<(DVec2, DVec2)> {
        s.commands(PageId(1))
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, color: c, .. } if *c == color => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    fn kinds(s: &RecordingSurface) -> Vec<&'static str> {
        s.commands(PageId(1)).iter().map(|c| c.kind()).collect()
    }

    // ========================================================================
    // Frame tests
    // ========================================================================

    #[test]
    fn value_window_has_headroom() {
        let (min, max) = value_window(1.0, 3.0);
        assert!((min - 0.99).abs() < 1e-12);
        assert!((max - 3.03).abs() < 1e-12);
        assert_eq!(value_window(0.0, 0.0), (-0.5, 0.5));
    }

    #[test]
    fn fractions_are_interior() {
        assert_eq!(fractions(3), vec![0.25, 0.5, 0.75]);
        assert!(fractions(0).is_empty());
    }

    // ========================================================================
    // Series tests
    // ========================================================================

    #[test]
    fn segments_map_samples_into_plot() {
        let mut s = surface(100.0, 100.0);
        let chart = ChartConfig::new()
            .series(Series::new([1.0, 2.0, 3.0], SERIES))
            .build()
            .unwrap();
        render(&mut s, chart);

        let segments = lines_in(&s, Color::BLUE);
        assert_eq!(segments.len(), 2);
        let y = |v: f64| (1.0 - (v - 0.99) / (3.03 - 0.99)) * 100.0;
        let (from, to) = segments[0];
        // The first point sits in the bottom-left corner, pulled in by half the stroke.
        assert!(from.abs_diff_eq(DVec2::new(0.5, 99.5), 1e-9), "{from}");
        assert!((to.x - 50.0).abs() < 1e-9, "{to}");
        assert!((to.y - y(2.0)).abs() < 1e-9, "{to}");
        assert!((segments[1].1.y - y(3.0)).abs() < 1e-9, "{:?}", segments[1]);
    }

    #[test]
    fn point_marker_flips_below_when_no_room() {
        let mut s = surface(100.0, 100.0);
        s.register_image("dot.png", 10.0, 10.0).unwrap();
        let dot = ImageSource::file("dot.png").unwrap();
        let chart = ChartConfig::new()
            .series(Series::new([0.0, 1.0], SERIES).marker(1, dot.clone()).marker(0, dot))
            .build()
            .unwrap();
        render(&mut s, chart);

        let images: Vec<_> = s
            .commands(PageId(1))
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(images.len(), 2);
        // Sample 1 is the maximum, near the top: its marker goes below the point.
        let top_point = (1.0 - (1.0 - 0.0) / 1.01) * 100.0;
        assert!(images[0].y > top_point, "{:?}", images[0]);
        assert!((images[0].height - 10.0).abs() < 1e-9);
        // Sample 0 is the minimum, at the bottom: its marker sits above it.
        assert!(images[1].y + images[1].height < 100.0, "{:?}", images[1]);
        // Centered on the left border, so half of it is clipped.
        assert_eq!(images[1].x, 0.0);
        assert!((images[1].width - 5.0).abs() < 1e-9, "{:?}", images[1]);
    }

    // ========================================================================
    // Marker and grid tests
    // ========================================================================

    #[test]
    fn x_markers_shrink_plot_bottom() {
        let mut s = surface(100.0, 100.0);
        let chart = ChartConfig::new()
            .series(Series::new([1.0, 2.0, 3.0, 4.0], SERIES))
            .axis_markers(3, 0)
            .border(LineStyle::DEFAULT)
            .build()
            .unwrap();
        render(&mut s, chart);

        let labels: Vec<_> = s
            .commands(PageId(1))
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["1", "2", "3"]);

        match s.commands(PageId(1)).last() {
            Some(DrawCommand::StrokeRect { rect, .. }) => {
                // 8pt labels are 9.2pt tall, plus 2.5 padding
                let bottom = 100.0 - 9.2 - 2.5;
                assert!((rect.y + rect.height - bottom).abs() < 1e-9, "{rect:?}");
            }
            other => panic!("expected the border last, got {other:?}"),
        }
    }

    #[test]
    fn x_marker_labels_pick_distinct_samples() {
        let mut s = surface(100.0, 100.0);
        let chart = ChartConfig::new()
            .series(Series::new([5.0, 4.0, 3.0, 2.0, 1.0], SERIES))
            .axis_markers(4, 0)
            .build()
            .unwrap();
        render(&mut s, chart);

        let labels: Vec<_> = s
            .commands(PageId(1))
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn x_marker_labels_offset_by_window_start() {
        let mut s = surface(100.0, 100.0);
        let chart = ChartConfig::new()
            .series(Series::new([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0], SERIES))
            .axis_limits(AxisLimits {
                x: Some((2, 6)),
                y: None,
            })
            .axis_markers(1, 0)
            .build()
            .unwrap();
        render(&mut s, chart);

        match &s.commands(PageId(1))[0] {
            DrawCommand::Text { text, .. } => assert_eq!(text, "4"),
            other => panic!("expected a label, got {other:?}"),
        }
    }

    #[test]
    fn y_markers_shrink_plot_left() {
        let mut s = surface(100.0, 100.0);
        let chart = ChartConfig::new()
            .series(Series::new([0.0, 20.0], SERIES))
            .axis_markers(0, 1)
            .build()
            .unwrap();
        render(&mut s, chart);

        let label = match &s.commands(PageId(1))[0] {
            DrawCommand::Text { text, .. } => text.clone(),
            other => panic!("expected a label, got {other:?}"),
        };
        assert_eq!(label, "10.1");
        let (from, _) = lines_in(&s, Color::BLUE)[0];
        let reserved = crate::surface::metrics::text_width("10.1", &defaults::MARKER_FONT, defaults::CHAR_WIDTH)
            + PAD * 100.0;
        assert!((from.x - reserved).abs() < 1e-9, "{from}");
    }

    #[test]
    fn count_grid_draws_requested_lines() {
        let mut s = surface(100.0, 100.0);
        let chart = ChartConfig::new()
            .series(Series::new([1.0, 2.0], SERIES))
            .grid(GRID, GridMode::Count { vertical: 3, horizontal: 1 })
            .build()
            .unwrap();
        render(&mut s, chart);

        let grid = lines_in(&s, Color::LIGHT_GREY);
        assert_eq!(grid.len(), 4);
        let xs: Vec<f64> = grid[..3].iter().map(|(from, _)| from.x).collect();
        assert_eq!(xs, vec![25.0, 50.0, 75.0]);
        assert_eq!(grid[3].0.y, 50.0);
    }

    #[test]
    fn square_grid_keeps_cells_square() {
        let mut s = surface(200.0, 100.0);
        let chart = ChartConfig::new()
            .series(Series::new([1.0, 2.0], SERIES))
            .grid(GRID, GridMode::Square { vertical: 3 })
            .build()
            .unwrap();
        render(&mut s, chart);

        let grid = lines_in(&s, Color::LIGHT_GREY);
        let xs: Vec<f64> = grid.iter().filter(|(a, b)| a.x == b.x).map(|(a, _)| a.x).collect();
        let ys: Vec<f64> = grid.iter().filter(|(a, b)| a.y == b.y).map(|(a, _)| a.y).collect();
        assert_eq!(xs, vec![50.0, 100.0, 150.0]);
        assert_eq!(ys, vec![50.0]);
    }

    #[test]
    fn grid_against_markers_follows_ticks() {
        let mut s = surface(100.0, 100.0);
        let chart = ChartConfig::new()
            .series(Series::new([1.0, 2.0, 3.0], SERIES))
            .axis_markers(1, 0)
            .grid(GRID, GridMode::AgainstMarkers { x: true, y: true })
            .build()
            .unwrap();
        render(&mut s, chart);

        let grid = lines_in(&s, Color::LIGHT_GREY);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].0.x, 50.0);
    }

    // ========================================================================
    // Decoration tests
    // ========================================================================

    #[test]
    fn out_of_window_references_are_skipped() {
        let mut s = surface(100.0, 100.0);
        let chart = ChartConfig::new()
            .series(Series::new([1.0, 2.0], SERIES))
            .axis_limits(AxisLimits {
                x: None,
                y: Some((0.0, 5.0)),
            })
            .horizontal_line(HorizontalLine::new(10.0, "", LineStyle::solid(Color::RED)))
            .vertical_line(VerticalLine::new(2, "", LineStyle::solid(Color::RED)))
            .vertical_line(VerticalLine::new(-1, "", LineStyle::solid(Color::RED)))
            .horizontal_fill(4.0, 6.0, Color::AMBER)
            .build()
            .unwrap();
        render(&mut s, chart);
        insta::assert_debug_snapshot!(kinds(&s), @r#"
        [
            "line",
        ]
        "#);
    }

    #[test]
    fn in_window_references_draw_label_then_line() {
        let mut s = surface(100.0, 100.0);
        let chart = ChartConfig::new()
            .series(Series::new([0.0, 4.0], SERIES))
            .background(Color::LIGHT_GREY)
            .horizontal_fill(1.0, 2.0, Color::AMBER)
            .horizontal_line(HorizontalLine::new(3.0, "limit", LineStyle::DEFAULT_DASHED))
            .vertical_line(VerticalLine::new(1, "end", LineStyle::DEFAULT_DASHED))
            .build()
            .unwrap();
        render(&mut s, chart);
        insta::assert_debug_snapshot!(kinds(&s), @r#"
        [
            "fill",
            "fill",
            "text",
            "line",
            "text",
            "line",
            "line",
        ]
        "#);
    }

    #[test]
    fn legend_that_does_not_fit_is_skipped() {
        let mut s = surface(100.0, 100.0);
        let big = TextStyle::new(FontFamily::Verdana, FontStyle::Bold, 20.0).unwrap();
        let small = TextStyle::new(FontFamily::Verdana, FontStyle::Regular, 8.0).unwrap();
        let chart = ChartConfig::new()
            .series(Series::new([1.0, 2.0], SERIES))
            .legend(Legend::new("too low", big, 0.1, 0.95))
            .legend(Legend::new("fits", small, 0.1, 0.1))
            .border(LineStyle::DEFAULT)
            .build()
            .unwrap();
        render(&mut s, chart);
        insta::assert_debug_snapshot!(kinds(&s), @r#"
        [
            "line",
            "text",
            "stroke",
        ]
        "#);
    }
}
