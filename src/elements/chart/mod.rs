//! Line charts.
//!
//! A [`ChartConfig`] collects series, axis markers, grid, reference lines
//! and legends. [`ChartConfig::build`] validates everything, settles the
//! axis windows and clips the series to them, so rendering only has to lay
//! things out.

mod layout;

use std::fmt;
use std::sync::Arc;

use crate::errors::ValidationError;
use crate::surface::ImageSource;
use crate::types::{Color, LineStyle, TextStyle};

// ============================================================================
// Building blocks
// ============================================================================

/// Formats an axis value into a marker label
pub struct LabelFn<T>(Arc<dyn Fn(T) -> String + Send + Sync>);

impl<T> LabelFn<T> {
    pub fn new(f: impl Fn(T) -> String + Send + Sync + 'static) -> Self {
        LabelFn(Arc::new(f))
    }

    pub fn label(&self, value: T) -> String {
        (self.0)(value)
    }
}

impl<T> Clone for LabelFn<T> {
    fn clone(&self) -> Self {
        LabelFn(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for LabelFn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LabelFn(..)")
    }
}

/// Format with at most `decimals` fraction digits, dropping trailing zeros.
fn trim_decimals(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Default x labels: the sample index.
fn index_label() -> LabelFn<usize> {
    LabelFn::new(|i: usize| i.to_string())
}

/// Default y labels: three decimals below 1, one above.
fn value_label() -> LabelFn<f64> {
    LabelFn::new(|v: f64| trim_decimals(v, if v > 1.0 { 1 } else { 3 }))
}

/// An image drawn above one sample of a series
#[derive(Debug, Clone, PartialEq)]
pub struct PointMarker {
    pub index: usize,
    pub image: ImageSource,
}

/// One polyline of samples at consecutive x positions
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub values: Vec<f64>,
    pub style: LineStyle,
    pub markers: Vec<PointMarker>,
}

impl Series {
    pub fn new(values: impl Into<Vec<f64>>, style: LineStyle) -> Self {
        Series {
            values: values.into(),
            style,
            markers: Vec::new(),
        }
    }

    pub fn marker(mut self, index: usize, image: ImageSource) -> Self {
        self.markers.push(PointMarker { index, image });
        self
    }
}

/// How the grid lines are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMode {
    /// Evenly spaced lines: `vertical` across x, `horizontal` across y
    Count { vertical: usize, horizontal: usize },
    /// `vertical` evenly spaced lines, horizontals spaced to form squares
    Square { vertical: usize },
    /// Lines through the axis markers
    AgainstMarkers { x: bool, y: bool },
}

/// Fixed axis windows. `None` fits the data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisLimits {
    /// Sample index window `[lower, upper)`.
    pub x: Option<(usize, usize)>,
    /// Value window `[lower, upper]`.
    pub y: Option<(f64, f64)>,
}

/// Free text anywhere in the chart, top-left at `(x, y)`
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub text: String,
    pub style: TextStyle,
    pub x: f64,
    pub y: f64,
}

impl Legend {
    pub fn new(text: impl Into<String>, style: TextStyle, x: f64, y: f64) -> Self {
        Legend {
            text: text.into(),
            style,
            x,
            y,
        }
    }
}

/// Labelled line at a fixed value
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalLine {
    pub value: f64,
    pub label: String,
    pub style: LineStyle,
}

impl HorizontalLine {
    pub fn new(value: f64, label: impl Into<String>, style: LineStyle) -> Self {
        HorizontalLine {
            value,
            label: label.into(),
            style,
        }
    }
}

/// Labelled line at a sample index of the x window
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalLine {
    pub index: i64,
    pub label: String,
    pub style: LineStyle,
}

impl VerticalLine {
    pub fn new(index: i64, label: impl Into<String>, style: LineStyle) -> Self {
        VerticalLine {
            index,
            label: label.into(),
            style,
        }
    }
}

/// Shaded band between two values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalFill {
    pub from: f64,
    pub to: f64,
    pub color: Color,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration of a [`Chart`]
#[derive(Debug, Clone)]
pub struct ChartConfig {
    series: Vec<Series>,
    x_markers: usize,
    y_markers: usize,
    x_label: LabelFn<usize>,
    y_label: LabelFn<f64>,
    grid: Option<(LineStyle, GridMode)>,
    background: Option<Color>,
    border: Option<LineStyle>,
    limits: AxisLimits,
    legends: Vec<Legend>,
    horizontal_lines: Vec<HorizontalLine>,
    vertical_lines: Vec<VerticalLine>,
    fill: Option<HorizontalFill>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            series: Vec::new(),
            x_markers: 0,
            y_markers: 0,
            x_label: index_label(),
            y_label: value_label(),
            grid: None,
            background: None,
            border: None,
            limits: AxisLimits::default(),
            legends: Vec::new(),
            horizontal_lines: Vec::new(),
            vertical_lines: Vec::new(),
            fill: None,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Number of labelled markers along each axis.
    pub fn axis_markers(mut self, x: usize, y: usize) -> Self {
        self.x_markers = x;
        self.y_markers = y;
        self
    }

    /// Replace the default marker labels.
    pub fn axis_labels(mut self, x: LabelFn<usize>, y: LabelFn<f64>) -> Self {
        self.x_label = x;
        self.y_label = y;
        self
    }

    /// Set the grid. A later call replaces an earlier one.
    pub fn grid(mut self, style: LineStyle, mode: GridMode) -> Self {
        self.grid = Some((style, mode));
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border(mut self, style: LineStyle) -> Self {
        self.border = Some(style);
        self
    }

    pub fn axis_limits(mut self, limits: AxisLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn legend(mut self, legend: Legend) -> Self {
        self.legends.push(legend);
        self
    }

    pub fn horizontal_line(mut self, line: HorizontalLine) -> Self {
        self.horizontal_lines.push(line);
        self
    }

    pub fn vertical_line(mut self, line: VerticalLine) -> Self {
        self.vertical_lines.push(line);
        self
    }

    /// Shade the band between two values. A later call replaces an earlier one.
    pub fn horizontal_fill(mut self, from: f64, to: f64, color: Color) -> Self {
        self.fill = Some(HorizontalFill { from, to, color });
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.series.is_empty() {
            return Err(ValidationError::NoSeries);
        }
        for (i, series) in self.series.iter().enumerate() {
            if series.values.len() < 2 {
                return Err(ValidationError::TooFewSamples {
                    series: i,
                    len: series.values.len(),
                });
            }
            for v in &series.values {
                ValidationError::check_finite("sample", *v)?;
            }
            if let Some(m) = series.markers.iter().find(|m| m.index >= series.values.len()) {
                return Err(ValidationError::MarkerIndex {
                    series: i,
                    index: m.index,
                    len: series.values.len(),
                });
            }
        }

        if let Some((lower, upper)) = self.limits.x {
            // Two samples is the narrowest window that still spans a segment.
            if upper < lower + 2 {
                return Err(ValidationError::AxisLimits {
                    axis: "x",
                    lower: lower as f64,
                    upper: upper as f64,
                });
            }
        }
        if let Some((lower, upper)) = self.limits.y {
            if !(lower.is_finite() && upper.is_finite()) || upper <= lower {
                return Err(ValidationError::AxisLimits {
                    axis: "y",
                    lower,
                    upper,
                });
            }
        }

        if let Some((_, GridMode::Square { vertical })) = self.grid {
            ValidationError::check_positive("square grid lines", vertical as f64)?;
        }
        if let Some(fill) = &self.fill {
            ValidationError::check_finite("fill start", fill.from)?;
            ValidationError::check_finite("fill end", fill.to)?;
            if fill.to <= fill.from {
                return Err(ValidationError::FillBand {
                    from: fill.from,
                    to: fill.to,
                });
            }
        }
        for line in &self.horizontal_lines {
            ValidationError::check_finite("reference value", line.value)?;
        }
        for legend in &self.legends {
            ValidationError::check_range("legend x", legend.x, 0.0, 1.0)?;
            ValidationError::check_range("legend y", legend.y, 0.0, 1.0)?;
        }
        Ok(())
    }

    /// Validate, settle the axis windows and clip every series to them.
    pub fn build(self) -> Result<Chart, ValidationError> {
        self.validate()?;

        let x_window = self.limits.x.unwrap_or_else(|| {
            let longest = self.series.iter().map(|s| s.values.len()).max().unwrap_or(0);
            (0, longest)
        });
        let y_window = self.limits.y.unwrap_or_else(|| {
            let values = self.series.iter().flat_map(|s| s.values.iter().copied());
            values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
        });

        let (x0, x1) = x_window;
        let (y0, y1) = y_window;
        let mut config = self;
        for series in &mut config.series {
            series.values = series
                .values
                .iter()
                .skip(x0)
                .take(x1 - x0)
                .map(|v| v.clamp(y0, y1))
                .collect();
        }

        Ok(Chart {
            config,
            x_window,
            y_window,
        })
    }
}

// ============================================================================
// Chart
// ============================================================================

/// A validated chart, series already clipped to its axis windows
#[derive(Debug, Clone)]
pub struct Chart {
    config: ChartConfig,
    x_window: (usize, usize),
    y_window: (f64, f64),
}

impl Chart {
    /// Sample index window `[lower, upper)`.
    pub fn x_limits(&self) -> (usize, usize) {
        self.x_window
    }

    /// Value window.
    pub fn y_limits(&self) -> (f64, f64) {
        self.y_window
    }

    /// Series after clipping.
    pub fn series(&self) -> &[Series] {
        &self.config.series
    }
}
