//! Error types with diagnostics using miette
//!
//! Configuration mistakes surface as [`ValidationError`] when an element or
//! box is built. Problems that can only be seen once a surface measures
//! something surface as [`RenderError`].

use miette::Diagnostic;
use thiserror::Error;

use crate::types::PageId;

// ============================================================================
// Validation Errors
// ============================================================================

/// Errors raised while constructing boxes, styles and elements
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{what} must be within [{min}, {max}], got {value}")]
    #[diagnostic(code(pagebox::validation::out_of_range))]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{what} must be greater than zero, got {value}")]
    #[diagnostic(code(pagebox::validation::not_positive))]
    NotPositive { what: &'static str, value: f64 },

    #[error("{what} must be finite, got {value}")]
    #[diagnostic(code(pagebox::validation::not_finite))]
    NotFinite { what: &'static str, value: f64 },

    #[error("box coordinates are all zero")]
    #[diagnostic(
        code(pagebox::validation::degenerate_box),
        help("at least one coordinate of a normalized box must be non-zero")
    )]
    DegenerateBox,

    #[error("{what} overflows the unit square: {start} + {extent} > 1")]
    #[diagnostic(code(pagebox::validation::overflow))]
    Overflow {
        what: &'static str,
        start: f64,
        extent: f64,
    },

    #[error("series {series} has {len} samples, at least 2 are required")]
    #[diagnostic(code(pagebox::validation::too_few_samples))]
    TooFewSamples { series: usize, len: usize },

    #[error("a chart needs at least one series")]
    #[diagnostic(code(pagebox::validation::no_series))]
    NoSeries,

    #[error("marker index {index} is outside series {series} of length {len}")]
    #[diagnostic(code(pagebox::validation::marker_index))]
    MarkerIndex {
        series: usize,
        index: usize,
        len: usize,
    },

    #[error("invalid {axis} axis limits: ({lower}, {upper})")]
    #[diagnostic(
        code(pagebox::validation::axis_limits),
        help("the upper limit must exceed the lower one, and x limits start at 0 or later")
    )]
    AxisLimits {
        axis: &'static str,
        lower: f64,
        upper: f64,
    },

    #[error("fill band must go upwards: from {from} to {to}")]
    #[diagnostic(code(pagebox::validation::fill_band))]
    FillBand { from: f64, to: f64 },

    #[error("{len} bytes do not hold {width}x{height} RGBA pixels")]
    #[diagnostic(code(pagebox::validation::raster_size))]
    RasterSize { width: u32, height: u32, len: usize },

    #[error("image path is empty")]
    #[diagnostic(code(pagebox::validation::empty_image_path))]
    EmptyImagePath,
}

impl ValidationError {
    /// Shorthand for a range check against `[min, max]`.
    pub(crate) fn check_range(
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<f64, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { what, value });
        }
        if value < min || value > max {
            return Err(ValidationError::OutOfRange {
                what,
                value,
                min,
                max,
            });
        }
        Ok(value)
    }

    pub(crate) fn check_finite(what: &'static str, value: f64) -> Result<f64, ValidationError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ValidationError::NotFinite { what, value })
        }
    }

    /// Shorthand for a strictly positive check.
    pub(crate) fn check_positive(what: &'static str, value: f64) -> Result<f64, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { what, value });
        }
        if value <= 0.0 {
            return Err(ValidationError::NotPositive { what, value });
        }
        Ok(value)
    }
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors raised while drawing onto a surface
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error("text {text:?} does not fit: {axis} extent {extent} exceeds {available}")]
    #[diagnostic(
        code(pagebox::render::text_overflow),
        help("use a smaller font, a larger region, or FitPolicy::Lenient")
    )]
    TextOverflow {
        text: String,
        axis: &'static str,
        extent: f64,
        available: f64,
    },

    #[error("page {0} has not been added")]
    #[diagnostic(code(pagebox::render::unknown_page))]
    UnknownPage(PageId),

    #[error("image {name:?} is not known to the surface")]
    #[diagnostic(
        code(pagebox::render::unknown_image),
        help("register the image with the surface before drawing it")
    )]
    UnknownImage { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_check_rejects_nan_before_bounds() {
        let err = ValidationError::check_range("x", f64::NAN, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, ValidationError::NotFinite { what: "x", .. }));
    }

    #[test]
    fn validation_converts_into_render_error() {
        let err: RenderError = ValidationError::NoSeries.into();
        assert_eq!(err.to_string(), "a chart needs at least one series");
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("pagebox::validation::no_series")
        );
    }
}
