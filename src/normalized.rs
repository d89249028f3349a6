//! Boxes in normalized coordinates.
//!
//! A [`NormalizedBox`] is a pair of points inside the unit square. The same
//! value serves as a rectangle (`from` and `to` are opposite corners) and as
//! a line segment (`from` and `to` are the endpoints), so a box is never
//! required to have `from <= to`.

use std::fmt;
use std::hash::{Hash, Hasher};

use glam::{DVec2, dvec2};

use crate::errors::ValidationError;
use crate::types::Rect;

/// Rounding slack: coordinates this close outside [0, 1] are snapped back in.
const SNAP: f64 = 1e-9;

fn snap_unit(what: &'static str, v: f64) -> Result<f64, ValidationError> {
    if v.is_finite() && v < 0.0 && v > -SNAP {
        return Ok(0.0);
    }
    if v.is_finite() && v > 1.0 && v < 1.0 + SNAP {
        return Ok(1.0);
    }
    ValidationError::check_range(what, v, 0.0, 1.0)
}

/// Two points in the unit square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedBox {
    from_x: f64,
    from_y: f64,
    to_x: f64,
    to_y: f64,
}

impl NormalizedBox {
    /// Horizontal segment along the top edge.
    pub const LINE_TOP: NormalizedBox = NormalizedBox::const_new(0.0, 0.0, 1.0, 0.0);
    /// Horizontal segment along the bottom edge.
    pub const LINE_BOTTOM: NormalizedBox = NormalizedBox::const_new(0.0, 1.0, 1.0, 1.0);
    /// Vertical segment along the left edge.
    pub const LINE_LEFT: NormalizedBox = NormalizedBox::const_new(0.0, 0.0, 0.0, 1.0);
    /// Vertical segment along the right edge.
    pub const LINE_RIGHT: NormalizedBox = NormalizedBox::const_new(1.0, 0.0, 1.0, 1.0);
    /// The whole unit square.
    pub const FULL: NormalizedBox = NormalizedBox::const_new(0.0, 0.0, 1.0, 1.0);

    /// Create a box, checking every coordinate is in [0, 1] and not all are zero.
    pub fn new(from_x: f64, from_y: f64, to_x: f64, to_y: f64) -> Result<NormalizedBox, ValidationError> {
        let from_x = snap_unit("from x", from_x)?;
        let from_y = snap_unit("from y", from_y)?;
        let to_x = snap_unit("to x", to_x)?;
        let to_y = snap_unit("to y", to_y)?;
        if from_x + from_y + to_x + to_y <= 0.0 {
            return Err(ValidationError::DegenerateBox);
        }
        Ok(NormalizedBox {
            from_x,
            from_y,
            to_x,
            to_y,
        })
    }

    /// Create a box from its two corner points.
    pub fn from_points(from: DVec2, to: DVec2) -> Result<NormalizedBox, ValidationError> {
        NormalizedBox::new(from.x, from.y, to.x, to.y)
    }

    pub(crate) const fn const_new(from_x: f64, from_y: f64, to_x: f64, to_y: f64) -> NormalizedBox {
        NormalizedBox {
            from_x,
            from_y,
            to_x,
            to_y,
        }
    }

    pub fn from_x(&self) -> f64 {
        self.from_x
    }

    pub fn from_y(&self) -> f64 {
        self.from_y
    }

    pub fn to_x(&self) -> f64 {
        self.to_x
    }

    pub fn to_y(&self) -> f64 {
        self.to_y
    }

    pub fn from_point(&self) -> DVec2 {
        dvec2(self.from_x, self.from_y)
    }

    pub fn to_point(&self) -> DVec2 {
        dvec2(self.to_x, self.to_y)
    }

    pub fn width(&self) -> f64 {
        (self.to_x - self.from_x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.to_y - self.from_y).abs()
    }

    /// Euclidean length when the box is read as a segment.
    pub fn length(&self) -> f64 {
        self.to_point().distance(self.from_point())
    }

    pub fn min_x(&self) -> f64 {
        self.from_x.min(self.to_x)
    }

    pub fn min_y(&self) -> f64 {
        self.from_y.min(self.to_y)
    }

    pub fn max_x(&self) -> f64 {
        self.from_x.max(self.to_x)
    }

    pub fn max_y(&self) -> f64 {
        self.from_y.max(self.to_y)
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width() / self.height()
    }

    // ========================================================================
    // Absolute conversions
    // ========================================================================

    /// Map this box into an absolute rectangle, top-left at the smaller corner.
    pub fn to_absolute(&self, rect: &Rect) -> Rect {
        Rect::new(
            rect.x + rect.width * self.min_x(),
            rect.y + rect.height * self.min_y(),
            rect.width * self.width(),
            rect.height * self.height(),
        )
    }

    /// Map a normalized x coordinate into `rect`.
    pub fn convert_x(x: f64, rect: &Rect) -> Result<f64, ValidationError> {
        let x = snap_unit("x", x)?;
        Ok(rect.x + rect.width * x)
    }

    /// Map a normalized y coordinate into `rect`.
    pub fn convert_y(y: f64, rect: &Rect) -> Result<f64, ValidationError> {
        let y = snap_unit("y", y)?;
        Ok(rect.y + rect.height * y)
    }

    /// Map both endpoints into `rect`, keeping their order.
    pub fn absolute_points(&self, rect: &Rect) -> (DVec2, DVec2) {
        let map = |p: DVec2| rect.min() + p * rect.size();
        (map(self.from_point()), map(self.to_point()))
    }

    pub fn absolute_width(&self, rect: &Rect) -> f64 {
        rect.width * self.width()
    }

    pub fn absolute_height(&self, rect: &Rect) -> f64 {
        rect.height * self.height()
    }

    /// Segment length after mapping into `rect`.
    pub fn absolute_length(&self, rect: &Rect) -> f64 {
        let (from, to) = self.absolute_points(rect);
        from.distance(to)
    }

    // ========================================================================
    // Derived boxes
    // ========================================================================

    /// Split into a `rows` x `cols` grid with the given gaps, indexed `[row][col]`.
    pub fn split(
        &self,
        rows: usize,
        cols: usize,
        horizontal_padding: f64,
        vertical_padding: f64,
    ) -> Result<Vec<Vec<NormalizedBox>>, ValidationError> {
        ValidationError::check_positive("row count", rows as f64)?;
        ValidationError::check_positive("column count", cols as f64)?;
        ValidationError::check_range("horizontal padding", horizontal_padding, 0.0, 1.0)?;
        ValidationError::check_range("vertical padding", vertical_padding, 0.0, 1.0)?;

        let cell_w = (self.width() - (cols - 1) as f64 * horizontal_padding) / cols as f64;
        let cell_h = (self.height() - (rows - 1) as f64 * vertical_padding) / rows as f64;
        ValidationError::check_positive("cell width", cell_w)?;
        ValidationError::check_positive("cell height", cell_h)?;

        (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| {
                        let x = self.min_x() + c as f64 * (cell_w + horizontal_padding);
                        let y = self.min_y() + r as f64 * (cell_h + vertical_padding);
                        NormalizedBox::new(x, y, x + cell_w, y + cell_h)
                    })
                    .collect()
            })
            .collect()
    }

    /// Largest box with this box's aspect ratio that fits inside `dest`, centered.
    pub fn maximize_inside(&self, dest: &NormalizedBox) -> Result<NormalizedBox, ValidationError> {
        let src_ratio = self.aspect_ratio();
        let dest_ratio = dest.aspect_ratio();

        let fit_height = if src_ratio < 1.0 {
            dest_ratio > src_ratio
        } else if src_ratio > 1.0 {
            dest_ratio >= src_ratio
        } else {
            dest_ratio > 1.0
        };

        let (w, h) = if fit_height {
            let h = dest.height();
            (h * src_ratio, h)
        } else {
            let w = dest.width();
            (w, w / src_ratio)
        };

        let x = dest.min_x() + (dest.width() - w) / 2.0;
        let y = dest.min_y() + (dest.height() - h) / 2.0;
        NormalizedBox::new(x, y, x + w, y + h)
    }

    /// Translate by `(dx, dy)`, pushing back against the edge it crossed.
    ///
    /// The size is kept: a box pushed past the boundary ends up flush with it.
    pub fn move_by(&self, dx: f64, dy: f64) -> Result<NormalizedBox, ValidationError> {
        ValidationError::check_range("dx", dx, -1.0, 1.0)?;
        ValidationError::check_range("dy", dy, -1.0, 1.0)?;

        // Correction that brings the crossed edge back onto the boundary.
        fn push_back(a: f64, b: f64, d: f64) -> f64 {
            let (lo, hi) = (a.min(b), a.max(b));
            if d > 0.0 && hi > 1.0 {
                1.0 - hi
            } else if d < 0.0 && lo < 0.0 {
                -lo
            } else {
                0.0
            }
        }

        let (from_x, to_x) = (self.from_x + dx, self.to_x + dx);
        let (from_y, to_y) = (self.from_y + dy, self.to_y + dy);
        let cx = push_back(from_x, to_x, dx);
        let cy = push_back(from_y, to_y, dy);

        NormalizedBox::new(from_x + cx, from_y + cy, to_x + cx, to_y + cy)
    }
}

// Coordinates are validated finite, so equality is total.
impl Eq for NormalizedBox {}

impl Hash for NormalizedBox {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in [self.from_x, self.from_y, self.to_x, self.to_y] {
            // +0.0 and -0.0 compare equal, so they must hash equal.
            (v + 0.0).to_bits().hash(state);
        }
    }
}

impl fmt::Display for NormalizedBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.4}, {:.4}) -> ({:.4}, {:.4})",
            self.from_x, self.from_y, self.to_x, self.to_y
        )
    }
}
