//! Gravity and scaling: where content goes inside its parent box.
//!
//! Both are pure functions over [`NormalizedBox`]; nothing here touches a
//! surface.

use std::fmt;
use std::ops::BitOr;

use crate::errors::ValidationError;
use crate::normalized::NormalizedBox;

/// A single edge content can be pulled towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gravity {
    Top,
    Bottom,
    Left,
    Right,
}

/// Any combination of [`Gravity`] edges.
///
/// Opposing edges cancel: `TOP | BOTTOM` leaves the vertical position alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GravitySet {
    top: bool,
    bottom: bool,
    left: bool,
    right: bool,
}

impl GravitySet {
    pub const NONE: GravitySet = GravitySet {
        top: false,
        bottom: false,
        left: false,
        right: false,
    };
    pub const TOP: GravitySet = GravitySet::NONE.with(Gravity::Top);
    pub const BOTTOM: GravitySet = GravitySet::NONE.with(Gravity::Bottom);
    pub const LEFT: GravitySet = GravitySet::NONE.with(Gravity::Left);
    pub const RIGHT: GravitySet = GravitySet::NONE.with(Gravity::Right);

    pub const fn contains(self, gravity: Gravity) -> bool {
        match gravity {
            Gravity::Top => self.top,
            Gravity::Bottom => self.bottom,
            Gravity::Left => self.left,
            Gravity::Right => self.right,
        }
    }

    pub const fn with(mut self, gravity: Gravity) -> GravitySet {
        match gravity {
            Gravity::Top => self.top = true,
            Gravity::Bottom => self.bottom = true,
            Gravity::Left => self.left = true,
            Gravity::Right => self.right = true,
        }
        self
    }

    pub fn is_empty(self) -> bool {
        self == GravitySet::NONE
    }

    /// The effective vertical pull, if any.
    pub fn vertical(self) -> Option<Gravity> {
        match (self.contains(Gravity::Top), self.contains(Gravity::Bottom)) {
            (true, false) => Some(Gravity::Top),
            (false, true) => Some(Gravity::Bottom),
            _ => None,
        }
    }

    /// The effective horizontal pull, if any.
    pub fn horizontal(self) -> Option<Gravity> {
        match (self.contains(Gravity::Left), self.contains(Gravity::Right)) {
            (true, false) => Some(Gravity::Left),
            (false, true) => Some(Gravity::Right),
            _ => None,
        }
    }

    /// Push `content` flush against the requested edges of the unit square.
    ///
    /// Axes without an effective pull keep their position.
    pub fn apply(self, content: &NormalizedBox) -> Result<NormalizedBox, ValidationError> {
        let dy = match self.vertical() {
            Some(Gravity::Top) => -content.min_y(),
            Some(Gravity::Bottom) => 1.0 - content.max_y(),
            _ => 0.0,
        };
        let dx = match self.horizontal() {
            Some(Gravity::Left) => -content.min_x(),
            Some(Gravity::Right) => 1.0 - content.max_x(),
            _ => 0.0,
        };
        if dx == 0.0 && dy == 0.0 {
            return Ok(*content);
        }
        content.move_by(dx, dy)
    }
}

impl From<Gravity> for GravitySet {
    fn from(gravity: Gravity) -> Self {
        GravitySet::NONE.with(gravity)
    }
}

impl BitOr for GravitySet {
    type Output = GravitySet;
    fn bitor(self, rhs: GravitySet) -> GravitySet {
        GravitySet {
            top: self.top || rhs.top,
            bottom: self.bottom || rhs.bottom,
            left: self.left || rhs.left,
            right: self.right || rhs.right,
        }
    }
}

impl BitOr<Gravity> for GravitySet {
    type Output = GravitySet;
    fn bitor(self, rhs: Gravity) -> GravitySet {
        self.with(rhs)
    }
}

impl FromIterator<Gravity> for GravitySet {
    fn from_iter<I: IntoIterator<Item = Gravity>>(iter: I) -> Self {
        iter.into_iter().fold(GravitySet::NONE, GravitySet::with)
    }
}

impl fmt::Display for GravitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (Gravity::Top, "top"),
            (Gravity::Bottom, "bottom"),
            (Gravity::Left, "left"),
            (Gravity::Right, "right"),
        ]
        .into_iter()
        .filter(|(g, _)| self.contains(*g))
        .map(|(_, name)| name)
        .collect();
        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join("|"))
        }
    }
}

// ============================================================================
// Image scaling
// ============================================================================

/// How an image fills its destination box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScaleStrategy {
    /// Stretch to the box, ignoring aspect ratio
    #[default]
    Fill,
    /// Keep aspect ratio, centered in the box
    FitCenter,
    /// Keep aspect ratio, aligned to the top (or left) of the box
    FitStart,
    /// Keep aspect ratio, aligned to the bottom (or right) of the box
    FitEnd,
}

/// Resolve the box an image is drawn into.
///
/// `region_ratio` and `image_ratio` are width over height of the active
/// region and of the image, both in absolute units.
pub fn fit_image(
    strategy: ScaleStrategy,
    target: &NormalizedBox,
    region_ratio: f64,
    image_ratio: f64,
) -> Result<NormalizedBox, ValidationError> {
    if strategy == ScaleStrategy::Fill {
        return Ok(*target);
    }
    ValidationError::check_positive("region aspect ratio", region_ratio)?;
    ValidationError::check_positive("image aspect ratio", image_ratio)?;

    // The image's shape expressed in the region's normalized space.
    let ratios = region_ratio / image_ratio;
    let shape = if ratios < 1.0 {
        NormalizedBox::new(0.0, 0.0, 1.0, ratios)?
    } else {
        NormalizedBox::new(0.0, 0.0, 1.0 / ratios, 1.0)?
    };
    let fitted = shape
        .maximize_inside(&NormalizedBox::FULL)?
        .maximize_inside(target)?;

    match strategy {
        ScaleStrategy::Fill | ScaleStrategy::FitCenter => Ok(fitted),
        ScaleStrategy::FitStart if ratios < 1.0 => {
            fitted.move_by(0.0, target.min_y() - fitted.min_y())
        }
        ScaleStrategy::FitStart => fitted.move_by(target.min_x() - fitted.min_x(), 0.0),
        ScaleStrategy::FitEnd if ratios < 1.0 => {
            fitted.move_by(0.0, target.max_y() - fitted.max_y())
        }
        ScaleStrategy::FitEnd => fitted.move_by(target.max_x() - fitted.max_x(), 0.0),
    }
}
