//! Validated two-dimensional points and the axes used to compare them.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, PointDefect};

/// Splitting dimension of a tree level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[expect(clippy::exhaustive_enums, reason = "a plane has exactly two axes")]
pub enum Axis {
    /// Horizontal axis, used at even depths
    X = 0,
    /// Vertical axis, used at odd depths
    Y = 1,
}

impl Axis {
    /// Axis used by the level at `depth` (root is depth 0).
    #[inline]
    pub fn at_depth(depth: usize) -> Self {
        if depth % 2 == 0 { Self::X } else { Self::Y }
    }

    /// Coordinate index: 0 for x, 1 for y.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The axis used one level further down.
    #[inline]
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// An immutable pair of finite coordinates.
///
/// Points can only be created through validating constructors, so every
/// coordinate is finite. Negative zero is stored as positive zero, which
/// keeps `==` and [`Point::cmp_on`] in agreement.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[f64; 2]", into = "[f64; 2]"))]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a point, rejecting NaN and infinite coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPoint`] with [`PointDefect::NonFinite`] when
    /// either coordinate is NaN or infinite.
    pub fn new(x: f64, y: f64) -> Result<Self, Error> {
        Ok(Self {
            x: checked(Axis::X, x)?,
            y: checked(Axis::Y, y)?,
        })
    }

    /// Horizontal coordinate.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical coordinate.
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Coordinate along `axis`.
    #[inline]
    pub fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Orders two points by their coordinate on `axis` only.
    #[inline]
    pub fn cmp_on(&self, other: &Self, axis: Axis) -> Ordering {
        self.coord(axis).total_cmp(&other.coord(axis))
    }

    /// Orders by `axis`, then by the other axis. Used to make the balanced
    /// build independent of input order.
    #[inline]
    pub(crate) fn cmp_split(&self, other: &Self, axis: Axis) -> Ordering {
        self.cmp_on(other, axis)
            .then_with(|| self.cmp_on(other, axis.next()))
    }
}

#[inline]
fn checked(axis: Axis, value: f64) -> Result<f64, PointDefect> {
    if !value.is_finite() {
        return Err(PointDefect::NonFinite { axis, value });
    }
    // -0.0 == 0.0 but total_cmp orders them apart
    Ok(if value == 0.0 { 0.0 } else { value })
}

// Coordinates are always finite, so equality is reflexive.
impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl TryFrom<[f64; 2]> for Point {
    type Error = Error;

    fn try_from([x, y]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(x, y)
    }
}

impl TryFrom<(f64, f64)> for Point {
    type Error = Error;

    fn try_from((x, y): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(x, y)
    }
}

impl TryFrom<&[f64]> for Point {
    type Error = Error;

    fn try_from(coords: &[f64]) -> Result<Self, Self::Error> {
        match *coords {
            [x, y] => Self::new(x, y),
            _ => Err(PointDefect::Arity(coords.len()).into()),
        }
    }
}

impl TryFrom<Vec<f64>> for Point {
    type Error = Error;

    fn try_from(coords: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_from(coords.as_slice())
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

/// Parses `"x,y"`, optionally wrapped in parentheses as printed by `Display`.
impl FromStr for Point {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(PointDefect::Arity(parts.len()).into());
        }

        let mut coords = [0.0; 2];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|_| PointDefect::Unparsable((*part).to_string()))?;
        }
        Self::try_from(coords)
    }
}
