//! Strongly-typed numeric primitives shared by the engine and the editor.
//!
//! Positions are plain `f64` pairs; whether they are pixels or normalized
//! `[0,1]` coordinates depends on where they came from, and callers track that.
//! Vector math goes through `glam::DVec2`.

use glam::{DVec2, dvec2};
use std::fmt;
use std::ops::Sub;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Validate a strictly positive, finite extent (image or viewport side).
pub fn positive_extent(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// A 2D position
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Calculate the midpoint between two points
    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    #[inline]
    pub fn to_vec(self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    /// Whether the point lies in the unit square (inclusive)
    pub fn is_normalized(self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point { x: v.x, y: v.y }
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        p.to_vec()
    }
}

/// Subtract two points to get a direction vector
impl Sub for Point {
    type Output = DVec2;
    fn sub(self, rhs: Point) -> DVec2 {
        dvec2(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Angle in degrees
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    #[inline]
    pub fn from_radians(rad: f64) -> Degrees {
        Degrees(rad.to_degrees())
    }

    /// Get the raw value
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Distance of a signed `[0,360)` angle from zero, in `[0,180]`.
    #[inline]
    pub fn reflex_deviation(self) -> Degrees {
        Degrees(self.0.min(360.0 - self.0))
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    /// Create a Size with validation (both sides positive and finite)
    pub fn try_new(w: f64, h: f64) -> Result<Size, NumericError> {
        Ok(Size {
            w: positive_extent(w)?,
            h: positive_extent(h)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_extent_validation() {
        assert_eq!(positive_extent(3.0), Ok(3.0));
        assert_eq!(positive_extent(0.0), Err(NumericError::Zero));
        assert_eq!(positive_extent(-1.0), Err(NumericError::Negative));
        assert_eq!(positive_extent(f64::NAN), Err(NumericError::NaN));
        assert_eq!(positive_extent(f64::INFINITY), Err(NumericError::Infinite));
    }

    #[test]
    fn size_try_new_rejects_bad_side() {
        assert!(Size::try_new(640.0, 480.0).is_ok());
        assert_eq!(Size::try_new(640.0, 0.0), Err(NumericError::Zero));
    }

    #[test]
    fn point_midpoint() {
        let mid = Point::new(0.0, 0.0).midpoint(Point::new(4.0, 6.0));
        assert_eq!(mid, Point::new(2.0, 3.0));
    }

    #[test]
    fn point_minus_point_gives_vector() {
        let v = Point::new(5.0, 7.0) - Point::new(2.0, 3.0);
        assert_eq!(v, dvec2(3.0, 4.0));
    }

    #[test]
    fn point_normalized_bounds() {
        assert!(Point::new(0.0, 1.0).is_normalized());
        assert!(!Point::new(1.01, 0.5).is_normalized());
        assert!(!Point::new(0.5, -0.1).is_normalized());
    }

    #[test]
    fn from_radians_converts() {
        assert_eq!(Degrees::from_radians(std::f64::consts::PI), Degrees(180.0));
        assert_eq!(Degrees::from_radians(0.0), Degrees(0.0));
    }

    #[test]
    fn reflex_deviation_folds_around_zero() {
        assert_eq!(Degrees(10.0).reflex_deviation(), Degrees(10.0));
        assert_eq!(Degrees(350.0).reflex_deviation(), Degrees(10.0));
        assert_eq!(Degrees(180.0).reflex_deviation(), Degrees(180.0));
    }
}
