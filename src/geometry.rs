//! Plane geometric types for truss modelling.

use nalgebra::Vector2;

/// Position in the plane of the truss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Return `true` when both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Cartesian vector representing a plane force.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Force {
    /// Force component acting along the global X axis.
    pub x: f64,
    /// Force component acting along the global Y axis.
    pub y: f64,
}

impl Force {
    /// Create a [`Force`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the force into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Return `true` when both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use trusseq::point;
///
/// let apex = point(2.0, 3.0);
/// assert_eq!(apex.y, 3.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Convenience helper for creating [`Force`] instances.
///
/// # Examples
/// ```
/// use trusseq::force;
///
/// let load = force(0.0, -10.0);
/// assert_eq!(load.y, -10.0);
/// ```
#[must_use]
pub const fn force(x: f64, y: f64) -> Force {
    Force::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_map_onto_vectors() {
        assert_eq!(point(2.0, 3.0).to_vector(), Vector2::new(2.0, 3.0));
        assert_eq!(force(-1.0, 0.5).to_vector(), Vector2::new(-1.0, 0.5));
    }

    #[test]
    fn non_finite_components_are_detected() {
        assert!(point(0.0, 1.0).is_finite());
        assert!(!point(f64::NAN, 1.0).is_finite());
        assert!(!force(0.0, f64::INFINITY).is_finite());
    }
}
