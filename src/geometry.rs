//! Fundamental planar geometry for layout modelling.

use nalgebra::Vector2;

/// Position in the plan measured in metres, with the Y axis pointing up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
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

    /// Return the point translated by `offset`.
    #[must_use]
    pub fn translated(self, offset: Displacement) -> Self {
        Self::from(self.to_vector() + offset.to_vector())
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Translation vector in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Displacement {
    /// Displacement component along the global X axis.
    pub x: f64,
    /// Displacement component along the global Y axis.
    pub y: f64,
}

impl Displacement {
    /// Create a [`Displacement`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement that carries `from` onto `to`.
    #[must_use]
    pub fn between(from: Point, to: Point) -> Self {
        Self::from(to.to_vector() - from.to_vector())
    }

    /// Convert the displacement into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f64>> for Displacement {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

/// Axis-aligned rectangle in model space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Smallest X coordinate.
    pub min_x: f64,
    /// Smallest Y coordinate.
    pub min_y: f64,
    /// Largest X coordinate.
    pub max_x: f64,
    /// Largest Y coordinate.
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a box from its extreme coordinates.
    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a box of `width × height` centred on `center`.
    #[must_use]
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        let (half_w, half_h) = (width / 2.0, height / 2.0);
        Self::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        )
    }

    /// Extent along the X axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along the Y axis.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Return `true` when `point` lies inside the box or on its edge.
    ///
    /// # Examples
    /// ```
    /// use rigidx::{point, BoundingBox};
    ///
    /// let area = BoundingBox::new(0.0, 0.0, 2.0, 1.0);
    /// assert!(area.contains(point(2.0, 1.0)));
    /// assert!(!area.contains(point(2.1, 0.5)));
    /// ```
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.min_x <= point.x
            && point.x <= self.max_x
            && self.min_y <= point.y
            && point.y <= self.max_y
    }

    /// Smallest box covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Grow the box by `margin` on every side.
    #[must_use]
    pub fn expand(&self, margin: f64) -> Self {
        Self::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use rigidx::point;
///
/// let origin = point(0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_to_vector_roundtrip() {
        let origin = Point::new(1.0, 2.0);
        let vector: Vector2<f64> = origin.into();
        assert_eq!(vector, Vector2::new(1.0, 2.0));
        assert_eq!(Point::from(vector), origin);
    }

    #[test]
    fn displacement_between_points() {
        let delta = Displacement::between(point(1.0, 1.0), point(3.0, -1.0));
        assert_eq!(delta, Displacement::new(2.0, -2.0));
        assert_eq!(point(1.0, 1.0).translated(delta), point(3.0, -1.0));
    }

    #[test]
    fn union_and_expand_cover_both_boxes() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let b = BoundingBox::new(-2.0, 0.5, 0.5, 3.0);
        let joined = a.union(&b);
        assert_eq!(joined, BoundingBox::new(-2.0, 0.0, 1.0, 3.0));
        let grown = joined.expand(1.0);
        assert_eq!(grown.width(), 5.0);
        assert_eq!(grown.height(), 5.0);
        assert_eq!(grown.center(), point(-0.5, 1.5));
    }

    #[test]
    fn non_finite_points_are_detected() {
        assert!(point(0.0, -4.0).is_finite());
        assert!(!point(f64::NAN, 0.0).is_finite());
        assert!(!point(0.0, f64::INFINITY).is_finite());
    }
}
