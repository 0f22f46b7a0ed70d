//! Rigidity center and eccentricity of a layout.

use std::fmt;

use crate::element::Element;
use crate::geometry::Point;

/// Location of the rigidity center, or the reason it is undefined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RigidityCenter {
    /// The layout is stable and the center lies at this model point.
    Located(Point),
    /// The layout has no elements.
    Empty,
    /// The net stiffness along at least one axis is zero, or too large to
    /// represent.
    Unstable,
}

impl RigidityCenter {
    /// Return the center when it is defined.
    #[must_use]
    pub fn point(&self) -> Option<Point> {
        match self {
            RigidityCenter::Located(point) => Some(*point),
            RigidityCenter::Empty | RigidityCenter::Unstable => None,
        }
    }

    /// Return `true` when the center is defined.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.point().is_some()
    }
}

impl fmt::Display for RigidityCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RigidityCenter::Located(point) => write!(f, "({:.3}, {:.3})", point.x, point.y),
            RigidityCenter::Empty => f.write_str("N/A"),
            RigidityCenter::Unstable => f.write_str("unstable"),
        }
    }
}

/// Offset of the rigidity center from the mass center, in metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Eccentricity {
    /// `CRx - CMx`.
    pub ex: f64,
    /// `CRy - CMy`.
    pub ey: f64,
}

/// Result of aggregating element stiffness over a layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Analysis {
    /// Sum of stiffness contributions along the X axis.
    pub sum_kx: f64,
    /// Sum of stiffness contributions along the Y axis.
    pub sum_ky: f64,
    /// Rigidity center of the layout.
    pub rigidity_center: RigidityCenter,
    /// Eccentricity, present only when the rigidity center is defined.
    pub eccentricity: Option<Eccentricity>,
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            sum_kx: 0.0,
            sum_ky: 0.0,
            rigidity_center: RigidityCenter::Empty,
            eccentricity: None,
        }
    }
}

/// Compute the rigidity center of `elements` and its eccentricity relative to
/// `mass_center`.
///
/// The X coordinate of the center is weighted by stiffness along Y and the Y
/// coordinate by stiffness along X.
///
/// # Examples
/// ```
/// use rigidx::{analyze, point, Element, Orientation, RigidityCenter};
///
/// let elements = [
///     Element::wall(point(-2.0, 0.0), 3.0, 0.2, Orientation::Vertical).expect("valid wall"),
///     Element::wall(point(2.0, 0.0), 3.0, 0.2, Orientation::Vertical).expect("valid wall"),
/// ];
/// let analysis = analyze(&elements, point(1.0, 0.0));
/// assert_eq!(analysis.rigidity_center, RigidityCenter::Located(point(0.0, 0.0)));
/// assert_eq!(analysis.eccentricity.map(|e| e.ex), Some(-1.0));
/// ```
pub fn analyze<'a, I>(elements: I, mass_center: Point) -> Analysis
where
    I: IntoIterator<Item = &'a Element>,
{
    let mut count = 0_usize;
    let (mut sum_kx, mut sum_ky) = (0.0, 0.0);
    let (mut moment_x, mut moment_y) = (0.0, 0.0);
    for element in elements {
        let (kx, ky) = (element.rigidity_x(), element.rigidity_y());
        let position = element.position();
        sum_kx += kx;
        sum_ky += ky;
        moment_x += ky * position.x;
        moment_y += kx * position.y;
        count += 1;
    }

    let center = Point::new(moment_x / sum_ky, moment_y / sum_kx);
    let rigidity_center = if count == 0 {
        RigidityCenter::Empty
    } else if sum_kx == 0.0 || sum_ky == 0.0 || !center.is_finite() {
        // Zero sums come from underflow, non-finite ones from overflow.
        RigidityCenter::Unstable
    } else {
        RigidityCenter::Located(center)
    };
    let eccentricity = rigidity_center.point().map(|center| Eccentricity {
        ex: center.x - mass_center.x,
        ey: center.y - mass_center.y,
    });
    log::debug!(
        "analysed {count} elements: sum_kx = {sum_kx:.6e}, sum_ky = {sum_ky:.6e}, center = {rigidity_center}"
    );

    Analysis {
        sum_kx,
        sum_ky,
        rigidity_center,
        eccentricity,
    }
}
