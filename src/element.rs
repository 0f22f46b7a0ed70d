//! Structural elements and their stiffness contributions.
//!
//! Stiffness is expressed through the section moment term `b·d³` without the
//! `E/12` factor; the factor cancels when contributions are aggregated into a
//! rigidity center, so only relative values matter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ElementError, ParseIdError};
use crate::geometry::{BoundingBox, Displacement, Point};

/// Variant tag of a structural element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    /// Rectangular column.
    Column,
    /// Straight wall segment.
    Wall,
}

impl ElementKind {
    /// Single-letter prefix used in element labels.
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            ElementKind::Column => 'C',
            ElementKind::Wall => 'W',
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Column => f.pad("column"),
            ElementKind::Wall => f.pad("wall"),
        }
    }
}

/// Identifier of an element within a layout.
///
/// Numbers are scoped per kind, so `C1` and `W1` can coexist.
///
/// # Examples
/// ```
/// use rigidx::{ElementId, ElementKind};
///
/// let id: ElementId = "W2".parse().expect("valid label");
/// assert_eq!(id, ElementId::new(ElementKind::Wall, 2));
/// assert_eq!(id.to_string(), "W2");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    /// Kind of the identified element.
    pub kind: ElementKind,
    /// Sequence number within the kind, starting at one.
    pub number: u32,
}

impl ElementId {
    /// Create an identifier.
    #[must_use]
    pub const fn new(kind: ElementKind, number: u32) -> Self {
        Self { kind, number }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.number)
    }
}

impl FromStr for ElementId {
    type Err = ParseIdError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let mut chars = label.trim().chars();
        let kind = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => ElementKind::Column,
            Some('W') => ElementKind::Wall,
            _ => return Err(ParseIdError::UnknownPrefix(label.to_owned())),
        };
        let number = chars
            .as_str()
            .parse::<u32>()
            .map_err(|_| ParseIdError::InvalidNumber(label.to_owned()))?;
        Ok(Self::new(kind, number))
    }
}

/// Direction along which a wall's length runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Length runs along the Y axis.
    #[serde(rename = "V")]
    Vertical,
    /// Length runs along the X axis.
    #[serde(rename = "H")]
    Horizontal,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical => f.write_str("V"),
            Orientation::Horizontal => f.write_str("H"),
        }
    }
}

impl FromStr for Orientation {
    type Err = ParseIdError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim() {
            "V" | "v" => Ok(Orientation::Vertical),
            "H" | "h" => Ok(Orientation::Horizontal),
            other => Err(ParseIdError::UnknownOrientation(other.to_owned())),
        }
    }
}

/// Check that a dimension is a positive finite number.
fn positive(name: &'static str, value: f64) -> Result<f64, ElementError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ElementError::InvalidDimension { name, value })
    }
}

/// Check that a reference point is finite.
fn finite(position: Point) -> Result<Point, ElementError> {
    if position.is_finite() {
        Ok(position)
    } else {
        Err(ElementError::InvalidPosition {
            x: position.x,
            y: position.y,
        })
    }
}

/// Rectangular column centred on its reference point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Column {
    /// Centre of the section.
    position: Point,
    /// Extent along the X axis.
    width: f64,
    /// Extent along the Y axis.
    height: f64,
}

impl Column {
    /// Create a column.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::InvalidDimension`] when `width` or `height` is not a
    /// positive finite number and [`ElementError::InvalidPosition`] when `position`
    /// is not finite.
    pub fn new(position: Point, width: f64, height: f64) -> Result<Self, ElementError> {
        Ok(Self {
            position: finite(position)?,
            width: positive("width", width)?,
            height: positive("height", height)?,
        })
    }

    /// Extent along the X axis in metres.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Extent along the Y axis in metres.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Wall segment centred on its reference point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    /// Midpoint of the wall.
    position: Point,
    /// Extent along the orientation axis.
    length: f64,
    /// Extent across the orientation axis.
    thickness: f64,
    /// Axis the length runs along.
    orientation: Orientation,
}

impl Wall {
    /// Create a wall.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::InvalidDimension`] when `length` or `thickness` is not
    /// a positive finite number and [`ElementError::InvalidPosition`] when `position`
    /// is not finite.
    pub fn new(
        position: Point,
        length: f64,
        thickness: f64,
        orientation: Orientation,
    ) -> Result<Self, ElementError> {
        Ok(Self {
            position: finite(position)?,
            length: positive("length", length)?,
            thickness: positive("thickness", thickness)?,
            orientation,
        })
    }

    /// Length in metres.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Thickness in metres.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Axis the length runs along.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

/// A structural element resisting lateral load.
///
/// # Examples
/// ```
/// use rigidx::{point, Element};
///
/// let column = Element::column(point(0.0, 0.0), 0.3, 0.5).expect("valid column");
/// assert!((column.rigidity_x() - 0.5 * 0.3_f64.powi(3)).abs() < 1.0e-12);
/// assert!((column.rigidity_y() - 0.3 * 0.5_f64.powi(3)).abs() < 1.0e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Element {
    /// A rectangular column.
    Column(Column),
    /// A wall segment.
    Wall(Wall),
}

impl Element {
    /// Create a column element.
    ///
    /// # Errors
    ///
    /// See [`Column::new`].
    pub fn column(position: Point, width: f64, height: f64) -> Result<Self, ElementError> {
        Column::new(position, width, height).map(Element::Column)
    }

    /// Create a wall element.
    ///
    /// # Errors
    ///
    /// See [`Wall::new`].
    pub fn wall(
        position: Point,
        length: f64,
        thickness: f64,
        orientation: Orientation,
    ) -> Result<Self, ElementError> {
        Wall::new(position, length, thickness, orientation).map(Element::Wall)
    }

    /// Kind of the element.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Column(_) => ElementKind::Column,
            Element::Wall(_) => ElementKind::Wall,
        }
    }

    /// Reference point of the element.
    #[must_use]
    pub fn position(&self) -> Point {
        match self {
            Element::Column(column) => column.position,
            Element::Wall(wall) => wall.position,
        }
    }

    /// Stiffness contribution against displacement along the global X axis.
    #[must_use]
    pub fn rigidity_x(&self) -> f64 {
        match self {
            Element::Column(column) => column.height * column.width.powi(3),
            Element::Wall(wall) => match wall.orientation {
                Orientation::Horizontal => wall.thickness * wall.length.powi(3),
                Orientation::Vertical => wall.length * wall.thickness.powi(3),
            },
        }
    }

    /// Stiffness contribution against displacement along the global Y axis.
    #[must_use]
    pub fn rigidity_y(&self) -> f64 {
        match self {
            Element::Column(column) => column.width * column.height.powi(3),
            Element::Wall(wall) => match wall.orientation {
                Orientation::Vertical => wall.thickness * wall.length.powi(3),
                Orientation::Horizontal => wall.length * wall.thickness.powi(3),
            },
        }
    }

    /// Footprint of the element in model space.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Element::Column(column) => {
                BoundingBox::centered(column.position, column.width, column.height)
            }
            Element::Wall(wall) => match wall.orientation {
                Orientation::Vertical => {
                    BoundingBox::centered(wall.position, wall.thickness, wall.length)
                }
                Orientation::Horizontal => {
                    BoundingBox::centered(wall.position, wall.length, wall.thickness)
                }
            },
        }
    }

    /// Return `true` when the model point lies on the element's footprint.
    #[must_use]
    pub fn is_hit(&self, point: Point) -> bool {
        self.bounding_box().contains(point)
    }

    /// Translate the element.
    pub fn move_by(&mut self, offset: Displacement) {
        match self {
            Element::Column(column) => column.position = column.position.translated(offset),
            Element::Wall(wall) => wall.position = wall.position.translated(offset),
        }
    }
}

impl From<Column> for Element {
    fn from(value: Column) -> Self {
        Element::Column(value)
    }
}

impl From<Wall> for Element {
    fn from(value: Wall) -> Self {
        Element::Wall(value)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::point;

    #[test]
    fn column_stiffness_follows_section_formula() {
        for (width, height) in [(0.3, 0.3), (0.25, 0.6), (1.2, 0.4)] {
            let column = Element::column(point(1.0, 2.0), width, height).expect("valid column");
            assert_relative_eq!(column.rigidity_x(), height * width.powi(3));
            assert_relative_eq!(column.rigidity_y(), width * height.powi(3));
        }
    }

    #[test]
    fn wall_stiffness_depends_on_orientation() {
        let (length, thickness) = (3.0, 0.2);
        let vertical = Element::wall(point(0.0, 0.0), length, thickness, Orientation::Vertical)
            .expect("valid wall");
        assert_relative_eq!(vertical.rigidity_y(), thickness * length.powi(3));
        assert_relative_eq!(vertical.rigidity_x(), length * thickness.powi(3));

        let horizontal =
            Element::wall(point(0.0, 0.0), length, thickness, Orientation::Horizontal)
                .expect("valid wall");
        assert_relative_eq!(horizontal.rigidity_x(), vertical.rigidity_y());
        assert_relative_eq!(horizontal.rigidity_y(), vertical.rigidity_x());
    }

    #[test]
    fn bounding_boxes_follow_orientation() {
        let column = Element::column(point(1.0, 1.0), 0.5, 0.25).expect("valid column");
        assert_eq!(
            column.bounding_box(),
            BoundingBox::new(0.75, 0.875, 1.25, 1.125)
        );

        let vertical = Element::wall(point(0.0, 0.0), 2.0, 0.2, Orientation::Vertical)
            .expect("valid wall");
        assert_eq!(vertical.bounding_box(), BoundingBox::new(-0.1, -1.0, 0.1, 1.0));

        let horizontal = Element::wall(point(0.0, 0.0), 2.0, 0.2, Orientation::Horizontal)
            .expect("valid wall");
        assert_eq!(
            horizontal.bounding_box(),
            BoundingBox::new(-1.0, -0.1, 1.0, 0.1)
        );
    }

    #[test]
    fn hit_test_includes_boundary() {
        let wall = Element::wall(point(0.0, 0.0), 2.0, 0.5, Orientation::Horizontal)
            .expect("valid wall");
        assert!(wall.is_hit(point(1.0, 0.25)));
        assert!(wall.is_hit(point(-1.0, -0.25)));
        assert!(!wall.is_hit(point(1.01, 0.0)));
        assert!(!wall.is_hit(point(0.0, 0.3)));
    }

    #[test]
    fn move_translates_reference_point() {
        let mut column = Element::column(point(0.0, 0.0), 0.3, 0.3).expect("valid column");
        column.move_by(Displacement::new(1.5, -0.5));
        assert_eq!(column.position(), point(1.5, -0.5));
        assert!(column.is_hit(point(1.5, -0.5)));
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        let error = Element::column(point(0.0, 0.0), 0.0, 0.3).expect_err("zero width");
        assert_eq!(
            error,
            ElementError::InvalidDimension {
                name: "width",
                value: 0.0
            }
        );

        let error = Element::wall(point(0.0, 0.0), 3.0, -0.2, Orientation::Vertical)
            .expect_err("negative thickness");
        assert!(matches!(
            error,
            ElementError::InvalidDimension {
                name: "thickness",
                ..
            }
        ));

        let error = Element::column(point(0.0, 0.0), 0.3, f64::NAN).expect_err("NaN height");
        assert!(matches!(
            error,
            ElementError::InvalidDimension { name: "height", .. }
        ));

        let error = Element::column(point(f64::INFINITY, 0.0), 0.3, 0.3)
            .expect_err("infinite position");
        assert!(matches!(error, ElementError::InvalidPosition { .. }));
    }

    #[test]
    fn labels_parse_and_display() {
        let column: ElementId = "c12".parse().expect("lower-case prefix accepted");
        assert_eq!(column, ElementId::new(ElementKind::Column, 12));
        assert_eq!(column.to_string(), "C12");

        assert!(matches!(
            "X1".parse::<ElementId>(),
            Err(ParseIdError::UnknownPrefix(_))
        ));
        assert!(matches!(
            "W".parse::<ElementId>(),
            Err(ParseIdError::InvalidNumber(_))
        ));
    }

    #[test]
    fn orientation_tokens_round_trip() {
        for orientation in [Orientation::Vertical, Orientation::Horizontal] {
            let token = orientation.to_string();
            assert_eq!(token.parse::<Orientation>(), Ok(orientation));
        }
        assert!("D".parse::<Orientation>().is_err());
    }
}
