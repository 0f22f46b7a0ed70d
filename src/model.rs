//! Layout model: the ordered element collection and the mass center.

use crate::analysis::{analyze, Analysis};
use crate::element::{Element, ElementId, ElementKind};
use crate::errors::EditError;
use crate::geometry::{BoundingBox, Displacement, Point};

/// Per-kind identifier counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Counters {
    /// Last number handed out to a column.
    columns: u32,
    /// Last number handed out to a wall.
    walls: u32,
}

impl Counters {
    /// Hand out the next identifier for `kind`, `None` once the numbers run out.
    fn next(&mut self, kind: ElementKind) -> Option<ElementId> {
        let counter = match kind {
            ElementKind::Column => &mut self.columns,
            ElementKind::Wall => &mut self.walls,
        };
        *counter = counter.checked_add(1)?;
        Some(ElementId::new(kind, *counter))
    }
}

/// Container for a plan layout of columns and walls.
///
/// Elements keep their creation order, which is also their drawing order; hit
/// tests favour the most recently created element. Identifiers are never reused
/// within a model, even after deletion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    /// Elements in creation order.
    elements: Vec<(ElementId, Element)>,
    /// User supplied center of mass in metres.
    mass_center: Point,
    /// Identifier counters, part of every snapshot.
    counters: Counters,
}

impl Model {
    /// Create an empty layout with the mass center at the origin.
    ///
    /// # Examples
    /// ```
    /// use rigidx::Model;
    ///
    /// let model = Model::new();
    /// assert_eq!(model.element_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of elements in the layout.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Return `true` when the layout has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over the elements in creation order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> + '_ {
        self.elements.iter().map(|(id, element)| (*id, element))
    }

    /// Look up an element.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.position_of(id).map(|index| &self.elements[index].1)
    }

    /// Return `true` when `id` names an element of this layout.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.position_of(id).is_some()
    }

    /// Return the center of mass.
    #[must_use]
    pub fn mass_center(&self) -> Point {
        self.mass_center
    }

    /// Return the last identifier number handed out for `kind`, zero if none.
    #[must_use]
    pub fn last_number(&self, kind: ElementKind) -> u32 {
        match kind {
            ElementKind::Column => self.counters.columns,
            ElementKind::Wall => self.counters.walls,
        }
    }

    /// Add an element to the top of the layout.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IdentifiersExhausted`] when every number of the
    /// element's kind has been handed out; the layout is left untouched.
    ///
    /// # Examples
    /// ```
    /// use rigidx::{point, Element, Model, Orientation};
    ///
    /// let mut model = Model::new();
    /// let column = model
    ///     .add(Element::column(point(0.0, 0.0), 0.3, 0.3).expect("valid"))
    ///     .expect("identifier available");
    /// let wall = model
    ///     .add(Element::wall(point(4.0, 0.0), 3.0, 0.2, Orientation::Vertical).expect("valid"))
    ///     .expect("identifier available");
    /// assert_eq!(column.to_string(), "C1");
    /// assert_eq!(wall.to_string(), "W1");
    /// ```
    pub fn add(&mut self, element: Element) -> Result<ElementId, EditError> {
        let kind = element.kind();
        let id = self
            .counters
            .next(kind)
            .ok_or(EditError::IdentifiersExhausted(kind))?;
        self.elements.push((id, element));
        log::debug!("added {id} at ({:.3}, {:.3})", element.position().x, element.position().y);
        Ok(id)
    }

    /// Replace the attributes of an existing element, keeping its identifier and
    /// drawing order.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownElement`] when `id` is not part of this layout and
    /// [`EditError::KindMismatch`] when `element` is of a different kind.
    pub fn replace(&mut self, id: ElementId, element: Element) -> Result<(), EditError> {
        let index = self.replacement_index(id, &element)?;
        self.elements[index].1 = element;
        log::debug!("edited {id}");
        Ok(())
    }

    /// Validate that `element` may replace the element named `id` without
    /// changing anything.
    ///
    /// # Errors
    ///
    /// See [`Model::replace`].
    pub fn check_replacement(&self, id: ElementId, element: &Element) -> Result<(), EditError> {
        self.replacement_index(id, element).map(|_| ())
    }

    /// Locate the element named `id` and check that `element` has the same kind.
    fn replacement_index(&self, id: ElementId, element: &Element) -> Result<usize, EditError> {
        let index = self
            .position_of(id)
            .ok_or(EditError::UnknownElement(id))?;
        if element.kind() != id.kind {
            return Err(EditError::KindMismatch {
                id,
                found: id.kind,
                requested: element.kind(),
            });
        }
        Ok(index)
    }

    /// Remove an element from the layout and return it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownElement`] when `id` is not part of this layout.
    pub fn remove(&mut self, id: ElementId) -> Result<Element, EditError> {
        let index = self
            .position_of(id)
            .ok_or(EditError::UnknownElement(id))?;
        let (_, element) = self.elements.remove(index);
        log::debug!("removed {id}");
        Ok(element)
    }

    /// Translate an element.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownElement`] when `id` is not part of this layout.
    pub fn move_element(&mut self, id: ElementId, offset: Displacement) -> Result<(), EditError> {
        let index = self
            .position_of(id)
            .ok_or(EditError::UnknownElement(id))?;
        self.elements[index].1.move_by(offset);
        Ok(())
    }

    /// Update the center of mass.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidMassCenter`] when `center` is not finite.
    pub fn set_mass_center(&mut self, center: Point) -> Result<(), EditError> {
        if !center.is_finite() {
            return Err(EditError::InvalidMassCenter {
                x: center.x,
                y: center.y,
            });
        }
        self.mass_center = center;
        Ok(())
    }

    /// Return the topmost element whose footprint contains `point`.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|(_, element)| element.is_hit(point))
            .map(|(id, _)| *id)
    }

    /// Smallest box covering every element, or `None` for an empty layout.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.elements
            .iter()
            .map(|(_, element)| element.bounding_box())
            .reduce(|acc, next| acc.union(&next))
    }

    /// Compute the rigidity center and eccentricity of the layout.
    #[must_use]
    pub fn analyze(&self) -> Analysis {
        analyze(
            self.elements.iter().map(|(_, element)| element),
            self.mass_center,
        )
    }

    /// Locate an element in the collection.
    fn position_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|(candidate, _)| *candidate == id)
    }
}
