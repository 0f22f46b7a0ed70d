//! Interactive editing session.
//!
//! [`Editor`] owns everything a drawing front end needs between two user
//! inputs: the layout, its undo history, the view transform, the selection and
//! the latest analysis. Every command that changes the layout records an undo
//! snapshot first and recomputes the analysis afterwards.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::analysis::Analysis;
use crate::codec;
use crate::config::EditorConfig;
use crate::element::{Element, ElementId, ElementKind, Orientation};
use crate::errors::{DecodeError, EditError, SaveError};
use crate::geometry::{Displacement, Point};
use crate::history::UndoLog;
use crate::model::Model;
use crate::view::{FitOutcome, ScreenPoint, View, ViewState, Viewport};

/// Arrow-key direction for nudging the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nudge {
    /// Towards positive Y.
    Up,
    /// Towards negative Y.
    Down,
    /// Towards negative X.
    Left,
    /// Towards positive X.
    Right,
}

impl Nudge {
    /// Displacement of one nudge of `step` metres.
    fn offset(self, step: f64) -> Displacement {
        match self {
            Nudge::Up => Displacement::new(0.0, step),
            Nudge::Down => Displacement::new(0.0, -step),
            Nudge::Left => Displacement::new(-step, 0.0),
            Nudge::Right => Displacement::new(step, 0.0),
        }
    }
}

/// Element being dragged with the pointer.
#[derive(Clone, Copy, Debug)]
struct Drag {
    /// Dragged element.
    id: ElementId,
    /// Model point under the pointer at the previous drag step.
    last: Point,
}

/// Inspector summary of a single element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementSummary {
    /// Identifier of the element.
    pub id: ElementId,
    /// Reference point.
    pub position: Point,
    /// Width and height for columns, length and thickness for walls.
    pub dimensions: (f64, f64),
    /// Orientation for walls.
    pub orientation: Option<Orientation>,
    /// Stiffness contributions along X and Y.
    pub rigidity: (f64, f64),
}

impl ElementSummary {
    /// Summarise `element`.
    #[must_use]
    pub fn new(id: ElementId, element: &Element) -> Self {
        let (dimensions, orientation) = match element {
            Element::Column(column) => ((column.width(), column.height()), None),
            Element::Wall(wall) => (
                (wall.length(), wall.thickness()),
                Some(wall.orientation()),
            ),
        };
        Self {
            id,
            position: element.position(),
            dimensions,
            orientation,
            rigidity: (element.rigidity_x(), element.rigidity_y()),
        }
    }
}

impl fmt::Display for ElementSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<6} at ({:.3}, {:.3})",
            self.id, self.id.kind, self.position.x, self.position.y
        )?;
        let (first, second) = self.dimensions;
        match self.orientation {
            None => write!(f, "  width {first:.3}, height {second:.3}"),
            Some(orientation) => write!(
                f,
                "  length {first:.3}, thickness {second:.3}, orientation {orientation}"
            ),
        }
    }
}

/// State of an interactive editing session.
///
/// # Examples
/// ```
/// use rigidx::{point, Editor, RigidityCenter};
///
/// let mut editor = Editor::default();
/// let id = editor.add_column(point(1.0, 2.0), 0.3, 0.3).expect("valid column");
/// assert!(editor.analysis().rigidity_center.is_defined());
///
/// editor.delete_element(id).expect("known element");
/// assert_eq!(editor.analysis().rigidity_center, RigidityCenter::Empty);
///
/// assert!(editor.undo());
/// assert_eq!(editor.model().element_count(), 1);
/// ```
#[derive(Debug)]
pub struct Editor {
    /// Session parameters.
    config: EditorConfig,
    /// Current layout.
    model: Model,
    /// Snapshots taken before each mutation.
    history: UndoLog<Model>,
    /// Model-to-screen transform.
    view: View,
    /// Currently selected element.
    selection: Option<ElementId>,
    /// Active pointer drag.
    drag: Option<Drag>,
    /// File the layout was last loaded from or saved to.
    path: Option<PathBuf>,
    /// Analysis of the current layout.
    analysis: Analysis,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default(), Viewport::default())
    }
}

impl Editor {
    /// Start a session with an empty layout.
    #[must_use]
    pub fn new(config: EditorConfig, viewport: Viewport) -> Self {
        Self {
            config,
            model: Model::new(),
            history: UndoLog::with_capacity(config.undo_capacity),
            view: View::new(config.view, viewport),
            selection: None,
            drag: None,
            path: None,
            analysis: Analysis::default(),
        }
    }

    /// Current layout.
    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Analysis of the current layout.
    #[must_use]
    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    /// Model-to-screen transform.
    #[must_use]
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Currently selected element.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// Number of mutations that can be undone.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// File the layout is associated with.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Window title naming the current document.
    #[must_use]
    pub fn title(&self) -> String {
        match self.path.as_deref().and_then(Path::file_name) {
            Some(name) => format!("Rigidity Center - {}", name.to_string_lossy()),
            None => "Rigidity Center - [Untitled]".to_owned(),
        }
    }

    /// Recompute the rigidity center and eccentricity.
    pub fn recompute(&mut self) -> &Analysis {
        self.analysis = self.model.analyze();
        &self.analysis
    }

    /// Record the current layout so the next mutation can be undone.
    fn checkpoint(&mut self) {
        self.history.push(self.model.clone());
    }

    /// Add a validated element and select it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IdentifiersExhausted`] when no identifier is left for
    /// the element's kind; the layout and its history are left untouched.
    pub fn add_element(&mut self, element: Element) -> Result<ElementId, EditError> {
        let snapshot = self.model.clone();
        let id = self.model.add(element)?;
        self.history.push(snapshot);
        self.selection = Some(id);
        self.recompute();
        Ok(id)
    }

    /// Add a column and select it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidElement`] when the attributes are invalid; the
    /// layout and its history are left untouched.
    pub fn add_column(
        &mut self,
        position: Point,
        width: f64,
        height: f64,
    ) -> Result<ElementId, EditError> {
        let element = Element::column(position, width, height)?;
        self.add_element(element)
    }

    /// Add a wall and select it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidElement`] when the attributes are invalid; the
    /// layout and its history are left untouched.
    pub fn add_wall(
        &mut self,
        position: Point,
        length: f64,
        thickness: f64,
        orientation: Orientation,
    ) -> Result<ElementId, EditError> {
        let element = Element::wall(position, length, thickness, orientation)?;
        self.add_element(element)
    }

    /// Replace the attributes of an element.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownElement`] or [`EditError::KindMismatch`] without
    /// touching the layout or its history.
    pub fn edit_element(&mut self, id: ElementId, element: Element) -> Result<(), EditError> {
        self.model.check_replacement(id, &element)?;
        self.checkpoint();
        self.model.replace(id, element)?;
        self.recompute();
        Ok(())
    }

    /// Add a copy of an element with edited attributes and select it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownElement`] when `source` does not exist and
    /// [`EditError::KindMismatch`] when `element` is of a different kind.
    pub fn duplicate_element(
        &mut self,
        source: ElementId,
        element: Element,
    ) -> Result<ElementId, EditError> {
        self.model.check_replacement(source, &element)?;
        self.add_element(element)
    }

    /// Remove an element.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownElement`] when `id` does not exist.
    pub fn delete_element(&mut self, id: ElementId) -> Result<Element, EditError> {
        if !self.model.contains(id) {
            return Err(EditError::UnknownElement(id));
        }
        self.checkpoint();
        let element = self.model.remove(id)?;
        if self.selection == Some(id) {
            self.selection = None;
        }
        if self.drag.is_some_and(|drag| drag.id == id) {
            self.drag = None;
        }
        self.recompute();
        Ok(element)
    }

    /// Translate an element by a precise offset.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownElement`] when `id` does not exist.
    pub fn move_element(&mut self, id: ElementId, offset: Displacement) -> Result<(), EditError> {
        if !self.model.contains(id) {
            return Err(EditError::UnknownElement(id));
        }
        self.checkpoint();
        self.model.move_element(id, offset)?;
        self.recompute();
        Ok(())
    }

    /// Move the selection one nudge step. Returns `false` when nothing is selected.
    pub fn nudge_selected(&mut self, direction: Nudge) -> bool {
        let Some(id) = self.selection else {
            return false;
        };
        self.move_element(id, direction.offset(self.config.nudge_step))
            .is_ok()
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
        self.checkpoint();
        self.model.set_mass_center(center)?;
        self.recompute();
        Ok(())
    }

    /// Revert the most recent mutation. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.model = snapshot;
        self.selection = None;
        self.drag = None;
        self.recompute();
        log::debug!("undo, {} steps left", self.history.len());
        true
    }

    /// Topmost element under a model point.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<ElementId> {
        self.model.hit_test(point)
    }

    /// Select the topmost element under a screen point, clearing the selection
    /// when there is none.
    pub fn select_at(&mut self, screen: ScreenPoint) -> Option<ElementId> {
        self.selection = self.hit_test(self.view.view_to_model(screen));
        self.selection
    }

    /// Select an element by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownElement`] when `id` does not exist.
    pub fn select(&mut self, id: ElementId) -> Result<(), EditError> {
        if !self.model.contains(id) {
            return Err(EditError::UnknownElement(id));
        }
        self.selection = Some(id);
        Ok(())
    }

    /// Inspector summary of an element.
    #[must_use]
    pub fn inspect(&self, id: ElementId) -> Option<ElementSummary> {
        self.model
            .get(id)
            .map(|element| ElementSummary::new(id, element))
    }

    /// Start dragging the element under `screen`.
    ///
    /// Selects the element and records a single undo snapshot for the whole
    /// gesture. Returns `None` and clears the selection when nothing is hit.
    pub fn begin_drag(&mut self, screen: ScreenPoint) -> Option<ElementId> {
        let start = self.view.view_to_model(screen);
        let id = self.select_at(screen)?;
        self.checkpoint();
        self.drag = Some(Drag { id, last: start });
        Some(id)
    }

    /// Move the dragged element so it follows the pointer. Returns `false` when
    /// no drag is active.
    pub fn drag_to(&mut self, screen: ScreenPoint) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let current = self.view.view_to_model(screen);
        let offset = Displacement::between(drag.last, current);
        if self.model.move_element(drag.id, offset).is_err() {
            self.drag = None;
            return false;
        }
        self.drag = Some(Drag {
            last: current,
            ..drag
        });
        self.recompute();
        true
    }

    /// Finish the active drag.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Zoom around `cursor`; see [`View::zoom_at`].
    pub fn zoom_at(&mut self, factor: f64, cursor: ScreenPoint) -> bool {
        self.view.zoom_at(factor, cursor)
    }

    /// Zoom in one wheel step around `cursor`.
    pub fn zoom_in(&mut self, cursor: ScreenPoint) -> bool {
        self.view.zoom_in(cursor)
    }

    /// Zoom out one wheel step around `cursor`.
    pub fn zoom_out(&mut self, cursor: ScreenPoint) -> bool {
        self.view.zoom_out(cursor)
    }

    /// Shift the view by a number of pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.view.pan_by(dx, dy);
    }

    /// Change the drawing surface size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.view.resize(viewport);
    }

    /// Frame the whole layout in the viewport.
    pub fn fit_to_view(&mut self) -> (FitOutcome, ViewState) {
        let outcome = self.view.fit(self.model.bounding_box());
        (outcome, self.view.state())
    }

    /// Start a new, empty layout. Identifier counters restart and the undo
    /// history is dropped.
    pub fn clear(&mut self) {
        self.model = Model::new();
        self.history.clear();
        self.selection = None;
        self.drag = None;
        self.path = None;
        self.recompute();
    }

    /// Replace the session's layout with the document at `path` and frame it.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the document cannot be read or decoded; the
    /// current layout, history and view are left untouched.
    pub fn load(&mut self, path: &Path) -> Result<(), DecodeError> {
        let model = codec::load(path)?;
        self.model = model;
        self.history.clear();
        self.selection = None;
        self.drag = None;
        self.path = Some(path.to_path_buf());
        self.recompute();
        self.fit_to_view();
        Ok(())
    }

    /// Write the layout to `path` and associate the session with it.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError`] when the document cannot be written.
    pub fn save(&mut self, path: &Path) -> Result<(), SaveError> {
        codec::save(&self.model, path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Write the layout back to the file it is associated with.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Untitled`] when the layout has never been loaded or
    /// saved, and the errors of [`Editor::save`] otherwise.
    pub fn save_current(&mut self) -> Result<(), SaveError> {
        let path = self.path.clone().ok_or(SaveError::Untitled)?;
        self.save(&path)
    }

    /// Number of elements of `kind` in the layout.
    #[must_use]
    pub fn count(&self, kind: ElementKind) -> usize {
        self.model
            .elements()
            .filter(|(id, _)| id.kind == kind)
            .count()
    }
}
