#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod analysis;
pub mod codec;
mod config;
mod editor;
mod element;
mod errors;
mod geometry;
mod history;
mod model;
mod view;

pub use analysis::{analyze, Analysis, Eccentricity, RigidityCenter};
pub use config::{EditorConfig, ViewConfig};
pub use editor::{Editor, ElementSummary, Nudge};
pub use element::{Column, Element, ElementId, ElementKind, Orientation, Wall};
pub use errors::{DecodeError, EditError, ElementError, ParseIdError, SaveError};
pub use geometry::{point, BoundingBox, Displacement, Point};
pub use history::{UndoLog, DEFAULT_UNDO_CAPACITY};
pub use model::Model;
pub use view::{FitOutcome, ScreenPoint, View, ViewState, Viewport};
