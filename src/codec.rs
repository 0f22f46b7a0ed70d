//! JSON layout documents.
//!
//! ```text
//! {
//!     "center_of_mass": [cmx, cmy],
//!     "elements": [
//!         {"type": "column", "id": 1, "x": 0.0, "y": 0.0, "width": 0.3, "height": 0.3},
//!         {"type": "wall", "id": 1, "x": 4.0, "y": 0.0, "length": 3.0, "thickness": 0.2, "orientation": "V"}
//!     ]
//! }
//! ```
//!
//! Identifiers are written for readability but ignored on read; elements are
//! renumbered per kind in document order.

use std::fs;
use std::io::Write;
use std::path::Path;

use atomicwrites::{AtomicFile, OverwriteBehavior};
use serde::{Deserialize, Serialize};

use crate::element::{Element, Orientation};
use crate::errors::{DecodeError, ElementError, SaveError};
use crate::geometry::Point;
use crate::model::Model;

/// Element record as written to disk.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum SavedRecord {
    /// Column attributes.
    Column {
        /// Sequence number of the column.
        id: u32,
        /// X coordinate of the centre.
        x: f64,
        /// Y coordinate of the centre.
        y: f64,
        /// Extent along X.
        width: f64,
        /// Extent along Y.
        height: f64,
    },
    /// Wall attributes.
    Wall {
        /// Sequence number of the wall.
        id: u32,
        /// X coordinate of the midpoint.
        x: f64,
        /// Y coordinate of the midpoint.
        y: f64,
        /// Length along the orientation axis.
        length: f64,
        /// Thickness across the orientation axis.
        thickness: f64,
        /// Orientation token.
        orientation: Orientation,
    },
}

/// Layout document as written to disk.
#[derive(Serialize)]
struct SavedDocument {
    /// Mass center as `[x, y]`.
    center_of_mass: [f64; 2],
    /// Element records in creation order.
    elements: Vec<SavedRecord>,
}

/// Element record as read from disk. Unknown attributes, including `id`, are ignored.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum LoadedRecord {
    /// Column attributes.
    Column {
        /// X coordinate of the centre.
        x: f64,
        /// Y coordinate of the centre.
        y: f64,
        /// Extent along X.
        width: f64,
        /// Extent along Y.
        height: f64,
    },
    /// Wall attributes.
    Wall {
        /// X coordinate of the midpoint.
        x: f64,
        /// Y coordinate of the midpoint.
        y: f64,
        /// Length along the orientation axis.
        length: f64,
        /// Thickness across the orientation axis.
        thickness: f64,
        /// Orientation token.
        orientation: Orientation,
    },
}

/// Layout document as read from disk.
#[derive(Deserialize)]
struct LoadedDocument {
    /// Mass center as `[x, y]`, the origin when absent.
    #[serde(default)]
    center_of_mass: [f64; 2],
    /// Raw element records, none when absent. Each is decoded only once its
    /// `type` tag is known to be supported.
    #[serde(default)]
    elements: Vec<serde_json::Value>,
}

/// `type` tags understood by [`LoadedRecord`].
const SUPPORTED_TYPES: [&str; 2] = ["column", "wall"];

impl LoadedRecord {
    /// Decode a raw record, `None` when its `type` tag is missing, not a string
    /// or not a supported element kind.
    fn from_value(value: serde_json::Value) -> Option<Result<Self, serde_json::Error>> {
        let tag = value.get("type").and_then(serde_json::Value::as_str)?;
        if !SUPPORTED_TYPES.contains(&tag) {
            return None;
        }
        Some(serde_json::from_value(value))
    }

    /// Build the element described by the record.
    fn into_element(self) -> Result<Element, ElementError> {
        match self {
            LoadedRecord::Column {
                x,
                y,
                width,
                height,
            } => Element::column(Point::new(x, y), width, height),
            LoadedRecord::Wall {
                x,
                y,
                length,
                thickness,
                orientation,
            } => Element::wall(Point::new(x, y), length, thickness, orientation),
        }
    }
}

/// Encode a layout as a pretty-printed JSON document.
///
/// # Errors
///
/// Returns the underlying [`serde_json::Error`] when serialisation fails.
pub fn encode(model: &Model) -> Result<Vec<u8>, serde_json::Error> {
    let elements = model
        .elements()
        .map(|(id, element)| {
            let position = element.position();
            match element {
                Element::Column(column) => SavedRecord::Column {
                    id: id.number,
                    x: position.x,
                    y: position.y,
                    width: column.width(),
                    height: column.height(),
                },
                Element::Wall(wall) => SavedRecord::Wall {
                    id: id.number,
                    x: position.x,
                    y: position.y,
                    length: wall.length(),
                    thickness: wall.thickness(),
                    orientation: wall.orientation(),
                },
            }
        })
        .collect();
    let mass_center = model.mass_center();
    let document = SavedDocument {
        center_of_mass: [mass_center.x, mass_center.y],
        elements,
    };

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    document.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Decode a layout from a JSON document.
///
/// Records whose `type` tag is missing, not a string or not a known element
/// kind are skipped with a warning.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] when the document is not layout JSON and
/// [`DecodeError::InvalidElement`] when a record carries invalid attributes.
///
/// # Examples
/// ```
/// use rigidx::codec;
///
/// let document = br#"{
///     "center_of_mass": [2.0, 0.0],
///     "elements": [
///         {"type": "column", "id": 9, "x": 0.0, "y": 0.0, "width": 0.3, "height": 0.3},
///         {"type": "wall", "x": 4.0, "y": 0.0, "length": 3.0, "thickness": 0.2, "orientation": "V"}
///     ]
/// }"#;
/// let model = codec::decode(document).expect("valid document");
/// let labels: Vec<String> = model.elements().map(|(id, _)| id.to_string()).collect();
/// assert_eq!(labels, ["C1", "W1"]);
/// ```
pub fn decode(bytes: &[u8]) -> Result<Model, DecodeError> {
    let document: LoadedDocument = serde_json::from_slice(bytes)?;
    let mut model = Model::new();
    let [x, y] = document.center_of_mass;
    model
        .set_mass_center(Point::new(x, y))
        .map_err(|_| DecodeError::Malformed(serde::de::Error::custom("mass center is not finite")))?;
    for (index, value) in document.elements.into_iter().enumerate() {
        let Some(record) = LoadedRecord::from_value(value) else {
            log::warn!("skipping element record {index} with a missing or unsupported type");
            continue;
        };
        let element = record?
            .into_element()
            .map_err(|source| DecodeError::InvalidElement { index, source })?;
        model
            .add(element)
            .map_err(|err| DecodeError::Malformed(serde::de::Error::custom(err)))?;
    }
    Ok(model)
}

/// Write a layout document to `path`.
///
/// The document is written to a temporary file next to `path` and renamed into
/// place, so an existing document is either fully replaced or left untouched.
///
/// # Errors
///
/// Returns [`SaveError`] when the layout cannot be encoded or the file cannot be
/// written.
pub fn save(model: &Model, path: &Path) -> Result<(), SaveError> {
    let bytes = encode(model)?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    AtomicFile::new_with_tmpdir(path, OverwriteBehavior::AllowOverwrite, directory)
        .write(|file| {
            file.write_all(&bytes)?;
            file.flush()
        })
        .map_err(|err| match err {
            atomicwrites::Error::Internal(err) | atomicwrites::Error::User(err) => err,
        })?;
    log::info!(
        "saved {} elements to {}",
        model.element_count(),
        path.display()
    );
    Ok(())
}

/// Read a layout document from `path`.
///
/// # Errors
///
/// Returns [`DecodeError::Io`] when the file cannot be read and the errors of
/// [`decode`] otherwise.
pub fn load(path: &Path) -> Result<Model, DecodeError> {
    let bytes = fs::read(path)?;
    let model = decode(&bytes)?;
    log::info!(
        "loaded {} elements from {}",
        model.element_count(),
        path.display()
    );
    Ok(model)
}
