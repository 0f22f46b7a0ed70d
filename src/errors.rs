//! Error types produced while editing, analysing or persisting layouts.

use std::io;

use thiserror::Error;

use crate::element::{ElementId, ElementKind};

/// Error returned when an element cannot be constructed from the supplied values.
///
/// The variants describe the reason the supplied value is rejected so callers can
/// present actionable feedback to users.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ElementError {
    /// Returned when a width, height, length or thickness is zero, negative or not finite.
    #[error("{name} must be a positive number (received {value})")]
    InvalidDimension {
        /// Name of the rejected attribute.
        name: &'static str,
        /// Rejected value in metres.
        value: f64,
    },
    /// Returned when a reference point coordinate is not finite.
    #[error("position ({x}, {y}) is not a finite point")]
    InvalidPosition {
        /// Rejected X coordinate in metres.
        x: f64,
        /// Rejected Y coordinate in metres.
        y: f64,
    },
}

/// Error returned when an element label or orientation token cannot be parsed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseIdError {
    /// Returned when a label does not start with `C` or `W`.
    #[error("`{0}` is not an element label; expected C<n> or W<n>")]
    UnknownPrefix(String),
    /// Returned when the label's sequence number is missing or not a number.
    #[error("`{0}` does not carry a valid element number")]
    InvalidNumber(String),
    /// Returned when a wall orientation is neither `V` nor `H`.
    #[error("`{0}` is not a wall orientation; expected V or H")]
    UnknownOrientation(String),
}

/// Error returned when editing a [`Model`](crate::Model) or an
/// [`Editor`](crate::Editor) with invalid input.
///
/// # Examples
///
/// ```
/// use rigidx::{EditError, ElementId, ElementKind, Model};
///
/// let mut model = Model::new();
/// let missing = ElementId::new(ElementKind::Wall, 7);
/// let error = model.remove(missing).expect_err("unknown element is rejected");
/// assert_eq!(error, EditError::UnknownElement(missing));
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum EditError {
    /// Returned when an element cannot be found in the layout.
    #[error("element {0} does not exist in this layout")]
    UnknownElement(ElementId),
    /// Returned when the new attributes describe a different kind of element.
    #[error("element {id} is a {found} and cannot be edited as a {requested}")]
    KindMismatch {
        /// Identifier of the edited element.
        id: ElementId,
        /// Kind of the stored element.
        found: ElementKind,
        /// Kind described by the rejected attributes.
        requested: ElementKind,
    },
    /// Returned when the supplied attributes are invalid.
    #[error(transparent)]
    InvalidElement(#[from] ElementError),
    /// Returned when every identifier number of a kind has been handed out.
    #[error("no {0} identifiers are left in this layout")]
    IdentifiersExhausted(ElementKind),
    /// Returned when the mass center is not a finite point.
    #[error("mass center ({x}, {y}) is not a finite point")]
    InvalidMassCenter {
        /// Rejected X coordinate in metres.
        x: f64,
        /// Rejected Y coordinate in metres.
        y: f64,
    },
}

/// Error returned when a layout document cannot be read.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Returned when the document cannot be read from disk.
    #[error("unable to read layout document")]
    Io(#[from] io::Error),
    /// Returned when the document is not valid layout JSON.
    #[error("layout document is malformed")]
    Malformed(#[from] serde_json::Error),
    /// Returned when an element record carries invalid attributes.
    #[error("element record {index} is invalid")]
    InvalidElement {
        /// Position of the record within the `elements` list.
        index: usize,
        /// Reason the record was rejected.
        #[source]
        source: ElementError,
    },
}

/// Error returned when a layout document cannot be written.
///
/// Saves go through a temporary file that is renamed into place, so a failure
/// never leaves a truncated document behind.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Returned when the layout cannot be encoded.
    #[error("unable to encode layout document")]
    Encode(#[from] serde_json::Error),
    /// Returned when the target cannot be written.
    #[error("unable to write layout document")]
    Io(#[from] io::Error),
    /// Returned when saving in place but the layout has no file yet.
    #[error("layout has not been saved to a file yet")]
    Untitled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_error_names_the_attribute() {
        let error = ElementError::InvalidDimension {
            name: "width",
            value: 0.0,
        };
        assert_eq!(
            error.to_string(),
            "width must be a positive number (received 0)"
        );
    }

    #[test]
    fn edit_error_wraps_element_error_transparently() {
        let inner = ElementError::InvalidDimension {
            name: "thickness",
            value: -0.2,
        };
        let error = EditError::from(inner);
        assert_eq!(error.to_string(), inner.to_string());
    }

    #[test]
    fn unknown_element_uses_label() {
        let error = EditError::UnknownElement(ElementId::new(ElementKind::Column, 3));
        assert_eq!(error.to_string(), "element C3 does not exist in this layout");
    }
}
