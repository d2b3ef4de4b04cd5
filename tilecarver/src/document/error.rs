//! Errors raised while parsing a map description.

use std::path::PathBuf;

use thiserror::Error;

/// A map description that is structurally invalid or missing required
/// attributes.
///
/// Raised before any processing starts; a document that fails here never
/// reaches the registry or the planner.
#[derive(Debug, Error)]
pub enum MalformedMapError {
    /// The map file could not be read.
    #[error("failed to read map file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The markup itself could not be parsed into a tree.
    #[error("map markup is not well-formed: {0}")]
    Markup(String),

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// An attribute is present but not a valid non-negative integer.
    #[error("<{element}> attribute `{attribute}` is not a valid number: `{value}`")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    /// A dimension attribute parsed to zero.
    #[error("<{element}> attribute `{attribute}` must be positive")]
    NonPositiveAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// The document has no element of the given name.
    #[error("map has no <{0}> element")]
    MissingElement(&'static str),

    /// More than one layer element was found.
    #[error("only single-layer maps are supported, found {0} layers")]
    MultipleLayers(usize),

    /// The layer's cell count disagrees with the map dimensions.
    #[error(
        "layer holds {actual} cells but map dimensions {width}x{height} require {expected}"
    )]
    CellCountMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_missing_attribute() {
        let err = MalformedMapError::MissingAttribute {
            element: "map",
            attribute: "width",
        };
        assert_eq!(err.to_string(), "<map> is missing required attribute `width`");
    }

    #[test]
    fn test_display_cell_count_mismatch() {
        let err = MalformedMapError::CellCountMismatch {
            width: 3,
            height: 2,
            expected: 6,
            actual: 5,
        };
        assert!(err.to_string().contains("5 cells"));
        assert!(err.to_string().contains("3x2"));
        assert!(err.to_string().contains("require 6"));
    }
}
