//! # Error Types
//!
//! Errors raised while reading marker artwork or compiled path output.

use thiserror::Error;

/// Result type alias for marker operations.
pub type MarkerResult<T> = Result<T, MarkerError>;

/// Errors that can occur while compiling a marker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    /// The document is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// An attribute value could not be interpreted.
    #[error("Invalid value '{value}' for attribute '{attribute}': {reason}")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
        reason: String,
    },

    /// The document contains no `<rect>` elements.
    #[error("Marker artwork contains no rectangles")]
    EmptyInput,

    /// Path data that is not a sequence of unit-cell subpaths.
    #[error("Malformed unit-cell path: {0}")]
    MalformedPath(String),
}

impl MarkerError {
    /// Creates an invalid attribute error.
    pub fn invalid_attribute(attribute: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            attribute,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an XML error from any displayable source.
    pub fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml(err.to_string())
    }
}
