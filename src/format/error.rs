//! Error types for annotation document parsing.

use thiserror::Error;

/// Errors that make an annotation document unusable.
///
/// Any of these aborts the conversion; no partial output is produced.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error while reading the document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML syntax error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Invalid document structure or content
    #[error("Invalid format: {message}")]
    InvalidFormat {
        /// Description of the format error
        message: String,
    },

    /// Required element or attribute is missing
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: String,
    },

    /// Label color is not a `#RRGGBB` code
    #[error("Invalid color '{value}' for label '{label}'")]
    InvalidColor {
        /// The label whose color failed to decode
        label: String,
        /// The raw color text
        value: String,
    },

    /// Malformed points list
    #[error("Invalid coordinates: {message}")]
    InvalidCoordinates {
        /// Description of the coordinate error
        message: String,
    },

    /// The document has no image record
    #[error("Document contains no <image> element")]
    MissingImage,
}

impl FormatError {
    /// Create an invalid format error with a message.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid coordinates error.
    pub fn invalid_coordinates(message: impl Into<String>) -> Self {
        Self::InvalidCoordinates {
            message: message.into(),
        }
    }
}
