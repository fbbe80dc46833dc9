//! Annotation document import.
//!
//! Parses annotation tool exports into the crate's data model. Parsing is
//! all-or-nothing: any [`FormatError`] means the document is unusable.
//!
//! ## Supported Formats
//!
//! - **CVAT for images XML**: label vocabulary, one image record, polyline
//!   and polygon annotations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cvat_segmap::format::CvatDocument;
//!
//! let doc = CvatDocument::from_path(Path::new("annotations.xml"))?;
//! println!("{} labels, {} annotations", doc.vocabulary.len(), doc.annotations.len());
//! ```

mod cvat;
mod error;

pub use cvat::{CvatDocument, parse_points};
pub use error::FormatError;
