//! Data models for annotation documents.

mod annotation;
mod image;
mod label;

pub use annotation::{Annotation, MIN_POLYGON_VERTICES, Point};
pub use image::{ImageDescriptor, MAX_IMAGE_PIXELS};
pub use label::{LabelDefinition, LabelVocabulary};
