//! Error types for raster generation.

use thiserror::Error;

/// Errors that can occur while building or writing rasters.
#[derive(Error, Debug)]
pub enum RasterError {
    /// A vocabulary label cannot be resolved to an intensity, so the legend
    /// has no place to put it
    #[error("Legend label '{label}' is not numeric (policy '{policy}')")]
    NonNumericVocabularyLabel {
        /// The offending label name
        label: String,
        /// Id of the intensity policy that rejected it
        policy: &'static str,
    },

    /// The vocabulary is empty, so the legend would have no rows
    #[error("Cannot build a legend from an empty label vocabulary")]
    EmptyVocabulary,

    /// The image is too large to allocate a raster for
    #[error("Image {width}x{height} exceeds {max} pixels")]
    TooLarge {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// Largest supported pixel count
        max: u64,
    },

    /// Pixel buffer does not match the raster dimensions
    #[error("Raster buffer does not match {width}x{height}")]
    BufferSize {
        /// Expected width
        width: u32,
        /// Expected height
        height: u32,
    },

    /// Image encoding or file write error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
