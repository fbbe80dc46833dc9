//! cvat_segmap - CVAT annotations to segmentation maps
//!
//! Converts polyline and polygon annotations from a CVAT XML export into a
//! grayscale segmentation map, where each pixel holds its class label, plus a
//! legend image listing every label's intensity.

pub mod cli;
pub mod color_utils;
pub mod convert;
pub mod format;
pub mod model;
pub mod raster;

pub use convert::{ConversionSummary, ConvertError, ConvertOptions, Converter};
pub use format::{CvatDocument, FormatError};
pub use model::{Annotation, ImageDescriptor, LabelVocabulary, Point};
pub use raster::{IntensityPolicy, LegendStyle, NumericLabels, RasterError, Rasterizer};
