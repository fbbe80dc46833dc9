//! Raster generation from parsed annotations.
//!
//! Two independent outputs are produced:
//!
//! - **Label raster**: single-channel image where each annotation is filled
//!   with its label's intensity, later annotations painting over earlier ones
//! - **Legend**: RGB image listing every vocabulary label with a swatch of
//!   its intensity and a caption
//!
//! Both go through the same [`IntensityPolicy`], which decides how a label
//! name becomes a pixel value. The default, [`NumericLabels`], reads the name
//! as a base-10 integer. The vocabulary's declared colors are never used as
//! pixel values.

mod error;
mod fill;
mod font;
mod intensity;
mod legend;
mod segmentation;

pub use error::RasterError;
pub use fill::fill_polygon;
pub use intensity::{IntensityPolicy, LabelValue, NumericLabels};
pub use legend::{LegendRow, LegendStyle, legend_rows, render_legend};
pub use segmentation::{
    LabelRaster, RasterReport, Rasterizer, SegmentationMap, SkipReason, SkippedAnnotation,
};
