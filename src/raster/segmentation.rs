//! Label raster generation.
//!
//! Every annotation is filled with the intensity its label resolves to,
//! in ascending [`Annotation::index`] order, so later annotations overwrite
//! earlier ones where they overlap. Annotations whose label cannot be
//! resolved are skipped and reported; they never abort the run.

use std::fmt;
use std::path::Path;

use image::GrayImage;
use ndarray::Array2;

use super::error::RasterError;
use super::fill::fill_polygon;
use super::intensity::{IntensityPolicy, NumericLabels};
use crate::model::{Annotation, ImageDescriptor, LabelVocabulary, MAX_IMAGE_PIXELS};

/// Single-channel label raster, indexed `[[row, column]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRaster {
    pixels: Array2<u8>,
}

impl LabelRaster {
    /// Create an all-background raster for the image.
    pub fn new(image: &ImageDescriptor) -> Result<Self, RasterError> {
        if image.pixel_count() > MAX_IMAGE_PIXELS {
            return Err(RasterError::TooLarge {
                width: image.width,
                height: image.height,
                max: MAX_IMAGE_PIXELS,
            });
        }
        Ok(Self {
            pixels: Array2::zeros(image.shape()),
        })
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.ncols() as u32
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.nrows() as u32
    }

    /// Intensity at `(x, y)`, or `None` outside the raster.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        self.pixels.get([y as usize, x as usize]).copied()
    }

    /// Underlying pixel grid.
    pub fn pixels(&self) -> &Array2<u8> {
        &self.pixels
    }

    /// Number of pixels holding `value`.
    pub fn count(&self, value: u8) -> usize {
        self.pixels.iter().filter(|&&v| v == value).count()
    }

    /// Fill a closed polygon given in integer pixel coordinates.
    pub fn fill_polygon(&mut self, vertices: &[(i64, i64)], value: u8) {
        fill_polygon(&mut self.pixels, vertices, value);
    }

    /// Convert to an 8-bit grayscale image.
    pub fn to_image(&self) -> Result<GrayImage, RasterError> {
        let (width, height) = (self.width(), self.height());
        GrayImage::from_raw(width, height, self.pixels.iter().copied().collect())
            .ok_or(RasterError::BufferSize { width, height })
    }

    /// Write the raster as a grayscale image; the format follows the extension.
    pub fn save(&self, path: &Path) -> Result<(), RasterError> {
        self.to_image()?.save(path)?;
        Ok(())
    }
}

/// Why an annotation did not contribute to the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The intensity policy could not resolve the label.
    UnresolvedLabel {
        /// Id of the policy that rejected the label
        policy: &'static str,
    },
}

/// An annotation left out of the raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAnnotation {
    /// Document position of the annotation.
    pub index: usize,
    /// Its label text.
    pub label: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

impl fmt::Display for SkippedAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            SkipReason::UnresolvedLabel { policy } => write!(
                f,
                "annotation #{}: could not convert label '{}' to an intensity ({} policy)",
                self.index, self.label, policy
            ),
        }
    }
}

/// Outcome of rasterizing a set of annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RasterReport {
    /// Annotations that were filled into the raster.
    pub painted: usize,
    /// Annotations that were skipped, in paint order.
    pub skipped: Vec<SkippedAnnotation>,
}

impl RasterReport {
    /// Whether any annotation was skipped.
    pub fn has_skips(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// A finished label raster together with what went into it.
#[derive(Debug, Clone)]
pub struct SegmentationMap {
    /// The label raster.
    pub raster: LabelRaster,
    /// Painted and skipped annotation counts.
    pub report: RasterReport,
}

/// Paints annotations into label rasters.
pub struct Rasterizer {
    policy: Box<dyn IntensityPolicy>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(Box::new(NumericLabels))
    }
}

impl Rasterizer {
    /// Create a rasterizer with the given intensity policy.
    pub fn new(policy: Box<dyn IntensityPolicy>) -> Self {
        Self { policy }
    }

    /// The intensity policy in use.
    pub fn policy(&self) -> &dyn IntensityPolicy {
        self.policy.as_ref()
    }

    /// Paint `annotations` into a fresh raster sized for `image`.
    ///
    /// The vocabulary is only consulted to flag labels the document never
    /// declared; fill values come from the intensity policy.
    pub fn rasterize(
        &self,
        vocabulary: &LabelVocabulary,
        image: &ImageDescriptor,
        annotations: &[Annotation],
    ) -> Result<SegmentationMap, RasterError> {
        let mut raster = LabelRaster::new(image)?;
        let mut report = RasterReport::default();

        let mut ordered: Vec<&Annotation> = annotations.iter().collect();
        ordered.sort_by_key(|a| a.index);

        for ann in ordered {
            let Some(value) = self.policy.resolve(&ann.label) else {
                let skipped = SkippedAnnotation {
                    index: ann.index,
                    label: ann.label.clone(),
                    reason: SkipReason::UnresolvedLabel {
                        policy: self.policy.id(),
                    },
                };
                log::warn!("Skipping {}", skipped);
                report.skipped.push(skipped);
                continue;
            };

            if !vocabulary.contains(&ann.label) {
                log::debug!(
                    "Annotation #{} uses label '{}' which the document does not declare",
                    ann.index,
                    ann.label
                );
            }
            if ann.is_degenerate() {
                log::debug!(
                    "Annotation #{} has only {} vertices",
                    ann.index,
                    ann.points.len()
                );
            }

            raster.fill_polygon(&ann.pixel_vertices(), value.gray());
            report.painted += 1;
        }

        Ok(SegmentationMap { raster, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;
    use crate::raster::intensity::LabelValue;

    fn square(index: usize, label: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Annotation {
        Annotation::new(
            index,
            label,
            vec![
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ],
        )
    }

    fn vocabulary() -> LabelVocabulary {
        [("1".to_string(), [255, 0, 0]), ("2".to_string(), [0, 255, 0])]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_dimensions_without_annotations() {
        let image = ImageDescriptor::new("a.png", 512, 256);
        let map = Rasterizer::default().rasterize(&vocabulary(), &image, &[]).unwrap();

        assert_eq!(map.raster.width(), 512);
        assert_eq!(map.raster.height(), 256);
        assert_eq!(map.raster.pixels().dim(), (256, 512));
        assert_eq!(map.raster.count(0), 512 * 256);
        assert_eq!(map.report, RasterReport::default());
    }

    #[test]
    fn test_later_annotation_wins_overlap() {
        let image = ImageDescriptor::new("a.png", 20, 20);
        let annotations = vec![
            square(0, "1", 0.0, 0.0, 10.0, 10.0),
            square(1, "2", 5.0, 5.0, 15.0, 15.0),
        ];
        let map = Rasterizer::default()
            .rasterize(&vocabulary(), &image, &annotations)
            .unwrap();

        for y in 5..=10 {
            for x in 5..=10 {
                assert_eq!(map.raster.get(x, y), Some(2), "pixel ({}, {})", x, y);
            }
        }
        assert_eq!(map.raster.get(1, 1), Some(1));
        assert_eq!(map.raster.get(14, 14), Some(2));
        assert_eq!(map.report.painted, 2);
    }

    #[test]
    fn test_paint_order_follows_index_not_slice_order() {
        let image = ImageDescriptor::new("a.png", 20, 20);
        let annotations = vec![
            square(1, "2", 5.0, 5.0, 15.0, 15.0),
            square(0, "1", 0.0, 0.0, 10.0, 10.0),
        ];
        let map = Rasterizer::default()
            .rasterize(&vocabulary(), &image, &annotations)
            .unwrap();
        assert_eq!(map.raster.get(7, 7), Some(2));
    }

    #[test]
    fn test_non_numeric_label_is_skipped() {
        let image = ImageDescriptor::new("a.png", 20, 20);
        let annotations = vec![
            square(0, "liver", 0.0, 0.0, 10.0, 10.0),
            square(1, "2", 8.0, 8.0, 12.0, 12.0),
        ];
        let map = Rasterizer::default()
            .rasterize(&vocabulary(), &image, &annotations)
            .unwrap();

        assert_eq!(map.raster.get(3, 3), Some(0));
        assert_eq!(map.raster.get(9, 9), Some(2));
        assert_eq!(map.report.painted, 1);
        assert_eq!(map.report.skipped.len(), 1);
        assert_eq!(map.report.skipped[0].index, 0);
        assert_eq!(map.report.skipped[0].label, "liver");
        assert!(map.report.skipped[0].to_string().contains("liver"));
    }

    #[test]
    fn test_coordinates_are_truncated() {
        let image = ImageDescriptor::new("a.png", 10, 10);
        let annotations = vec![square(0, "5", 2.9, 2.9, 4.99, 4.99)];
        let map = Rasterizer::default()
            .rasterize(&vocabulary(), &image, &annotations)
            .unwrap();

        assert_eq!(map.raster.count(5), 9);
        assert_eq!(map.raster.get(2, 2), Some(5));
        assert_eq!(map.raster.get(5, 5), Some(0));
    }

    #[test]
    fn test_out_of_range_labels_saturate() {
        let image = ImageDescriptor::new("a.png", 4, 4);
        let annotations = vec![square(0, "300", 0.0, 0.0, 1.0, 1.0)];
        let map = Rasterizer::default()
            .rasterize(&vocabulary(), &image, &annotations)
            .unwrap();
        assert_eq!(map.raster.get(0, 0), Some(255));
    }

    #[test]
    fn test_custom_policy() {
        struct Fixed;
        impl IntensityPolicy for Fixed {
            fn id(&self) -> &'static str {
                "fixed"
            }
            fn resolve(&self, label: &str) -> Option<LabelValue> {
                (label == "liver").then_some(LabelValue(42))
            }
        }

        let image = ImageDescriptor::new("a.png", 8, 8);
        let annotations = vec![
            square(0, "liver", 0.0, 0.0, 3.0, 3.0),
            square(1, "1", 4.0, 4.0, 6.0, 6.0),
        ];
        let map = Rasterizer::new(Box::new(Fixed))
            .rasterize(&vocabulary(), &image, &annotations)
            .unwrap();

        assert_eq!(map.raster.get(1, 1), Some(42));
        assert_eq!(map.raster.get(5, 5), Some(0));
        assert_eq!(
            map.report.skipped[0].reason,
            SkipReason::UnresolvedLabel { policy: "fixed" }
        );
    }

    #[test]
    fn test_rasterize_is_deterministic() {
        let image = ImageDescriptor::new("a.png", 32, 32);
        let annotations = vec![
            square(0, "1", 1.2, 3.4, 20.5, 18.9),
            Annotation::new(
                1,
                "2",
                vec![Point::new(10.0, 2.0), Point::new(30.7, 25.1), Point::new(3.3, 29.9)],
            ),
        ];
        let rasterizer = Rasterizer::default();
        let first = rasterizer.rasterize(&vocabulary(), &image, &annotations).unwrap();
        let second = rasterizer.rasterize(&vocabulary(), &image, &annotations).unwrap();
        assert_eq!(first.raster, second.raster);
    }

    #[test]
    fn test_oversized_image_is_an_error() {
        let image = ImageDescriptor::new("a.png", u32::MAX, u32::MAX);
        let err = Rasterizer::default()
            .rasterize(&vocabulary(), &image, &[])
            .unwrap_err();
        assert!(matches!(
            err,
            RasterError::TooLarge {
                width: u32::MAX,
                height: u32::MAX,
                ..
            }
        ));
        assert!(LabelRaster::new(&ImageDescriptor::new("b.png", 1 << 16, 1 << 15)).is_err());
    }

    #[test]
    fn test_to_image_layout() {
        let image = ImageDescriptor::new("a.png", 3, 2);
        let mut raster = LabelRaster::new(&image).unwrap();
        raster.fill_polygon(&[(2, 1)], 9);

        let gray = raster.to_image().unwrap();
        assert_eq!(gray.dimensions(), (3, 2));
        assert_eq!(gray.get_pixel(2, 1).0, [9]);
        assert_eq!(gray.get_pixel(0, 0).0, [0]);
    }
}
