//! End-to-end conversion from an annotation document to output images.
//!
//! Both images are rendered in memory before anything is written, so a
//! vocabulary the legend cannot describe leaves no outputs behind. An empty
//! vocabulary is the exception: the segmentation map is still written and the
//! run then fails on the legend.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::{CvatDocument, FormatError};
use crate::model::ImageDescriptor;
use crate::raster::{
    IntensityPolicy, LegendStyle, RasterError, RasterReport, Rasterizer, SegmentationMap,
    render_legend,
};

/// Default path of the segmentation map.
pub const DEFAULT_OUTPUT: &str = "segmentation_map.png";

/// Default path of the legend image.
pub const DEFAULT_LABEL_MAP: &str = "label_map.png";

/// Errors that abort a conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input document does not exist
    #[error("XML file '{}' not found", .path.display())]
    InputNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// I/O error outside of document parsing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be parsed
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A raster could not be built or written
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// The legend style file is not valid JSON for [`LegendStyle`]
    #[error("Invalid legend style: {0}")]
    Config(#[from] serde_json::Error),
}

/// Where outputs go and how the legend looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Segmentation map path.
    pub output: PathBuf,
    /// Legend image path.
    pub label_map: PathBuf,
    /// Legend geometry and colors.
    pub legend: LegendStyle,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            label_map: PathBuf::from(DEFAULT_LABEL_MAP),
            legend: LegendStyle::default(),
        }
    }
}

impl ConvertOptions {
    /// Create options with default paths and legend style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the segmentation map path.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Set the legend image path.
    pub fn label_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.label_map = path.into();
        self
    }

    /// Set the legend style.
    pub fn legend(mut self, style: LegendStyle) -> Self {
        self.legend = style;
        self
    }
}

/// Load a [`LegendStyle`] from a JSON file. Missing fields keep their defaults.
pub fn load_legend_style(path: &Path) -> Result<LegendStyle, ConvertError> {
    let content = std::fs::read_to_string(path)?;
    let style = serde_json::from_str(&content)?;
    log::info!("Loaded legend style from {:?}", path);
    Ok(style)
}

/// What a finished conversion did.
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    /// The annotated image.
    pub image: ImageDescriptor,
    /// Number of vocabulary labels.
    pub labels: usize,
    /// Number of annotations read from the document.
    pub annotations: usize,
    /// Painted and skipped annotations.
    pub report: RasterReport,
    /// Where the segmentation map was written.
    pub output: PathBuf,
    /// Where the legend was written.
    pub label_map: PathBuf,
}

impl fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Image '{}' ({}x{}): {} labels, {} annotations",
            self.image.name, self.image.width, self.image.height, self.labels, self.annotations
        )?;
        writeln!(
            f,
            "Painted {} annotations, skipped {}",
            self.report.painted,
            self.report.skipped.len()
        )?;
        for skipped in &self.report.skipped {
            writeln!(f, "  skipped {}", skipped)?;
        }
        writeln!(f, "Segmentation map: {}", self.output.display())?;
        write!(f, "Label map: {}", self.label_map.display())
    }
}

/// Runs the document → images conversion.
pub struct Converter {
    rasterizer: Rasterizer,
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter using numeric labels as intensities.
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            rasterizer: Rasterizer::default(),
            options,
        }
    }

    /// Create a converter with a custom intensity policy.
    pub fn with_policy(options: ConvertOptions, policy: Box<dyn IntensityPolicy>) -> Self {
        Self {
            rasterizer: Rasterizer::new(policy),
            options,
        }
    }

    /// The options in use.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Parse `input` and write both output images.
    pub fn convert_file(&self, input: &Path) -> Result<ConversionSummary, ConvertError> {
        if !input.exists() {
            return Err(ConvertError::InputNotFound {
                path: input.to_path_buf(),
            });
        }
        let document = CvatDocument::from_path(input)?;
        self.convert_document(&document)
    }

    /// Render and write both images for an already parsed document.
    pub fn convert_document(
        &self,
        document: &CvatDocument,
    ) -> Result<ConversionSummary, ConvertError> {
        log::info!(
            "Found {} labels and {} annotations",
            document.vocabulary.len(),
            document.annotations.len()
        );
        log::info!(
            "Image dimensions: {}x{}",
            document.image.width,
            document.image.height
        );

        let segmentation = self.rasterizer.rasterize(
            &document.vocabulary,
            &document.image,
            &document.annotations,
        )?;
        let legend = match render_legend(
            &document.vocabulary,
            self.rasterizer.policy(),
            &self.options.legend,
        ) {
            Err(RasterError::EmptyVocabulary) => {
                self.save_segmentation(&segmentation)?;
                return Err(RasterError::EmptyVocabulary.into());
            }
            legend => legend?,
        };

        self.save_segmentation(&segmentation)?;
        legend
            .save(&self.options.label_map)
            .map_err(RasterError::from)?;
        log::info!("Label map saved to: {:?}", self.options.label_map);

        let report = segmentation.report;
        if report.has_skips() {
            log::warn!(
                "{} of {} annotations were skipped",
                report.skipped.len(),
                document.annotations.len()
            );
        }

        Ok(ConversionSummary {
            image: document.image.clone(),
            labels: document.vocabulary.len(),
            annotations: document.annotations.len(),
            report,
            output: self.options.output.clone(),
            label_map: self.options.label_map.clone(),
        })
    }

    fn save_segmentation(&self, segmentation: &SegmentationMap) -> Result<(), ConvertError> {
        segmentation.raster.save(&self.options.output)?;
        log::info!("Grayscale segmentation map saved to: {:?}", self.options.output);
        Ok(())
    }
}
