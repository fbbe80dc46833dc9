//! Command-line arguments for the `cvat-segmap` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::convert::{DEFAULT_LABEL_MAP, DEFAULT_OUTPUT};

#[derive(Parser, Debug)]
#[command(
    name = "cvat-segmap",
    version,
    about = "Create segmentation map from CVAT XML annotations"
)]
pub struct Cli {
    /// Path to the CVAT XML file
    pub xml_path: PathBuf,

    /// Output path for segmentation map
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output path for label map
    #[arg(short = 'l', long, default_value = DEFAULT_LABEL_MAP)]
    pub label_map: PathBuf,

    /// JSON file overriding the legend layout
    #[arg(long)]
    pub legend_style: Option<PathBuf>,
}
