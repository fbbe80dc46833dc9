//! Legend image mapping label values to their raster intensity.
//!
//! One row per vocabulary label, sorted by numeric value. Each row holds a
//! gray swatch painted with the label's intensity and a caption of the form
//! `Label {name} (Gray: {value})`.

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use super::error::RasterError;
use super::font::{GLYPH_HEIGHT, draw_text, text_width};
use super::intensity::{IntensityPolicy, LabelValue};
use crate::model::LabelVocabulary;

/// Legend geometry and colors. Coordinates are relative to each row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendStyle {
    /// Canvas width in pixels.
    pub width: u32,
    /// Height of one label row in pixels.
    pub row_height: u32,
    /// Swatch left edge (inclusive).
    pub swatch_left: u32,
    /// Swatch right edge (inclusive).
    pub swatch_right: u32,
    /// Swatch top edge within the row (inclusive).
    pub swatch_top: u32,
    /// Swatch bottom edge within the row (inclusive).
    pub swatch_bottom: u32,
    /// Caption left edge.
    pub caption_left: u32,
    /// Caption baseline within the row.
    pub caption_baseline: u32,
    /// Size of one font unit in pixels.
    pub glyph_scale: u32,
    /// Canvas background color.
    pub background: [u8; 3],
    /// Caption color.
    pub caption_color: [u8; 3],
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            width: 400,
            row_height: 40,
            swatch_left: 10,
            swatch_right: 50,
            swatch_top: 5,
            swatch_bottom: 35,
            caption_left: 70,
            caption_baseline: 25,
            glyph_scale: 2,
            background: [255, 255, 255],
            caption_color: [0, 0, 0],
        }
    }
}

impl LegendStyle {
    /// Canvas height for `rows` labels.
    pub fn height_for(&self, rows: usize) -> u32 {
        self.row_height.saturating_mul(rows as u32)
    }
}

/// One legend row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendRow {
    /// Label name as declared.
    pub label: String,
    /// Value the label resolves to.
    pub value: LabelValue,
}

impl LegendRow {
    /// Caption text shown next to the swatch.
    pub fn caption(&self) -> String {
        format!("Label {} (Gray: {})", self.label, self.value)
    }
}

/// Resolve every vocabulary label and sort ascending by value.
///
/// Fails on the first label the policy cannot resolve: a legend that
/// silently drops classes would misdescribe the segmentation map.
pub fn legend_rows(
    vocabulary: &LabelVocabulary,
    policy: &dyn IntensityPolicy,
) -> Result<Vec<LegendRow>, RasterError> {
    let mut rows = vocabulary
        .iter()
        .map(|def| {
            policy
                .resolve(&def.name)
                .map(|value| LegendRow {
                    label: def.name.clone(),
                    value,
                })
                .ok_or_else(|| RasterError::NonNumericVocabularyLabel {
                    label: def.name.clone(),
                    policy: policy.id(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    rows.sort_by_key(|row| row.value);
    Ok(rows)
}

/// Render the legend for a vocabulary.
pub fn render_legend(
    vocabulary: &LabelVocabulary,
    policy: &dyn IntensityPolicy,
    style: &LegendStyle,
) -> Result<RgbImage, RasterError> {
    if vocabulary.is_empty() {
        return Err(RasterError::EmptyVocabulary);
    }
    let rows = legend_rows(vocabulary, policy)?;

    let height = style.height_for(rows.len());
    let mut canvas = RgbImage::from_pixel(style.width, height, Rgb(style.background));

    for (i, row) in rows.iter().enumerate() {
        let top = i as u32 * style.row_height;
        let gray = row.value.gray();
        fill_rect(
            &mut canvas,
            (style.swatch_left, top + style.swatch_top),
            (style.swatch_right, top + style.swatch_bottom),
            Rgb([gray, gray, gray]),
        );

        let caption = row.caption();
        let scale = style.glyph_scale.max(1);
        let caption_top =
            i64::from(top + style.caption_baseline) - i64::from(GLYPH_HEIGHT * scale);
        if style.caption_left + text_width(&caption, scale) > style.width {
            log::debug!("Legend caption '{}' is clipped at {}px", caption, style.width);
        }
        draw_text(
            &mut canvas,
            &caption,
            i64::from(style.caption_left),
            caption_top,
            scale,
            Rgb(style.caption_color),
        );
    }

    log::debug!("Legend rendered with {} rows", rows.len());
    Ok(canvas)
}

/// Fill the rectangle between two inclusive corners, clipped to the canvas.
fn fill_rect(canvas: &mut RgbImage, (x0, y0): (u32, u32), (x1, y1): (u32, u32), color: Rgb<u8>) {
    let x_end = x1.min(canvas.width().saturating_sub(1));
    let y_end = y1.min(canvas.height().saturating_sub(1));
    if canvas.width() == 0 || canvas.height() == 0 {
        return;
    }
    for y in y0..=y_end {
        for x in x0..=x_end {
            canvas.put_pixel(x, y, color);
        }
    }
}
