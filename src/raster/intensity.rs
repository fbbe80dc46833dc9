//! Mapping from label names to raster intensities.

use std::fmt;

/// Numeric value a label resolves to.
///
/// The raw value is what captions show; [`gray`](Self::gray) is what gets
/// written into 8-bit rasters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelValue(pub i64);

impl LabelValue {
    /// 8-bit intensity, saturating values outside `0..=255`.
    pub fn gray(self) -> u8 {
        self.0.clamp(0, u8::MAX as i64) as u8
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Policy resolving a label name to the value painted for it.
///
/// Both the segmentation map and the legend go through the same policy, so
/// swapping it changes the label encoding everywhere at once.
pub trait IntensityPolicy: Send + Sync {
    /// Short identifier used in logs.
    fn id(&self) -> &'static str;

    /// Resolve a label, or `None` if this policy cannot encode it.
    fn resolve(&self, label: &str) -> Option<LabelValue>;
}

/// Label names are base-10 integers and are used directly as intensities.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericLabels;

impl IntensityPolicy for NumericLabels {
    fn id(&self) -> &'static str {
        "numeric"
    }

    fn resolve(&self, label: &str) -> Option<LabelValue> {
        label.trim().parse::<i64>().ok().map(LabelValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_labels() {
        let policy = NumericLabels;
        assert_eq!(policy.resolve("7"), Some(LabelValue(7)));
        assert_eq!(policy.resolve(" 12 "), Some(LabelValue(12)));
        assert_eq!(policy.resolve("+3"), Some(LabelValue(3)));
        assert_eq!(policy.resolve("-4"), Some(LabelValue(-4)));
        assert_eq!(policy.resolve("liver"), None);
        assert_eq!(policy.resolve("1.5"), None);
        assert_eq!(policy.resolve(""), None);
    }

    #[test]
    fn test_gray_saturates() {
        assert_eq!(LabelValue(0).gray(), 0);
        assert_eq!(LabelValue(128).gray(), 128);
        assert_eq!(LabelValue(300).gray(), 255);
        assert_eq!(LabelValue(-5).gray(), 0);
    }
}
