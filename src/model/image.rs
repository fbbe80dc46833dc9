//! Image record declared in the annotation document.

/// Largest image, in pixels, a label raster is allocated for.
pub const MAX_IMAGE_PIXELS: u64 = 1 << 30;

/// Metadata about the annotated image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// The filename of the image (informational only).
    pub name: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl ImageDescriptor {
    /// Create a new descriptor with the given filename and dimensions.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// Raster shape as `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height as usize, self.width as usize)
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_count_does_not_overflow() {
        let image = ImageDescriptor::new("a.png", u32::MAX, u32::MAX);
        assert_eq!(image.pixel_count(), u64::from(u32::MAX) * u64::from(u32::MAX));
        assert!(image.pixel_count() > MAX_IMAGE_PIXELS);
        assert_eq!(ImageDescriptor::new("b.png", 512, 256).shape(), (256, 512));
    }
}
