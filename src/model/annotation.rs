//! Polyline annotations read from the document.

/// Minimum number of vertices for a polygon with a non-empty interior.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// A vertex in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Truncate both coordinates toward zero.
    pub fn truncated(&self) -> (i64, i64) {
        (self.x as i64, self.y as i64)
    }
}

/// A labeled polygon, rasterized as a closed shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Position in the document. Later annotations paint over earlier ones.
    pub index: usize,
    /// Label reference, expected to name a vocabulary entry.
    pub label: String,
    /// Vertices in document order.
    pub points: Vec<Point>,
}

impl Annotation {
    /// Create a new annotation.
    pub fn new(index: usize, label: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            index,
            label: label.into(),
            points,
        }
    }

    /// Vertices truncated to integer pixel coordinates.
    pub fn pixel_vertices(&self) -> Vec<(i64, i64)> {
        self.points.iter().map(Point::truncated).collect()
    }

    /// Whether the annotation has enough vertices to enclose an area.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < MIN_POLYGON_VERTICES
    }
}
