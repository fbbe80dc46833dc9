//! Scanline polygon fill.
//!
//! Polygons are closed (last vertex connects back to the first) and filled
//! with the even-odd rule. Boundary pixels are painted too, so an axis-aligned
//! rectangle from `(x0, y0)` to `(x1, y1)` covers both corner rows and columns.
//! Anything outside the raster is clipped.

use ndarray::Array2;

/// Fill a closed polygon with `value`.
///
/// Fewer than three vertices degrade gracefully: one vertex paints a single
/// pixel and two paint a line. An empty slice is a no-op.
pub fn fill_polygon(raster: &mut Array2<u8>, vertices: &[(i64, i64)], value: u8) {
    let (rows, cols) = raster.dim();
    if vertices.is_empty() || rows == 0 || cols == 0 {
        return;
    }
    let bounds = Bounds {
        max_x: cols as i64 - 1,
        max_y: rows as i64 - 1,
    };

    fill_interior(raster, vertices, value, bounds);

    let n = vertices.len();
    for i in 0..n {
        draw_line(raster, vertices[i], vertices[(i + 1) % n], value, bounds);
    }
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    max_x: i64,
    max_y: i64,
}

impl Bounds {
    fn contains(&self, x: i64, y: i64) -> bool {
        (0..=self.max_x).contains(&x) && (0..=self.max_y).contains(&y)
    }
}

fn fill_interior(raster: &mut Array2<u8>, vertices: &[(i64, i64)], value: u8, bounds: Bounds) {
    let Some(top) = vertices.iter().map(|v| v.1).min() else {
        return;
    };
    let Some(bottom) = vertices.iter().map(|v| v.1).max() else {
        return;
    };
    let top = top.max(0);
    let bottom = bottom.min(bounds.max_y);

    let n = vertices.len();
    let mut crossings: Vec<f64> = Vec::with_capacity(n);

    for y in top..=bottom {
        crossings.clear();
        let yf = y as f64;

        for i in 0..n {
            let (x0, y0) = vertices[i];
            let (x1, y1) = vertices[(i + 1) % n];
            if y0 == y1 {
                continue;
            }
            // Always walk edges upward so reversed polygons cross identically.
            let ((xa, ya), (xb, yb)) = if y0 < y1 {
                ((x0, y0), (x1, y1))
            } else {
                ((x1, y1), (x0, y0))
            };
            // Half-open span so a shared vertex is counted once.
            if y < ya || y >= yb {
                continue;
            }
            let dx = xb as f64 - xa as f64;
            let dy = yb as f64 - ya as f64;
            crossings.push(xa as f64 + (yf - ya as f64) * dx / dy);
        }

        crossings.sort_by(f64::total_cmp);

        for span in crossings.chunks_exact(2) {
            let start = span[0].ceil().max(0.0);
            let end = span[1].floor().min(bounds.max_x as f64);
            if start > end {
                continue;
            }
            for x in start as i64..=end as i64 {
                raster[[y as usize, x as usize]] = value;
            }
        }
    }
}

/// Draw a line segment, stepping along its major axis.
fn draw_line(
    raster: &mut Array2<u8>,
    (x0, y0): (i64, i64),
    (x1, y1): (i64, i64),
    value: u8,
    bounds: Bounds,
) {
    let dx = x1 as f64 - x0 as f64;
    let dy = y1 as f64 - y0 as f64;

    if dx.abs() >= dy.abs() {
        let lo = x0.min(x1).max(0);
        let hi = x0.max(x1).min(bounds.max_x);
        for x in lo..=hi {
            let y = if dx == 0.0 {
                y0
            } else {
                (y0 as f64 + (x as f64 - x0 as f64) * dy / dx).round() as i64
            };
            plot(raster, x, y, value, bounds);
        }
    } else {
        let lo = y0.min(y1).max(0);
        let hi = y0.max(y1).min(bounds.max_y);
        for y in lo..=hi {
            let x = (x0 as f64 + (y as f64 - y0 as f64) * dx / dy).round() as i64;
            plot(raster, x, y, value, bounds);
        }
    }
}

fn plot(raster: &mut Array2<u8>, x: i64, y: i64, value: u8, bounds: Bounds) {
    if bounds.contains(x, y) {
        raster[[y as usize, x as usize]] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(raster: &Array2<u8>, value: u8) -> usize {
        raster.iter().filter(|&&v| v == value).count()
    }

    #[test]
    fn test_rectangle_includes_boundary() {
        let mut raster = Array2::zeros((10, 10));
        fill_polygon(&mut raster, &[(2, 2), (6, 2), (6, 5), (2, 5)], 7);

        assert_eq!(count(&raster, 7), 5 * 4);
        for y in 0..10 {
            for x in 0..10 {
                let inside = (2..=6).contains(&x) && (2..=5).contains(&y);
                assert_eq!(raster[[y, x]] == 7, inside, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_triangle() {
        let mut raster = Array2::zeros((20, 20));
        fill_polygon(&mut raster, &[(0, 0), (19, 0), (0, 19)], 1);

        assert_eq!(raster[[0, 0]], 1);
        assert_eq!(raster[[5, 5]], 1);
        assert_eq!(raster[[0, 19]], 1);
        assert_eq!(raster[[19, 0]], 1);
        assert_eq!(raster[[19, 19]], 0);
        assert_eq!(raster[[15, 15]], 0);
    }

    #[test]
    fn test_vertex_order_does_not_matter() {
        let mut clockwise = Array2::zeros((16, 16));
        let mut counter = Array2::zeros((16, 16));
        fill_polygon(&mut clockwise, &[(1, 1), (12, 3), (9, 14), (2, 10)], 3);
        fill_polygon(&mut counter, &[(2, 10), (9, 14), (12, 3), (1, 1)], 3);
        assert_eq!(clockwise, counter);
    }

    #[test]
    fn test_concave_polygon_leaves_notch_empty() {
        // U shape: notch between x=3..=6 above y=6
        let mut raster = Array2::zeros((12, 12));
        let u = [(0, 0), (2, 0), (2, 6), (7, 6), (7, 0), (9, 0), (9, 9), (0, 9)];
        fill_polygon(&mut raster, &u, 4);

        assert_eq!(raster[[3, 1]], 4);
        assert_eq!(raster[[3, 8]], 4);
        assert_eq!(raster[[8, 5]], 4);
        assert_eq!(raster[[3, 4]], 0);
        assert_eq!(raster[[3, 5]], 0);
    }

    #[test]
    fn test_clipping_out_of_bounds() {
        let mut raster = Array2::zeros((4, 4));
        fill_polygon(&mut raster, &[(-10, -10), (10, -10), (10, 10), (-10, 10)], 9);
        assert_eq!(count(&raster, 9), 16);

        let mut untouched = Array2::zeros((4, 4));
        fill_polygon(&mut untouched, &[(100, 100), (200, 100), (150, 200)], 9);
        assert_eq!(count(&untouched, 0), 16);
    }

    #[test]
    fn test_extreme_coordinates_do_not_panic() {
        let mut raster = Array2::zeros((4, 4));
        fill_polygon(&mut raster, &[(i64::MIN, 0), (i64::MAX, 0), (0, i64::MAX)], 2);
        assert!(count(&raster, 2) > 0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let mut raster = Array2::zeros((5, 5));
        fill_polygon(&mut raster, &[], 1);
        assert_eq!(count(&raster, 0), 25);

        fill_polygon(&mut raster, &[(2, 2)], 1);
        assert_eq!(count(&raster, 1), 1);
        assert_eq!(raster[[2, 2]], 1);

        let mut line = Array2::zeros((5, 5));
        fill_polygon(&mut line, &[(0, 4), (4, 4)], 6);
        assert_eq!(count(&line, 6), 5);
    }

    #[test]
    fn test_empty_raster_is_noop() {
        let mut raster: Array2<u8> = Array2::zeros((0, 0));
        fill_polygon(&mut raster, &[(0, 0), (1, 0), (1, 1)], 1);
        assert_eq!(raster.len(), 0);
    }
}
