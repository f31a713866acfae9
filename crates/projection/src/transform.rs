//! Affine pixel/world transform.

use serde::{Deserialize, Serialize};
use supres_common::{SupresError, SupresResult};

/// A 2x3 affine transform between pixel and projected coordinates.
///
/// Coefficient naming follows the GDAL/rasterio convention:
///
/// ```text
/// x = a * col + b * row + c
/// y = d * col + e * row + f
/// ```
///
/// `c`/`f` are the world coordinates of the raster origin (top-left corner
/// of pixel (0, 0)); for north-up rasters `b` and `d` are zero and `e` is
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// A north-up transform from origin and pixel size (positive sizes;
    /// `y_size` is negated internally).
    pub fn north_up(origin_x: f64, origin_y: f64, x_size: f64, y_size: f64) -> Self {
        Self::new(x_size, 0.0, origin_x, 0.0, -y_size, origin_y)
    }

    /// Map pixel coordinates to world coordinates.
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }

    /// Map world coordinates back to (fractional) pixel coordinates.
    ///
    /// Subtracts the origin offset, then applies the closed-form inverse of
    /// the 2x2 linear part. Fails with [`SupresError::SingularTransform`]
    /// when the determinant is zero.
    pub fn pixel_from_world(&self, x: f64, y: f64) -> SupresResult<(f64, f64)> {
        let x_p = x - self.c;
        let y_p = y - self.f;

        let det = self.a * self.e - self.d * self.b;
        if det == 0.0 {
            return Err(SupresError::SingularTransform);
        }
        let det_inv = 1.0 / det;

        let col = (self.e * x_p - self.b * y_p) * det_inv;
        let row = (-self.d * x_p + self.a * y_p) * det_inv;
        Ok((col, row))
    }

    /// Compose with a pixel-space translation: the returned transform maps
    /// pixel (0, 0) to where this transform maps `(col_off, row_off)`.
    ///
    /// Used to re-georeference an output window cut from a larger raster.
    pub fn translated(&self, col_off: f64, row_off: f64) -> Self {
        Self {
            c: self.a * col_off + self.b * row_off + self.c,
            f: self.d * col_off + self.e * row_off + self.f,
            ..*self
        }
    }
}
