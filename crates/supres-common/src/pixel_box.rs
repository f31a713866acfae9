//! Pixel-space bounding box with 60m boundary snapping.

use serde::{Deserialize, Serialize};

/// An inclusive bounding box in FINE-tier (10m) pixel coordinates.
///
/// Boxes produced by [`PixelBox::clamp_and_snap`] have side lengths that are
/// multiples of 6, so every tier's window boundary lands on an integer pixel
/// in 60m space. Coordinates are signed so that unclamped corners derived
/// from geographic input can be represented before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBox {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl PixelBox {
    /// Create a box from already-resolved corners.
    pub fn new(x_min: i64, y_min: i64, x_max: i64, y_max: i64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Resolve two arbitrary corners into a clamped, 60m-aligned box.
    ///
    /// Corners may be given in any order. They are clamped to
    /// `[0, width-1] x [0, height-1]`, then snapped to 60m pixel boundaries:
    /// lower bounds round down to a multiple of 6, upper bounds move to one
    /// short of a multiple of 6 so that each side length is a multiple of 6:
    ///
    /// ```
    /// use supres_common::PixelBox;
    ///
    /// let b = PixelBox::clamp_and_snap(0, 0, 400, 400, 10980, 10980);
    /// assert_eq!((b.x_min, b.y_min, b.x_max, b.y_max), (0, 0, 395, 395));
    /// assert_eq!(b.area(), 156816);
    /// ```
    pub fn clamp_and_snap(
        x_1: i64,
        y_1: i64,
        x_2: i64,
        y_2: i64,
        width: usize,
        height: usize,
    ) -> Self {
        let w = width as i64;
        let h = height as i64;
        let mut x_min = x_1.min(x_2).min(w - 1).max(0);
        let mut x_max = x_1.max(x_2).max(0).min(w - 1);
        let mut y_min = y_1.min(y_2).min(h - 1).max(0);
        let mut y_max = y_1.max(y_2).max(0).min(h - 1);

        // Enlarge to the nearest 60m pixel boundary.
        x_min = (x_min / 6) * 6;
        x_max = ((x_max + 1) / 6) * 6 - 1;
        y_min = (y_min / 6) * 6;
        y_max = ((y_max + 1) / 6) * 6 - 1;

        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// The full-extent box `(0, 0, width, height)`.
    ///
    /// The upper corner intentionally carries the raster dimensions rather
    /// than the last pixel index; this is the historical full-scene
    /// convention. Call [`PixelBox::snapped_to_extent`] before using the box
    /// for windowed reads.
    pub fn full_scene(width: usize, height: usize) -> Self {
        Self {
            x_min: 0,
            y_min: 0,
            x_max: width as i64,
            y_max: height as i64,
        }
    }

    /// Normalize this box to the clamped, snapped form used for windowing.
    ///
    /// Idempotent for boxes already produced by [`PixelBox::clamp_and_snap`];
    /// for the [`PixelBox::full_scene`] box it folds the exclusive upper
    /// corner back onto the raster extent.
    pub fn snapped_to_extent(&self, width: usize, height: usize) -> Self {
        Self::clamp_and_snap(
            self.x_min, self.y_min, self.x_max, self.y_max, width, height,
        )
    }

    /// Width in pixels, inclusive bounds.
    pub fn width(&self) -> i64 {
        self.x_max - self.x_min + 1
    }

    /// Height in pixels, inclusive bounds.
    pub fn height(&self) -> i64 {
        self.y_max - self.y_min + 1
    }

    /// Pixel area of the box.
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    /// A box is invalid when clamping collapsed it (max < min on an axis);
    /// callers must treat this as a fatal user error.
    pub fn is_valid(&self) -> bool {
        self.x_max >= self.x_min && self.y_max >= self.y_min
    }
}

impl std::fmt::Display for PixelBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}
