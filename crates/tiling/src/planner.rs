//! Tile grid planning.

use supres_common::{SupresError, SupresResult};

/// Top-left corner of one patch inside a padded window, tier-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchOrigin {
    pub row: usize,
    pub col: usize,
}

/// The ordered set of patch origins covering one padded window.
///
/// Origins are row-major: all columns of row 0, then row 1, and so on.
/// Consumers must preserve this order; reconstruction matches predictions to
/// positions by index, not by spatial metadata.
#[derive(Debug, Clone)]
pub struct TileGrid {
    origins: Vec<PatchOrigin>,
    rows: usize,
    cols: usize,
    patch_size: usize,
    border: usize,
}

impl TileGrid {
    pub fn origins(&self) -> &[PatchOrigin] {
        &self.origins
    }

    /// Number of origin rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of origin columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total patch count (`rows * cols`).
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn patch_size(&self) -> usize {
        self.patch_size
    }

    pub fn border(&self) -> usize {
        self.border
    }
}

/// Compute the patch origins covering a `window_height x window_width`
/// (padded) window.
///
/// The patch stride is `patch_size - 2 * border`: the non-overlapping core
/// of a patch. Origins advance by the stride while `origin <= window -
/// patch_size`; when the remaining span is not an exact multiple of the
/// stride one final origin is clamped flush to the far edge so the window is
/// fully covered without exceeding bounds.
///
/// A window exactly one patch wide yields the single origin `{0}`.
pub fn plan(
    window_height: usize,
    window_width: usize,
    patch_size: usize,
    border: usize,
) -> SupresResult<TileGrid> {
    if patch_size <= 2 * border {
        return Err(SupresError::grid_alignment(format!(
            "patch size {patch_size} with border {border} leaves no stride"
        )));
    }
    if window_height < patch_size || window_width < patch_size {
        return Err(SupresError::RegionTooSmall {
            width: window_width as i64,
            height: window_height as i64,
            min_size: patch_size,
        });
    }

    let stride = patch_size - 2 * border;
    let row_origins = axis_origins(window_height, patch_size, stride);
    let col_origins = axis_origins(window_width, patch_size, stride);

    let rows = row_origins.len();
    let cols = col_origins.len();
    let mut origins = Vec::with_capacity(rows * cols);
    for &row in &row_origins {
        for &col in &col_origins {
            origins.push(PatchOrigin { row, col });
        }
    }

    Ok(TileGrid {
        origins,
        rows,
        cols,
        patch_size,
        border,
    })
}

/// Origins along one axis: multiples of the stride up to `window - patch`,
/// plus a final flush origin when the span does not divide evenly.
fn axis_origins(window: usize, patch: usize, stride: usize) -> Vec<usize> {
    let last = window - patch;
    let mut origins = Vec::with_capacity(last / stride + 2);
    let mut origin = 0;
    while origin <= last {
        origins.push(origin);
        origin += stride;
    }
    if last % stride != 0 {
        origins.push(last);
    }
    origins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_patch_window() {
        // A window exactly one patch wide plans a single origin.
        let grid = plan(192, 192, 192, 12).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.origins()[0], PatchOrigin { row: 0, col: 0 });
    }

    #[test]
    fn test_exact_stride_coverage() {
        // window = patch + 2 * stride: three origins per axis, no clamp.
        let grid = plan(128 + 224, 128 + 224, 128, 8).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        let last = grid.origins().last().unwrap();
        assert_eq!((last.row, last.col), (224, 224));
    }

    #[test]
    fn test_remainder_appends_flush_origin() {
        // stride 104, window 300: origins 0, 104 then flush at 300-128=172.
        let grid = plan(300, 300, 128, 12).unwrap();
        let rows: Vec<usize> = grid
            .origins()
            .iter()
            .filter(|o| o.col == 0)
            .map(|o| o.row)
            .collect();
        assert_eq!(rows, vec![0, 104, 172]);
    }

    #[test]
    fn test_no_origin_exceeds_bound() {
        for window in [200, 257, 300, 511] {
            let grid = plan(window, window, 128, 8).unwrap();
            for o in grid.origins() {
                assert!(o.row <= window - 128);
                assert!(o.col <= window - 128);
            }
            let last = grid.origins().last().unwrap();
            if (window - 128) % 112 != 0 {
                assert_eq!(last.row, window - 128);
            }
        }
    }

    #[test]
    fn test_row_major_order() {
        let grid = plan(300, 300, 128, 12).unwrap();
        let o = grid.origins();
        assert_eq!(grid.len(), grid.rows() * grid.cols());
        for i in 1..o.len() {
            let prev = (o[i - 1].row, o[i - 1].col);
            let cur = (o[i].row, o[i].col);
            assert!(cur > prev, "origins not row-major at index {i}");
        }
    }

    #[test]
    fn test_zero_stride_is_fatal() {
        let err = plan(400, 400, 128, 64).unwrap_err();
        assert!(matches!(err, SupresError::GridAlignment(_)));
    }

    #[test]
    fn test_window_smaller_than_patch() {
        let err = plan(100, 400, 128, 8).unwrap_err();
        assert!(matches!(err, SupresError::RegionTooSmall { .. }));
    }
}
