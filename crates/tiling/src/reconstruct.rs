//! Stitching predicted patches back into one image.

use supres_common::{BandStack, SupresError, SupresResult};
use tracing::debug;

use crate::planner::plan;

/// Reassemble a predicted patch batch into one contiguous image of
/// `target_height x target_width` (the unpadded FINE window shape).
///
/// The origin grid is re-planned from the target shape and must be bit-for-
/// bit the grid used at extraction time; patches are consumed in the same
/// row-major order they were produced and matched to positions by index.
/// Each patch contributes only its interior (the `border` margin is the
/// mirrored seam overlap and is discarded). When the last row or column
/// origin was clamped flush to the edge, its interior overwrites the overlap
/// with the previous tile; last writer wins.
///
/// A single-patch batch is returned as-is, nothing stripped; one-patch runs
/// have no seams.
pub fn reconstruct(
    batch: &[BandStack],
    border: usize,
    target_height: usize,
    target_width: usize,
) -> SupresResult<BandStack> {
    let first = batch
        .first()
        .ok_or_else(|| SupresError::grid_alignment("cannot reconstruct an empty batch"))?;

    if batch.len() == 1 {
        return Ok(first.clone());
    }

    let patch_size = first.height();
    let channels = first.channels();
    for p in batch {
        if p.height() != patch_size || p.width() != patch_size || p.channels() != channels {
            return Err(SupresError::grid_alignment(
                "predicted batch contains patches of differing shape",
            ));
        }
    }

    // Identical arithmetic to extraction-time planning, including the final
    // clamped-origin rule.
    let grid = plan(
        target_height + 2 * border,
        target_width + 2 * border,
        patch_size,
        border,
    )?;
    if grid.len() != batch.len() {
        return Err(SupresError::grid_alignment(format!(
            "predicted batch holds {} patches but the target grid needs {}",
            batch.len(),
            grid.len()
        )));
    }

    let core = grid.patch_size() - 2 * grid.border();
    let mut image = BandStack::zeros(channels, target_height, target_width);
    for (origin, patch) in grid.origins().iter().zip(batch) {
        let interior = patch.window(border, border, core, core);
        image.blit(&interior, origin.row, origin.col);
    }

    debug!(
        patches = batch.len(),
        target_height, target_width, "reconstructed image"
    );
    Ok(image)
}
