//! Cross-tier patch extraction.

use rayon::prelude::*;
use supres_common::{BandStack, ResolutionTier, SupresError, SupresResult};
use tracing::debug;

use crate::interpolation::upsample_patch;
use crate::mirror::pad_symmetric;
use crate::planner::plan;

/// One resolution tier's raster window, cut from the same pixel box as every
/// other tier in the extraction call (tier dimensions are the FINE dimensions
/// divided by the tier scale).
#[derive(Debug, Clone)]
pub struct TierWindow {
    pub tier: ResolutionTier,
    pub stack: BandStack,
}

impl TierWindow {
    pub fn new(tier: ResolutionTier, stack: BandStack) -> Self {
        Self { tier, stack }
    }
}

/// An ordered batch of fixed-size channel-first patches.
///
/// Batches produced by one [`extract_batches`] call are index-aligned: patch
/// `i` of every tier covers the same ground as patch `i` of the model's
/// predicted batch.
#[derive(Debug, Clone)]
pub struct PatchBatch {
    pub patches: Vec<BandStack>,
}

impl PatchBatch {
    pub fn new(patches: Vec<BandStack>) -> Self {
        Self { patches }
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Channel count of the patches (0 for an empty batch).
    pub fn channels(&self) -> usize {
        self.patches.first().map_or(0, BandStack::channels)
    }

    /// Spatial patch size (patches are square).
    pub fn patch_size(&self) -> usize {
        self.patches.first().map_or(0, BandStack::height)
    }
}

/// Extract index-aligned patch batches from every active tier.
///
/// `patch_size` and `border` are in FINE pixels and scale down per tier. The
/// grid is planned once, on the coarsest tier's mirrored window, and origins
/// are multiplied back up for the finer tiers, so every tier produces the
/// same patch count and layout by construction.
///
/// Coarse-tier patches are bilinearly upsampled to `patch_size` before being
/// returned; the inference engine expects all tiers at matching spatial
/// dimensions, differing only in channel count.
pub fn extract_batches(
    windows: &[TierWindow],
    patch_size: usize,
    border: usize,
) -> SupresResult<Vec<PatchBatch>> {
    let fine = windows
        .iter()
        .find(|w| w.tier == ResolutionTier::Fine)
        .ok_or_else(|| SupresError::grid_alignment("extraction requires the 10m tier"))?;
    let fine_h = fine.stack.height();
    let fine_w = fine.stack.width();

    let coarsest = windows
        .iter()
        .map(|w| w.tier.scale())
        .max()
        .unwrap_or(1);

    for w in windows {
        let scale = w.tier.scale();
        if patch_size % scale != 0 || border % scale != 0 {
            return Err(SupresError::grid_alignment(format!(
                "patch size {patch_size} / border {border} not divisible by the {} scale {scale}",
                w.tier
            )));
        }
        if coarsest % scale != 0 {
            return Err(SupresError::grid_alignment(format!(
                "{} scale {scale} does not divide the coarsest scale {coarsest}",
                w.tier
            )));
        }
        if w.stack.height() * scale != fine_h || w.stack.width() * scale != fine_w {
            return Err(SupresError::grid_alignment(format!(
                "{} window of {}x{} does not match the 10m window of {}x{}",
                w.tier,
                w.stack.width(),
                w.stack.height(),
                fine_w,
                fine_h
            )));
        }
    }

    // Plan once in coarsest-tier pixels; the padded shape there decides the
    // grid for every tier.
    let grid = plan(
        fine_h / coarsest + 2 * (border / coarsest),
        fine_w / coarsest + 2 * (border / coarsest),
        patch_size / coarsest,
        border / coarsest,
    )?;

    let mut batches = Vec::with_capacity(windows.len());
    for w in windows {
        let scale = w.tier.scale();
        let tier_patch = patch_size / scale;
        let factor = coarsest / scale;

        let padded = pad_symmetric(&w.stack, border / scale)?;
        let mut patches = Vec::with_capacity(grid.len());
        for origin in grid.origins() {
            patches.push(padded.window(
                origin.row * factor,
                origin.col * factor,
                tier_patch,
                tier_patch,
            ));
        }

        // Bring coarse patches up to the FINE patch dimensions. The parallel
        // map preserves batch order.
        if scale > 1 {
            patches = patches
                .into_par_iter()
                .map(|p| upsample_patch(&p, scale))
                .collect();
        }

        debug!(
            tier = %w.tier,
            patches = patches.len(),
            patch_size,
            "extracted patch batch"
        );
        batches.push(PatchBatch::new(patches));
    }

    Ok(batches)
}
