//! Inference engine abstraction.

use supres_common::SupresResult;
use tiling::PatchBatch;

/// The external prediction model, consumed as an opaque function.
///
/// `tier_batches` holds one index-aligned batch per active tier, finest
/// first, every patch already at the FINE spatial dimensions. The returned
/// batch must be index-aligned to the inputs: predicted patch `i` covers the
/// same grid cell as input patch `i` of every tier. Its channels are the
/// super-resolved MID bands followed by the COARSE bands (when present), in
/// the order the input batches carried them.
///
/// One call per super-resolution pass; the full batch goes in, the full
/// batch of predictions comes back. Determinism (for fixed weights) is the
/// implementor's responsibility.
pub trait InferenceEngine {
    fn infer(&self, tier_batches: &[PatchBatch]) -> SupresResult<PatchBatch>;
}
