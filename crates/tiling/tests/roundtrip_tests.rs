//! Extraction/reconstruction round-trip properties.
//!
//! Feeding the extracted FINE patches straight back into the reconstructor
//! (an identity "model") must reproduce the original window exactly: the
//! mirrored borders are stripped and the overlapping cores line up.

use supres_common::{BandStack, ResolutionTier};
use test_utils::{checker_stack, ramp_stack, three_tier_scene, two_tier_scene};
use tiling::{extract_batches, reconstruct, TierWindow};

fn tier_windows(scene: Vec<(ResolutionTier, BandStack)>) -> Vec<TierWindow> {
    scene
        .into_iter()
        .map(|(tier, stack)| TierWindow::new(tier, stack))
        .collect()
}

fn roundtrip(size: usize, patch_size: usize, border: usize) {
    let original = ramp_stack(3, size, size);
    let windows = vec![TierWindow::new(ResolutionTier::Fine, original.clone())];

    let batches = extract_batches(&windows, patch_size, border).unwrap();
    let restored = reconstruct(&batches[0].patches, border, size, size).unwrap();

    assert_eq!(restored.height(), size);
    assert_eq!(restored.width(), size);
    assert_eq!(
        restored, original,
        "round trip altered the image for size {size}, patch {patch_size}, border {border}"
    );
}

#[test]
fn test_roundtrip_stride_divisible() {
    // 224 = 2 * 112: the grid needs no clamped origin.
    roundtrip(224, 128, 8);
}

#[test]
fn test_roundtrip_with_clamped_origin() {
    // 300 is not a multiple of the 112 stride; the flush origin path runs
    // and the overlap overwrite must still reproduce identity.
    roundtrip(300, 128, 8);
}

#[test]
fn test_roundtrip_model60_constants() {
    // The 192/12 geometry used for three-tier runs.
    roundtrip(336, 192, 12);
}

#[test]
fn test_roundtrip_checkerboard() {
    // Band-limited content instead of positional encoding: block edges cross
    // patch seams, so any off-by-one in the stitch shows as a shifted block.
    let original = checker_stack(2, 300, 300);
    let windows = vec![TierWindow::new(ResolutionTier::Fine, original.clone())];

    let batches = extract_batches(&windows, 128, 8).unwrap();
    let restored = reconstruct(&batches[0].patches, 8, 300, 300).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_two_tier_counts_match() {
    let windows = tier_windows(two_tier_scene(224));
    let batches = extract_batches(&windows, 128, 8).unwrap();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), batches[1].len());
    assert_eq!(batches[1].channels(), 6);
}

#[test]
fn test_multi_tier_counts_match_prediction_grid() {
    // Predictions are index-aligned to extraction: a fabricated prediction
    // batch with the FINE patch count must reconstruct cleanly.
    let fine_size = 300;
    let windows = tier_windows(three_tier_scene(fine_size));

    let batches = extract_batches(&windows, 192, 12).unwrap();
    assert_eq!(batches[0].len(), batches[1].len());
    assert_eq!(batches[1].len(), batches[2].len());

    // Pretend the model echoed the MID tier (already upsampled to 192x192).
    let predicted = batches[1].patches.clone();
    let image = reconstruct(&predicted, 12, fine_size, fine_size).unwrap();
    assert_eq!(image.channels(), 6);
    assert_eq!(image.height(), fine_size);
}
