//! End-to-end pipeline tests over synthetic scenes.

use projection::AffineTransform;
use supres_common::{BandStack, RegionSpec, ResolutionTier, SupresError, SupresResult};
use supres_pipeline::{
    InferenceEngine, RasterSource, SceneTier, Superresolution, SupresConfig,
};
use tiling::PatchBatch;

// ============================================================
// Mocks
// ============================================================

/// In-memory raster over a synthetic band stack.
struct MockRaster {
    stack: BandStack,
    descriptions: Vec<String>,
    transform: AffineTransform,
}

impl MockRaster {
    fn new(stack: BandStack, descriptions: &[&str], pixel_size: f64) -> Self {
        Self {
            stack,
            descriptions: descriptions.iter().map(|s| s.to_string()).collect(),
            transform: AffineTransform::north_up(399_960.0, 5_100_000.0, pixel_size, pixel_size),
        }
    }
}

impl RasterSource for MockRaster {
    fn width(&self) -> usize {
        self.stack.width()
    }

    fn height(&self) -> usize {
        self.stack.height()
    }

    fn transform(&self) -> AffineTransform {
        self.transform
    }

    fn crs(&self) -> String {
        "EPSG:32633".to_string()
    }

    fn band_descriptions(&self) -> Vec<String> {
        self.descriptions.clone()
    }

    fn read_window(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        bands: &[usize],
    ) -> SupresResult<BandStack> {
        if x + width > self.stack.width() || y + height > self.stack.height() {
            return Err(SupresError::source("window outside raster"));
        }
        let mut data = Vec::with_capacity(bands.len() * height * width);
        for &b in bands {
            for row in 0..height {
                data.extend_from_slice(&self.stack.row(b, y + row)[x..x + width]);
            }
        }
        Ok(BandStack::from_data(data, bands.len(), height, width))
    }
}

/// Engine that passes the coarser tiers straight through, concatenating their
/// channels per patch. The output image then carries the (upsampled) input
/// values, which the tests can predict exactly.
struct PassthroughEngine;

impl InferenceEngine for PassthroughEngine {
    fn infer(&self, tier_batches: &[PatchBatch]) -> SupresResult<PatchBatch> {
        let coarser = &tier_batches[1..];
        let count = coarser[0].len();
        let mut patches = Vec::with_capacity(count);
        for i in 0..count {
            let mut patch = coarser[0].patches[i].clone();
            for batch in &coarser[1..] {
                patch = patch.concat_channels(&batch.patches[i]);
            }
            patches.push(patch);
        }
        Ok(PatchBatch::new(patches))
    }
}

/// A stack where channel `c` is uniformly `(c + 1) * 100`; constant surfaces
/// survive mirroring, bilinear upsampling and stitching unchanged.
fn flat_stack(channels: usize, height: usize, width: usize) -> BandStack {
    let mut data = Vec::with_capacity(channels * height * width);
    for c in 0..channels {
        data.extend(std::iter::repeat(((c + 1) * 100) as f32).take(height * width));
    }
    BandStack::from_data(data, channels, height, width)
}

const FINE_BANDS: [&str; 4] = [
    "B4, central wavelength 665 nm",
    "B3, central wavelength 560 nm",
    "B2, central wavelength 490 nm",
    "B8, central wavelength 842 nm",
];

const MID_BANDS: [&str; 6] = [
    "B5, central wavelength 705 nm",
    "B6, central wavelength 740 nm",
    "B7, central wavelength 783 nm",
    "B8A, central wavelength 865 nm",
    "B11, central wavelength 1610 nm",
    "B12, central wavelength 2190 nm",
];

const COARSE_BANDS: [&str; 2] = [
    "B1, central wavelength 443 nm",
    "B9, central wavelength 945 nm",
];

fn two_tier_rasters(fine_size: usize) -> (MockRaster, MockRaster) {
    (
        MockRaster::new(
            test_utils::ramp_stack(4, fine_size, fine_size),
            &FINE_BANDS,
            10.0,
        ),
        MockRaster::new(
            flat_stack(6, fine_size / 2, fine_size / 2),
            &MID_BANDS,
            20.0,
        ),
    )
}

// ============================================================
// Happy paths
// ============================================================

#[test]
fn test_two_tier_pixel_roi() {
    let (fine, mid) = two_tier_rasters(400);
    let config = SupresConfig {
        region: RegionSpec::Pixels {
            x_1: 60,
            y_1: 60,
            x_2: 359,
            y_2: 359,
        },
        ..SupresConfig::default()
    };

    let tiers = [
        SceneTier::new(ResolutionTier::Fine, &fine),
        SceneTier::new(ResolutionTier::Mid, &mid),
    ];
    let out = Superresolution::new(config)
        .run(&tiers, &PassthroughEngine)
        .unwrap();

    assert_eq!(out.profile.width, 300);
    assert_eq!(out.profile.height, 300);
    assert_eq!(out.profile.count, 6);
    assert_eq!(out.profile.crs, "EPSG:32633");
    // Window origin (60, 60) in 10m pixels.
    assert_eq!(out.profile.transform.c, 399_960.0 + 60.0 * 10.0);
    assert_eq!(out.profile.transform.f, 5_100_000.0 - 60.0 * 10.0);

    assert_eq!(
        out.band_names,
        vec!["SR B5", "SR B6", "SR B7", "SR B8A", "SR B11", "SR B12"]
    );
    assert_eq!(out.band_descriptions[0], "SR B5 (705 nm)");
    assert_eq!(out.band_descriptions[5], "SR B12 (2190 nm)");

    // Constant input surfaces come back unchanged per channel.
    assert_eq!(out.image.channels(), 6);
    assert_eq!(out.image.height(), 300);
    for c in 0..6 {
        let expected = ((c + 1) * 100) as f32;
        assert_eq!(out.image.get(c, 0, 0), expected);
        assert_eq!(out.image.get(c, 150, 150), expected);
        assert_eq!(out.image.get(c, 299, 299), expected);
    }
}

#[test]
fn test_three_tier_full_scene() {
    let fine = MockRaster::new(test_utils::ramp_stack(4, 264, 264), &FINE_BANDS, 10.0);
    let mid = MockRaster::new(flat_stack(6, 132, 132), &MID_BANDS, 20.0);
    let coarse = MockRaster::new(flat_stack(2, 44, 44), &COARSE_BANDS, 60.0);

    let tiers = [
        SceneTier::new(ResolutionTier::Fine, &fine),
        SceneTier::new(ResolutionTier::Mid, &mid),
        SceneTier::new(ResolutionTier::Coarse, &coarse),
    ];
    let out = Superresolution::new(SupresConfig::default())
        .run(&tiers, &PassthroughEngine)
        .unwrap();

    assert_eq!(out.profile.width, 264);
    assert_eq!(out.profile.height, 264);
    assert_eq!(out.profile.count, 8);
    assert_eq!(out.profile.transform.c, 399_960.0);
    assert_eq!(out.band_names.len(), 8);
    assert_eq!(out.band_names[6], "SR B1");
    assert_eq!(out.band_names[7], "SR B9");
    assert_eq!(out.band_descriptions[6], "SR B1 (443 nm)");
}

#[test]
fn test_tier_order_does_not_matter() {
    let fine = MockRaster::new(test_utils::ramp_stack(4, 264, 264), &FINE_BANDS, 10.0);
    let mid = MockRaster::new(flat_stack(6, 132, 132), &MID_BANDS, 20.0);
    let coarse = MockRaster::new(flat_stack(2, 44, 44), &COARSE_BANDS, 60.0);

    // Coarse listed first; the output band order is still 20m then 60m.
    let tiers = [
        SceneTier::new(ResolutionTier::Coarse, &coarse),
        SceneTier::new(ResolutionTier::Fine, &fine),
        SceneTier::new(ResolutionTier::Mid, &mid),
    ];
    let out = Superresolution::new(SupresConfig::default())
        .run(&tiers, &PassthroughEngine)
        .unwrap();

    assert_eq!(out.band_names[0], "SR B5");
    assert_eq!(out.band_names[6], "SR B1");
    // Channel values follow the same order.
    assert_eq!(out.image.get(0, 10, 10), 100.0);
    assert_eq!(out.image.get(6, 10, 10), 100.0);
    assert_eq!(out.image.get(7, 10, 10), 200.0);
}

#[test]
fn test_copy_original_bands_prepended() {
    let (fine, mid) = two_tier_rasters(256);
    let config = SupresConfig {
        copy_original_bands: true,
        ..SupresConfig::default()
    };

    let tiers = [
        SceneTier::new(ResolutionTier::Fine, &fine),
        SceneTier::new(ResolutionTier::Mid, &mid),
    ];
    let out = Superresolution::new(config)
        .run(&tiers, &PassthroughEngine)
        .unwrap();

    assert_eq!(out.profile.count, 10);
    assert_eq!(
        out.band_names[..4],
        ["B4", "B3", "B2", "B8"].map(String::from)
    );
    assert_eq!(out.band_names[4], "SR B5");
    assert_eq!(out.band_descriptions[0], "B4 (665 nm)");

    // The first four channels are the untouched 10m window.
    assert_eq!(out.image.get(0, 0, 0), 0.0);
    assert_eq!(out.image.get(0, 5, 7), 5_007.0);
    assert_eq!(out.image.get(3, 5, 7), 305_007.0);
    // The appended channels carry the 20m passthrough values.
    assert_eq!(out.image.get(4, 5, 7), 100.0);
}

// ============================================================
// Error paths
// ============================================================

#[test]
fn test_unmatched_bands_rejected() {
    let fine = MockRaster::new(test_utils::ramp_stack(4, 256, 256), &FINE_BANDS, 10.0);
    let mid = MockRaster::new(flat_stack(2, 128, 128), &["TCI", "AOT"], 20.0);

    let tiers = [
        SceneTier::new(ResolutionTier::Fine, &fine),
        SceneTier::new(ResolutionTier::Mid, &mid),
    ];
    let err = Superresolution::new(SupresConfig::default())
        .run(&tiers, &PassthroughEngine)
        .unwrap_err();
    assert!(matches!(err, SupresError::BandMismatch(ref tier) if tier == "20m"));
}

#[test]
fn test_collapsed_region_rejected() {
    let (fine, mid) = two_tier_rasters(256);
    let config = SupresConfig {
        region: RegionSpec::Pixels {
            x_1: 100,
            y_1: 100,
            x_2: 100,
            y_2: 100,
        },
        ..SupresConfig::default()
    };

    let tiers = [
        SceneTier::new(ResolutionTier::Fine, &fine),
        SceneTier::new(ResolutionTier::Mid, &mid),
    ];
    let err = Superresolution::new(config)
        .run(&tiers, &PassthroughEngine)
        .unwrap_err();
    assert!(matches!(err, SupresError::InvalidRegion(_)));
    assert!(err.is_user_error());
}

#[test]
fn test_region_smaller_than_patch_rejected() {
    let (fine, mid) = two_tier_rasters(256);
    let config = SupresConfig {
        region: RegionSpec::Pixels {
            x_1: 0,
            y_1: 0,
            x_2: 60,
            y_2: 60,
        },
        ..SupresConfig::default()
    };

    let tiers = [
        SceneTier::new(ResolutionTier::Fine, &fine),
        SceneTier::new(ResolutionTier::Mid, &mid),
    ];
    let err = Superresolution::new(config)
        .run(&tiers, &PassthroughEngine)
        .unwrap_err();
    assert!(matches!(
        err,
        SupresError::RegionTooSmall {
            width: 60,
            height: 60,
            min_size: 128,
        }
    ));
}

#[test]
fn test_scene_without_coarser_tier_rejected() {
    let fine = MockRaster::new(test_utils::ramp_stack(4, 256, 256), &FINE_BANDS, 10.0);
    let tiers = [SceneTier::new(ResolutionTier::Fine, &fine)];
    let err = Superresolution::new(SupresConfig::default())
        .run(&tiers, &PassthroughEngine)
        .unwrap_err();
    assert!(matches!(err, SupresError::GridAlignment(_)));
}

#[test]
fn test_engine_channel_mismatch_reported() {
    struct WrongChannels;
    impl InferenceEngine for WrongChannels {
        fn infer(&self, tier_batches: &[PatchBatch]) -> SupresResult<PatchBatch> {
            // Echo the 10m batch: four channels where six are expected.
            Ok(tier_batches[0].clone())
        }
    }

    let (fine, mid) = two_tier_rasters(256);
    let tiers = [
        SceneTier::new(ResolutionTier::Fine, &fine),
        SceneTier::new(ResolutionTier::Mid, &mid),
    ];
    let err = Superresolution::new(SupresConfig::default())
        .run(&tiers, &WrongChannels)
        .unwrap_err();
    assert!(matches!(err, SupresError::Inference(_)));
}
