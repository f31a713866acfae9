//! End-to-end super-resolution run.

use projection::AffineTransform;
use supres_common::{BandStack, ResolutionTier, SupresError, SupresResult};
use tiling::{extract_batches, reconstruct, TierWindow};
use tracing::{debug, info};

use crate::bands::{self, BandSelection};
use crate::config::SupresConfig;
use crate::engine::InferenceEngine;
use crate::resolver;
use crate::source::RasterSource;

/// One resolution tier of the input scene, paired with its raster.
pub struct SceneTier<'a> {
    pub tier: ResolutionTier,
    pub raster: &'a dyn RasterSource,
}

impl<'a> SceneTier<'a> {
    pub fn new(tier: ResolutionTier, raster: &'a dyn RasterSource) -> Self {
        Self { tier, raster }
    }
}

/// Georeferencing metadata of the output image.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputProfile {
    /// Affine transform of the output window, derived from the 10m raster's
    /// transform shifted to the window origin.
    pub transform: AffineTransform,
    /// CRS identifier inherited from the 10m raster.
    pub crs: String,
    pub width: usize,
    pub height: usize,
    /// Number of bands in the output image.
    pub count: usize,
}

/// The super-resolved image with its band metadata.
#[derive(Debug)]
pub struct SuperresolutionOutput {
    /// Output bands at 10m resolution over the selected window.
    pub image: BandStack,
    /// Short band names, one per output channel.
    pub band_names: Vec<String>,
    /// Human-readable band descriptions, one per output channel.
    pub band_descriptions: Vec<String>,
    pub profile: OutputProfile,
}

/// Orchestrates one super-resolution run over a multi-tier scene.
pub struct Superresolution {
    config: SupresConfig,
}

impl Superresolution {
    pub fn new(config: SupresConfig) -> Self {
        Self { config }
    }

    /// Run super-resolution over `tiers` with the given inference engine.
    ///
    /// The scene must contain the 10m tier and at least one coarser tier.
    /// The engine receives one index-aligned patch batch per tier and must
    /// return predicted 10m patches whose channels are the 20m bands followed
    /// by the 60m bands.
    pub fn run(
        &self,
        tiers: &[SceneTier<'_>],
        engine: &dyn InferenceEngine,
    ) -> SupresResult<SuperresolutionOutput> {
        let fine = tiers
            .iter()
            .find(|t| t.tier == ResolutionTier::Fine)
            .ok_or_else(|| SupresError::grid_alignment("scene has no 10m tier"))?;
        if tiers.iter().all(|t| t.tier == ResolutionTier::Fine) {
            return Err(SupresError::grid_alignment(
                "scene has no tier coarser than 10m to super-resolve",
            ));
        }
        let has_coarse = tiers.iter().any(|t| t.tier == ResolutionTier::Coarse);

        // Fix the tier order here; batch alignment and the output band order
        // both follow it (10m, then 20m, then 60m).
        let mut ordered: Vec<&SceneTier<'_>> = tiers.iter().collect();
        ordered.sort_by_key(|t| t.tier.scale());

        let resolved = resolver::resolve(&self.config.region, fine.raster)?;
        if !resolved.is_valid() {
            return Err(SupresError::InvalidRegion(format!(
                "selected region {resolved} is empty after clamping to the scene"
            )));
        }
        let window = resolved.snapped_to_extent(fine.raster.width(), fine.raster.height());

        let (patch_size, border) = self.config.geometry(has_coarse);
        if window.width() < patch_size as i64 || window.height() < patch_size as i64 {
            return Err(SupresError::RegionTooSmall {
                width: window.width(),
                height: window.height(),
                min_size: patch_size,
            });
        }
        info!(
            %window,
            patch_size,
            border,
            with_60m = has_coarse,
            "starting super-resolution run"
        );

        // Read each tier's window in its own pixel grid; the snapped box
        // guarantees exact division by every tier scale.
        let mut selections: Vec<(ResolutionTier, BandSelection)> = Vec::new();
        let mut windows: Vec<TierWindow> = Vec::new();
        for scene_tier in &ordered {
            let selection = bands::validate(&scene_tier.raster.band_descriptions());
            if selection.is_empty() {
                return Err(SupresError::BandMismatch(scene_tier.tier.to_string()));
            }
            info!(
                tier = %scene_tier.tier,
                bands = ?selection.names(),
                "selected catalog bands"
            );

            let scale = scene_tier.tier.scale() as i64;
            let stack = scene_tier.raster.read_window(
                (window.x_min / scale) as usize,
                (window.y_min / scale) as usize,
                (window.width() / scale) as usize,
                (window.height() / scale) as usize,
                &selection.indices(),
            )?;
            windows.push(TierWindow::new(scene_tier.tier, stack));
            selections.push((scene_tier.tier, selection));
        }

        let batches = extract_batches(&windows, patch_size, border)?;
        debug!(
            patches = batches.first().map_or(0, |b| b.len()),
            "extracted patch batches"
        );
        let predicted = engine.infer(&batches)?;

        let sr_channels: usize = selections
            .iter()
            .filter(|(tier, _)| *tier != ResolutionTier::Fine)
            .map(|(_, sel)| sel.len())
            .sum();
        if predicted.channels() != sr_channels {
            return Err(SupresError::Inference(format!(
                "engine returned {} channels, expected {}",
                predicted.channels(),
                sr_channels
            )));
        }
        if predicted.len() != batches[0].len() {
            return Err(SupresError::grid_alignment(format!(
                "engine returned {} patches, expected {}",
                predicted.len(),
                batches[0].len()
            )));
        }

        let sr_image = reconstruct(
            &predicted.patches,
            border,
            window.height() as usize,
            window.width() as usize,
        )?;

        // Output channels: optionally the original 10m bands first, then the
        // super-resolved 20m and 60m bands in tier order.
        let mut band_names = Vec::new();
        let mut band_descriptions = Vec::new();
        let image = if self.config.copy_original_bands {
            let fine_sel = selections
                .iter()
                .find(|(tier, _)| *tier == ResolutionTier::Fine)
                .map(|(_, sel)| sel)
                .ok_or_else(|| SupresError::grid_alignment("missing 10m band selection"))?;
            for m in fine_sel.matches() {
                band_names.push(m.name.clone());
                band_descriptions.push(m.description.clone());
            }
            let fine_window = windows
                .iter()
                .find(|w| w.tier == ResolutionTier::Fine)
                .ok_or_else(|| SupresError::grid_alignment("missing 10m window"))?;
            fine_window.stack.concat_channels(&sr_image)
        } else {
            sr_image
        };
        for (tier, selection) in &selections {
            if *tier == ResolutionTier::Fine {
                continue;
            }
            for m in selection.matches() {
                band_names.push(format!("SR {}", m.name));
                band_descriptions.push(format!("SR {}", m.description));
            }
        }

        let profile = OutputProfile {
            transform: fine
                .raster
                .transform()
                .translated(window.x_min as f64, window.y_min as f64),
            crs: fine.raster.crs(),
            width: window.width() as usize,
            height: window.height() as usize,
            count: image.channels(),
        };
        info!(
            width = profile.width,
            height = profile.height,
            bands = profile.count,
            "super-resolution run finished"
        );

        Ok(SuperresolutionOutput {
            image,
            band_names,
            band_descriptions,
            profile,
        })
    }
}
