//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use supres_common::{RegionSpec, SupresError, SupresResult};

/// Environment variable carrying the JSON task-parameter blob.
pub const TASK_PARAMETERS_VAR: &str = "SUPRES_TASK_PARAMETERS";

// Patch geometry the published model weights were trained with.
const PATCH_SIZE_WITH_60M: usize = 192;
const BORDER_WITH_60M: usize = 12;
const PATCH_SIZE_20M_ONLY: usize = 128;
const BORDER_20M_ONLY: usize = 8;

/// Configuration for one super-resolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupresConfig {
    /// Requested area of interest.
    pub region: RegionSpec,

    /// Override the model patch size (FINE pixels). Defaults per tier set.
    pub patch_size: Option<usize>,

    /// Override the mirrored patch border (FINE pixels). Defaults per tier
    /// set.
    pub border: Option<usize>,

    /// Also carry the original 10m bands into the output image.
    pub copy_original_bands: bool,
}

impl Default for SupresConfig {
    fn default() -> Self {
        Self {
            region: RegionSpec::FullScene,
            patch_size: None,
            border: None,
            copy_original_bands: false,
        }
    }
}

/// Wire format of the task-parameter blob. `roi_x_y` wins over
/// `roi_lon_lat`; both absent means the full scene.
#[derive(Debug, Deserialize)]
struct TaskParameters {
    roi_x_y: Option<[i64; 4]>,
    roi_lon_lat: Option<[f64; 4]>,
    #[serde(default)]
    copy_original_bands: bool,
    patch_size: Option<usize>,
    border: Option<usize>,
}

impl SupresConfig {
    /// Load configuration from the task-parameter environment variable.
    /// An unset or empty variable yields the defaults.
    pub fn from_env() -> SupresResult<Self> {
        match std::env::var(TASK_PARAMETERS_VAR) {
            Ok(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }

    /// Parse a task-parameter JSON blob.
    pub fn from_json(raw: &str) -> SupresResult<Self> {
        let params: TaskParameters = serde_json::from_str(raw)
            .map_err(|e| SupresError::Config(format!("invalid task parameters: {e}")))?;

        let region = if let Some([x_1, y_1, x_2, y_2]) = params.roi_x_y {
            RegionSpec::Pixels { x_1, y_1, x_2, y_2 }
        } else if let Some([lon_1, lat_1, lon_2, lat_2]) = params.roi_lon_lat {
            RegionSpec::LonLat {
                lon_1,
                lat_1,
                lon_2,
                lat_2,
            }
        } else {
            RegionSpec::FullScene
        };

        Ok(Self {
            region,
            patch_size: params.patch_size,
            border: params.border,
            copy_original_bands: params.copy_original_bands,
        })
    }

    /// The effective patch geometry `(patch_size, border)` for a run, given
    /// whether the 60m tier participates.
    pub fn geometry(&self, with_coarse: bool) -> (usize, usize) {
        let (default_patch, default_border) = if with_coarse {
            (PATCH_SIZE_WITH_60M, BORDER_WITH_60M)
        } else {
            (PATCH_SIZE_20M_ONLY, BORDER_20M_ONLY)
        };
        (
            self.patch_size.unwrap_or(default_patch),
            self.border.unwrap_or(default_border),
        )
    }
}
