//! Resolution tiers of a Sentinel-2 scene.

use serde::{Deserialize, Serialize};

/// One of the three Sentinel-2 spatial resolution tiers.
///
/// Every tier carries an integer scale factor relative to the finest (10m)
/// tier. All pixel arithmetic in this workspace is expressed in FINE pixels
/// and divided down by `scale()` when addressing a coarser tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionTier {
    /// 10m ground sample distance (B2, B3, B4, B8).
    Fine,
    /// 20m ground sample distance (B5, B6, B7, B8A, B11, B12).
    Mid,
    /// 60m ground sample distance (B1, B9).
    Coarse,
}

impl ResolutionTier {
    /// Integer scale factor relative to the FINE tier.
    pub fn scale(&self) -> usize {
        match self {
            Self::Fine => 1,
            Self::Mid => 2,
            Self::Coarse => 6,
        }
    }

    /// Ground sample distance in meters.
    pub fn ground_sample_distance_m(&self) -> usize {
        match self {
            Self::Fine => 10,
            Self::Mid => 20,
            Self::Coarse => 60,
        }
    }
}

impl std::fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m", self.ground_sample_distance_m())
    }
}
