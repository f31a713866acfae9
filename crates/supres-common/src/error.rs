//! Error taxonomy for the s2-supres workspace.

use thiserror::Error;

/// Result type alias using SupresError.
pub type SupresResult<T> = Result<T, SupresError>;

/// Primary error type for super-resolution operations.
#[derive(Debug, Error)]
pub enum SupresError {
    // === User-reported region errors ===
    /// The resolved bounding box collapsed to an empty region.
    #[error("invalid region of interest: {0}")]
    InvalidRegion(String),

    /// The resolved window is smaller than the minimum patch size.
    #[error(
        "region of {width}x{height} pixels is smaller than the minimum \
         {min_size}x{min_size} window required for super-resolution"
    )]
    RegionTooSmall {
        width: i64,
        height: i64,
        min_size: usize,
    },

    // === Coordinate errors ===
    /// The raster's affine transform is not invertible.
    #[error("affine transform is singular, cannot convert coordinates to pixels")]
    SingularTransform,

    /// The raster's CRS identifier is not usable for projection.
    #[error("unsupported CRS: {0}")]
    UnsupportedCrs(String),

    // === Band errors ===
    /// A required resolution tier matched zero catalog bands.
    #[error("no matching bands for the {0} resolution, no super-resolution performed")]
    BandMismatch(String),

    // === Configuration / programmer errors ===
    /// Tile grid arithmetic produced an inconsistent layout.
    #[error("grid alignment error: {0}")]
    GridAlignment(String),

    /// Malformed task parameters.
    #[error("configuration error: {0}")]
    Config(String),

    // === Collaborator errors ===
    /// The raster source failed to read a window.
    #[error("raster source error: {0}")]
    Source(String),

    /// The inference engine failed or returned a malformed batch.
    #[error("inference error: {0}")]
    Inference(String),
}

impl SupresError {
    /// Create a GridAlignment error.
    pub fn grid_alignment(msg: impl Into<String>) -> Self {
        Self::GridAlignment(msg.into())
    }

    /// Create a Source error.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// True when the error reports bad user input rather than a bug.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRegion(_) | Self::RegionTooSmall { .. } | Self::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_classification() {
        assert!(SupresError::InvalidRegion("empty".into()).is_user_error());
        assert!(!SupresError::SingularTransform.is_user_error());
        assert!(!SupresError::grid_alignment("stride").is_user_error());
    }

    #[test]
    fn test_region_too_small_message() {
        let err = SupresError::RegionTooSmall {
            width: 60,
            height: 60,
            min_size: 192,
        };
        assert!(err.to_string().contains("60x60"));
        assert!(err.to_string().contains("192x192"));
    }
}
