//! Region-of-interest specification.

use serde::{Deserialize, Serialize};

/// A user-specified area of interest.
///
/// Corners are arbitrary opposite corners, in any order; the resolver sorts
/// and snaps them. Absence of an explicit region means the whole scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RegionSpec {
    /// Two opposite corners in FINE-tier pixel coordinates.
    Pixels { x_1: i64, y_1: i64, x_2: i64, y_2: i64 },
    /// Two opposite corners in WGS84 longitude/latitude degrees.
    LonLat {
        lon_1: f64,
        lat_1: f64,
        lon_2: f64,
        lat_2: f64,
    },
    /// The full raster extent.
    FullScene,
}

impl Default for RegionSpec {
    fn default() -> Self {
        Self::FullScene
    }
}

impl std::fmt::Display for RegionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pixels { x_1, y_1, x_2, y_2 } => {
                write!(f, "pixels ({x_1}, {y_1}) - ({x_2}, {y_2})")
            }
            Self::LonLat {
                lon_1,
                lat_1,
                lon_2,
                lat_2,
            } => write!(f, "lon/lat ({lon_1}, {lat_1}) - ({lon_2}, {lat_2})"),
            Self::FullScene => write!(f, "full scene"),
        }
    }
}
