//! Coordinate conversions for georeferenced rasters.
//!
//! Implements the 2x3 affine pixel/world transform and a from-scratch UTM
//! (transverse Mercator) forward projection. The projection side is exposed
//! behind the [`CrsProjector`] trait so callers treat it as an opaque
//! lon/lat -> projected-coordinate function.

pub mod transform;
pub mod utm;

pub use transform::AffineTransform;
pub use utm::UtmProjector;

use supres_common::SupresResult;

/// Black-box forward projection from WGS84 lon/lat degrees into a raster's
/// native projected coordinate system.
pub trait CrsProjector {
    fn project(&self, lon: f64, lat: f64) -> SupresResult<(f64, f64)>;
}
