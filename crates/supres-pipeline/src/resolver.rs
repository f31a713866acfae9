//! Region-of-interest resolution.

use projection::{CrsProjector, UtmProjector};
use supres_common::{PixelBox, RegionSpec, SupresResult};
use tracing::info;

use crate::source::RasterSource;

/// Resolve a region specification against the reference (FINE) raster.
///
/// Geographic corners go through the raster's native projection; pixel
/// corners are used as-is. Either way the corners are clamped to the raster
/// extent and snapped to 60m boundaries. The full scene keeps its historical
/// unsnapped `(0, 0, width, height)` form.
///
/// The returned box may be invalid (max < min) when the requested region
/// collapsed under clamping or snapping; callers must report that as a fatal
/// invalid-region condition rather than proceed.
pub fn resolve(region: &RegionSpec, raster: &dyn RasterSource) -> SupresResult<PixelBox> {
    let resolved = match region {
        RegionSpec::LonLat { .. } => {
            let projector = UtmProjector::from_epsg(&raster.crs())?;
            resolve_with_projector(region, raster, &projector)?
        }
        _ => resolve_with_projector(region, raster, &NoProjection)?,
    };

    info!(
        x_min = resolved.x_min,
        y_min = resolved.y_min,
        x_max = resolved.x_max,
        y_max = resolved.y_max,
        area = resolved.area(),
        "selected pixel region"
    );
    Ok(resolved)
}

/// [`resolve`] with an explicit projector, for callers (and tests) that
/// bring their own CRS handling.
pub fn resolve_with_projector(
    region: &RegionSpec,
    raster: &dyn RasterSource,
    projector: &dyn CrsProjector,
) -> SupresResult<PixelBox> {
    match *region {
        RegionSpec::Pixels { x_1, y_1, x_2, y_2 } => Ok(PixelBox::clamp_and_snap(
            x_1,
            y_1,
            x_2,
            y_2,
            raster.width(),
            raster.height(),
        )),
        RegionSpec::LonLat {
            lon_1,
            lat_1,
            lon_2,
            lat_2,
        } => {
            let (x_1, y_1) = to_xy(lon_1, lat_1, raster, projector)?;
            let (x_2, y_2) = to_xy(lon_2, lat_2, raster, projector)?;
            Ok(PixelBox::clamp_and_snap(
                x_1,
                y_1,
                x_2,
                y_2,
                raster.width(),
                raster.height(),
            ))
        }
        RegionSpec::FullScene => Ok(PixelBox::full_scene(raster.width(), raster.height())),
    }
}

/// Project a lon/lat point into the raster's pixel coordinate system.
///
/// Forward-projects into the native CRS, then inverts the raster's affine
/// transform in closed form. Fractional pixel positions truncate toward
/// zero.
pub fn to_xy(
    lon: f64,
    lat: f64,
    raster: &dyn RasterSource,
    projector: &dyn CrsProjector,
) -> SupresResult<(i64, i64)> {
    let (x_w, y_w) = projector.project(lon, lat)?;
    let (col, row) = raster.transform().pixel_from_world(x_w, y_w)?;
    Ok((col as i64, row as i64))
}

/// Projector for regions that are already in pixel space; never invoked.
struct NoProjection;

impl CrsProjector for NoProjection {
    fn project(&self, _lon: f64, _lat: f64) -> SupresResult<(f64, f64)> {
        Err(supres_common::SupresError::UnsupportedCrs(
            "pixel regions need no projection".to_string(),
        ))
    }
}
