//! Raster source abstraction.

use projection::AffineTransform;
use supres_common::{BandStack, SupresResult};

/// One resolution tier's raster, as exposed by the surrounding application's
/// I/O layer (file formats and drivers are not this crate's concern).
///
/// Pixel dimensions and windows are tier-local; the pipeline divides the
/// FINE-tier pixel box down by the tier scale before calling
/// [`RasterSource::read_window`].
pub trait RasterSource {
    /// Raster width in tier-local pixels.
    fn width(&self) -> usize;

    /// Raster height in tier-local pixels.
    fn height(&self) -> usize;

    /// Affine pixel-to-projected-coordinate transform.
    fn transform(&self) -> AffineTransform;

    /// Native CRS identifier, e.g. `"EPSG:32633"`.
    fn crs(&self) -> String;

    /// Free-text per-band descriptions in storage order.
    fn band_descriptions(&self) -> Vec<String>;

    /// Read a `width x height` window at `(x, y)`, restricted to the given
    /// 0-based band indices, as a channel-first stack in index order.
    fn read_window(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        bands: &[usize],
    ) -> SupresResult<BandStack>;
}
