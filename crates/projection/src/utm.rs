//! Universal Transverse Mercator forward projection.
//!
//! Sentinel-2 scenes are delivered on WGS84 UTM grids, one zone per tile.
//! This module implements the standard ellipsoidal transverse Mercator
//! series (Snyder, "Map Projections - A Working Manual", eq. 8-9..8-15)
//! which is accurate to well under a millimeter inside a zone.

use supres_common::{SupresError, SupresResult};

use crate::CrsProjector;

// WGS84 ellipsoid.
const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
const FLATTENING: f64 = 1.0 / 298.257_223_563;

// UTM constants.
const SCALE_FACTOR: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Forward projection into one UTM zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtmProjector {
    zone: u8,
    north: bool,
}

impl UtmProjector {
    /// Create a projector for a zone (1..=60) and hemisphere.
    pub fn new(zone: u8, north: bool) -> SupresResult<Self> {
        if zone == 0 || zone > 60 {
            return Err(SupresError::UnsupportedCrs(format!(
                "UTM zone {zone} out of range"
            )));
        }
        Ok(Self { zone, north })
    }

    /// Parse an EPSG identifier of the form `EPSG:326xx` (north) or
    /// `EPSG:327xx` (south), case-insensitive.
    pub fn from_epsg(code: &str) -> SupresResult<Self> {
        let digits = code
            .trim()
            .to_ascii_uppercase()
            .strip_prefix("EPSG:")
            .map(str::to_owned)
            .ok_or_else(|| SupresError::UnsupportedCrs(code.to_string()))?;
        let number: u32 = digits
            .parse()
            .map_err(|_| SupresError::UnsupportedCrs(code.to_string()))?;

        match number {
            32601..=32660 => Self::new((number - 32600) as u8, true),
            32701..=32760 => Self::new((number - 32700) as u8, false),
            _ => Err(SupresError::UnsupportedCrs(code.to_string())),
        }
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    /// Central meridian of the zone in degrees.
    pub fn central_meridian_deg(&self) -> f64 {
        self.zone as f64 * 6.0 - 183.0
    }
}

impl CrsProjector for UtmProjector {
    fn project(&self, lon: f64, lat: f64) -> SupresResult<(f64, f64)> {
        if !(-80.0..=84.0).contains(&lat) {
            return Err(SupresError::UnsupportedCrs(format!(
                "latitude {lat} outside UTM validity range"
            )));
        }

        let e2 = FLATTENING * (2.0 - FLATTENING);
        let ep2 = e2 / (1.0 - e2);

        let phi = lat.to_radians();
        let lam = lon.to_radians();
        let lam0 = self.central_meridian_deg().to_radians();

        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let tan_phi = phi.tan();

        // Radius of curvature in the prime vertical.
        let n = SEMI_MAJOR_AXIS / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = ep2 * cos_phi * cos_phi;
        let a = (lam - lam0) * cos_phi;

        // Meridian arc length from the equator.
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let m = SEMI_MAJOR_AXIS
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * phi).sin());

        let a2 = a * a;
        let a3 = a2 * a;
        let a4 = a3 * a;
        let a5 = a4 * a;
        let a6 = a5 * a;

        let easting = SCALE_FACTOR
            * n
            * (a + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0)
            + FALSE_EASTING;

        let mut northing = SCALE_FACTOR
            * (m + n
                * tan_phi
                * (a2 / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));
        if !self.north {
            northing += FALSE_NORTHING_SOUTH;
        }

        Ok((easting, northing))
    }
}
