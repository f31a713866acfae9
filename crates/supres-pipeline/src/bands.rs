//! Band catalog matching.
//!
//! Sentinel-2 rasters describe their bands with free-text strings such as
//! `"B4, central wavelength 665 nm"`. This module normalizes those
//! descriptions, derives short band names and matches them against the
//! canonical multispectral catalog, yielding a stable ordered subset of
//! raster band indices per resolution tier.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// The canonical Sentinel-2 multispectral band catalog.
pub const SENTINEL2_BANDS: [&str; 12] = [
    "B1", "B2", "B3", "B4", "B5", "B6", "B7", "B8", "B8A", "B9", "B11", "B12",
];

static WAVELENGTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?), central wavelength (\d+) nm").expect("wavelength pattern is valid")
});

/// One matched band: canonical name, raster band index (0-based, storage
/// order) and the normalized human-readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandMatch {
    pub name: String,
    pub index: usize,
    pub description: String,
}

/// The ordered set of catalog bands found in one tier's raster.
///
/// Matches follow raster storage order, so indices are strictly increasing.
/// Catalog names absent from the raster are simply missing; the selection is
/// a subset, never padded.
#[derive(Debug, Clone, Default)]
pub struct BandSelection {
    matches: Vec<BandMatch>,
}

impl BandSelection {
    pub fn matches(&self) -> &[BandMatch] {
        &self.matches
    }

    /// Short band names, raster storage order.
    pub fn names(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.name.as_str()).collect()
    }

    /// Raster band indices, strictly increasing.
    pub fn indices(&self) -> Vec<usize> {
        self.matches.iter().map(|m| m.index).collect()
    }

    /// Normalized description for a band name, if matched.
    pub fn description_of(&self, name: &str) -> Option<&str> {
        self.matches
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.description.as_str())
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Rewrite a raw band description into the normalized form:
///
/// ```
/// use supres_pipeline::validate_description;
///
/// assert_eq!(
///     validate_description("B4, central wavelength 665 nm"),
///     "B4 (665 nm)"
/// );
/// // Descriptions without the wavelength pattern pass through unchanged.
/// assert_eq!(validate_description("TCI"), "TCI");
/// ```
pub fn validate_description(description: &str) -> String {
    match WAVELENGTH_RE.captures(description) {
        Some(caps) => format!("{} ({} nm)", &caps[1], &caps[2]),
        None => description.to_string(),
    }
}

/// Derive the short band name from a normalized description: the substring
/// before the first comma, else before the first space, else the first three
/// characters.
pub fn band_short_name(description: &str) -> &str {
    if let Some(pos) = description.find(',') {
        return &description[..pos];
    }
    if let Some(pos) = description.find(' ') {
        return &description[..pos];
    }
    // Descriptions are arbitrary free text; cut on a char boundary.
    match description.char_indices().nth(3) {
        Some((i, _)) => &description[..i],
        None => description,
    }
}

/// Match a raster's band descriptions against the canonical catalog.
///
/// Bands are scanned in storage order; every matched name is removed from a
/// local remaining-name pool so a duplicate description cannot claim the same
/// catalog slot twice. Unmatched raster bands are skipped silently.
pub fn validate(descriptions: &[String]) -> BandSelection {
    let mut remaining: Vec<&str> = SENTINEL2_BANDS.to_vec();
    let mut matches = Vec::new();

    for (index, raw) in descriptions.iter().enumerate() {
        let description = validate_description(raw);
        let name = band_short_name(&description).to_string();
        if let Some(pos) = remaining.iter().position(|&b| b == name) {
            remaining.remove(pos);
            matches.push(BandMatch {
                name,
                index,
                description,
            });
        } else {
            debug!(band = %raw, index, "skipping band not in catalog");
        }
    }

    BandSelection { matches }
}
