//! Super-resolution orchestration.
//!
//! Ties the pieces together: resolve the requested region to a snapped pixel
//! box, select catalog bands per resolution tier, read the tier windows,
//! extract aligned patch batches, hand them to the external inference engine
//! and reconstruct the predicted patches into one georeferenced image.
//!
//! Raster I/O and the model itself stay behind the [`RasterSource`] and
//! [`InferenceEngine`] traits; this crate never touches files or weights.

pub mod bands;
pub mod config;
pub mod engine;
pub mod pipeline;
pub mod resolver;
pub mod source;

pub use bands::{band_short_name, validate_description, BandMatch, BandSelection};
pub use config::SupresConfig;
pub use engine::InferenceEngine;
pub use pipeline::{OutputProfile, SceneTier, Superresolution, SuperresolutionOutput};
pub use source::RasterSource;
