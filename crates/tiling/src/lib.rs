//! Multi-resolution tiling engine.
//!
//! This crate decomposes a resolution tier's raster window into a grid of
//! fixed-size, overlapping, border-mirrored patches and reassembles per-patch
//! model outputs into one contiguous array of the original window shape.
//!
//! ```text
//! TierWindow (per tier)
//!      │
//!      ├─► pad_symmetric(border)          mirror the window at its edges
//!      │
//!      ├─► plan(padded shape)             ordered row-major patch origins
//!      │
//!      ├─► slice patches per origin       one PatchBatch per tier
//!      │
//!      └─► upsample coarse patches        bilinear, to FINE patch size
//!               │
//!               ▼
//!      [external inference engine]
//!               │
//!               ▼
//!      reconstruct(predicted batch)       interiors stitched, borders dropped
//! ```
//!
//! The row-major origin order produced by [`plan`] is the alignment contract
//! between extraction and reconstruction: patch *i* of every tier's batch and
//! patch *i* of the prediction refer to the same grid cell.

pub mod extract;
pub mod interpolation;
pub mod mirror;
pub mod planner;
pub mod reconstruct;

pub use extract::{extract_batches, PatchBatch, TierWindow};
pub use interpolation::upsample_patch;
pub use mirror::pad_symmetric;
pub use planner::{plan, PatchOrigin, TileGrid};
pub use reconstruct::reconstruct;
