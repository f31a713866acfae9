//! Common types shared across the s2-supres workspace.
//!
//! Everything here is plain data: the resolution tier model, the pixel-space
//! bounding box with its 60m snapping rules, the channel-first `BandStack`
//! array and the shared error taxonomy. No I/O, no inference.

pub mod band_stack;
pub mod error;
pub mod pixel_box;
pub mod region;
pub mod tier;

pub use band_stack::BandStack;
pub use error::{SupresError, SupresResult};
pub use pixel_box::PixelBox;
pub use region::RegionSpec;
pub use tier::ResolutionTier;
