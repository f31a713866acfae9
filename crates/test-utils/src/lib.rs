//! Shared test utilities for the s2-supres workspace.
//!
//! Synthetic multi-tier scenes with predictable values, so tests can verify
//! index arithmetic without golden files.

pub mod generators;

pub use generators::{checker_stack, ramp_stack, three_tier_scene, two_tier_scene};
