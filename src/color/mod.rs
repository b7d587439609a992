//! Color value and sampling module
//!
//! This module handles hex conversion and distance between colors, and the
//! trimmed-mean reduction of a pixel region to a single color.

pub mod analysis;
pub mod conversion;

pub use analysis::{Pixel, RegionSampler, SampleResult};
pub use conversion::{match_percentage, Color, WHITE};
