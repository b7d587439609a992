//! # Color Matcher
//!
//! A Rust crate for sampling colors from image regions and matching
//! user-chosen colors against them.
//!
//! This library provides:
//! - Trimmed-mean sampling that reduces a pixel rectangle to one color,
//!   ignoring transparent pixels and brightness outliers
//! - Ranking of candidate colors against sampled regions by RGB distance,
//!   with 0-100 match percentages
//! - The average color across all sampled regions
//! - A [`Session`] store holding regions and candidates for a UI shell
//!
//! ## Example
//!
//! ```rust
//! use color_matcher::{rank, sample, Candidate, Rect, Region};
//! use image::Rgba;
//!
//! let pixels = vec![Rgba([250u8, 10, 10, 255]); 64];
//! let red = sample(&pixels);
//! assert_eq!(red.to_hex(), "#FA0A0A");
//!
//! let regions = vec![Region::new(1, Rect::new(0.0, 0.0, 8.0, 8.0), Some(red))];
//! let candidates = vec![Candidate::from_hex(1, "#FF0000")];
//! let report = rank(&regions, &candidates)?;
//! println!("Best: {:?}", report.best_for_candidate(1));
//! # Ok::<(), color_matcher::MatchError>(())
//! ```

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod matching;
pub mod region;
pub mod session;

pub use color::{Color, Pixel, RegionSampler, SampleResult};
pub use config::MatcherConfig;
pub use error::{MatchError, Result};
pub use matching::{Candidate, CandidateId, MatchRanker, MatchResult, RankingReport};
pub use region::{Rect, Region, RegionId};
pub use session::Session;

/// Representative color of a pixel region using default parameters
///
/// Never fails: a region without opaque pixels yields white.
pub fn sample(pixels: &[Pixel]) -> Color {
    RegionSampler::new().sample(pixels)
}

/// Rank candidates against sampled regions using default parameters
///
/// # Errors
///
/// Returns `MatchError::NoRegions` if no region has been sampled yet.
/// Unparsable candidates are skipped, not reported as errors.
pub fn rank(regions: &[Region], candidates: &[Candidate]) -> Result<RankingReport> {
    MatchRanker::new().rank(regions, candidates)
}

/// Average color across sampled regions, `None` if there are none
pub fn average(regions: &[Region]) -> Option<Color> {
    matching::average(regions)
}
