//! Thresholds and reference values for sampling and matching
//!
//! Defaults for every tunable in [`crate::config::MatcherConfig`] live here,
//! grouped by the stage that consumes them.

/// Region sampling parameters
pub mod sampling {
    /// Pixels with alpha below this are treated as background
    pub const ALPHA_THRESHOLD: u8 = 128;

    /// Fraction of pixels dropped from each brightness extreme
    pub const TRIM_FRACTION: f64 = 0.2;

    /// Trimming only applies when more than this many opaque pixels remain
    pub const TRIM_MIN_PIXELS: usize = 100;
}

/// Candidate matching parameters
pub mod matching {
    /// Largest possible Euclidean distance between two 8-bit RGB colors
    /// (`sqrt(3 * 255^2)`, about 441.673)
    pub const MAX_DISTANCE: f64 = 441.672_955_930_063_7;

    /// Percentage at or above which a candidate is shown against a region
    pub const VISIBILITY_THRESHOLD: u8 = 70;
}

/// Region geometry parameters
pub mod regions {
    /// Rectangles must exceed this size on both sides to be kept
    pub const MIN_REGION_SIZE: f64 = 5.0;
}
