//! Trimmed-mean color sampling
//!
//! Reduces a rectangle of RGBA pixels to one representative color with:
//! - Transparency filtering (alpha below the threshold is background)
//! - Brightness outlier removal (darkest and lightest fractions dropped)
//! - Per-channel mean of what remains, rounded to nearest
//!
//! Sampling never fails. Empty input falls back to white.

use image::Rgba;
use log::debug;

use crate::color::conversion::{Color, WHITE};
use crate::config::SamplingConfig;
use crate::constants::sampling::{ALPHA_THRESHOLD, TRIM_FRACTION, TRIM_MIN_PIXELS};

/// A single RGBA pixel with 8-bit channels
pub type Pixel = Rgba<u8>;

/// Sampling result with statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleResult {
    /// Representative color
    pub color: Color,
    /// Pixels that passed the alpha filter
    pub opaque_pixels: usize,
    /// Pixels that contributed to the average
    pub retained_pixels: usize,
    /// Whether brightness trimming was applied
    pub trimmed: bool,
}

/// Region sampler implementing the trimmed brightness mean
#[derive(Debug, Clone)]
pub struct RegionSampler {
    alpha_threshold: u8,
    trim_fraction: f64,
    trim_min_pixels: usize,
}

impl Default for RegionSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionSampler {
    /// Create a new sampler with default parameters
    pub fn new() -> Self {
        Self {
            alpha_threshold: ALPHA_THRESHOLD,
            trim_fraction: TRIM_FRACTION,
            trim_min_pixels: TRIM_MIN_PIXELS,
        }
    }

    /// Create a sampler with custom parameters
    pub fn with_params(alpha_threshold: u8, trim_fraction: f64, trim_min_pixels: usize) -> Self {
        Self {
            alpha_threshold,
            trim_fraction,
            trim_min_pixels,
        }
    }

    pub fn from_config(config: &SamplingConfig) -> Self {
        Self::with_params(
            config.alpha_threshold,
            config.trim_fraction,
            config.trim_min_pixels,
        )
    }

    /// Representative color of a region's pixels
    ///
    /// Pixel order does not matter.
    pub fn sample(&self, pixels: &[Pixel]) -> Color {
        self.analyze(pixels).color
    }

    /// Same as [`sample`](Self::sample) over a flat RGBA byte buffer
    ///
    /// A trailing partial pixel is ignored.
    pub fn sample_rgba(&self, buffer: &[u8]) -> Color {
        let pixels: Vec<Pixel> = buffer
            .chunks_exact(4)
            .map(|p| Rgba([p[0], p[1], p[2], p[3]]))
            .collect();
        self.sample(&pixels)
    }

    /// Sample a region and report how many pixels were used
    pub fn analyze(&self, pixels: &[Pixel]) -> SampleResult {
        // Step 1: Drop transparent pixels
        let mut opaque: Vec<Pixel> = pixels
            .iter()
            .copied()
            .filter(|p| p.0[3] >= self.alpha_threshold)
            .collect();
        let opaque_pixels = opaque.len();

        if opaque.is_empty() {
            debug!("No opaque pixels in {} sampled, falling back to white", pixels.len());
            return SampleResult {
                color: WHITE,
                opaque_pixels: 0,
                retained_pixels: 0,
                trimmed: false,
            };
        }

        // Step 2: Order by brightness. The channel sum orders the same as the
        // channel mean; ties fall back to the channels themselves so any
        // permutation of the input sorts identically.
        opaque.sort_unstable_by_key(|p| {
            let [r, g, b, _] = p.0;
            (u16::from(r) + u16::from(g) + u16::from(b), r, g, b)
        });

        // Step 3: Trim brightness extremes on large enough samples
        let trimmed = opaque_pixels > self.trim_min_pixels;
        let retained = if trimmed {
            let (start, end) = self.trim_window(opaque_pixels);
            &opaque[start..end]
        } else {
            &opaque[..]
        };

        if retained.is_empty() {
            debug!("Trimming removed all {} opaque pixels, falling back to white", opaque_pixels);
            return SampleResult {
                color: WHITE,
                opaque_pixels,
                retained_pixels: 0,
                trimmed,
            };
        }

        // Step 4: Per-channel mean
        let color = mean_color(retained);
        debug!(
            "Sampled {} ({} of {} opaque pixels retained)",
            color,
            retained.len(),
            opaque_pixels
        );

        SampleResult {
            color,
            opaque_pixels,
            retained_pixels: retained.len(),
            trimmed,
        }
    }

    /// Half-open index range kept after trimming `count` sorted pixels
    fn trim_window(&self, count: usize) -> (usize, usize) {
        let start = (count as f64 * self.trim_fraction).floor() as usize;
        let end = (count as f64 * (1.0 - self.trim_fraction)).floor() as usize;
        (start.min(count), end.clamp(start.min(count), count))
    }
}

fn mean_color(pixels: &[Pixel]) -> Color {
    let (mut sum_r, mut sum_g, mut sum_b) = (0u64, 0u64, 0u64);
    for p in pixels {
        sum_r += u64::from(p.0[0]);
        sum_g += u64::from(p.0[1]);
        sum_b += u64::from(p.0[2]);
    }

    let n = pixels.len() as f64;
    let channel = |sum: u64| (sum as f64 / n).round() as u8;
    Color::new(channel(sum_r), channel(sum_g), channel(sum_b))
}
