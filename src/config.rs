//! Configuration structures for sampling and matching.
//!
//! All tunable parameters are grouped by the stage that consumes them.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use color_matcher::MatcherConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = MatcherConfig::from_json_file(Path::new("matcher.json"))?;
//!
//! // Or use defaults
//! let config = MatcherConfig::default();
//! # Ok::<(), color_matcher::MatchError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`SamplingConfig`]: transparency cutoff and brightness trimming
//! - [`MatchingConfig`]: visibility threshold for secondary matches
//! - [`RegionConfig`]: minimum rectangle size

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{matching, regions, sampling};
use crate::{MatchError, Result};

/// Complete configuration for a matching session.
///
/// Missing sections in a JSON file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Region sampling configuration
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Candidate matching configuration
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Region geometry configuration
    #[serde(default)]
    pub regions: RegionConfig,
}

/// Trimmed-mean sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Pixels with alpha below this value are ignored
    pub alpha_threshold: u8,

    /// Fraction trimmed from each brightness extreme (0.0 to below 0.5)
    pub trim_fraction: f64,

    /// Trimming applies only above this many opaque pixels
    pub trim_min_pixels: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            alpha_threshold: sampling::ALPHA_THRESHOLD,
            trim_fraction: sampling::TRIM_FRACTION,
            trim_min_pixels: sampling::TRIM_MIN_PIXELS,
        }
    }
}

/// Match ranking parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Percentage at or above which a candidate is listed against a region
    pub visibility_threshold: u8,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: matching::VISIBILITY_THRESHOLD,
        }
    }
}

/// Region geometry parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Width and height must both exceed this to keep a rectangle
    pub min_size: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            min_size: regions::MIN_REGION_SIZE,
        }
    }
}

impl MatcherConfig {
    /// Check every parameter is in range
    pub fn validate(&self) -> Result<()> {
        let trim = self.sampling.trim_fraction;
        if !(0.0..0.5).contains(&trim) {
            return Err(MatchError::InvalidParameter {
                parameter: "sampling.trim_fraction".into(),
                value: trim.to_string(),
            });
        }

        if self.matching.visibility_threshold > 100 {
            return Err(MatchError::InvalidParameter {
                parameter: "matching.visibility_threshold".into(),
                value: self.matching.visibility_threshold.to_string(),
            });
        }

        let min_size = self.regions.min_size;
        if !min_size.is_finite() || min_size < 0.0 {
            return Err(MatchError::InvalidParameter {
                parameter: "regions.min_size".into(),
                value: min_size.to_string(),
            });
        }

        Ok(())
    }

    /// Load and validate configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MatchError::config(format!("Failed to read {}", path.display()), e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| MatchError::config(format!("Failed to parse {}", path.display()), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| MatchError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json)
            .map_err(|e| MatchError::config(format!("Failed to write {}", path.display()), e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MatcherConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sampling.alpha_threshold, 128);
        assert_eq!(config.matching.visibility_threshold, 70);
        assert_eq!(config.regions.min_size, 5.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MatcherConfig =
            serde_json::from_str(r#"{"matching": {"visibility_threshold": 80}}"#).unwrap();
        assert_eq!(config.matching.visibility_threshold, 80);
        assert_eq!(config.sampling, SamplingConfig::default());
        assert_eq!(config.regions, RegionConfig::default());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = MatcherConfig::default();
        config.sampling.trim_fraction = 0.5;
        assert!(matches!(
            config.validate(),
            Err(MatchError::InvalidParameter { .. })
        ));

        let mut config = MatcherConfig::default();
        config.matching.visibility_threshold = 101;
        assert!(config.validate().is_err());

        let mut config = MatcherConfig::default();
        config.regions.min_size = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("color_matcher_config_{}.json", std::process::id()));
        let mut config = MatcherConfig::default();
        config.sampling.trim_fraction = 0.1;

        config.to_json_file(&path).unwrap();
        let loaded = MatcherConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = MatcherConfig::from_json_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(MatchError::ConfigError { .. })));
    }
}
