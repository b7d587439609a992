//! Error types for the color_matcher library

use thiserror::Error;

/// Result type alias for color_matcher operations
pub type Result<T> = std::result::Result<T, MatchError>;

/// Error types for sampling, matching and session operations
#[derive(Error, Debug)]
pub enum MatchError {
    /// A color string is not six hexadecimal digits
    #[error("Invalid hex color: {value:?}")]
    InvalidHex { value: String },

    /// Ranking was requested before any region was sampled
    #[error("No sampled regions to match against")]
    NoRegions,

    /// A drawn rectangle is too small to be kept as a region
    #[error("Region too small: {width:.1}x{height:.1} (minimum {minimum:.1} on each side)")]
    DegenerateRegion { width: f64, height: f64, minimum: f64 },

    /// A candidate id does not belong to the session
    #[error("Unknown candidate: {id}")]
    UnknownCandidate { id: u64 },

    /// Invalid configuration parameter
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Configuration file could not be read or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl MatchError {
    /// Create a hex parse error for the offending input
    pub fn invalid_hex(value: impl Into<String>) -> Self {
        Self::InvalidHex {
            value: value.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this error only affects a single item and the session can carry on
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MatchError::InvalidHex { .. }
                | MatchError::NoRegions
                | MatchError::DegenerateRegion { .. }
                | MatchError::UnknownCandidate { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            MatchError::NoRegions => "Please analyze the squares first.".to_string(),
            MatchError::InvalidHex { value } => {
                format!("{} is not a valid color. Use six hex digits such as #A1B2C3.", value)
            }
            MatchError::DegenerateRegion { minimum, .. } => {
                format!("Draw a larger square (more than {:.0} pixels on each side).", minimum)
            }
            _ => "Color matching failed. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_regions_is_user_facing() {
        let err = MatchError::NoRegions;
        assert!(err.is_recoverable());
        assert_eq!(err.user_message(), "Please analyze the squares first.");
    }

    #[test]
    fn test_invalid_hex_display() {
        let err = MatchError::invalid_hex("#12");
        assert_eq!(err.to_string(), "Invalid hex color: \"#12\"");
    }

    #[test]
    fn test_config_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = MatchError::config("Failed to read config", io);
        assert!(!err.is_recoverable());
        assert!(std::error::Error::source(&err).is_some());
    }
}
