//! User-specified target colors

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::conversion::Color;
use crate::Result;

/// Stable identifier of a candidate row
pub type CandidateId = u64;

/// A target color to be matched against sampled regions
///
/// The value is kept as entered so an unparsable edit stays visible to the
/// caller; it is parsed each time the candidate is ranked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub value: String,
}

impl Candidate {
    pub fn new(id: CandidateId, color: Color) -> Self {
        Self {
            id,
            value: color.to_hex(),
        }
    }

    pub fn from_hex(id: CandidateId, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }

    /// A candidate with a random starting color
    pub fn random<R: Rng>(id: CandidateId, rng: &mut R) -> Self {
        Self::new(id, Color::random(rng))
    }

    /// Parse the current value
    pub fn color(&self) -> Result<Color> {
        Color::from_hex(&self.value)
    }
}
