//! Candidate-to-region match ranking
//!
//! Scores every candidate against every sampled region by Euclidean RGB
//! distance and:
//! - Picks the closest region per candidate (first in region order on ties)
//! - Lists, per region, each candidate scoring at or above the visibility
//!   threshold
//!
//! Unparsable candidates are skipped. Ranking with no sampled region is the
//! one condition reported to the caller as an error.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::color::conversion::{match_percentage, Color};
use crate::config::MatchingConfig;
use crate::constants::matching::VISIBILITY_THRESHOLD;
use crate::matching::candidate::{Candidate, CandidateId};
use crate::region::{Region, RegionId};
use crate::{MatchError, Result};

/// Best region for one candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub candidate_id: CandidateId,
    pub region_id: RegionId,
    /// Position of the region in the session's region list
    pub region_index: usize,
    pub region_color: Color,
    pub distance: f64,
    pub percentage: u8,
}

/// A candidate shown against a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandidateMatch {
    pub candidate_id: CandidateId,
    pub percentage: u8,
}

/// Candidates clearing the visibility threshold for one region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionMatches {
    pub region_id: RegionId,
    pub region_index: usize,
    pub matches: Vec<CandidateMatch>,
}

/// Output of a ranking pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankingReport {
    /// Closest region per candidate, keyed by candidate id
    pub best_matches: BTreeMap<CandidateId, MatchResult>,
    /// One entry per sampled region, in region order
    pub region_matches: Vec<RegionMatches>,
    /// Candidates whose value could not be parsed
    pub skipped: Vec<CandidateId>,
}

impl RankingReport {
    pub fn best_for_candidate(&self, candidate_id: CandidateId) -> Option<&MatchResult> {
        self.best_matches.get(&candidate_id)
    }

    /// Every best match that landed on `region_id`
    pub fn best_for_region(&self, region_id: RegionId) -> impl Iterator<Item = &MatchResult> {
        self.best_matches
            .values()
            .filter(move |m| m.region_id == region_id)
    }

    /// Candidates at or above the visibility threshold for `region_id`
    pub fn visible_for_region(&self, region_id: RegionId) -> &[CandidateMatch] {
        self.region_matches
            .iter()
            .find(|r| r.region_id == region_id)
            .map(|r| r.matches.as_slice())
            .unwrap_or(&[])
    }
}

/// Match ranker comparing candidates against sampled regions
#[derive(Debug, Clone)]
pub struct MatchRanker {
    visibility_threshold: u8,
}

impl Default for MatchRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchRanker {
    /// Create a ranker with the default visibility threshold
    pub fn new() -> Self {
        Self {
            visibility_threshold: VISIBILITY_THRESHOLD,
        }
    }

    pub fn with_threshold(visibility_threshold: u8) -> Self {
        Self {
            visibility_threshold,
        }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        Self::with_threshold(config.visibility_threshold)
    }

    /// Rank every candidate against every sampled region
    ///
    /// Regions are scanned in slice order, which decides ties.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::NoRegions` if no region carries a sampled color
    pub fn rank(&self, regions: &[Region], candidates: &[Candidate]) -> Result<RankingReport> {
        let sampled: Vec<(usize, &Region, Color)> = regions
            .iter()
            .enumerate()
            .filter_map(|(index, region)| region.color.map(|color| (index, region, color)))
            .collect();

        if sampled.is_empty() {
            return Err(MatchError::NoRegions);
        }

        let mut report = RankingReport {
            region_matches: sampled
                .iter()
                .map(|(index, region, _)| RegionMatches {
                    region_id: region.id,
                    region_index: *index,
                    matches: Vec::new(),
                })
                .collect(),
            ..RankingReport::default()
        };

        for candidate in candidates {
            let target = match candidate.color() {
                Ok(color) => color,
                Err(e) => {
                    debug!("Skipping candidate {}: {}", candidate.id, e);
                    report.skipped.push(candidate.id);
                    continue;
                }
            };

            let mut best: Option<MatchResult> = None;
            for (slot, (index, region, color)) in sampled.iter().enumerate() {
                let distance = target.distance(color);
                let percentage = match_percentage(distance);

                if percentage >= self.visibility_threshold {
                    report.region_matches[slot].matches.push(CandidateMatch {
                        candidate_id: candidate.id,
                        percentage,
                    });
                }

                // Strict comparison keeps the earliest region on ties
                if best.as_ref().map_or(true, |b| distance < b.distance) {
                    best = Some(MatchResult {
                        candidate_id: candidate.id,
                        region_id: region.id,
                        region_index: *index,
                        region_color: *color,
                        distance,
                        percentage,
                    });
                }
            }

            if let Some(result) = best {
                debug!(
                    "Candidate {} ({}) best matches region {} at {}%",
                    candidate.id, target, result.region_id, result.percentage
                );
                report.best_matches.insert(candidate.id, result);
            }
        }

        Ok(report)
    }
}
