//! Candidate matching module
//!
//! This module scores user-chosen candidate colors against the colors
//! sampled from regions, and aggregates region colors.

pub mod aggregate;
pub mod candidate;
pub mod ranker;

pub use aggregate::average;
pub use candidate::{Candidate, CandidateId};
pub use ranker::{CandidateMatch, MatchRanker, MatchResult, RankingReport, RegionMatches};
