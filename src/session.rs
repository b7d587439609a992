//! Session store owning regions and candidates
//!
//! A [`Session`] holds everything that lives for one editing session: the
//! ordered region list, the candidate list and the id counters. The UI
//! shell keeps one per loaded workspace and calls into it from its event
//! handlers; sampling and ranking themselves stay pure.

use image::RgbaImage;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::analysis::RegionSampler;
use crate::color::conversion::Color;
use crate::config::MatcherConfig;
use crate::matching::{average, Candidate, CandidateId, MatchRanker, RankingReport};
use crate::region::{extract_pixels, Rect, Region, RegionId};
use crate::{MatchError, Result};

/// Regions, candidates and the tools to sample and rank them
#[derive(Debug)]
pub struct Session {
    sampler: RegionSampler,
    ranker: MatchRanker,
    min_region_size: f64,
    regions: Vec<Region>,
    candidates: Vec<Candidate>,
    next_region_id: RegionId,
    next_candidate_id: CandidateId,
    rng: StdRng,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session with default parameters
    pub fn new() -> Self {
        Self::from_valid_config(&MatcherConfig::default())
    }

    /// Create an empty session from a custom configuration
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidParameter` if `config` fails
    /// [`MatcherConfig::validate`].
    pub fn with_config(config: &MatcherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: &MatcherConfig) -> Self {
        Self {
            sampler: RegionSampler::from_config(&config.sampling),
            ranker: MatchRanker::from_config(&config.matching),
            min_region_size: config.regions.min_size,
            regions: Vec::new(),
            candidates: Vec::new(),
            next_region_id: 1,
            next_candidate_id: 1,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Sample `rect` from `image` and append it as a new region
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidParameter` if any field of `rect` is not
    /// finite, and `MatchError::DegenerateRegion` if either side is not larger
    /// than the configured minimum; nothing is stored in either case.
    pub fn add_region(&mut self, image: &RgbaImage, rect: Rect) -> Result<&Region> {
        if !rect.is_finite() {
            warn!("Discarding region with non-finite bounds {:?}", rect);
            return Err(MatchError::InvalidParameter {
                parameter: "region".into(),
                value: format!("{:?}", rect),
            });
        }

        if rect.is_degenerate(self.min_region_size) {
            warn!(
                "Discarding {:.1}x{:.1} region below minimum size {:.1}",
                rect.width, rect.height, self.min_region_size
            );
            return Err(MatchError::DegenerateRegion {
                width: rect.width,
                height: rect.height,
                minimum: self.min_region_size,
            });
        }

        let pixels = extract_pixels(image, &rect);
        let color = self.sampler.sample(&pixels);

        let id = self.next_region_id;
        self.next_region_id += 1;
        info!("Added region {} with color {}", id, color);

        let index = self.regions.len();
        self.regions.push(Region::new(id, rect, Some(color)));
        Ok(&self.regions[index])
    }

    /// Remove the most recently added region
    pub fn undo_last_region(&mut self) -> Option<Region> {
        let removed = self.regions.pop();
        if let Some(region) = &removed {
            info!("Removed region {}", region.id);
        }
        removed
    }

    pub fn clear_regions(&mut self) {
        info!("Cleared {} regions", self.regions.len());
        self.regions.clear();
    }

    /// Drop regions sampled from a previous image; candidates stay
    pub fn reset_for_new_image(&mut self) {
        self.clear_regions();
    }

    /// Add a candidate with a random starting color
    pub fn add_candidate(&mut self) -> CandidateId {
        let id = self.next_candidate_id();
        let candidate = Candidate::random(id, &mut self.rng);
        info!("Added candidate {} with color {}", id, candidate.value);
        self.candidates.push(candidate);
        id
    }

    /// Add a candidate with a given value, which need not parse
    pub fn add_candidate_with(&mut self, value: impl Into<String>) -> CandidateId {
        let id = self.next_candidate_id();
        let candidate = Candidate::from_hex(id, value);
        info!("Added candidate {} with color {}", id, candidate.value);
        self.candidates.push(candidate);
        id
    }

    /// Replace a candidate's value
    pub fn set_candidate_color(&mut self, id: CandidateId, value: impl Into<String>) -> Result<()> {
        let candidate = self
            .candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(MatchError::UnknownCandidate { id })?;
        candidate.value = value.into();
        Ok(())
    }

    pub fn remove_candidate(&mut self, id: CandidateId) -> Result<Candidate> {
        let index = self
            .candidates
            .iter()
            .position(|c| c.id == id)
            .ok_or(MatchError::UnknownCandidate { id })?;
        info!("Removed candidate {}", id);
        Ok(self.candidates.remove(index))
    }

    /// Rank all candidates against the current regions
    pub fn rank(&self) -> Result<RankingReport> {
        self.ranker.rank(&self.regions, &self.candidates)
    }

    /// Average of all region colors, `None` without regions
    pub fn average_color(&self) -> Option<Color> {
        average(&self.regions)
    }

    fn next_candidate_id(&mut self) -> CandidateId {
        let id = self.next_candidate_id;
        self.next_candidate_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Left half red, right half blue
    fn split_image() -> RgbaImage {
        RgbaImage::from_fn(40, 20, |x, _| {
            if x < 20 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
    }

    #[test]
    fn test_add_region_samples_color() {
        let mut session = Session::new();
        let region = session
            .add_region(&split_image(), Rect::new(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        assert_eq!(region.id, 1);
        assert_eq!(region.color, Some(Color::new(255, 0, 0)));
    }

    #[test]
    fn test_degenerate_region_is_rejected() {
        let mut session = Session::new();
        let result = session.add_region(&split_image(), Rect::new(0.0, 0.0, 5.0, 10.0));
        assert!(matches!(result, Err(MatchError::DegenerateRegion { .. })));
        assert!(session.regions().is_empty());
    }

    #[test]
    fn test_non_finite_region_is_rejected() {
        let image = RgbaImage::from_pixel(20, 20, Rgba([10, 20, 30, 255]));
        let mut session = Session::new();

        let wide = session.add_region(&image, Rect::new(1.0, 0.0, f64::INFINITY, 10.0));
        assert!(matches!(wide, Err(MatchError::InvalidParameter { .. })));
        let nan = session.add_region(&image, Rect::new(0.0, f64::NAN, 10.0, 10.0));
        assert!(matches!(nan, Err(MatchError::InvalidParameter { .. })));
        assert!(session.regions().is_empty());

        let huge = session
            .add_region(&image, Rect::new(1.0, 0.0, f64::MAX, 10.0))
            .unwrap();
        assert_eq!(huge.color, Some(Color::new(10, 20, 30)));
    }

    #[test]
    fn test_with_config_validates() {
        let mut config = MatcherConfig::default();
        config.sampling.trim_fraction = 0.6;
        assert!(matches!(
            Session::with_config(&config),
            Err(MatchError::InvalidParameter { parameter, .. }) if parameter == "sampling.trim_fraction"
        ));

        config.sampling.trim_fraction = 0.25;
        let session = Session::with_config(&config).unwrap();
        assert!(session.regions().is_empty());
    }

    #[test]
    fn test_region_ids_are_never_reused() {
        let image = split_image();
        let mut session = Session::new();
        session.add_region(&image, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        session.undo_last_region();
        let id = session.add_region(&image, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap().id;
        assert_eq!(id, 2);
    }

    #[test]
    fn test_undo_and_clear() {
        let image = split_image();
        let mut session = Session::new();
        session.add_region(&image, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        session.add_region(&image, Rect::new(25.0, 0.0, 10.0, 10.0)).unwrap();

        let removed = session.undo_last_region().unwrap();
        assert_eq!(removed.color, Some(Color::new(0, 0, 255)));
        assert_eq!(session.regions().len(), 1);

        session.clear_regions();
        assert!(session.regions().is_empty());
        assert!(session.undo_last_region().is_none());
        assert!(session.average_color().is_none());
    }

    #[test]
    fn test_candidate_lifecycle() {
        let mut session = Session::new();
        let a = session.add_candidate();
        let b = session.add_candidate_with("#00FF00");
        assert_ne!(a, b);
        assert!(session.candidates()[0].color().is_ok());

        session.set_candidate_color(a, "#0000FF").unwrap();
        assert_eq!(session.candidates()[0].value, "#0000FF");

        let removed = session.remove_candidate(b).unwrap();
        assert_eq!(removed.value, "#00FF00");
        assert!(matches!(
            session.remove_candidate(b),
            Err(MatchError::UnknownCandidate { id }) if id == b
        ));
        assert!(session.set_candidate_color(99, "#000000").is_err());
    }

    #[test]
    fn test_rank_requires_regions() {
        let mut session = Session::new();
        session.add_candidate_with("#123456");
        assert!(matches!(session.rank(), Err(MatchError::NoRegions)));
    }

    #[test]
    fn test_new_image_keeps_candidates() {
        let mut session = Session::new();
        session.add_region(&split_image(), Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        session.add_candidate_with("#FF0000");

        session.reset_for_new_image();
        assert!(session.regions().is_empty());
        assert_eq!(session.candidates().len(), 1);
    }

    #[test]
    fn test_rank_and_average() {
        let image = split_image();
        let mut session = Session::new();
        session.add_region(&image, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        session.add_region(&image, Rect::new(25.0, 5.0, 10.0, 10.0)).unwrap();
        let blue = session.add_candidate_with("#0A0AF0");

        let report = session.rank().unwrap();
        assert_eq!(report.best_for_candidate(blue).unwrap().region_id, 2);
        assert_eq!(session.average_color(), Some(Color::new(128, 0, 128)));
    }
}
