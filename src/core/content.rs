use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use crate::core::{
    encoder::{EncodeError, TextEncoder},
    filters::{category_matches, label_set, matching_tags},
    similarity::cosine_similarity,
};
use crate::models::{BoostWeights, Event, ScoredCandidate, UserProfile};

/// Errors raised while scoring content for a request
#[derive(Debug, Error, PartialEq)]
pub enum ContentError {
    #[error("profile has no interests or skills to compare against")]
    EmptyProfile,

    #[error("text encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("encoder returned {got} vectors for {expected} texts")]
    VectorCountMismatch { expected: usize, got: usize },
}

/// Text-similarity scorer with category and tag boosts
///
/// # Scoring
/// score = cosine(user, event)
///       + category boost     # event category is one of the interests
///       + tag boost * n      # n distinct tags among interests and skills
///
/// Events survive the relevance filter when the score reaches the minimum
/// similarity or when any boost applied.
#[derive(Debug, Clone)]
pub struct ContentScorer {
    encoder: Arc<dyn TextEncoder>,
    boosts: BoostWeights,
}

impl ContentScorer {
    pub fn new(encoder: Arc<dyn TextEncoder>, boosts: BoostWeights) -> Self {
        Self { encoder, boosts }
    }

    pub fn boosts(&self) -> BoostWeights {
        self.boosts
    }

    /// Score every catalog event against the profile
    ///
    /// # Arguments
    /// * `profile` - The requesting user's profile
    /// * `catalog` - Candidate events, in catalog order
    /// * `min_similarity` - Relevance threshold for events without a boost
    ///
    /// # Returns
    /// Relevant events sorted by boosted score (descending, stable), or an
    /// error when no content signal can be computed
    pub fn score(
        &self,
        profile: &UserProfile,
        catalog: &[Event],
        min_similarity: f64,
    ) -> Result<Vec<ScoredCandidate>, ContentError> {
        if catalog.is_empty() {
            return Ok(Vec::new());
        }

        if profile.is_blank() {
            return Err(ContentError::EmptyProfile);
        }

        // Events first, user last: one batch, one shared vocabulary
        let mut texts: Vec<String> = catalog.iter().map(Event::text_features).collect();
        texts.push(profile.text_features());

        let vectors = self.encoder.encode(&texts)?;
        if vectors.len() != texts.len() {
            return Err(ContentError::VectorCountMismatch {
                expected: texts.len(),
                got: vectors.len(),
            });
        }

        let (user_vector, event_vectors) = vectors
            .split_last()
            .ok_or(ContentError::VectorCountMismatch { expected: texts.len(), got: 0 })?;

        let interests = label_set(&profile.interests);
        let labels = label_set(profile.interests.iter().chain(profile.skills.iter()));

        let mut scored: Vec<ScoredCandidate> = catalog
            .iter()
            .zip(event_vectors)
            .filter_map(|(event, vector)| {
                let similarity = cosine_similarity(user_vector, vector);
                let (boost, boosted) = self.boost(event, &interests, &labels);
                let score = similarity + boost;

                if score >= min_similarity || boosted {
                    Some(ScoredCandidate::new(event.event_id.clone(), score))
                } else {
                    None
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::debug!(
            "Content scoring kept {} of {} events (min similarity {})",
            scored.len(),
            catalog.len(),
            min_similarity
        );

        Ok(scored)
    }

    /// Boost an event would receive for this profile, independent of text
    pub fn boost_for(&self, profile: &UserProfile, event: &Event) -> f64 {
        let interests = label_set(&profile.interests);
        let labels = label_set(profile.interests.iter().chain(profile.skills.iter()));
        self.boost(event, &interests, &labels).0
    }

    /// Additive boost and whether any boost applied
    #[inline]
    fn boost(
        &self,
        event: &Event,
        interests: &HashSet<String>,
        labels: &HashSet<String>,
    ) -> (f64, bool) {
        let category_match = category_matches(event, interests);
        let tag_matches = matching_tags(event, labels).len();

        let mut boost = 0.0;
        if category_match {
            boost += self.boosts.category;
        }
        boost += self.boosts.tag * tag_matches as f64;

        (boost, category_match || tag_matches > 0)
    }
}
