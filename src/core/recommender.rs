use chrono::{DateTime, Utc};
use std::sync::Arc;
use crate::core::{
    collaborative::CollaborativeScorer,
    content::{ContentError, ContentScorer},
    encoder::{TextEncoder, TfidfEncoder},
    explain::explain,
    filters::CatalogFilter,
    fusion::{ContentSignal, FusionRanker, RankOptions},
};
use crate::models::{BoostWeights, Event, Explanation, RankingMethod, ScoringWeights, UserProfile};

/// Default relevance threshold for content scores
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.2;

/// Result of one recommendation run
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationResult {
    pub recommendations: Vec<String>,
    pub method: RankingMethod,
    pub total_events: usize,
    pub past_events: usize,
    pub fallback: bool,
}

/// Main recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Catalog pre-filter (inactive / past-dated events)
/// 2. Content scoring and collaborative scoring, independently
/// 3. Fusion, exclusion of attended events, top-K
///
/// Cheap to clone: the encoder is shared behind an `Arc` and every other
/// field is plain configuration.
#[derive(Debug, Clone)]
pub struct Recommender {
    content: ContentScorer,
    collaborative: CollaborativeScorer,
    ranker: FusionRanker,
    filter: CatalogFilter,
    min_similarity: f64,
}

impl Recommender {
    pub fn new(encoder: Arc<dyn TextEncoder>, weights: ScoringWeights, boosts: BoostWeights) -> Self {
        Self {
            content: ContentScorer::new(encoder, boosts),
            collaborative: CollaborativeScorer::default(),
            ranker: FusionRanker::new(weights),
            filter: CatalogFilter::default(),
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(TfidfEncoder::default()),
            ScoringWeights::default(),
            BoostWeights::default(),
        )
    }

    pub fn with_filter(mut self, filter: CatalogFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_min_similarity(mut self, min_similarity: f64) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    pub fn with_like_threshold(mut self, like_threshold: f64) -> Self {
        self.collaborative = CollaborativeScorer::new(like_threshold);
        self
    }

    pub fn min_similarity(&self) -> f64 {
        self.min_similarity
    }

    /// Rank the catalog for a user
    ///
    /// # Arguments
    /// * `profile` - The requesting user's profile
    /// * `catalog` - All candidate events for this request
    /// * `past_events` - Events the user attended, with ratings
    /// * `options` - Top-K and tie ordering
    /// * `now` - Reference time for the upcoming-only filter
    ///
    /// # Returns
    /// At most `top_k` catalog identifiers; never fails
    pub fn recommend(
        &self,
        profile: &UserProfile,
        catalog: Vec<Event>,
        past_events: &[Event],
        options: RankOptions,
        now: DateTime<Utc>,
    ) -> RecommendationResult {
        let total_events = catalog.len();
        let catalog = self.filter.apply(catalog, now);

        tracing::debug!(
            "{} of {} events passed the catalog filter",
            catalog.len(),
            total_events
        );

        let content = match self.content.score(profile, &catalog, self.min_similarity) {
            Ok(scored) => ContentSignal::Scored(scored),
            Err(ContentError::EmptyProfile) => {
                tracing::debug!("Profile has no interests or skills, content scoring skipped");
                ContentSignal::Unavailable
            }
            // A failed computation leaves no event content-relevant
            Err(e) => {
                tracing::warn!("Content scoring failed, no event is content-relevant: {}", e);
                ContentSignal::Scored(Vec::new())
            }
        };

        let collaborative = self.collaborative.score(past_events, &catalog);

        let ranking = self
            .ranker
            .rank(&content, &collaborative, &catalog, past_events, options);

        tracing::info!(
            "Generated {} recommendations ({:?}{}) from {} events",
            ranking.event_ids.len(),
            ranking.method,
            if ranking.fallback { ", fallback" } else { "" },
            total_events
        );

        RecommendationResult {
            recommendations: ranking.event_ids,
            method: ranking.method,
            total_events,
            past_events: past_events.len(),
            fallback: ranking.fallback,
        }
    }

    /// Explain a single event for a profile; independent of any ranking run
    pub fn explain(&self, profile: &UserProfile, event: &Event) -> Explanation {
        explain(profile, event)
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_defaults()
    }
}
