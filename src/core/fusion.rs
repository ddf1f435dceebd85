use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use crate::models::{Event, RankOrdering, RankingMethod, ScoredCandidate, ScoringWeights};

/// Errors that abort fusion and trigger the fallback ranking
#[derive(Debug, Error, PartialEq)]
pub enum FusionError {
    #[error("fused score for event {event_id} is not finite")]
    NonFiniteScore { event_id: String },

    #[error("scored event {event_id} is not in the catalog")]
    UnknownEvent { event_id: String },
}

/// Content scoring outcome as seen by the ranker
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSignal {
    /// Relevant events, already sorted by boosted score
    Scored(Vec<ScoredCandidate>),
    /// The profile gave content scoring nothing to compare against
    Unavailable,
}

impl ContentSignal {
    pub fn candidates(&self) -> &[ScoredCandidate] {
        match self {
            Self::Scored(candidates) => candidates,
            Self::Unavailable => &[],
        }
    }
}

/// Per-request ranking options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankOptions {
    pub top_k: usize,
    pub ordering: RankOrdering,
}

impl RankOptions {
    pub fn top(top_k: usize) -> Self {
        Self {
            top_k,
            ordering: RankOrdering::Score,
        }
    }
}

/// Final ordered identifiers
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub event_ids: Vec<String>,
    pub method: RankingMethod,
    /// True when fusion failed and the fallback ranking was returned
    pub fallback: bool,
}

/// Merges content and collaborative scores into the final ranking
///
/// # Pipeline Stages
/// 1. Content-only shortcut when the user has no history
/// 2. Weighted fusion over the content-relevant events
/// 3. Sort (descending, stable) with optional date tie-break
/// 4. Exclude attended events, truncate to top-K
#[derive(Debug, Clone)]
pub struct FusionRanker {
    weights: ScoringWeights,
}

impl FusionRanker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Rank the catalog for one request
    ///
    /// Never fails: any [`FusionError`] degrades to [`FusionRanker::fallback`].
    pub fn rank(
        &self,
        content: &ContentSignal,
        collaborative: &[ScoredCandidate],
        catalog: &[Event],
        past_events: &[Event],
        options: RankOptions,
    ) -> Ranking {
        let in_catalog: HashSet<&str> = catalog.iter().map(|e| e.event_id.as_str()).collect();

        if past_events.is_empty() {
            let mut ordered = content.candidates().to_vec();
            order_candidates(&mut ordered, catalog, options.ordering);

            return Ranking {
                event_ids: take_top(
                    ordered.iter().map(|c| c.event_id.as_str()),
                    options.top_k,
                    |id| in_catalog.contains(id),
                ),
                method: RankingMethod::ContentOnly,
                fallback: false,
            };
        }

        let past_ids: HashSet<&str> = past_events
            .iter()
            .map(|e| e.event_id.as_str())
            .filter(|id| !id.is_empty())
            .collect();
        let admit = |id: &str| in_catalog.contains(id) && !past_ids.contains(id);

        match self.fuse(content, collaborative, catalog, options.ordering) {
            Ok(fused) => Ranking {
                event_ids: take_top(fused.iter().map(|c| c.event_id.as_str()), options.top_k, admit),
                method: RankingMethod::Hybrid,
                fallback: false,
            },
            Err(e) => {
                tracing::warn!("Fusion failed, using fallback ranking: {}", e);
                Ranking {
                    event_ids: self.fallback(content, catalog, options.top_k, admit),
                    method: RankingMethod::Hybrid,
                    fallback: true,
                }
            }
        }
    }

    /// Weighted fusion: final = content weight * content + collaborative weight * collaborative
    ///
    /// Only content-relevant events are fused. When content scoring was
    /// unavailable, every catalog event takes part with a content score of 0,
    /// unless there is no collaborative signal either, in which case nothing
    /// is fused.
    pub fn fuse(
        &self,
        content: &ContentSignal,
        collaborative: &[ScoredCandidate],
        catalog: &[Event],
        ordering: RankOrdering,
    ) -> Result<Vec<ScoredCandidate>, FusionError> {
        let in_catalog: HashSet<&str> = catalog.iter().map(|e| e.event_id.as_str()).collect();
        let collab_scores: HashMap<&str, f64> = collaborative
            .iter()
            .map(|c| (c.event_id.as_str(), c.score))
            .collect();

        let base: Vec<(&str, f64)> = match content {
            ContentSignal::Scored(candidates) => candidates
                .iter()
                .map(|c| (c.event_id.as_str(), c.score))
                .collect(),
            ContentSignal::Unavailable if collaborative.is_empty() => {
                tracing::debug!("No content or collaborative signal, nothing to rank");
                return Ok(Vec::new());
            }
            ContentSignal::Unavailable => catalog
                .iter()
                .map(|e| (e.event_id.as_str(), 0.0))
                .collect(),
        };

        let mut fused = Vec::with_capacity(base.len());
        for (event_id, content_score) in base {
            if !in_catalog.contains(event_id) {
                return Err(FusionError::UnknownEvent { event_id: event_id.to_string() });
            }

            let collab_score = collab_scores.get(event_id).copied().unwrap_or(0.0);
            let score = self.weights.content * content_score + self.weights.collaborative * collab_score;
            if !score.is_finite() {
                return Err(FusionError::NonFiniteScore { event_id: event_id.to_string() });
            }

            fused.push(ScoredCandidate::new(event_id, score));
        }

        order_candidates(&mut fused, catalog, ordering);

        Ok(fused)
    }

    /// Ranking used when fusion fails
    ///
    /// Content order when content scores exist, otherwise catalog order.
    pub fn fallback<F>(
        &self,
        content: &ContentSignal,
        catalog: &[Event],
        top_k: usize,
        admit: F,
    ) -> Vec<String>
    where
        F: Fn(&str) -> bool,
    {
        match content {
            ContentSignal::Scored(candidates) => {
                take_top(candidates.iter().map(|c| c.event_id.as_str()), top_k, admit)
            }
            ContentSignal::Unavailable => {
                take_top(catalog.iter().map(|e| e.event_id.as_str()), top_k, admit)
            }
        }
    }
}

impl Default for FusionRanker {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

/// Sort by score (descending); ties stay in input order or go to the earliest date
fn order_candidates(candidates: &mut [ScoredCandidate], catalog: &[Event], ordering: RankOrdering) {
    let dates: HashMap<&str, Option<DateTime<Utc>>> = match ordering {
        RankOrdering::Score => HashMap::new(),
        RankOrdering::Date => catalog.iter().map(|e| (e.event_id.as_str(), e.date)).collect(),
    };

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| match ordering {
                RankOrdering::Score => Ordering::Equal,
                RankOrdering::Date => compare_dates(
                    dates.get(a.event_id.as_str()).copied().flatten(),
                    dates.get(b.event_id.as_str()).copied().flatten(),
                ),
            })
    });
}

/// Earlier dates first, undated events last
fn compare_dates(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// First `top_k` admitted identifiers, without duplicates
fn take_top<'a, I, F>(ids: I, top_k: usize, admit: F) -> Vec<String>
where
    I: Iterator<Item = &'a str>,
    F: Fn(&str) -> bool,
{
    let mut seen = HashSet::new();
    ids.filter(|id| admit(*id) && seen.insert(*id))
        .take(top_k)
        .map(str::to_string)
        .collect()
}
