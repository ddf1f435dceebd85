use std::collections::HashMap;
use crate::models::{Event, ScoredCandidate};

/// Default rating at or above which a past event counts as liked
pub const DEFAULT_LIKE_THRESHOLD: f64 = 4.0;

/// Category-affinity scorer driven by the user's rating history
///
/// score(event) = liked past events in the event's category / all liked past events
#[derive(Debug, Clone, Copy)]
pub struct CollaborativeScorer {
    like_threshold: f64,
}

impl CollaborativeScorer {
    pub fn new(like_threshold: f64) -> Self {
        Self { like_threshold }
    }

    /// Score every catalog event by category affinity
    ///
    /// Returns an empty list when there is no liked history at all, which
    /// callers read as "no collaborative signal". Otherwise every catalog
    /// event is present, unliked categories scoring exactly 0.0.
    pub fn score(&self, past_events: &[Event], catalog: &[Event]) -> Vec<ScoredCandidate> {
        let mut category_counts: HashMap<&str, usize> = HashMap::new();
        let mut liked = 0usize;

        for event in past_events {
            if event.rating.is_some_and(|rating| rating >= self.like_threshold) {
                *category_counts.entry(event.category.as_str()).or_insert(0) += 1;
                liked += 1;
            }
        }

        if liked == 0 {
            tracing::debug!("No liked past events among {}, collaborative signal unavailable", past_events.len());
            return Vec::new();
        }

        let mut scored: Vec<ScoredCandidate> = catalog
            .iter()
            .map(|event| {
                let count = category_counts.get(event.category.as_str()).copied().unwrap_or(0);
                ScoredCandidate::new(event.event_id.clone(), count as f64 / liked as f64)
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored
    }
}

impl Default for CollaborativeScorer {
    fn default() -> Self {
        Self::new(DEFAULT_LIKE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(scored: &[ScoredCandidate], id: &str) -> f64 {
        scored.iter().find(|c| c.event_id == id).map(|c| c.score).unwrap()
    }

    #[test]
    fn test_no_past_events() {
        let catalog = vec![Event::new("E1", "Tech")];
        assert!(CollaborativeScorer::default().score(&[], &catalog).is_empty());
    }

    #[test]
    fn test_no_liked_events() {
        let past = vec![
            Event::new("P1", "Tech").with_rating(3.0),
            Event::new("P2", "Tech"),
        ];
        let catalog = vec![Event::new("E1", "Tech")];
        assert!(CollaborativeScorer::default().score(&past, &catalog).is_empty());
    }

    #[test]
    fn test_category_frequency() {
        let past = vec![
            Event::new("P1", "Tech").with_rating(5.0),
            Event::new("P2", "Tech").with_rating(4.0),
            Event::new("P3", "Art").with_rating(4.0),
            Event::new("P4", "Music").with_rating(2.0),
        ];
        let catalog = vec![
            Event::new("E1", "Art"),
            Event::new("E2", "Tech"),
            Event::new("E3", "Music"),
        ];

        let scored = CollaborativeScorer::default().score(&past, &catalog);

        assert_eq!(scored.len(), 3);
        assert_eq!(scored[0].event_id, "E2");
        assert!((score_of(&scored, "E2") - 2.0 / 3.0).abs() < 1e-12);
        assert!((score_of(&scored, "E1") - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(score_of(&scored, "E3"), 0.0);
    }

    #[test]
    fn test_custom_threshold() {
        let past = vec![Event::new("P1", "Tech").with_rating(3.0)];
        let catalog = vec![Event::new("E1", "Tech")];
        let scored = CollaborativeScorer::new(3.0).score(&past, &catalog);
        assert_eq!(scored, vec![ScoredCandidate::new("E1", 1.0)]);
    }
}
