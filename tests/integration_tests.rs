// Integration tests for Event Recommender

use chrono::Utc;
use event_recommender::core::{
    CollaborativeScorer, ContentScorer, EncodeError, RankOptions, Recommender, TextEncoder,
    TfidfEncoder,
};
use event_recommender::models::{BoostWeights, Event, RankingMethod, ScoringWeights, UserProfile};
use std::collections::HashSet;
use std::sync::Arc;

fn create_event(id: &str, name: &str, category: &str, tags: &[&str]) -> Event {
    let mut event = Event::new(id, category).with_tags(tags.iter().copied());
    event.name = name.to_string();
    event.description = format!("{} for students", name);
    event
}

fn create_catalog() -> Vec<Event> {
    vec![
        create_event("E1", "Intro to machine learning", "Technology", &["ai", "ml"]),
        create_event("E2", "Watercolor workshop", "Arts", &["painting"]),
        create_event("E3", "Startup pitch night", "Business", &["entrepreneurship"]),
        create_event("E4", "Deep learning reading group", "Science", &["ai", "research"]),
        create_event("E5", "Campus 5K run", "Sports", &["running"]),
        create_event("E6", "Cloud computing seminar", "Technology", &["cloud", "devops"]),
        create_event("E7", "Jazz ensemble concert", "Arts", &["music"]),
    ]
}

fn create_profile() -> UserProfile {
    let mut profile = UserProfile::with_interests(["ai", "Technology"]);
    profile.skills = vec!["python".to_string(), "cloud".to_string()];
    profile.department = "Computer Science".to_string();
    profile
}

#[test]
fn test_integration_tag_match_ranks_first() {
    let recommender = Recommender::with_defaults();
    let catalog = vec![
        Event::new("E1", "Tech").with_tags(["ai"]),
        Event::new("E2", "Art").with_tags(["painting"]),
    ];

    let result = recommender.recommend(
        &UserProfile::with_interests(["ai"]),
        catalog,
        &[],
        RankOptions::top(5),
        Utc::now(),
    );

    assert_eq!(result.recommendations.first().map(String::as_str), Some("E1"));
    // E2 shares nothing with the profile: filtered out or ranked last
    if let Some(pos) = result.recommendations.iter().position(|id| id == "E2") {
        assert_eq!(pos, result.recommendations.len() - 1);
    }
}

#[test]
fn test_integration_collaborative_only_profile() {
    let recommender = Recommender::with_defaults();
    let past = vec![Event::new("P1", "Tech").with_rating(5.0)];
    let catalog = vec![
        Event::new("A1", "Art"),
        Event::new("T1", "Tech"),
        Event::new("T2", "Tech"),
    ];

    let collab = CollaborativeScorer::default().score(&past, &catalog);
    for candidate in &collab {
        let expected = if candidate.event_id.starts_with('T') { 1.0 } else { 0.0 };
        assert_eq!(candidate.score, expected);
    }

    let result = recommender.recommend(&UserProfile::default(), catalog, &past, RankOptions::top(5), Utc::now());

    assert_eq!(result.method, RankingMethod::Hybrid);
    assert_eq!(result.recommendations.len(), 3);
    let art_pos = result.recommendations.iter().position(|id| id == "A1").unwrap();
    for tech in ["T1", "T2"] {
        let pos = result.recommendations.iter().position(|id| id == tech).unwrap();
        assert!(pos < art_pos, "{} should rank ahead of A1", tech);
    }
}

#[test]
fn test_integration_empty_catalog() {
    let recommender = Recommender::with_defaults();
    let past = vec![Event::new("P1", "Tech").with_rating(5.0)];

    let with_history = recommender.recommend(&create_profile(), vec![], &past, RankOptions::top(5), Utc::now());
    let without_history = recommender.recommend(&create_profile(), vec![], &[], RankOptions::top(5), Utc::now());

    assert!(with_history.recommendations.is_empty());
    assert!(without_history.recommendations.is_empty());
}

#[test]
fn test_integration_end_to_end_hybrid() {
    let recommender = Recommender::with_defaults();
    let past = vec![
        create_event("E1", "Intro to machine learning", "Technology", &["ai", "ml"]).with_rating(5.0),
        create_event("P2", "Hackathon", "Technology", &["coding"]).with_rating(4.0),
        create_event("P3", "Poetry slam", "Arts", &["poetry"]).with_rating(2.0),
    ];

    let result = recommender.recommend(&create_profile(), create_catalog(), &past, RankOptions::top(3), Utc::now());

    assert_eq!(result.method, RankingMethod::Hybrid);
    assert!(!result.fallback);
    assert!(result.recommendations.len() <= 3);
    assert!(!result.recommendations.contains(&"E1".to_string()), "attended event re-recommended");

    // Technology events carry the category boost and the collaborative signal
    assert_eq!(result.recommendations.first().map(String::as_str), Some("E6"));

    let catalog_ids: HashSet<String> = create_catalog().into_iter().map(|e| e.event_id).collect();
    for id in &result.recommendations {
        assert!(catalog_ids.contains(id));
    }
}

#[test]
fn test_integration_content_only_matches_scorer() {
    let recommender = Recommender::with_defaults();
    let scorer = ContentScorer::new(Arc::new(TfidfEncoder::default()), BoostWeights::default());
    let profile = create_profile();

    let scored = scorer.score(&profile, &create_catalog(), 0.2).unwrap();
    let expected: Vec<String> = scored.into_iter().take(4).map(|c| c.event_id).collect();

    let result = recommender.recommend(&profile, create_catalog(), &[], RankOptions::top(4), Utc::now());

    assert_eq!(result.method, RankingMethod::ContentOnly);
    assert_eq!(result.recommendations, expected);
}

#[test]
fn test_integration_relevance_filter_dominates_collaborative() {
    // A liked category is not enough on its own once content scoring ran
    let recommender = Recommender::with_defaults();
    let past = vec![Event::new("P1", "Sports").with_rating(5.0)];

    let result = recommender.recommend(&create_profile(), create_catalog(), &past, RankOptions::top(10), Utc::now());

    assert!(!result.recommendations.contains(&"E5".to_string()));
}

#[derive(Debug)]
struct FailingEncoder;

impl TextEncoder for FailingEncoder {
    fn encode(&self, _texts: &[String]) -> Result<Vec<Vec<f64>>, EncodeError> {
        Err(EncodeError::Vectorize("model unavailable".to_string()))
    }
}

#[test]
fn test_integration_encoder_failure_ignores_history() {
    let recommender = Recommender::new(
        Arc::new(FailingEncoder),
        ScoringWeights::default(),
        BoostWeights::default(),
    );
    let catalog = vec![
        Event::new("E1", "Art").with_tags(["painting"]),
        Event::new("E2", "Tech").with_tags(["ai"]),
    ];
    let past = vec![Event::new("P1", "Art").with_rating(5.0)];

    let result = recommender.recommend(
        &UserProfile::with_interests(["ai"]),
        catalog,
        &past,
        RankOptions::top(5),
        Utc::now(),
    );

    assert_eq!(result.method, RankingMethod::Hybrid);
    assert!(!result.fallback);
    assert!(result.recommendations.is_empty());
}

#[test]
fn test_integration_explanations() {
    let recommender = Recommender::with_defaults();
    let mut event = create_event("E1", "Intro to machine learning", "Technology", &["ai", "ml"]);
    event.target_audience = "Computer Science students".to_string();

    let explanation = recommender.explain(&create_profile(), &event);

    assert_eq!(explanation.event_id.as_deref(), Some("E1"));
    assert_eq!(explanation.reasons.len(), 3);
    assert!(explanation.reasons[0].contains("ai"));
}
