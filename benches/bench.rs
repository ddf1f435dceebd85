// Criterion benchmarks for Event Recommender

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use event_recommender::core::{
    similarity::cosine_similarity, CollaborativeScorer, ContentScorer, RankOptions, Recommender,
    TextEncoder, TfidfEncoder,
};
use event_recommender::models::{BoostWeights, Event, UserProfile};
use chrono::Utc;
use std::sync::Arc;

const CATEGORIES: [&str; 5] = ["Technology", "Arts", "Business", "Science", "Sports"];
const TAGS: [&str; 8] = ["ai", "cloud", "music", "painting", "startup", "research", "running", "robotics"];

fn create_event(id: usize) -> Event {
    let mut event = Event::new(format!("E{}", id), CATEGORIES[id % CATEGORIES.len()])
        .with_tags([TAGS[id % TAGS.len()], TAGS[(id * 3 + 1) % TAGS.len()]]);
    event.name = format!("Event {} {}", id, TAGS[(id + 2) % TAGS.len()]);
    event.description = format!(
        "A {} session about {} for students",
        CATEGORIES[(id + 1) % CATEGORIES.len()].to_lowercase(),
        TAGS[(id + 5) % TAGS.len()]
    );
    event
}

fn create_catalog(size: usize) -> Vec<Event> {
    (0..size).map(create_event).collect()
}

fn create_profile() -> UserProfile {
    let mut profile = UserProfile::with_interests(["ai", "Technology", "robotics"]);
    profile.skills = vec!["python".to_string(), "cloud".to_string()];
    profile.department = "Computer Science".to_string();
    profile
}

fn create_history() -> Vec<Event> {
    (0..10)
        .map(|i| Event::new(format!("P{}", i), CATEGORIES[i % 2]).with_rating((i % 5 + 1) as f64))
        .collect()
}

fn bench_cosine_similarity(c: &mut Criterion) {
    let a: Vec<f64> = (0..1000).map(|i| (i % 7) as f64).collect();
    let b: Vec<f64> = (0..1000).map(|i| (i % 11) as f64).collect();

    c.bench_function("cosine_similarity_1000", |bench| {
        bench.iter(|| cosine_similarity(black_box(&a), black_box(&b)));
    });
}

fn bench_encoding(c: &mut Criterion) {
    let encoder = TfidfEncoder::default();
    let mut group = c.benchmark_group("tfidf_encode");

    for size in [10, 100, 500].iter() {
        let texts: Vec<String> = create_catalog(*size).iter().map(Event::text_features).collect();

        group.bench_with_input(BenchmarkId::new("encode", size), size, |b, _| {
            b.iter(|| encoder.encode(black_box(&texts)));
        });
    }

    group.finish();
}

fn bench_content_scoring(c: &mut Criterion) {
    let scorer = ContentScorer::new(Arc::new(TfidfEncoder::default()), BoostWeights::default());
    let profile = create_profile();
    let catalog = create_catalog(200);

    c.bench_function("content_score_200_events", |b| {
        b.iter(|| scorer.score(black_box(&profile), black_box(&catalog), 0.2));
    });
}

fn bench_collaborative_scoring(c: &mut Criterion) {
    let scorer = CollaborativeScorer::default();
    let history = create_history();
    let catalog = create_catalog(1000);

    c.bench_function("collaborative_score_1000_events", |b| {
        b.iter(|| scorer.score(black_box(&history), black_box(&catalog)));
    });
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = Recommender::with_defaults();
    let profile = create_profile();
    let history = create_history();

    let mut group = c.benchmark_group("recommend");

    for size in [10, 50, 100, 500].iter() {
        let catalog = create_catalog(*size);

        group.bench_with_input(BenchmarkId::new("hybrid", size), size, |b, _| {
            b.iter(|| {
                recommender.recommend(
                    black_box(&profile),
                    black_box(catalog.clone()),
                    black_box(&history),
                    RankOptions::top(5),
                    Utc::now(),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_cosine_similarity,
    bench_encoding,
    bench_content_scoring,
    bench_collaborative_scoring,
    bench_recommend
);

criterion_main!(benches);
