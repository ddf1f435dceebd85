//! Event Recommender - hybrid event recommendation service
//!
//! This library ranks an event catalog for one user by fusing TF-IDF text
//! similarity (with category and tag boosts) and a category-affinity signal
//! derived from the user's rating history.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use core::{Recommender, RecommendationResult, RankOptions, TextEncoder, TfidfEncoder, explain};
pub use models::{Event, UserProfile, ScoredCandidate, Explanation, RecommendRequest, RecommendResponse};
