// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Event, UserProfile, ScoredCandidate, Explanation, RankingMethod, RankOrdering, ScoringWeights, BoostWeights};
pub use requests::{RecommendRequest, ExplainRequest};
pub use responses::{RecommendResponse, HealthResponse, ErrorResponse};
