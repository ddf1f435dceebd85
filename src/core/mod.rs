// Core algorithm exports
pub mod collaborative;
pub mod content;
pub mod encoder;
pub mod explain;
pub mod filters;
pub mod fusion;
pub mod recommender;
pub mod similarity;

pub use collaborative::CollaborativeScorer;
pub use content::{ContentScorer, ContentError};
pub use encoder::{TextEncoder, TfidfEncoder, TfidfConfig, EncodeError};
pub use explain::explain;
pub use filters::CatalogFilter;
pub use fusion::{FusionRanker, FusionError, ContentSignal, RankOptions, Ranking};
pub use recommender::{Recommender, RecommendationResult};
pub use similarity::cosine_similarity;
