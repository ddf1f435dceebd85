use serde::{Deserialize, Serialize};
use crate::models::domain::RankingMethod;

/// Response for the recommend endpoint
///
/// An empty catalog short-circuits to `{"recommendations": []}`, so the
/// summary fields are omitted in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<RankingMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_events: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_events: Option<usize>,
}

impl RecommendResponse {
    pub fn empty() -> Self {
        Self {
            recommendations: Vec::new(),
            method: None,
            total_events: None,
            past_events: None,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
