use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::{Validate, ValidationError};
use crate::models::domain::{Event, RankOrdering, UserProfile};

/// Request to rank the catalog for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[serde(default)]
    pub user_profile: UserProfile,
    #[serde(default)]
    pub past_events: Vec<Event>,
    #[serde(default)]
    #[validate(custom(function = "validate_catalog"))]
    pub all_events: Vec<Event>,
    #[serde(default, alias = "topK")]
    #[validate(range(min = 1))]
    pub top_k: Option<usize>,
    #[serde(default, alias = "orderBy")]
    pub order_by: Option<RankOrdering>,
}

/// Request to explain a single recommendation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub user_profile: UserProfile,
    #[serde(default)]
    pub event: Event,
}

/// Every catalog event needs a non-blank id, unique within the request
fn validate_catalog(events: &[Event]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(events.len());

    for event in events {
        if event.event_id.trim().is_empty() {
            let mut err = ValidationError::new("missing_event_id");
            err.message = Some("every event in all_events needs an event_id".into());
            return Err(err);
        }
        if !seen.insert(event.event_id.as_str()) {
            let mut err = ValidationError::new("duplicate_event_id");
            err.message = Some(format!("duplicate event_id: {}", event.event_id).into());
            return Err(err);
        }
    }

    Ok(())
}
