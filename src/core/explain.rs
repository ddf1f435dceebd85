use crate::core::filters::{category_matches, label_set, matching_tags};
use crate::models::{Event, Explanation, UserProfile};

/// Reason given when nothing specific matched
pub const FALLBACK_REASON: &str = "Recommended based on overall profile similarity";

/// Explain why an event suits a profile
///
/// Checks, in order, each adding a reason when it holds:
/// 1. Event tags overlapping the user's interests
/// 2. Event category being one of the interests
/// 3. The user's department appearing in the target audience
///
/// Missing fields are treated as empty; the result always has at least one
/// reason.
pub fn explain(profile: &UserProfile, event: &Event) -> Explanation {
    let interests = label_set(&profile.interests);
    let mut reasons = Vec::new();

    let matched = matching_tags(event, &interests);
    if !matched.is_empty() {
        reasons.push(format!("Matches your interests: {}", matched.join(", ")));
    }

    if category_matches(event, &interests) {
        reasons.push(format!("You're interested in {} events", event.category.trim()));
    }

    let department = profile.department.trim();
    if !department.is_empty()
        && event
            .target_audience
            .to_lowercase()
            .contains(&department.to_lowercase())
    {
        reasons.push(format!("Targeted for {} students", department));
    }

    if reasons.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }

    Explanation {
        event_id: (!event.event_id.is_empty()).then(|| event.event_id.clone()),
        reasons,
    }
}
