use chrono::{DateTime, Utc};
use std::collections::HashSet;
use crate::models::Event;

/// Pre-filter applied to the catalog before any scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Drop events flagged inactive
    pub skip_inactive: bool,
    /// Drop events dated before `now`; undated events are kept
    pub upcoming_only: bool,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            skip_inactive: true,
            upcoming_only: false,
        }
    }
}

impl CatalogFilter {
    /// Check whether an event may be recommended at all
    #[inline]
    pub fn admits(&self, event: &Event, now: DateTime<Utc>) -> bool {
        if self.skip_inactive && !event.is_active {
            return false;
        }

        if self.upcoming_only {
            if let Some(date) = event.date {
                if date < now {
                    return false;
                }
            }
        }

        true
    }

    /// Keep only admissible events, preserving catalog order
    pub fn apply(&self, mut catalog: Vec<Event>, now: DateTime<Utc>) -> Vec<Event> {
        catalog.retain(|event| self.admits(event, now));
        catalog
    }
}

/// Lower-cased, non-blank labels as a set
pub fn label_set<'a, I>(labels: I) -> HashSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    labels
        .into_iter()
        .map(|label| label.trim().to_lowercase())
        .filter(|label| !label.is_empty())
        .collect()
}

/// Event category is (case-insensitively) one of the given labels
#[inline]
pub fn category_matches(event: &Event, labels: &HashSet<String>) -> bool {
    let category = event.category.trim().to_lowercase();
    !category.is_empty() && labels.contains(&category)
}

/// Distinct lower-cased event tags found in `labels`, in tag order
pub fn matching_tags(event: &Event, labels: &HashSet<String>) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();

    for tag in &event.tags {
        let tag = tag.trim().to_lowercase();
        if labels.contains(&tag) && !matched.contains(&tag) {
            matched.push(tag);
        }
    }

    matched
}
