use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Catalog event, as sent by the events backend
///
/// Only the fields the engine reasons about are typed; everything else the
/// backend sends (location details, organiser ids, timestamps, ...) is kept
/// in `extra` so descriptive text can still be folded into scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, deserialize_with = "deserialize_event_id")]
    pub event_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(alias = "targetAudience", default)]
    pub target_audience: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(alias = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Build a bare event with the given id and category
    pub fn new(event_id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            category: category.into(),
            is_active: true,
            ..Self::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Lower-cased text blob used for content scoring
    ///
    /// Concatenates name, description, category, tags and target audience,
    /// followed by the location and any descriptive extra fields.
    pub fn text_features(&self) -> String {
        let mut text = format!("{} {} {} ", self.name, self.description, self.category);
        text.push_str(&self.tags.join(" "));
        text.push(' ');
        text.push_str(&self.target_audience);

        if let Some(location) = &self.location {
            text.push(' ');
            text.push_str(location);
        }

        for (key, value) in &self.extra {
            if is_identifier_key(key) {
                continue;
            }
            match value {
                Value::String(s) => {
                    text.push(' ');
                    text.push_str(s);
                }
                Value::Array(items) => {
                    for s in items.iter().filter_map(Value::as_str) {
                        text.push(' ');
                        text.push_str(s);
                    }
                }
                _ => {}
            }
        }

        text.to_lowercase()
    }
}

/// Keys whose values are ids or timestamps rather than descriptive text
fn is_identifier_key(key: &str) -> bool {
    key.starts_with('_')
        || key.eq_ignore_ascii_case("id")
        || key.ends_with("Id")
        || key.ends_with("_id")
        || key.ends_with("At")
        || key.ends_with("_at")
        || key == "createdBy"
}

pub(crate) fn default_true() -> bool { true }

/// Accept string or numeric event ids; both are treated as opaque strings
fn deserialize_event_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "event_id must be a string or number, got {}",
            other
        ))),
    }
}

/// The requesting user's profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub year: Option<Value>,
}

impl UserProfile {
    pub fn with_interests<I, S>(interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            interests: interests.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Lower-cased interests and skills joined into one text blob
    pub fn text_features(&self) -> String {
        self.interests
            .iter()
            .chain(self.skills.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// True when the profile has no usable interest or skill label
    pub fn is_blank(&self) -> bool {
        self.interests
            .iter()
            .chain(self.skills.iter())
            .all(|label| label.trim().is_empty())
    }
}

/// Event identifier with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub event_id: String,
    pub score: f64,
}

impl ScoredCandidate {
    pub fn new(event_id: impl Into<String>, score: f64) -> Self {
        Self {
            event_id: event_id.into(),
            score,
        }
    }
}

/// Human-readable reasons an event suits a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub event_id: Option<String>,
    pub reasons: Vec<String>,
}

/// Which signals produced a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingMethod {
    Hybrid,
    ContentOnly,
}

/// Secondary ordering applied to exact score ties
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankOrdering {
    /// Ties keep catalog order
    #[default]
    Score,
    /// Ties go to the earliest event; undated events last
    Date,
}

/// Fusion weights for the two signals
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub content: f64,
    pub collaborative: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            content: 0.7,
            collaborative: 0.3,
        }
    }
}

/// Additive boosts applied on top of text similarity
#[derive(Debug, Clone, Copy)]
pub struct BoostWeights {
    pub category: f64,
    pub tag: f64,
}

impl Default for BoostWeights {
    fn default() -> Self {
        Self {
            category: 0.2,
            tag: 0.1,
        }
    }
}
