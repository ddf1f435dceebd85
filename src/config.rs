use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use crate::core::{CatalogFilter, EncodeError, Recommender, TfidfConfig, TfidfEncoder};
use crate::models::{BoostWeights, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub encoder: EncoderSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
    #[serde(default = "default_max_top_k")]
    pub max_top_k: usize,
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,
    #[serde(default = "default_like_threshold")]
    pub like_threshold: f64,
    #[serde(default = "crate::models::domain::default_true")]
    pub skip_inactive: bool,
    #[serde(default)]
    pub upcoming_only: bool,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            max_top_k: default_max_top_k(),
            min_similarity: default_min_similarity(),
            like_threshold: default_like_threshold(),
            skip_inactive: true,
            upcoming_only: false,
        }
    }
}

impl RecommendationSettings {
    /// Requested top-K, defaulted and capped
    pub fn top_k(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_top_k).min(self.max_top_k)
    }
}

fn default_top_k() -> usize { 5 }
fn default_max_top_k() -> usize { 50 }
fn default_min_similarity() -> f64 { 0.2 }
fn default_like_threshold() -> f64 { 4.0 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub boosts: BoostsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_content_weight")]
    pub content: f64,
    #[serde(default = "default_collaborative_weight")]
    pub collaborative: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            content: default_content_weight(),
            collaborative: default_collaborative_weight(),
        }
    }
}

fn default_content_weight() -> f64 { 0.7 }
fn default_collaborative_weight() -> f64 { 0.3 }

#[derive(Debug, Clone, Deserialize)]
pub struct BoostsConfig {
    #[serde(default = "default_category_boost")]
    pub category: f64,
    #[serde(default = "default_tag_boost")]
    pub tag: f64,
}

impl Default for BoostsConfig {
    fn default() -> Self {
        Self {
            category: default_category_boost(),
            tag: default_tag_boost(),
        }
    }
}

fn default_category_boost() -> f64 { 0.2 }
fn default_tag_boost() -> f64 { 0.1 }

#[derive(Debug, Clone, Deserialize)]
pub struct EncoderSettings {
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    #[serde(default = "default_max_df")]
    pub max_df: f64,
    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,
    #[serde(default = "crate::models::domain::default_true")]
    pub stop_words: bool,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
            max_df: default_max_df(),
            ngram_max: default_ngram_max(),
            stop_words: true,
        }
    }
}

fn default_max_features() -> usize { 1000 }
fn default_max_df() -> f64 { 0.95 }
fn default_ngram_max() -> usize { 2 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with EVENTREC_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., EVENTREC__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("EVENTREC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("EVENTREC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn tfidf_config(&self) -> TfidfConfig {
        TfidfConfig {
            max_features: self.encoder.max_features,
            max_df: self.encoder.max_df,
            ngram_max: self.encoder.ngram_max,
            stop_words: self.encoder.stop_words,
        }
    }

    /// Build the recommender these settings describe
    ///
    /// The encoder is created once here and shared by every request.
    pub fn recommender(&self) -> Result<Recommender, EncodeError> {
        let encoder = TfidfEncoder::new(self.tfidf_config())?;

        let weights = ScoringWeights {
            content: self.scoring.weights.content,
            collaborative: self.scoring.weights.collaborative,
        };
        let boosts = BoostWeights {
            category: self.scoring.boosts.category,
            tag: self.scoring.boosts.tag,
        };

        Ok(Recommender::new(Arc::new(encoder), weights, boosts)
            .with_filter(CatalogFilter {
                skip_inactive: self.recommendation.skip_inactive,
                upcoming_only: self.recommendation.upcoming_only,
            })
            .with_min_similarity(self.recommendation.min_similarity)
            .with_like_threshold(self.recommendation.like_threshold))
    }
}
