use aprender::text::vectorize::CountVectorizer;
use aprender::text::Tokenizer;
use aprender::AprenderError;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;
use crate::core::similarity::l2_normalize;

/// Errors that can occur while encoding text into vectors
#[derive(Debug, Error, PartialEq)]
pub enum EncodeError {
    #[error("empty vocabulary: texts contain no usable terms")]
    EmptyVocabulary,

    #[error("no terms remain after pruning terms present in more than {max_df} of {documents} documents")]
    AllTermsPruned { max_df: f64, documents: usize },

    #[error("invalid encoder configuration: {0}")]
    InvalidConfig(String),

    #[error("vectorizer failed: {0}")]
    Vectorize(String),
}

impl From<AprenderError> for EncodeError {
    fn from(err: AprenderError) -> Self {
        EncodeError::Vectorize(err.to_string())
    }
}

/// Maps a batch of texts into one shared vector space
///
/// Implementations may fit their representation on the batch itself or use
/// a fixed embedding; either way `encode` must not leave fitted state behind,
/// because one encoder instance serves every request concurrently.
pub trait TextEncoder: Send + Sync + fmt::Debug {
    /// Encode `texts`, returning one vector per text, all of equal length
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f64>>, EncodeError>;
}

/// TF-IDF parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TfidfConfig {
    /// Vocabulary cap, keeping the most frequent terms of the batch
    pub max_features: usize,
    /// Terms present in a larger share of documents than this are dropped
    pub max_df: f64,
    /// Longest word n-gram
    pub ngram_max: usize,
    /// Remove English stop words before building n-grams
    pub stop_words: bool,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            max_features: 1000,
            max_df: 0.95,
            ngram_max: 2,
            stop_words: true,
        }
    }
}

/// Corpus-fitted TF-IDF encoder
///
/// Every call to [`TextEncoder::encode`] builds a fresh vocabulary from the
/// texts it is given, so scores are relative to that batch only. The struct
/// holds nothing but its configuration.
#[derive(Debug, Clone)]
pub struct TfidfEncoder {
    config: TfidfConfig,
}

impl TfidfEncoder {
    pub fn new(config: TfidfConfig) -> Result<Self, EncodeError> {
        if config.max_features == 0 {
            return Err(EncodeError::InvalidConfig("max_features must be at least 1".to_string()));
        }
        if !(config.max_df > 0.0 && config.max_df <= 1.0) {
            return Err(EncodeError::InvalidConfig(format!(
                "max_df must be in (0, 1], got {}",
                config.max_df
            )));
        }
        if config.ngram_max == 0 {
            return Err(EncodeError::InvalidConfig("ngram_max must be at least 1".to_string()));
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &TfidfConfig {
        &self.config
    }

    /// Fresh count vectorizer for one batch
    fn vectorizer(&self) -> CountVectorizer {
        let vectorizer = CountVectorizer::new()
            .with_tokenizer(Box::new(TermTokenizer))
            .with_ngram_range(1, self.config.ngram_max);

        if self.config.stop_words {
            vectorizer.with_stop_words_english()
        } else {
            vectorizer
        }
    }
}

impl Default for TfidfEncoder {
    fn default() -> Self {
        Self {
            config: TfidfConfig::default(),
        }
    }
}

impl TextEncoder for TfidfEncoder {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f64>>, EncodeError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        // Counting is delegated; document-frequency pruning, the vocabulary
        // cap and idf weighting are applied to the raw counts below
        let mut vectorizer = self.vectorizer();
        vectorizer.fit(texts)?;
        if vectorizer.vocabulary_size() == 0 {
            return Err(EncodeError::EmptyVocabulary);
        }

        let counts = vectorizer.transform(texts)?;
        let n_docs = counts.n_rows();
        let rows: Vec<&[f64]> = counts.as_slice().chunks(counts.n_cols()).collect();

        // (term, column, document frequency, corpus frequency)
        let max_doc_count = self.config.max_df * n_docs as f64;
        let mut kept: Vec<(&str, usize, usize, f64)> = vectorizer
            .vocabulary()
            .iter()
            .filter_map(|(term, &col)| {
                let df = rows.iter().filter(|row| row[col] > 0.0).count();
                if df as f64 > max_doc_count {
                    return None;
                }
                let total = rows.iter().map(|row| row[col]).sum();
                Some((term.as_str(), col, df, total))
            })
            .collect();

        if kept.is_empty() {
            return Err(EncodeError::AllTermsPruned {
                max_df: self.config.max_df,
                documents: n_docs,
            });
        }

        // Most frequent first, ties alphabetical
        kept.sort_by(|a, b| {
            b.3.partial_cmp(&a.3)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        kept.truncate(self.config.max_features);
        kept.sort_unstable_by_key(|&(term, ..)| term);

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let idf: Vec<f64> = kept
            .iter()
            .map(|&(_, _, df, _)| ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors = rows
            .iter()
            .map(|row| {
                let mut vector: Vec<f64> = kept
                    .iter()
                    .zip(&idf)
                    .map(|(&(_, col, _, _), weight)| row[col] * weight)
                    .collect();
                l2_normalize(&mut vector);
                vector
            })
            .collect();

        Ok(vectors)
    }
}

/// Word tokenizer handed to the count vectorizer
///
/// Keeps runs of two or more alphanumeric or underscore characters,
/// lower-cased; everything else separates tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermTokenizer;

impl Tokenizer for TermTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, AprenderError> {
        Ok(tokenize(text))
    }
}

/// Lower-cased word tokens of two or more alphanumeric/underscore characters
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}
