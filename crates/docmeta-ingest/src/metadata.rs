//! Metadata generation pipeline: text + filename → `MetadataRecord`.
//!
//! Heuristics run independently over the same text. A heuristic that fails
//! is replaced by its default and reported in `Analysis::degraded`; the
//! record itself is always well-formed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use docmeta_core::GeneratorConfig;
use docmeta_infer::{EntityRecognizer, PatternRecognizer};

use crate::extract::entities::{empty_groups, group_entities, EntityGroups};
use crate::extract::keywords::{extract_keywords, Keyword, KeywordMethod};
use crate::extract::language::{detect_language, UNKNOWN_LANGUAGE};
use crate::extract::readability::readability_score;
use crate::extract::stopwords::StopWordSets;
use crate::extract::summary::generate_summary;
use crate::extract::text::{char_len, word_tokens};
use crate::extract::title::extract_title;

/// Summary used for empty or whitespace-only documents.
pub const EMPTY_SUMMARY: &str = "Empty document";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Metadata describing one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub title: String,
    pub filename: String,
    /// Character length of the extracted text, not the uploaded file's size.
    pub file_size: usize,
    pub word_count: usize,
    pub processing_date: String,
    pub language: String,
    pub keywords: Vec<Keyword>,
    pub entities: EntityGroups,
    pub summary: String,
    pub readability_score: f64,
}

/// The heuristics that can degrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    Keywords,
    Entities,
}

/// A heuristic that failed and was replaced by its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Degradation {
    pub heuristic: Heuristic,
    pub reason: String,
}

/// A record together with how it was produced.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub record: MetadataRecord,
    /// `None` for empty documents.
    pub keyword_method: Option<KeywordMethod>,
    pub degraded: Vec<Degradation>,
}

impl Analysis {
    pub fn is_degraded(&self, heuristic: Heuristic) -> bool {
        self.degraded.iter().any(|d| d.heuristic == heuristic)
    }
}

/// Builds metadata records. Construct once and share; it holds only
/// read-only resources.
pub struct MetadataGenerator {
    config: GeneratorConfig,
    recognizer: Arc<dyn EntityRecognizer>,
    stop_words: StopWordSets,
}

impl MetadataGenerator {
    pub fn new(
        config: GeneratorConfig,
        recognizer: Arc<dyn EntityRecognizer>,
        stop_words: StopWordSets,
    ) -> Self {
        Self {
            config,
            recognizer,
            stop_words,
        }
    }

    /// Default configuration, pattern recognizer and the built-in stop-word lists.
    pub fn with_defaults() -> Self {
        Self::new(
            GeneratorConfig::default(),
            Arc::new(PatternRecognizer::new()),
            StopWordSets::english(),
        )
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn recognizer(&self) -> &dyn EntityRecognizer {
        self.recognizer.as_ref()
    }

    /// Generate the metadata record. Never fails.
    pub fn generate(&self, text: &str, filename: &str) -> MetadataRecord {
        self.analyze(text, filename).record
    }

    /// Generate the record and report which heuristics degraded.
    pub fn analyze(&self, text: &str, filename: &str) -> Analysis {
        if text.trim().is_empty() {
            return Analysis {
                record: empty_record(filename),
                keyword_method: None,
                degraded: Vec::new(),
            };
        }

        let mut degraded = Vec::new();

        let word_count = word_tokens(text).len();

        let extraction = extract_keywords(text, &self.stop_words, &self.config.keywords);
        if let Some(reason) = extraction.fallback_reason {
            warn!("TF-IDF keyword extraction failed, using word frequency: {}", reason);
            degraded.push(Degradation {
                heuristic: Heuristic::Keywords,
                reason,
            });
        }

        let entities = match group_entities(
            self.recognizer.as_ref(),
            text,
            self.config.entity_char_limit,
            self.config.max_entities_per_category,
        ) {
            Ok(groups) => groups,
            Err(e) => {
                warn!("Entity extraction failed: {}", e);
                degraded.push(Degradation {
                    heuristic: Heuristic::Entities,
                    reason: e.to_string(),
                });
                empty_groups()
            }
        };

        let record = MetadataRecord {
            title: extract_title(text, filename),
            filename: filename.to_string(),
            file_size: char_len(text),
            word_count,
            processing_date: now(),
            language: detect_language(text).to_string(),
            keywords: extraction.keywords,
            entities,
            summary: generate_summary(text, self.config.summary_max_length),
            readability_score: readability_score(text),
        };

        debug!(
            "Generated metadata for {}: {} words, {} keywords via {:?}",
            filename,
            record.word_count,
            record.keywords.len(),
            extraction.method
        );

        Analysis {
            record,
            keyword_method: Some(extraction.method),
            degraded,
        }
    }
}

/// The fixed record for empty or whitespace-only text.
pub fn empty_record(filename: &str) -> MetadataRecord {
    MetadataRecord {
        title: filename.to_string(),
        filename: filename.to_string(),
        file_size: 0,
        word_count: 0,
        processing_date: now(),
        language: UNKNOWN_LANGUAGE.to_string(),
        keywords: Vec::new(),
        entities: EntityGroups::new(),
        summary: EMPTY_SUMMARY.to_string(),
        readability_score: 0.0,
    }
}

fn now() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}
