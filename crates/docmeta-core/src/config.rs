//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Paths to the DocMeta data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Stored uploads (`data/uploads/`).
    pub uploads: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            uploads: root.join("uploads"),
            root,
        };
        std::fs::create_dir_all(&paths.uploads)?;
        Ok(paths)
    }
}

/// Which entity recognizer backend to load at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognizerKind {
    /// Rule-based recognizer (regex patterns + gazetteer).
    Pattern,
    /// No recognizer; entity buckets always come back empty.
    None,
}

impl FromStr for RecognizerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pattern" | "" => Ok(Self::Pattern),
            "none" | "off" | "disabled" => Ok(Self::None),
            other => Err(Error::Config(format!("unknown recognizer '{}'", other))),
        }
    }
}

/// Parameters of the TF-IDF keyword extractor and its frequency fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Maximum number of keywords returned.
    pub max_keywords: usize,
    /// Below this many words the frequency fallback is used directly.
    pub min_words_for_tfidf: usize,
    /// Above this many words the text is split into synthetic documents.
    pub chunking_threshold: usize,
    /// Approximate number of sentence chunks to build.
    pub target_chunks: usize,
    /// Lower bound on sentences per chunk.
    pub min_chunk_sentences: usize,
    /// Terms in more than this fraction of documents are ignored.
    pub max_df: f64,
    /// Terms in fewer than this many documents are ignored.
    pub min_df: usize,
    /// Keywords must score strictly above this.
    pub min_score: f64,
    /// Keywords must be strictly longer than this many characters.
    pub min_keyword_chars: usize,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            max_keywords: 10,
            min_words_for_tfidf: 100,
            chunking_threshold: 200,
            target_chunks: 5,
            min_chunk_sentences: 5,
            max_df: 0.85,
            min_df: 2,
            min_score: 0.01,
            min_keyword_chars: 2,
        }
    }
}

/// Tunables for the metadata generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub keywords: KeywordConfig,
    /// Summary length budget in characters.
    pub summary_max_length: usize,
    /// Only this many leading characters are passed to the recognizer.
    pub entity_char_limit: usize,
    /// Cap on entries per entity category.
    pub max_entities_per_category: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            keywords: KeywordConfig::default(),
            summary_max_length: 200,
            entity_char_limit: 100_000,
            max_entities_per_category: 10,
        }
    }
}

/// Top-level DocMeta configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocMetaConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Maximum accepted upload body in bytes.
    pub max_upload_bytes: usize,
    /// Entity recognizer backend.
    pub recognizer: RecognizerKind,
    /// Optional newline-separated stop-word list replacing the built-in one.
    pub stopwords_file: Option<PathBuf>,
    /// Tesseract executable used for image OCR.
    pub tesseract_cmd: String,
    /// Metadata generator tunables.
    pub generator: GeneratorConfig,
}

impl DocMetaConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Result<Self> {
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup (environment in production).
    pub fn from_lookup<F>(data_dir: impl AsRef<Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let max_upload_mb: usize = lookup("DOCMETA_MAX_UPLOAD_MB")
            .and_then(|v| v.parse().ok())
            .unwrap_or(16);

        let recognizer = match lookup("DOCMETA_RECOGNIZER") {
            Some(value) => value.parse()?,
            None => RecognizerKind::Pattern,
        };

        let mut generator = GeneratorConfig::default();
        if let Some(chunks) = lookup("DOCMETA_TFIDF_CHUNKS").and_then(|v| v.parse().ok()) {
            if chunks == 0 {
                return Err(Error::Config("DOCMETA_TFIDF_CHUNKS must be positive".into()));
            }
            generator.keywords.target_chunks = chunks;
        }
        if let Some(len) = lookup("DOCMETA_SUMMARY_MAX_LEN").and_then(|v| v.parse().ok()) {
            generator.summary_max_length = len;
        }

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            port,
            data_paths,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            recognizer,
            stopwords_file: lookup("DOCMETA_STOPWORDS_FILE").map(PathBuf::from),
            tesseract_cmd: lookup("DOCMETA_TESSERACT").unwrap_or_else(|| "tesseract".to_string()),
            generator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DocMetaConfig::from_lookup(dir.path(), lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.recognizer, RecognizerKind::Pattern);
        assert_eq!(config.tesseract_cmd, "tesseract");
        assert_eq!(config.generator.summary_max_length, 200);
        assert_eq!(config.generator.keywords.target_chunks, 5);
        assert!(config.data_paths.uploads.is_dir());
    }

    #[test]
    fn test_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let config = DocMetaConfig::from_lookup(
            dir.path(),
            lookup_from(&[
                ("PORT", "9000"),
                ("DOCMETA_MAX_UPLOAD_MB", "2"),
                ("DOCMETA_RECOGNIZER", "none"),
                ("DOCMETA_TFIDF_CHUNKS", "8"),
                ("DOCMETA_SUMMARY_MAX_LEN", "120"),
            ]),
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_upload_bytes, 2 * 1024 * 1024);
        assert_eq!(config.recognizer, RecognizerKind::None);
        assert_eq!(config.generator.keywords.target_chunks, 8);
        assert_eq!(config.generator.summary_max_length, 120);
    }

    #[test]
    fn test_invalid_recognizer() {
        let dir = tempfile::tempdir().unwrap();
        let err = DocMetaConfig::from_lookup(dir.path(), lookup_from(&[("DOCMETA_RECOGNIZER", "spacy")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_zero_chunks_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result =
            DocMetaConfig::from_lookup(dir.path(), lookup_from(&[("DOCMETA_TFIDF_CHUNKS", "0")]));
        assert!(result.is_err());
    }
}
