//! Entity recognizer trait and the no-op implementation.
//!
//! Labels follow the OntoNotes scheme (`PERSON`, `ORG`, `GPE`, `LOC`,
//! `DATE`, `TIME`, `MONEY`, `PERCENT`, ...). Callers decide how labels are
//! grouped.

use docmeta_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// A recognized entity span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedEntity {
    pub text: String,
    pub label: String,
    /// Start offset in characters.
    pub start: usize,
    /// End offset in characters (exclusive).
    pub end: usize,
}

/// Trait for named-entity recognition backends.
pub trait EntityRecognizer: Send + Sync {
    /// Find entity spans in `text`, ordered by position.
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>>;

    /// Check if the backend is loaded and usable.
    fn is_available(&self) -> bool;

    /// Short backend name for logs and health output.
    fn name(&self) -> &str;
}

/// Stand-in used when no recognizer could be loaded.
pub struct NoopRecognizer;

impl EntityRecognizer for NoopRecognizer {
    fn recognize(&self, _text: &str) -> Result<Vec<RecognizedEntity>> {
        Err(Error::Recognizer("no entity recognizer loaded".into()))
    }

    fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "none"
    }
}
