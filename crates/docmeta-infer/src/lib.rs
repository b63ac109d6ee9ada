//! DocMeta Infer — named-entity recognition backends.
//!
//! Provides the `EntityRecognizer` trait used by the metadata generator.
//! `PatternRecognizer` finds entities with regex rules and a small gazetteer.
//! When recognition is disabled, `NoopRecognizer` is used and every entity
//! category comes back empty.

pub mod pattern;
pub mod recognizer;

pub use pattern::PatternRecognizer;
pub use recognizer::{EntityRecognizer, NoopRecognizer, RecognizedEntity};

use std::sync::Arc;

use docmeta_core::RecognizerKind;

/// Create the configured recognizer.
///
/// The result is built once at startup and shared read-only across requests.
pub fn create_recognizer(kind: RecognizerKind) -> Arc<dyn EntityRecognizer> {
    match kind {
        RecognizerKind::Pattern => {
            let recognizer = PatternRecognizer::new();
            tracing::info!("Using {} entity recognizer", recognizer.name());
            Arc::new(recognizer)
        }
        RecognizerKind::None => {
            tracing::warn!("Entity recognition disabled. Entity categories will be empty.");
            Arc::new(NoopRecognizer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_recognizer() {
        assert!(create_recognizer(RecognizerKind::Pattern).is_available());
        assert!(!create_recognizer(RecognizerKind::None).is_available());
    }
}
