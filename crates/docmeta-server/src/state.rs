//! Shared application state.

use std::sync::Arc;

use docmeta_core::DocMetaConfig;
use docmeta_ingest::{DocumentExtractor, MetadataGenerator, OcrConfig, StopWordSets};
use parking_lot::RwLock;

use crate::analytics::AnalyticsLedger;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: DocMetaConfig,
    pub generator: Arc<MetadataGenerator>,
    pub extractor: DocumentExtractor,
    /// Documents processed since startup.
    pub analytics: RwLock<AnalyticsLedger>,
}

impl AppState {
    pub fn new(config: DocMetaConfig) -> Self {
        let generator = Arc::new(build_generator(&config));
        Self::with_generator(config, generator)
    }

    /// State around an already-built generator.
    pub fn with_generator(config: DocMetaConfig, generator: Arc<MetadataGenerator>) -> Self {
        let extractor = DocumentExtractor::new(OcrConfig {
            tesseract_cmd: config.tesseract_cmd.clone(),
        });
        Self {
            config,
            generator,
            extractor,
            analytics: RwLock::new(AnalyticsLedger::default()),
        }
    }
}

/// Load the recognizer and stop words named by `config` and build the generator.
pub fn build_generator(config: &DocMetaConfig) -> MetadataGenerator {
    let recognizer = docmeta_infer::create_recognizer(config.recognizer);
    let stop_words = StopWordSets::load(config.stopwords_file.as_deref());
    MetadataGenerator::new(config.generator.clone(), recognizer, stop_words)
}
