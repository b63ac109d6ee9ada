//! DocMeta Ingest — file text extraction and heuristic metadata generation.

pub mod extract;
pub mod file;
pub mod metadata;

pub use extract::entities::{EntityCategory, EntityGroups};
pub use extract::keywords::{Keyword, KeywordExtraction, KeywordMethod};
pub use extract::stopwords::{StopWordSets, StopWords};
pub use file::{clean_text, is_allowed, DocumentExtractor, FileType, OcrConfig, ALLOWED_EXTENSIONS};
pub use metadata::{empty_record, Analysis, Degradation, Heuristic, MetadataGenerator, MetadataRecord};
