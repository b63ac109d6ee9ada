//! DocMeta Core — error type and configuration shared by every crate.

pub mod config;
pub mod error;

pub use config::{DataPaths, DocMetaConfig, GeneratorConfig, KeywordConfig, RecognizerKind};
pub use error::{Error, Result};
