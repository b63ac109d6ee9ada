//! Heuristic metadata extraction.
//!
//! Each submodule is one independent heuristic over the document text:
//! title, keywords (TF-IDF with a frequency fallback), entity grouping,
//! extractive summary, readability and language. `text` holds the shared
//! sentence splitter and word tokenizer.

pub mod entities;
pub mod keywords;
pub mod language;
pub mod readability;
pub mod stopwords;
pub mod summary;
pub mod text;
pub mod tfidf;
pub mod title;
