//! Keyword extraction: TF-IDF over synthetic documents, with a
//! word-frequency fallback for short texts or when TF-IDF cannot run.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use docmeta_core::{KeywordConfig, Result};

use super::stopwords::{StopWordSets, StopWords};
use super::text::{char_len, split_sentences, whitespace_word_count, word_tokens};
use super::tfidf::{self, TfidfParams};

/// A keyword with a relevance score in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub text: String,
    pub score: f64,
}

/// Which path produced the keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordMethod {
    Tfidf,
    Frequency,
}

/// Keywords plus how they were obtained.
#[derive(Debug, Clone)]
pub struct KeywordExtraction {
    pub keywords: Vec<Keyword>,
    pub method: KeywordMethod,
    /// Set when TF-IDF was attempted and failed.
    pub fallback_reason: Option<String>,
}

/// Extract up to `config.max_keywords` keywords, most relevant first.
pub fn extract_keywords(text: &str, stop_words: &StopWordSets, config: &KeywordConfig) -> KeywordExtraction {
    if whitespace_word_count(text) < config.min_words_for_tfidf {
        return KeywordExtraction {
            keywords: frequent_words(text, &stop_words.frequency, config.max_keywords),
            method: KeywordMethod::Frequency,
            fallback_reason: None,
        };
    }

    match tfidf_keywords(text, &stop_words.tfidf, config) {
        Ok(keywords) => KeywordExtraction {
            keywords,
            method: KeywordMethod::Tfidf,
            fallback_reason: None,
        },
        Err(e) => KeywordExtraction {
            keywords: frequent_words(text, &stop_words.frequency, config.max_keywords),
            method: KeywordMethod::Frequency,
            fallback_reason: Some(e.to_string()),
        },
    }
}

/// The whole text, followed by sentence chunks when the text is long enough.
pub fn synthetic_documents<'a>(text: &'a str, config: &KeywordConfig) -> Vec<Cow<'a, str>> {
    let mut documents = vec![Cow::Borrowed(text)];

    if whitespace_word_count(text) > config.chunking_threshold {
        let sentences = split_sentences(text);
        let chunk_size = config
            .min_chunk_sentences
            .max(sentences.len() / config.target_chunks.max(1))
            .max(1);
        for chunk in sentences.chunks(chunk_size) {
            let joined = chunk.join(" ");
            if !joined.is_empty() {
                documents.push(Cow::Owned(joined));
            }
        }
    }
    documents
}

/// TF-IDF scores of the full text against its synthetic documents.
pub fn tfidf_keywords(text: &str, stop_words: &StopWords, config: &KeywordConfig) -> Result<Vec<Keyword>> {
    let documents = synthetic_documents(text, config);
    let params = TfidfParams {
        min_df: config.min_df,
        max_df: config.max_df,
        ..TfidfParams::default()
    };
    let mut scored = tfidf::score_first_document(&documents, stop_words, params)?;

    // Stable sort keeps alphabetical order among equal scores.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    Ok(scored
        .into_iter()
        .filter(|(term, score)| *score > config.min_score && char_len(term) > config.min_keyword_chars)
        .take(config.max_keywords)
        .map(|(text, score)| Keyword { text, score })
        .collect())
}

/// Most frequent alphabetic, non-stop-word tokens longer than two characters.
/// Scores are relative to the most frequent word.
pub fn frequent_words(text: &str, stop_words: &StopWords, max_words: usize) -> Vec<Keyword> {
    let lower = text.to_lowercase();

    // Counts in first-occurrence order so ties stay stable.
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for token in word_tokens(&lower) {
        if !token.chars().all(char::is_alphabetic) || char_len(token) <= 2 || stop_words.contains(token) {
            continue;
        }
        match index.get(token) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(token, order.len());
                order.push((token, 1));
            }
        }
    }

    let max_count = match order.iter().map(|(_, c)| *c).max() {
        Some(c) => c as f64,
        None => return Vec::new(),
    };

    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
        .into_iter()
        .take(max_words)
        .map(|(word, count)| Keyword {
            text: word.to_string(),
            score: count as f64 / max_count,
        })
        .collect()
}
