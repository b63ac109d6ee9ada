//! Small TF-IDF vectorizer over unigrams and bigrams.
//!
//! Mirrors the usual text-vectorizer defaults: lowercase `\b\w\w+\b` tokens,
//! stop words dropped before n-grams are formed, document-frequency pruning,
//! smoothed idf `ln((1 + n) / (1 + df)) + 1` and L2-normalized rows.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

use docmeta_core::{Error, Result};

use super::stopwords::StopWords;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Document-frequency bounds and n-gram range.
#[derive(Debug, Clone, Copy)]
pub struct TfidfParams {
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum fraction of documents a term may appear in.
    pub max_df: f64,
    /// Longest n-gram built (1 = unigrams only).
    pub max_ngram: usize,
}

impl Default for TfidfParams {
    fn default() -> Self {
        Self {
            min_df: 2,
            max_df: 0.85,
            max_ngram: 2,
        }
    }
}

/// Term counts for one document.
fn analyze(doc: &str, stop_words: &StopWords, max_ngram: usize) -> HashMap<String, usize> {
    let lower = doc.to_lowercase();
    let tokens: Vec<&str> = TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !stop_words.contains(t))
        .collect();

    let mut counts = HashMap::new();
    for n in 1..=max_ngram {
        for gram in tokens.windows(n) {
            *counts.entry(gram.join(" ")).or_insert(0) += 1;
        }
    }
    counts
}

/// Score every retained term against the first document.
///
/// Returns `(term, score)` pairs in vocabulary (alphabetical) order.
pub fn score_first_document<S: AsRef<str>>(
    documents: &[S],
    stop_words: &StopWords,
    params: TfidfParams,
) -> Result<Vec<(String, f64)>> {
    if documents.is_empty() {
        return Err(Error::Keyword("no documents to vectorize".into()));
    }

    let n_docs = documents.len();
    let max_doc_count = params.max_df * n_docs as f64;
    if max_doc_count < params.min_df as f64 {
        return Err(Error::Keyword(format!(
            "max_df {} over {} documents is below min_df {}",
            params.max_df, n_docs, params.min_df
        )));
    }

    let counts: Vec<HashMap<String, usize>> = documents
        .iter()
        .map(|d| analyze(d.as_ref(), stop_words, params.max_ngram))
        .collect();

    let mut df: HashMap<&str, usize> = HashMap::new();
    for doc in &counts {
        for term in doc.keys() {
            *df.entry(term.as_str()).or_insert(0) += 1;
        }
    }
    if df.is_empty() {
        return Err(Error::Keyword(
            "empty vocabulary; documents may contain only stop words".into(),
        ));
    }

    let vocabulary: BTreeMap<&str, f64> = df
        .iter()
        .filter(|(_, &d)| d >= params.min_df && (d as f64) <= max_doc_count)
        .map(|(&term, &d)| {
            let idf = ((1.0 + n_docs as f64) / (1.0 + d as f64)).ln() + 1.0;
            (term, idf)
        })
        .collect();
    if vocabulary.is_empty() {
        return Err(Error::Keyword("no terms remain after pruning".into()));
    }

    let first = &counts[0];
    let mut row: Vec<(String, f64)> = vocabulary
        .iter()
        .map(|(&term, &idf)| {
            let tf = first.get(term).copied().unwrap_or(0) as f64;
            (term.to_string(), tf * idf)
        })
        .collect();

    let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in row.iter_mut() {
            *w /= norm;
        }
    }
    Ok(row)
}
