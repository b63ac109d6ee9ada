//! Readability score from average sentence length and average token length.

use super::text::{split_sentences, word_tokens};

/// `(avg tokens per sentence * 0.6 + avg chars per token * 5) * 5`, capped at 100.
/// Zero when there are no sentences or no tokens.
pub fn readability_score(text: &str) -> f64 {
    let sentences = split_sentences(text);
    let words = word_tokens(text);
    if sentences.is_empty() || words.is_empty() {
        return 0.0;
    }

    let avg_sentence_length = words.len() as f64 / sentences.len() as f64;
    let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    let avg_word_length = total_chars as f64 / words.len() as f64;

    let score = (avg_sentence_length * 0.6 + avg_word_length * 5.0) * 5.0;
    score.min(100.0)
}
