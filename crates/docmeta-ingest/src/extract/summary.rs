//! Extractive summary: the first and last sentence, or the text itself when short.

use super::text::{char_len, char_prefix, split_sentences};

pub const ELLIPSIS: &str = "...";
pub const GAP_MARKER: &str = " [...] ";

/// Summarize `text` within roughly `max_length` characters.
pub fn generate_summary(text: &str, max_length: usize) -> String {
    let sentences = split_sentences(text);

    if sentences.len() <= 2 {
        return truncate(text, max_length);
    }

    let half = max_length / 2;
    let first = truncate(sentences[0], half);
    let last = truncate(sentences[sentences.len() - 1], half);
    format!("{}{}{}", first, GAP_MARKER, last)
}

/// `text` unchanged if it fits, else its first `max_length` characters plus an ellipsis.
pub fn truncate(text: &str, max_length: usize) -> String {
    if char_len(text) <= max_length {
        text.to_string()
    } else {
        format!("{}{}", char_prefix(text, max_length), ELLIPSIS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_single_sentence_verbatim() {
        let text = "This one sentence is exactly fifty characters long";
        assert_eq!(text.chars().count(), 50);
        assert_eq!(generate_summary(text, 200), text);
    }

    #[test]
    fn test_two_long_sentences_truncated_as_a_whole() {
        let text = format!("{}. {}.", "a".repeat(150), "b".repeat(150));
        let summary = generate_summary(&text, 200);
        assert_eq!(summary, format!("{}...", &text[..200]));
    }

    #[test]
    fn test_first_and_last_sentence() {
        let text = "Intro sentence here. Middle part one. Middle part two. Closing remark.";
        assert_eq!(
            generate_summary(text, 200),
            "Intro sentence here. [...] Closing remark."
        );
    }

    #[test]
    fn test_long_edges_half_truncated() {
        let first = format!("{}.", "f".repeat(120));
        let last = format!("{}.", "l".repeat(130));
        let text = format!("{} Short middle. {}", first, last);
        let summary = generate_summary(&text, 200);
        assert_eq!(
            summary,
            format!("{}... [...] {}...", "f".repeat(100), "l".repeat(100))
        );
    }

    #[test]
    fn test_multibyte_truncation() {
        let text = "é".repeat(300);
        let summary = generate_summary(&text, 200);
        assert_eq!(summary.chars().count(), 203);
    }
}
