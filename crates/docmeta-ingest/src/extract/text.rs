//! Sentence splitting and word tokenization shared by the heuristics.

use once_cell::sync::Lazy;
use regex::Regex;

/// Word tokens (with inner apostrophes/hyphens) or single punctuation marks.
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+(?:['’-]\w+)*|[^\w\s]").unwrap());

/// Characters that may trail a sentence terminator before the whitespace.
const CLOSERS: &[char] = &['.', '!', '?', '"', '\'', '”', '’', ')', ']'];

/// Lowercased abbreviations whose period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "inc", "ltd", "jr", "sr", "st", "vs", "etc", "e.g", "i.e",
    "fig", "corp", "dept", "approx",
];

/// Split text into sentences without lookbehind.
///
/// A sentence ends at `.`, `!` or `?` (plus any closing quotes or brackets)
/// followed by whitespace, unless the period belongs to an abbreviation or an
/// initial. A blank line also ends a sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];

        if matches!(c, '.' | '!' | '?') {
            let mut j = i + 1;
            while j < chars.len() && CLOSERS.contains(&chars[j].1) {
                j += 1;
            }
            let end = chars.get(j).map(|&(p, _)| p).unwrap_or(text.len());
            let followed_by_space = chars.get(j).map(|&(_, n)| n.is_whitespace()).unwrap_or(false);
            if followed_by_space && !(c == '.' && ends_with_abbreviation(&text[start..pos])) {
                push_trimmed(&mut sentences, &text[start..end]);
                start = end;
            }
            i = j;
            continue;
        }

        if c == '\n' {
            let mut k = i + 1;
            while k < chars.len() && matches!(chars[k].1, ' ' | '\t' | '\r') {
                k += 1;
            }
            if k < chars.len() && chars[k].1 == '\n' {
                push_trimmed(&mut sentences, &text[start..pos]);
                start = pos;
                i = k;
                continue;
            }
        }

        i += 1;
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, s: &'a str) {
    let s = s.trim();
    if !s.is_empty() {
        out.push(s);
    }
}

fn ends_with_abbreviation(segment: &str) -> bool {
    let word = match segment.split_whitespace().last() {
        Some(w) => w.trim_start_matches(|c: char| !c.is_alphanumeric()),
        None => return false,
    };
    let mut letters = word.chars();
    if let (Some(first), None) = (letters.next(), letters.next()) {
        return first.is_alphabetic();
    }
    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

/// Contraction suffixes split off as their own token, apostrophe excluded.
const CLITICS: &[&str] = &["s", "re", "ve", "ll", "d", "m"];

/// Tokenize text into words and punctuation marks. Contractions are split
/// treebank-style: "don't" is "do" + "n't", "it's" is "it" + "'s".
pub fn word_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for m in WORD_RE.find_iter(text) {
        let token = m.as_str();
        match clitic_split(token) {
            Some(at) => {
                tokens.push(&token[..at]);
                tokens.push(&token[at..]);
            }
            None => tokens.push(token),
        }
    }
    tokens
}

/// Byte offset where a trailing clitic starts, if the token has one.
fn clitic_split(token: &str) -> Option<usize> {
    let apostrophe = token.rfind(|c: char| c == '\'' || c == '’')?;
    let suffix = &token[apostrophe..];
    let after = &suffix[suffix.chars().next()?.len_utf8()..];

    if after.eq_ignore_ascii_case("t") {
        let stem = &token[..apostrophe];
        if stem.len() > 1 && stem.ends_with(|c: char| c == 'n' || c == 'N') {
            return Some(apostrophe - 1);
        }
        return None;
    }
    if apostrophe > 0 && CLITICS.iter().any(|c| after.eq_ignore_ascii_case(c)) {
        return Some(apostrophe);
    }
    None
}

/// Whitespace-delimited word count.
pub fn whitespace_word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of characters (not bytes) in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The first `n` characters of `text`, never splitting a code point.
pub fn char_prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
