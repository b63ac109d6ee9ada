//! Title detection: short first line, then heading-like markers, then the filename.

use once_cell::sync::Lazy;
use regex::Regex;

use super::text::char_len;

/// Heading markers, tried in order. Group 1 holds the title.
static TITLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?im)^#\s+(.+)$",
        r"(?im)^Title:\s*(.+)$",
        r"(?im)^Subject:\s*(.+)$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

const MAX_FIRST_LINE_CHARS: usize = 100;
const MAX_FIRST_LINE_WORDS: usize = 15;

/// Best-effort document title.
pub fn extract_title(text: &str, filename: &str) -> String {
    let first_line = text.split('\n').next().unwrap_or("").trim();
    if !first_line.is_empty()
        && char_len(first_line) < MAX_FIRST_LINE_CHARS
        && first_line.split_whitespace().count() < MAX_FIRST_LINE_WORDS
    {
        // A first line that is itself a heading yields the heading text.
        return match find_marked_title(first_line) {
            Some(title) => title,
            None => first_line.to_string(),
        };
    }

    if let Some(title) = find_marked_title(text) {
        return title;
    }

    title_from_filename(filename)
}

fn find_marked_title(text: &str) -> Option<String> {
    TITLE_PATTERNS.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

/// Filename with the last extension removed.
pub fn title_from_filename(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => filename.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_heading_first_line() {
        assert_eq!(extract_title("# My Report\nBody text...", "r.txt"), "My Report");
    }

    #[test]
    fn test_short_first_line() {
        assert_eq!(
            extract_title("Quarterly Results\n\nRevenue grew.", "q.pdf"),
            "Quarterly Results"
        );
    }

    #[test]
    fn test_marker_after_long_first_line() {
        let text = format!("{}\nTitle:   Design Notes  \nmore", "word ".repeat(30));
        assert_eq!(extract_title(&text, "notes.docx"), "Design Notes");
    }

    #[test]
    fn test_subject_is_case_insensitive() {
        let text = format!("{}\nSUBJECT: Budget review", "long ".repeat(40));
        assert_eq!(extract_title(&text, "mail.txt"), "Budget review");
    }

    #[test]
    fn test_heading_wins_over_title_marker() {
        let text = format!("{}\nTitle: Second\n# First", "x ".repeat(20));
        assert_eq!(extract_title(&text, "f.txt"), "First");
    }

    #[test]
    fn test_filename_fallback_for_paragraph() {
        let paragraph = "Lorem ipsum dolor sit amet consectetur adipiscing elit \
                         eiusmod tempor incididunt ut labore et dolore magna aliqua ut enim \
                         ad minim veniam quis nostrud exercitation ullamco laboris nisi ut \
                         aliquip ex ea commodo consequat duis aute irure dolor in reprehenderit \
                         in voluptate velit esse cillum dolore eu fugiat nulla pariatur";
        assert_eq!(paragraph.split_whitespace().count(), 50);
        assert_eq!(extract_title(paragraph, "annual.report.pdf"), "annual.report");
    }

    #[test]
    fn test_filename_without_extension() {
        assert_eq!(extract_title("\n\nbody", "README"), "README");
    }
}
