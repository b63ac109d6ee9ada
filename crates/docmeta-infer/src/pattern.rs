//! Rule-based entity recognizer.
//!
//! Regex patterns for people, organizations, dates, times, money and
//! percentages, plus a gazetteer of countries, US states and major cities.
//! Overlapping candidates are resolved longest-first, then by rule priority.

use once_cell::sync::Lazy;
use regex::Regex;

use docmeta_core::Result;

use crate::recognizer::{EntityRecognizer, RecognizedEntity};

/// A compiled rule. `group` selects the capture group used as the entity span.
struct Rule {
    label: &'static str,
    regex: Regex,
    group: usize,
    priority: u8,
}

impl Rule {
    fn new(label: &'static str, pattern: &str, group: usize, priority: u8) -> Self {
        Self {
            label,
            regex: Regex::new(pattern).expect("entity pattern must compile"),
            group,
            priority,
        }
    }
}

const MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|November|December";
const MONTHS_SHORT: &str = "Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec";
const WEEKDAYS: &str = "Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday";

const ORG_SUFFIXES: &str = "Corporation|Company|Technologies|Foundation|Association|Institute|Holdings|Partners|Systems|Agency|Group|Bank|Labs|Corp\\.?|Inc\\.?|Ltd\\.?|LLC|Co\\.";

/// Well-known organization acronyms.
const ORG_ACRONYMS: &[&str] = &[
    "NASA", "FBI", "CIA", "NSA", "UN", "EU", "NATO", "WHO", "IMF", "OPEC", "UNESCO", "UNICEF",
    "IBM", "MIT", "BBC", "CNN", "NYSE", "SEC", "FDA", "CDC", "NIH", "ESA", "WTO", "IEEE", "ACM",
];

/// Countries, US states and major cities.
const GAZETTEER: &[&str] = &[
    // Countries
    "Afghanistan", "Argentina", "Australia", "Austria", "Bangladesh", "Belgium", "Brazil",
    "Canada", "Chile", "China", "Colombia", "Cuba", "Denmark", "Egypt", "Ethiopia", "Finland",
    "France", "Germany", "Greece", "Hungary", "Iceland", "India", "Indonesia", "Iran", "Iraq",
    "Ireland", "Israel", "Italy", "Japan", "Kenya", "Mexico", "Morocco", "Netherlands",
    "New Zealand", "Nigeria", "North Korea", "Norway", "Pakistan", "Peru", "Philippines",
    "Poland", "Portugal", "Russia", "Saudi Arabia", "Singapore", "South Africa", "South Korea",
    "Spain", "Sweden", "Switzerland", "Syria", "Taiwan", "Thailand", "Turkey", "Ukraine",
    "United Arab Emirates", "United Kingdom", "United States", "Venezuela", "Vietnam",
    "England", "Scotland", "Wales", "USA", "UK",
    // US states
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
    "Delaware", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa", "Kansas",
    "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan", "Minnesota",
    "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire", "New Jersey",
    "New Mexico", "North Carolina", "North Dakota", "Ohio", "Oklahoma", "Oregon",
    "Pennsylvania", "Rhode Island", "South Carolina", "South Dakota", "Tennessee", "Texas",
    "Utah", "Vermont", "Virginia", "Washington", "West Virginia", "Wisconsin", "Wyoming",
    // Cities
    "Amsterdam", "Athens", "Atlanta", "Bangkok", "Barcelona", "Beijing", "Berlin", "Boston",
    "Brussels", "Buenos Aires", "Cairo", "Chicago", "Dallas", "Delhi", "Dubai", "Dublin",
    "Hong Kong", "Houston", "Istanbul", "Jakarta", "Lagos", "Lisbon", "London", "Los Angeles",
    "Madrid", "Manila", "Melbourne", "Miami", "Milan", "Montreal", "Moscow", "Mumbai",
    "Munich", "Nairobi", "New York", "New York City", "Oslo", "Paris", "Philadelphia",
    "Prague", "Rome", "San Francisco", "Santiago", "Seattle", "Seoul", "Shanghai",
    "Singapore", "Stockholm", "Sydney", "Tokyo", "Toronto", "Vancouver", "Vienna", "Warsaw",
    "Zurich",
];

/// Continents and oceans.
const LOCATIONS: &[&str] = &[
    "Africa", "Antarctica", "Asia", "Europe", "North America", "South America", "Oceania",
    "Middle East", "Atlantic Ocean", "Pacific Ocean", "Indian Ocean", "Arctic Ocean",
    "Mediterranean", "Sahara", "Himalayas", "Alps", "Amazon",
];

/// Capitalized words that start sentences or name non-person things.
const NON_NAME_WORDS: &[&str] = &[
    "The", "A", "An", "In", "On", "At", "To", "For", "From", "By", "With", "Of", "And", "But",
    "Or", "This", "That", "These", "Those", "When", "Where", "While", "After", "Before", "If",
    "As", "Our", "Their", "His", "Her", "Its", "My", "We", "They", "It", "He", "She", "I",
    "Dear", "Title", "Subject", "Chapter", "Section", "Table", "Figure", "Mr", "Mrs", "Ms",
    "Dr", "Prof", "Street", "Avenue", "Road", "University", "College", "School", "Department",
    "Office", "Ministry", "Committee", "Council", "Board", "North", "South", "East", "West",
    "Central", "New", "Project", "Report", "Annual", "Quarterly", "Summary", "Introduction",
    "Conclusion",
];

fn alternation(words: &[&str]) -> String {
    let mut sorted: Vec<&str> = words.to_vec();
    // Longest first so "New York City" wins over "New York".
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));
    sorted
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        // Organizations
        Rule::new(
            "ORG",
            &format!(r"\b[A-Z][A-Za-z&]+(?:\s+[A-Z][A-Za-z&]+)*\s+(?:{})", ORG_SUFFIXES),
            0,
            6,
        ),
        Rule::new(
            "ORG",
            r"\b(?:University|Institute|Bank|Department|Ministry) of(?:\s+[A-Z][a-z]+)+",
            0,
            6,
        ),
        Rule::new("ORG", &format!(r"\b(?:{})\b", alternation(ORG_ACRONYMS)), 0, 5),
        // Places
        Rule::new("GPE", &format!(r"\b(?:{})\b", alternation(GAZETTEER)), 0, 5),
        Rule::new("LOC", &format!(r"\b(?:{})\b", alternation(LOCATIONS)), 0, 4),
        Rule::new(
            "LOC",
            r"\b(?:Mount|Lake|Gulf of|Sea of|Bay of)\s+[A-Z][a-z]+",
            0,
            4,
        ),
        Rule::new(
            "LOC",
            r"\b[A-Z][a-z]+\s+(?:River|Mountains|Ocean|Valley|Desert|Island|Islands)\b",
            0,
            4,
        ),
        // People
        Rule::new(
            "PERSON",
            r"\b(?:Mr|Mrs|Ms|Dr|Prof)\.?\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)",
            1,
            3,
        ),
        Rule::new("PERSON", r"\b[A-Z][a-z]+\s+(?:[A-Z]\.\s+)?[A-Z][a-z]+\b", 0, 1),
        // Dates and times
        Rule::new(
            "DATE",
            &format!(
                r"\b(?:{m})\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s*\d{{4}}\b|\b\d{{1,2}}\s+(?:{m})\s+\d{{4}}\b|\b(?:{m})\s+\d{{4}}\b",
                m = MONTHS
            ),
            0,
            5,
        ),
        Rule::new(
            "DATE",
            &format!(r"\b(?:{})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s*\d{{4}}\b", MONTHS_SHORT),
            0,
            5,
        ),
        Rule::new("DATE", r"\b\d{4}-\d{1,2}-\d{1,2}\b|\b\d{1,2}/\d{1,2}/\d{2,4}\b", 0, 5),
        Rule::new("DATE", &format!(r"\b(?:{})\b", WEEKDAYS), 0, 5),
        Rule::new("DATE", r"\bQ[1-4]\s+\d{4}\b", 0, 5),
        Rule::new(
            "DATE",
            r"\b(?:in|since|by|during|until|from|of)\s+((?:1[6-9]|20)\d{2}s?)\b",
            1,
            2,
        ),
        Rule::new(
            "DATE",
            r"\b(?i:yesterday|today|tomorrow|(?:last|next|this)\s+(?:week|month|year|quarter))\b",
            0,
            2,
        ),
        Rule::new("TIME", r"\b\d{1,2}:\d{2}(?:\s*(?:AM|PM|am|pm|a\.m\.|p\.m\.))?", 0, 5),
        Rule::new("TIME", r"\b\d{1,2}\s*(?:AM|PM|am|pm)\b", 0, 5),
        // Quantities
        Rule::new(
            "MONEY",
            r"\$\d[\d,]*(?:\.\d+)?(?:\s*(?:million|billion|thousand|M|B|K)\b)?",
            0,
            5,
        ),
        Rule::new("PERCENT", r"\b\d+(?:\.\d+)?\s?(?:%|percent\b)", 0, 5),
    ]
});

/// Regex/gazetteer entity recognizer.
pub struct PatternRecognizer {
    rules: &'static [Rule],
}

impl PatternRecognizer {
    pub fn new() -> Self {
        Self { rules: &RULES }
    }
}

impl Default for PatternRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

/// A byte-offset candidate before overlap resolution.
struct Candidate {
    start: usize,
    end: usize,
    label: &'static str,
    priority: u8,
}

impl EntityRecognizer for PatternRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>> {
        let mut candidates = Vec::new();

        for rule in self.rules {
            if rule.label == "PERSON" && rule.group == 0 {
                collect_names(text, rule, &mut candidates);
                continue;
            }
            for caps in rule.regex.captures_iter(text) {
                if let Some(m) = caps.get(rule.group) {
                    candidates.push(Candidate {
                        start: m.start(),
                        end: m.end(),
                        label: rule.label,
                        priority: rule.priority,
                    });
                }
            }
        }

        // Longest span first, then highest priority, then leftmost.
        candidates.sort_by(|a, b| {
            (b.end - b.start)
                .cmp(&(a.end - a.start))
                .then(b.priority.cmp(&a.priority))
                .then(a.start.cmp(&b.start))
        });

        let mut accepted: Vec<Candidate> = Vec::new();
        for candidate in candidates {
            let overlaps = accepted
                .iter()
                .any(|a| candidate.start < a.end && a.start < candidate.end);
            if !overlaps {
                accepted.push(candidate);
            }
        }
        accepted.sort_by_key(|c| c.start);

        Ok(to_char_offsets(text, &accepted))
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

/// Scan for capitalized word pairs. A rejected pair restarts the scan at its
/// second word so "The Alice Walker" still yields "Alice Walker".
fn collect_names(text: &str, rule: &Rule, candidates: &mut Vec<Candidate>) {
    let mut pos = 0;
    while pos < text.len() {
        let m = match rule.regex.find_at(text, pos) {
            Some(m) => m,
            None => break,
        };
        if looks_like_name(m.as_str()) {
            candidates.push(Candidate {
                start: m.start(),
                end: m.end(),
                label: rule.label,
                priority: rule.priority,
            });
            pos = m.end();
        } else {
            let first_word = m.as_str().find(char::is_whitespace).unwrap_or(m.len());
            pos = m.start() + first_word;
        }
    }
}

/// Reject capitalized pairs that are sentence starters, places or titles.
fn looks_like_name(span: &str) -> bool {
    let words: Vec<&str> = span
        .split_whitespace()
        .filter(|w| !w.ends_with('.'))
        .collect();
    if words.len() < 2 {
        return false;
    }
    !words.iter().any(|w| {
        NON_NAME_WORDS.contains(w)
            || MONTHS.split('|').any(|m| m == *w)
            || WEEKDAYS.split('|').any(|d| d == *w)
            || GAZETTEER.contains(w)
    })
}

/// Convert sorted byte spans to char spans in a single pass.
fn to_char_offsets(text: &str, spans: &[Candidate]) -> Vec<RecognizedEntity> {
    let mut out = Vec::with_capacity(spans.len());
    let mut byte_pos = 0;
    let mut char_pos = 0;

    for span in spans {
        char_pos += text[byte_pos..span.start].chars().count();
        let start = char_pos;
        let entity_text = &text[span.start..span.end];
        char_pos += entity_text.chars().count();
        byte_pos = span.end;

        out.push(RecognizedEntity {
            text: entity_text.to_string(),
            label: span.label.to_string(),
            start,
            end: char_pos,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels_for(text: &str, label: &str) -> Vec<String> {
        PatternRecognizer::new()
            .recognize(text)
            .unwrap()
            .into_iter()
            .filter(|e| e.label == label)
            .map(|e| e.text)
            .collect()
    }

    #[test]
    fn test_people() {
        let text = "Yesterday Dr. Alice Walker met with John Smith about the budget.";
        let persons = labels_for(text, "PERSON");
        assert!(persons.contains(&"Alice Walker".to_string()));
        assert!(persons.contains(&"John Smith".to_string()));
    }

    #[test]
    fn test_places_and_orgs() {
        let text = "Acme Corp. opened an office in New York City and another in Berlin. \
                    NASA engineers flew over the Pacific Ocean.";
        let orgs = labels_for(text, "ORG");
        assert!(orgs.contains(&"Acme Corp.".to_string()));
        assert!(orgs.contains(&"NASA".to_string()));

        let gpes = labels_for(text, "GPE");
        assert!(gpes.contains(&"New York City".to_string()));
        assert!(gpes.contains(&"Berlin".to_string()));

        let locs = labels_for(text, "LOC");
        assert!(locs.contains(&"Pacific Ocean".to_string()));
    }

    #[test]
    fn test_dates_times_quantities() {
        let text = "The launch moved to March 3, 2024 at 10:30 AM. Costs rose 12% to $4.5 million.";
        assert_eq!(labels_for(text, "DATE"), vec!["March 3, 2024"]);
        assert_eq!(labels_for(text, "TIME"), vec!["10:30 AM"]);
        assert_eq!(labels_for(text, "PERCENT"), vec!["12%"]);
        assert_eq!(labels_for(text, "MONEY"), vec!["$4.5 million"]);
    }

    #[test]
    fn test_sentence_start_pairs_are_not_people() {
        let text = "The Report covers revenue. In March we grew.";
        assert!(labels_for(text, "PERSON").is_empty());
    }

    #[test]
    fn test_char_offsets_with_multibyte_text() {
        let text = "Café owners in Paris — and in Tokyo.";
        let entities = PatternRecognizer::new().recognize(text).unwrap();
        let chars: Vec<char> = text.chars().collect();
        for entity in &entities {
            let slice: String = chars[entity.start..entity.end].iter().collect();
            assert_eq!(slice, entity.text);
        }
        assert_eq!(entities.len(), 2);
    }

    #[test]
    fn test_spans_do_not_overlap() {
        let text = "Mr. James Holden of Tycho Station Inc. flew from Los Angeles on Monday.";
        let entities = PatternRecognizer::new().recognize(text).unwrap();
        for pair in entities.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }
}
