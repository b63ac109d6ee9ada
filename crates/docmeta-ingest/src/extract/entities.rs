//! Groups recognizer output into the five entity categories of the record.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use docmeta_core::{Error, Result};
use docmeta_infer::EntityRecognizer;

use super::text::char_prefix;

/// Entity bucket in the metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityCategory {
    Person,
    Org,
    /// Countries, cities, states and other locations.
    Gpe,
    /// Dates and times.
    Date,
    Misc,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 5] = [
        Self::Person,
        Self::Org,
        Self::Gpe,
        Self::Date,
        Self::Misc,
    ];

    /// Map a recognizer label onto a bucket.
    pub fn from_label(label: &str) -> Self {
        match label {
            "PERSON" => Self::Person,
            "ORG" => Self::Org,
            "GPE" | "LOC" => Self::Gpe,
            "DATE" | "TIME" => Self::Date,
            _ => Self::Misc,
        }
    }
}

pub type EntityGroups = BTreeMap<EntityCategory, Vec<String>>;

/// All five buckets, empty.
pub fn empty_groups() -> EntityGroups {
    EntityCategory::ALL.iter().map(|&c| (c, Vec::new())).collect()
}

/// Run the recognizer over the first `char_limit` characters and bucket the
/// results, deduplicated and capped at `max_per_category` each.
pub fn group_entities(
    recognizer: &dyn EntityRecognizer,
    text: &str,
    char_limit: usize,
    max_per_category: usize,
) -> Result<EntityGroups> {
    if !recognizer.is_available() {
        return Err(Error::Recognizer(format!(
            "recognizer '{}' is not available",
            recognizer.name()
        )));
    }

    let limited = char_prefix(text, char_limit);
    let entities = recognizer.recognize(limited)?;

    let mut groups = empty_groups();
    let mut seen: HashSet<(EntityCategory, &str)> = HashSet::new();
    for entity in &entities {
        let category = EntityCategory::from_label(&entity.label);
        if !seen.insert((category, entity.text.as_str())) {
            continue;
        }
        if let Some(bucket) = groups.get_mut(&category) {
            if bucket.len() < max_per_category {
                bucket.push(entity.text.clone());
            }
        }
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmeta_infer::{NoopRecognizer, RecognizedEntity};

    struct FixedRecognizer(Vec<(&'static str, &'static str)>);

    impl EntityRecognizer for FixedRecognizer {
        fn recognize(&self, _text: &str) -> Result<Vec<RecognizedEntity>> {
            Ok(self
                .0
                .iter()
                .map(|(text, label)| RecognizedEntity {
                    text: text.to_string(),
                    label: label.to_string(),
                    start: 0,
                    end: text.chars().count(),
                })
                .collect())
        }

        fn is_available(&self) -> bool {
            true
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    /// Records the length of the text it was given.
    struct LengthProbe(std::sync::Mutex<usize>);

    impl EntityRecognizer for LengthProbe {
        fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>> {
            *self.0.lock().unwrap() = text.chars().count();
            Ok(Vec::new())
        }

        fn is_available(&self) -> bool {
            true
        }

        fn name(&self) -> &str {
            "probe"
        }
    }

    #[test]
    fn test_label_mapping() {
        let recognizer = FixedRecognizer(vec![
            ("Ada Lovelace", "PERSON"),
            ("Acme", "ORG"),
            ("Alps", "LOC"),
            ("Paris", "GPE"),
            ("noon", "TIME"),
            ("May 1", "DATE"),
            ("$5", "MONEY"),
        ]);
        let groups = group_entities(&recognizer, "ignored", 100, 10).unwrap();
        assert_eq!(groups[&EntityCategory::Person], vec!["Ada Lovelace"]);
        assert_eq!(groups[&EntityCategory::Org], vec!["Acme"]);
        assert_eq!(groups[&EntityCategory::Gpe], vec!["Alps", "Paris"]);
        assert_eq!(groups[&EntityCategory::Date], vec!["noon", "May 1"]);
        assert_eq!(groups[&EntityCategory::Misc], vec!["$5"]);
    }

    #[test]
    fn test_dedup_and_cap() {
        let mut spans = vec![("Paris", "GPE"), ("Paris", "GPE")];
        let cities: Vec<&'static str> = vec![
            "A1", "A2", "A3", "A4", "A5", "A6", "A7", "A8", "A9", "A10", "A11", "A12",
        ];
        spans.extend(cities.into_iter().map(|c| (c, "GPE")));
        let groups = group_entities(&FixedRecognizer(spans), "ignored", 100, 10).unwrap();
        let gpe = &groups[&EntityCategory::Gpe];
        assert_eq!(gpe.len(), 10);
        assert_eq!(gpe.iter().filter(|e| *e == "Paris").count(), 1);
    }

    #[test]
    fn test_unavailable_recognizer_is_an_error() {
        let result = group_entities(&NoopRecognizer, "Paris", 100, 10);
        assert!(matches!(result, Err(Error::Recognizer(_))));
    }

    #[test]
    fn test_char_limit() {
        let probe = LengthProbe(std::sync::Mutex::new(0));
        let text = "é".repeat(50);
        group_entities(&probe, &text, 20, 10).unwrap();
        assert_eq!(*probe.0.lock().unwrap(), 20);
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(empty_groups()).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        for key in ["PERSON", "ORG", "GPE", "DATE", "MISC"] {
            assert!(keys.iter().any(|k| k.as_str() == key));
        }
    }
}
