//! In-memory statistics over documents processed since startup.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use sha2::{Digest, Sha256};

use docmeta_ingest::{FileType, MetadataRecord};

pub const SIMPLE: &str = "Simple (0-30)";
pub const STANDARD: &str = "Standard (31-70)";
pub const COMPLEX: &str = "Complex (71-100)";

const DOCUMENT_TYPES: [&str; 5] = ["PDF", "DOCX", "TXT", "Image", "Other"];
const TOP_KEYWORDS: usize = 10;

/// Keyword and the number of documents it was reported for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Response body of `GET /analyze`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub document_types: BTreeMap<String, usize>,
    pub readability_scores: BTreeMap<String, usize>,
    pub common_keywords: Vec<KeywordCount>,
    pub total_documents: usize,
    pub unique_documents: usize,
}

/// Keywords tracked before low counts are pruned.
pub const DEFAULT_KEYWORD_CAPACITY: usize = 10_000;

/// Running counters. Keyword tracking is capped; content hashes grow by one
/// 64-char entry per distinct document text.
#[derive(Debug)]
pub struct AnalyticsLedger {
    document_types: HashMap<&'static str, usize>,
    readability: HashMap<&'static str, usize>,
    /// keyword -> (count, first-seen position)
    keywords: HashMap<String, (usize, usize)>,
    keyword_capacity: usize,
    next_position: usize,
    content_hashes: HashSet<String>,
    total: usize,
}

impl Default for AnalyticsLedger {
    fn default() -> Self {
        Self::with_keyword_capacity(DEFAULT_KEYWORD_CAPACITY)
    }
}

impl AnalyticsLedger {
    pub fn with_keyword_capacity(capacity: usize) -> Self {
        Self {
            document_types: HashMap::new(),
            readability: HashMap::new(),
            keywords: HashMap::new(),
            keyword_capacity: capacity.max(TOP_KEYWORDS),
            next_position: 0,
            content_hashes: HashSet::new(),
            total: 0,
        }
    }

    pub fn record(&mut self, file_type: FileType, text: &str, record: &MetadataRecord) {
        self.total += 1;
        *self.document_types.entry(file_type.label()).or_insert(0) += 1;
        *self
            .readability
            .entry(readability_bucket(record.readability_score))
            .or_insert(0) += 1;

        for keyword in &record.keywords {
            let position = self.next_position;
            let entry = self.keywords.entry(keyword.text.clone()).or_insert_with(|| (0, position));
            entry.0 += 1;
            if entry.1 == position {
                self.next_position += 1;
            }
        }
        if self.keywords.len() > self.keyword_capacity {
            self.prune_keywords();
        }

        self.content_hashes.insert(content_hash(text));
    }

    pub fn tracked_keywords(&self) -> usize {
        self.keywords.len()
    }

    /// Keep the most frequent half of the tracked keywords.
    fn prune_keywords(&mut self) {
        let mut ranked: Vec<(usize, usize)> = self.keywords.values().copied().collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        let keep = self.keyword_capacity / 2;
        let cutoff = ranked[keep - 1];
        self.keywords
            .retain(|_, &mut (count, pos)| count > cutoff.0 || (count == cutoff.0 && pos <= cutoff.1));
        tracing::debug!("Pruned analytics keywords to {}", self.keywords.len());
    }

    pub fn summary(&self) -> AnalyticsSummary {
        let document_types = DOCUMENT_TYPES
            .iter()
            .map(|t| (t.to_string(), self.document_types.get(t).copied().unwrap_or(0)))
            .collect();
        let readability_scores = [SIMPLE, STANDARD, COMPLEX]
            .iter()
            .map(|b| (b.to_string(), self.readability.get(b).copied().unwrap_or(0)))
            .collect();

        let mut keywords: Vec<(&String, &(usize, usize))> = self.keywords.iter().collect();
        keywords.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
        let common_keywords = keywords
            .into_iter()
            .take(TOP_KEYWORDS)
            .map(|(keyword, &(count, _))| KeywordCount {
                keyword: keyword.clone(),
                count,
            })
            .collect();

        AnalyticsSummary {
            document_types,
            readability_scores,
            common_keywords,
            total_documents: self.total,
            unique_documents: self.content_hashes.len(),
        }
    }
}

pub fn readability_bucket(score: f64) -> &'static str {
    if score <= 30.0 {
        SIMPLE
    } else if score <= 70.0 {
        STANDARD
    } else {
        COMPLEX
    }
}

fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
