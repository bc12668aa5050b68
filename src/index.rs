//! Word-level inverted index over chunk text.
//!
//! Tokenization is deliberately simple and reproducible: lowercase, replace
//! non-word characters with spaces, split on whitespace, filter by length
//! and stop words. Every surviving token occurrence produces one index
//! entry; the context snippet is taken from the first case-insensitive
//! occurrence of the word in the chunk, so repeated occurrences share one
//! context string.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::chunk::Chunk;
use crate::model::Document;
use crate::text::context_window;

/// Half-width of the context snippet around an indexed word.
const CONTEXT_RADIUS: usize = 50;

/// Default English stop words excluded from the index.
const DEFAULT_EXCLUDE_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "has", "his", "him", "how", "its", "may", "this", "that", "with", "have",
    "from", "they", "will", "been", "were",
];

/// Index generation options.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Minimum token length (in characters) to index.
    pub min_word_length: usize,
    /// Words excluded from the index.
    pub exclude_words: BTreeSet<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            min_word_length: 3,
            exclude_words: DEFAULT_EXCLUDE_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }
}

/// One occurrence of a word in a chunk.
#[derive(Debug, Clone, Serialize)]
pub struct IndexEntry {
    pub chunk_id: u32,
    pub file_name: String,
    pub title: String,
    /// Snippet around the word's first occurrence in the chunk.
    pub context: String,
}

/// The generated inverted index.
#[derive(Debug, Clone, Serialize)]
pub struct SearchIndex {
    /// Word to occurrence list, one entry per occurrence (not deduplicated
    /// per chunk).
    pub index: BTreeMap<String, Vec<IndexEntry>>,
    /// Number of distinct indexed words.
    pub word_count: usize,
    pub generated: DateTime<Utc>,
}

/// Build the inverted index over every chunk's visible text.
pub fn generate_index(
    document: &Document,
    chunks: &[Chunk],
    config: &IndexConfig,
) -> SearchIndex {
    let mut index: BTreeMap<String, Vec<IndexEntry>> = BTreeMap::new();

    for chunk in chunks {
        let text = chunk.text(document);
        let lower = text.to_lowercase();
        let normalized: String = lower
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
            .collect();

        // Context per word is computed once per chunk (first occurrence).
        let mut contexts: HashMap<&str, String> = HashMap::new();

        for token in normalized.split_whitespace() {
            if token.chars().count() < config.min_word_length {
                continue;
            }
            if config.exclude_words.contains(token) {
                continue;
            }

            let context = contexts
                .entry(token)
                .or_insert_with(|| first_occurrence_context(&text, &lower, token))
                .clone();

            index.entry(token.to_string()).or_default().push(IndexEntry {
                chunk_id: chunk.id,
                file_name: chunk.file_name.clone(),
                title: chunk.title.clone(),
                context,
            });
        }
    }

    let word_count = index.len();
    debug!(words = word_count, "generated search index");

    SearchIndex {
        index,
        word_count,
        generated: Utc::now(),
    }
}

impl SearchIndex {
    /// Serialize the index to a JSON string.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Context around the first case-insensitive occurrence of `word`.
///
/// Offsets are found in the lowercased text; the snippet is cut from the
/// original text when lowercasing preserved byte offsets, else from the
/// lowercased text.
fn first_occurrence_context(text: &str, lower: &str, word: &str) -> String {
    let Some(pos) = lower.find(word) else {
        return String::new();
    };
    let source = if text.len() == lower.len() { text } else { lower };
    context_window(source, pos, word.len(), CONTEXT_RADIUS).to_string()
}
