//! Glossary extraction from definition-shaped sentences.
//!
//! Configurable regular-expression patterns harvest term/definition pairs
//! from chunk text. Entries key on the lowercased term; a term defined
//! again later in document order overwrites the earlier definition.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::chunk::Chunk;
use crate::model::Document;

/// Default definition patterns: `X is Y.`, `X means Y.`, `X: Y.`
/// (case-insensitive, non-greedy).
static DEFAULT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)(\w+(?:\s+\w+)*?)\s+is\s+([^.]+?)\.").unwrap(),
        Regex::new(r"(?i)(\w+(?:\s+\w+)*?)\s+means\s+([^.]+?)\.").unwrap(),
        Regex::new(r"(?i)(\w+(?:\s+\w+)*?):\s*([^.]+?)\.").unwrap(),
    ]
});

/// Glossary extraction options.
#[derive(Debug, Clone)]
pub struct GlossaryConfig {
    /// Definition patterns. Each must expose capture group 1 (term) and
    /// group 2 (definition).
    pub patterns: Vec<Regex>,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.clone(),
        }
    }
}

impl GlossaryConfig {
    /// Build a configuration from raw pattern strings.
    ///
    /// Patterns are compiled case-insensitively. Fails on an invalid
    /// expression.
    pub fn with_patterns<'a>(
        patterns: impl IntoIterator<Item = &'a str>,
    ) -> crate::error::Result<Self> {
        let patterns = patterns
            .into_iter()
            .map(|p| regex::RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }
}

/// A harvested term definition.
#[derive(Debug, Clone, Serialize)]
pub struct GlossaryEntry {
    /// Term as it appeared in the text.
    pub term: String,
    pub definition: String,
    pub chunk_id: u32,
    pub file_name: String,
    /// The pattern that produced this entry.
    pub source: String,
}

/// The extracted glossary, keyed by lowercased term.
#[derive(Debug, Clone, Serialize)]
pub struct Glossary {
    pub entries: BTreeMap<String, GlossaryEntry>,
    /// Number of distinct terms.
    pub count: usize,
    pub generated: DateTime<Utc>,
}

/// Extract a glossary from every chunk's visible text.
pub fn extract_glossary(
    document: &Document,
    chunks: &[Chunk],
    config: &GlossaryConfig,
) -> Glossary {
    let mut entries: BTreeMap<String, GlossaryEntry> = BTreeMap::new();

    for chunk in chunks {
        let text = chunk.text(document);
        for pattern in &config.patterns {
            for captures in pattern.captures_iter(&text) {
                let (Some(term), Some(definition)) = (captures.get(1), captures.get(2)) else {
                    continue;
                };
                let term = term.as_str().trim();
                let definition = definition.as_str().trim();
                if term.is_empty() || definition.is_empty() {
                    continue;
                }
                // Last definition wins for a repeated term.
                entries.insert(
                    term.to_lowercase(),
                    GlossaryEntry {
                        term: term.to_string(),
                        definition: definition.to_string(),
                        chunk_id: chunk.id,
                        file_name: chunk.file_name.clone(),
                        source: pattern.as_str().to_string(),
                    },
                );
            }
        }
    }

    let count = entries.len();
    debug!(terms = count, "extracted glossary");

    Glossary {
        entries,
        count,
        generated: Utc::now(),
    }
}

impl Glossary {
    /// Serialize the glossary to a JSON string.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{ChunkConfig, chunk_document_sync};

    // No heading: the whole document lands in one chunk whose visible text
    // is exactly `text`.
    fn glossary_of(text: &str) -> Glossary {
        let mut document = Document::new();
        document.add_paragraph(None, text);

        let chunks = chunk_document_sync(&document, &ChunkConfig::default())
            .result
            .unwrap()
            .chunks;
        extract_glossary(&document, &chunks, &GlossaryConfig::default())
    }

    #[test]
    fn extracts_is_and_means_definitions() {
        let glossary = glossary_of(
            "API is a set of protocols. Machine Learning means automated learning.",
        );

        let api = &glossary.entries["api"];
        assert_eq!(api.definition, "a set of protocols");

        let ml = &glossary.entries["machine learning"];
        assert_eq!(ml.term, "Machine Learning");
        assert_eq!(ml.definition, "automated learning");
    }

    #[test]
    fn extracts_colon_definitions() {
        let glossary = glossary_of("Chunk: a contiguous slice of a document.");
        assert_eq!(
            glossary.entries["chunk"].definition,
            "a contiguous slice of a document"
        );
    }

    #[test]
    fn later_definition_overwrites_earlier() {
        let glossary = glossary_of("Cache is a small store. Cache is a fast store.");
        assert_eq!(glossary.count, 1);
        assert_eq!(glossary.entries["cache"].definition, "a fast store");
    }

    #[test]
    fn keys_are_lowercase_and_count_is_distinct() {
        let glossary = glossary_of("Widget is a thing. Gadget is another thing.");
        assert_eq!(glossary.count, 2);
        assert!(glossary.entries.contains_key("widget"));
        assert!(glossary.entries.contains_key("gadget"));
    }

    #[test]
    fn no_definitions_yields_empty_glossary() {
        let glossary = glossary_of("Nothing definitional here");
        assert_eq!(glossary.count, 0);
        assert!(glossary.entries.is_empty());
    }

    #[test]
    fn custom_patterns_compile_and_apply() {
        let mut document = Document::new();
        document.add_paragraph(None, "Sigma denotes a summation.");

        let chunks = chunk_document_sync(&document, &ChunkConfig::default())
            .result
            .unwrap()
            .chunks;
        let config =
            GlossaryConfig::with_patterns([r"(\w+)\s+denotes\s+([^.]+?)\."]).unwrap();
        let glossary = extract_glossary(&document, &chunks, &config);

        assert_eq!(glossary.entries["sigma"].definition, "a summation");
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(GlossaryConfig::with_patterns(["(unclosed"]).is_err());
    }
}
