//! End-to-end pipeline tests: document → chunks → cross-references →
//! TOC / navigation / index / glossary.

use quire::{
    ChunkConfig, Document, GlossaryConfig, IndexConfig, NodeId, Strategy, TocConfig,
    chunk_document, chunk_document_sync, extract_glossary, generate_index, generate_toc,
};

/// A small handbook: preamble, two chapters with sections, a table, an
/// image, internal links, and definition-shaped sentences.
fn handbook() -> Document {
    let mut document = Document::new();

    document.add_paragraph(None, "This handbook explains the chunking pipeline.");

    document.add_heading(1, "Getting Started");
    let p = document.add_paragraph(None, "Definitions follow. A Chunk is a slice of a document. See ");
    document.add_hyperlink(p, Some("#advanced"), None, "the advanced chapter");
    document.add_bookmark(p, "basics");
    document.add_heading(2, "Installation");
    document.add_paragraph(None, "Install the library and build a document tree.");

    document.add_heading(1, "Advanced Topics");
    let q = document.add_paragraph(None, "Recap first. Indexing means building word lookup tables. Back to ");
    document.add_hyperlink(q, Some("#basics"), None, "the basics");
    document.add_bookmark(q, "advanced");
    document.add_heading(2, "Tables");
    document.add_table(&[&["strategy", "splits on"], &["chapter", "level-1 headings"]]);
    let r = document.add_paragraph(None, "A diagram:");
    document.add_image(r, Some("pipeline diagram"), Some("image/png"));

    document
}

#[test]
fn full_pipeline_produces_consistent_artifacts() {
    let document = handbook();
    let config = ChunkConfig::default();
    let outcome = chunk_document_sync(&document, &config);

    assert!(outcome.diagnostics.is_empty());
    let result = outcome.result.expect("chunking succeeds");

    // Intro + two chapters.
    assert_eq!(result.chunks.len(), 3);
    assert!(result.chunks[0].is_intro);
    assert_eq!(result.chunks[1].title, "Getting Started");
    assert_eq!(result.chunks[2].title, "Advanced Topics");

    // Partition law over the root's children.
    let children: Vec<NodeId> = document.children(document.root()).collect();
    let emitted: Vec<NodeId> = result
        .chunks
        .iter()
        .flat_map(|c| c.content.iter().copied())
        .collect();
    assert_eq!(emitted, children);

    // Analysis saw the structure.
    assert_eq!(result.analysis.structure.chapter_count, 2);
    assert_eq!(result.analysis.structure.section_count, 2);
    assert_eq!(result.analysis.tables.len(), 1);
    assert_eq!(result.analysis.images.len(), 1);

    // Cross-references resolved across chunks, in both directions.
    let forward = result.chunks[1]
        .links
        .iter()
        .find(|l| l.href.as_deref() == Some("#advanced"))
        .unwrap();
    assert_eq!(forward.target_chunk, Some(result.chunks[2].id));
    assert_eq!(
        forward.target_file.as_deref(),
        Some(result.chunks[2].file_name.as_str())
    );
    let back = result.chunks[2]
        .links
        .iter()
        .find(|l| l.href.as_deref() == Some("#basics"))
        .unwrap();
    assert_eq!(back.target_chunk, Some(result.chunks[1].id));

    // Navigation boundaries.
    let navigation = result.navigation.as_ref().unwrap();
    let ids: Vec<u32> = result.chunks.iter().map(|c| c.id).collect();
    assert!(navigation.prev_next[&ids[0]].previous.is_none());
    assert!(navigation.prev_next[&ids[2]].next.is_none());
    let middle = &navigation.prev_next[&ids[1]];
    assert_eq!(middle.previous.as_ref().unwrap().chunk_id, ids[0]);
    assert_eq!(middle.next.as_ref().unwrap().chunk_id, ids[2]);

    // TOC covers chunks and their sections.
    let toc = generate_toc(&result.chunks, &TocConfig::default());
    let titles: Vec<&str> = toc.entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Introduction",
            "Getting Started",
            "Installation",
            "Advanced Topics",
            "Tables"
        ]
    );

    // Index finds content words in the right chunks.
    let index = generate_index(&document, &result.chunks, &IndexConfig::default());
    let chunking = &index.index["chunking"];
    assert_eq!(chunking[0].chunk_id, result.chunks[0].id);
    assert!(!index.index.contains_key("the"));

    // Glossary harvested both definition shapes.
    let glossary = extract_glossary(&document, &result.chunks, &GlossaryConfig::default());
    assert_eq!(
        glossary.entries["a chunk"].definition,
        "a slice of a document"
    );
    assert!(glossary.entries.contains_key("indexing"));
}

#[test]
fn strategies_partition_identically_but_split_differently() {
    let document = handbook();
    let children: Vec<NodeId> = document.children(document.root()).collect();

    for strategy in [
        Strategy::ByHeadingLevel,
        Strategy::ByChapter,
        Strategy::BySection,
    ] {
        let config = ChunkConfig {
            strategy,
            ..ChunkConfig::default()
        };
        let result = chunk_document_sync(&document, &config).result.unwrap();
        let emitted: Vec<NodeId> = result
            .chunks
            .iter()
            .flat_map(|c| c.content.iter().copied())
            .collect();
        assert_eq!(emitted, children, "partition law for {:?}", strategy);
    }
}

#[test]
fn by_size_produces_multiple_bounded_chunks() {
    let mut document = Document::new();
    for section in 0..5 {
        document.add_heading(1, &format!("Part {}", section + 1));
        for _ in 0..10 {
            document.add_paragraph(None, &"words of roughly realistic length ".repeat(5));
        }
    }

    let config = ChunkConfig {
        strategy: Strategy::BySize,
        chunk_size_limit: Some(100),
        ..ChunkConfig::default()
    };
    let result = chunk_document_sync(&document, &config).result.unwrap();
    assert!(result.chunks.len() > 1);

    let children: Vec<NodeId> = document.children(document.root()).collect();
    let emitted: Vec<NodeId> = result
        .chunks
        .iter()
        .flat_map(|c| c.content.iter().copied())
        .collect();
    assert_eq!(emitted, children);
}

#[tokio::test]
async fn async_surface_matches_sync_core() {
    let document = handbook();
    let config = ChunkConfig::default();

    let sync_outcome = chunk_document_sync(&document, &config);
    let async_outcome = chunk_document(&document, &config).await;

    let sync_result = sync_outcome.result.unwrap();
    let async_result = async_outcome.result.unwrap();
    assert_eq!(sync_result.chunks.len(), async_result.chunks.len());
    for (a, b) in sync_result.chunks.iter().zip(&async_result.chunks) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.title, b.title);
        assert_eq!(a.content, b.content);
    }
}

#[test]
fn artifacts_serialize_to_json() {
    let document = handbook();
    let result = chunk_document_sync(&document, &ChunkConfig::default())
        .result
        .unwrap();

    let chunks_json = serde_json::to_value(&result.chunks).unwrap();
    assert!(chunks_json.as_array().unwrap().len() == 3);

    let toc = generate_toc(&result.chunks, &TocConfig::default());
    let toc_json = serde_json::to_value(&toc).unwrap();
    assert!(toc_json["metadata"]["total_entries"].as_u64().unwrap() > 0);

    let index = generate_index(&document, &result.chunks, &IndexConfig::default());
    let index_json: serde_json::Value =
        serde_json::from_str(&index.to_json().unwrap()).unwrap();
    assert!(index_json["word_count"].as_u64().unwrap() > 0);

    let glossary = extract_glossary(&document, &result.chunks, &GlossaryConfig::default());
    let glossary_json: serde_json::Value =
        serde_json::from_str(&glossary.to_json().unwrap()).unwrap();
    assert!(glossary_json["count"].as_u64().is_some());

    let navigation_json = serde_json::to_value(result.navigation.as_ref().unwrap()).unwrap();
    assert!(navigation_json["sidebar"]["rendered_tree"].is_string());
}
