use std::path::Path;

use abstract_enricher::{
    data::{
        dataset::{load_documents, parse_documents, write_documents, Document, EnrichedDocument},
        taxonomy::{load_taxonomy, parse_taxonomy},
    },
    error::EnrichError,
};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn null_and_missing_abstracts_become_empty() {
    let raw = br#"[{"id": 1, "abstract": null}, {"id": 2}]"#;
    let docs = parse_documents(raw, Path::new("in.json")).unwrap();
    assert_eq!(docs, vec![Document::new(1, ""), Document::new(2, "")]);
}

#[test]
fn stale_enrichment_fields_are_dropped() {
    let raw = br#"[{"id": 7, "abstract": "Texto.", "doi": "10.1/x", "entities": [], "similar_docs": [3]}]"#;
    let docs = parse_documents(raw, Path::new("in.json")).unwrap();
    let keys: Vec<&str> = docs[0].extra.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["doi"]);
}

#[test]
fn non_array_input_is_malformed() {
    let err = parse_documents(br#"{"id": 1}"#, Path::new("in.json")).unwrap_err();
    assert!(matches!(err, EnrichError::DatasetMalformed { .. }));
    let err = parse_documents(b"[{\"id\": 1,", Path::new("in.json")).unwrap_err();
    assert!(matches!(err, EnrichError::DatasetMalformed { .. }));
}

#[tokio::test]
async fn missing_dataset_is_unavailable() {
    let dir = tempdir().unwrap();
    let err = load_documents(&dir.path().join("absent.json")).await.unwrap_err();
    assert!(matches!(err, EnrichError::DatasetUnavailable { .. }));
}

#[tokio::test]
async fn written_output_is_indented_utf8_without_leftovers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("enriched.json");
    let mut record = EnrichedDocument::from(Document::new("a", "Informação científica."));
    record.methodologies = vec!["análise de conteúdo".into()];
    record.topic_label = "Ciência da Informação".into();
    record.topic = 1;

    write_documents(&path, &[record]).await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("[\n    {\n        \"id\": \"a\""));
    assert!(text.contains("Informação científica."));
    assert!(text.contains("\"análise de conteúdo\""));
    let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("enriched.json")]);

    let reloaded = load_documents(&path).await.unwrap();
    assert_eq!(reloaded, vec![Document::new("a", "Informação científica.")]);
}

#[tokio::test]
async fn unwritable_output_is_reported() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"x").unwrap();
    let err = write_documents(&blocker.join("out.json"), &[]).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EnrichError>(),
        Some(EnrichError::OutputUnwritable { .. })
    ));
}

#[test]
fn taxonomy_categories_keep_declared_order() {
    let raw = json!({
        "children": [
            {"name": "Bibliometria", "children": [{"name": "Citações"}, {"name": "Indicadores"}]},
            {"name": "Arquivologia"}
        ]
    });
    let taxonomy = parse_taxonomy(raw.to_string().as_bytes(), Path::new("tax.json")).unwrap();
    assert_eq!(taxonomy.len(), 2);
    assert_eq!(
        taxonomy.descriptors(),
        vec!["Bibliometria Citações Indicadores".to_string(), "Arquivologia ".to_string()]
    );
    assert_eq!(taxonomy.category(1).unwrap().name, "Bibliometria");
    assert!(taxonomy.category(0).is_none());
    assert!(taxonomy.category(3).is_none());
}

#[test]
fn taxonomy_without_categories_is_malformed() {
    for raw in [r#"{"children": []}"#, r#"{"name": "raiz"}"#, "[]"] {
        let err = parse_taxonomy(raw.as_bytes(), Path::new("tax.json")).unwrap_err();
        assert!(matches!(err, EnrichError::TaxonomyMalformed { .. }), "{raw}");
    }
}

#[tokio::test]
async fn missing_taxonomy_is_unavailable() {
    let dir = tempdir().unwrap();
    let err = load_taxonomy(&dir.path().join("tax.json")).await.unwrap_err();
    assert!(matches!(err, EnrichError::TaxonomyUnavailable { .. }));
}
