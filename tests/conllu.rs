use abstract_enricher::{
    data::{
        dataset::{Document, RelationTriple},
        taxonomy::{Category, Taxonomy},
    },
    error::EnrichError,
    nlp::{
        annotation::{Annotator, EntitySpan, PartOfSpeech},
        conllu::ConlluAnnotator,
        embeddings::HashingEncoder,
        pipeline::{EnrichConfig, EnrichmentPipeline},
        relations::extract_relations,
    },
};

/// Rows are written space separated here and tab separated on the way out.
fn conllu(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| {
            if line.starts_with('#') || line.is_empty() {
                line.to_string()
            } else {
                line.split_whitespace().collect::<Vec<_>>().join("\t")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn sample() -> String {
    conllu(&[
        "# newdoc id = 1",
        "# text = O CNPq financia pesquisa da área.",
        "1 O o DET _ _ 2 det _ _",
        "2 CNPq CNPq PROPN _ _ 3 nsubj _ NER=B-ORG",
        "3 financia financiar VERB _ _ 0 root _ _",
        "4 pesquisa pesquisa NOUN _ _ 3 obj _ _",
        "5-6 da _ _ _ _ _ _ _ _",
        "5 de de ADP _ _ 7 case _ _",
        "6 a o DET _ _ 7 det _ _",
        "7 área área NOUN _ _ 4 nmod _ SpaceAfter=No",
        "8 . . PUNCT _ _ 3 punct _ _",
        "",
        "# newdoc id = 2",
        "",
        "# newdoc id = 3",
        "1 Ela ele PRON _ _ 2 nsubj _ _",
        "2 analisa analisar VERB _ _ 0 root _ _",
        "3 dados dado NOUN _ _ 2 obj _ SpaceAfter=No",
        "4 . . PUNCT _ _ 2 punct _ _",
        "",
        "1 A o DET _ _ 2 det _ _",
        "2 Universidade Universidade PROPN _ _ 6 nsubj _ NER=B-ORG",
        "3 de de ADP _ _ 4 case _ NER=I-ORG",
        "4 São São PROPN _ _ 2 nmod _ NER=I-ORG",
        "5 Paulo Paulo PROPN _ _ 4 flat _ NER=I-ORG",
        "6 publica publicar VERB _ _ 0 root _ _",
        "7 dados dado NOUN _ _ 6 obj _ SpaceAfter=No",
        "8 . . PUNCT _ _ 6 punct _ _",
    ])
}

fn abstracts() -> Vec<String> {
    vec![
        "O CNPq financia pesquisa da área.".to_string(),
        String::new(),
        "Ela analisa dados.  A Universidade de São Paulo publica dados.".to_string(),
    ]
}

fn funding() -> String {
    conllu(&[
        "# newdoc id = 1",
        "1 A o DET _ _ 2 det _ _",
        "2 CAPES CAPES PROPN _ _ 3 nsubj _ NER=B-ORG",
        "3 financia financiar VERB _ _ 0 root _ _",
        "4 bolsas bolsa NOUN _ _ 3 obj _ SpaceAfter=No",
        "5 . . PUNCT _ _ 3 punct _ _",
    ])
}

#[test]
fn documents_split_on_newdoc() {
    let annotator = ConlluAnnotator::parse(&sample()).unwrap();
    assert_eq!(annotator.len(), 3);
    let docs = annotator.annotate(&abstracts()).unwrap();
    assert_eq!(docs[0].text, "O CNPq financia pesquisa da área.");
    assert!(docs[1].tokens.is_empty());
    assert_eq!(docs[1].text, "");
    assert_eq!(
        docs[2].text,
        "Ela analisa dados. A Universidade de São Paulo publica dados."
    );
    assert_eq!(docs[2].sentences, vec![0..4, 4..12]);
}

#[test]
fn multiword_tokens_share_their_surface() {
    let annotator = ConlluAnnotator::parse(&sample()).unwrap();
    let docs = annotator.annotate(&abstracts()).unwrap();
    let doc = &docs[0];
    let de = &doc.tokens[4];
    let a = &doc.tokens[5];
    assert_eq!((de.text.as_str(), a.text.as_str()), ("de", "a"));
    assert_eq!(&doc.text[de.start..de.end], "da");
    assert_eq!((de.start, de.end), (a.start, a.end));
    assert_eq!(doc.tokens[1].head, Some(2));
    assert_eq!(doc.tokens[2].head, None);
    assert_eq!(doc.tokens[1].pos, PartOfSpeech::ProperNoun);
    assert!(doc.tokens[0].is_stop);
    assert!(doc.tokens[7].is_punct);
}

#[test]
fn bio_tags_become_entity_spans() {
    let annotator = ConlluAnnotator::parse(&sample()).unwrap();
    let docs = annotator.annotate(&abstracts()).unwrap();
    assert_eq!(
        docs[0].entities,
        vec![EntitySpan {
            start: 1,
            end: 2,
            label: "ORG".into()
        }]
    );
    assert_eq!(docs[2].entities.len(), 1);
    let span = &docs[2].entities[0];
    assert_eq!(docs[2].span_text(span.start, span.end), "Universidade de São Paulo");
}

#[test]
fn heads_resolve_within_each_sentence() {
    let annotator = ConlluAnnotator::parse(&sample()).unwrap();
    let docs = annotator.annotate(&abstracts()).unwrap();
    assert_eq!(
        extract_relations(&docs[0]),
        vec![RelationTriple::new("CNPq", "financiar", "pesquisa")]
    );
    // The pronoun subject of the first sentence is not a noun.
    assert_eq!(
        extract_relations(&docs[2]),
        vec![RelationTriple::new("Universidade", "publicar", "dado")]
    );
}

#[test]
fn document_count_must_match_the_corpus() {
    let annotator = ConlluAnnotator::parse(&sample()).unwrap();
    assert!(annotator.annotate(&abstracts()[..2]).is_err());
}

#[test]
fn annotations_of_another_text_are_rejected() {
    let annotator = ConlluAnnotator::parse(&funding()).unwrap();
    assert!(annotator
        .annotate(&["A CAPES financia bolsas.".to_string()])
        .is_ok());
    let err = annotator
        .annotate(&["Uma revisão sistemática sobre ciência aberta.".to_string()])
        .unwrap_err();
    assert!(err.to_string().contains("does not match"));
}

#[test]
fn misaligned_annotations_abort_the_run() {
    let annotator = ConlluAnnotator::parse(&funding()).unwrap();
    let mut pipeline = EnrichmentPipeline::new(
        Box::new(annotator),
        Box::new(HashingEncoder::new(64)),
        EnrichConfig::default(),
    );
    let taxonomy = Taxonomy::new(vec![Category {
        name: "Fomento".into(),
        children: Vec::new(),
    }]);
    let err = pipeline
        .run(
            vec![Document::new(1, "Uma revisão sistemática sobre ciência aberta.")],
            &taxonomy,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        EnrichError::ResourceUnavailable {
            resource: "linguistic annotator",
            ..
        }
    ));
}

#[tokio::test]
async fn annotations_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.conllu");
    std::fs::write(&path, funding()).unwrap();
    let annotator = ConlluAnnotator::from_path(&path).await.unwrap();
    assert_eq!(annotator.len(), 1);
    assert!(ConlluAnnotator::from_path(&dir.path().join("absent.conllu"))
        .await
        .is_err());
}

#[test]
fn malformed_rows_are_rejected() {
    assert!(ConlluAnnotator::parse("1\tO\to\tDET").is_err());
    let dangling = conllu(&["1 Ela ele PRON _ _ 5 nsubj _ _", "2 lê ler VERB _ _ 0 root _ _"]);
    assert!(ConlluAnnotator::parse(&dangling).is_err());
}

#[test]
fn empty_input_has_no_documents() {
    assert!(ConlluAnnotator::parse("").unwrap().is_empty());
}
