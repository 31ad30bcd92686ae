use abstract_enricher::{
    data::dataset::RelationTriple,
    nlp::{
        annotation::{AnnotatedDoc, DependencyRole, PartOfSpeech, Token},
        lexicon::LexiconAnnotator,
        relations::extract_relations,
    },
};

fn token(text: &str, lemma: &str, pos: PartOfSpeech, dep: DependencyRole, head: Option<usize>) -> Token {
    Token {
        text: text.into(),
        start: 0,
        end: 0,
        lemma: lemma.into(),
        pos,
        dep,
        head,
        is_stop: false,
        is_punct: pos == PartOfSpeech::Punctuation,
    }
}

/// "Autores e eles avaliam métodos e bases." with coordinated arguments
/// attached straight to the verb.
fn coordinated() -> AnnotatedDoc {
    use DependencyRole::*;
    use PartOfSpeech::*;
    AnnotatedDoc {
        text: String::new(),
        tokens: vec![
            token("Autores", "autor", Noun, NominalSubject, Some(3)),
            token("e", "e", Conjunction, Other, Some(2)),
            token("eles", "ele", Pronoun, NominalSubject, Some(3)),
            token("avaliam", "avaliar", Verb, Root, None),
            token("métodos", "método", Noun, DirectObject, Some(3)),
            token("e", "e", Conjunction, Other, Some(6)),
            token("bases", "base", Noun, DirectObject, Some(3)),
            token(".", ".", Punctuation, Other, Some(3)),
        ],
        sentences: vec![0..8],
        entities: Vec::new(),
    }
}

#[test]
fn pairs_every_nominal_subject_with_every_object() {
    let triples = extract_relations(&coordinated());
    assert_eq!(
        triples,
        vec![
            RelationTriple::new("autor", "avaliar", "método"),
            RelationTriple::new("autor", "avaliar", "base"),
        ]
    );
}

#[test]
fn auxiliaries_are_not_relation_verbs() {
    let mut doc = coordinated();
    doc.tokens[3].pos = PartOfSpeech::Auxiliary;
    assert!(extract_relations(&doc).is_empty());
}

#[test]
fn passive_subjects_are_ignored() {
    let mut doc = coordinated();
    doc.tokens[0].dep = DependencyRole::from_deprel("nsubj:pass");
    assert!(extract_relations(&doc).is_empty());
}

#[test]
fn triples_follow_sentence_order_and_keep_repeats() {
    let doc = LexiconAnnotator::new()
        .annotate_one("A CAPES financia bolsas. O CNPq financia projetos. A CAPES financia bolsas.");
    assert_eq!(
        extract_relations(&doc),
        vec![
            RelationTriple::new("CAPES", "financiar", "bolsa"),
            RelationTriple::new("CNPq", "financiar", "projeto"),
            RelationTriple::new("CAPES", "financiar", "bolsa"),
        ]
    );
}

#[test]
fn text_without_verbs_has_no_relations() {
    let doc = LexiconAnnotator::new().annotate_one("Estudo bibliométrico da produção nacional.");
    assert!(extract_relations(&doc).is_empty());
}

#[test]
fn relation_triples_serialize_as_arrays() {
    let json = serde_json::to_value(RelationTriple::new("CNPq", "financiar", "pesquisa")).unwrap();
    assert_eq!(json, serde_json::json!(["CNPq", "financiar", "pesquisa"]));
}
