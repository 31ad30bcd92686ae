use abstract_enricher::nlp::keywords::{extract_keywords, terms, KeywordConfig, TfIdf};
use proptest::prelude::*;

fn corpus() -> Vec<String> {
    let mut docs = Vec::new();
    docs.push("alfa beta gama delta epsilon zeta eta comum zeta x".to_string());
    for _ in 0..4 {
        docs.push("alfa beta gama delta epsilon zeta eta comum".to_string());
    }
    for _ in 0..5 {
        docs.push("comum teta".to_string());
    }
    docs
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn frequent_and_rare_terms_are_filtered() {
    let model = TfIdf::fit(&corpus(), &KeywordConfig::default());
    // "comum" is in every document and "x" is too short to be a term.
    assert_eq!(model.vocabulary_len(), 8);
    assert!(!model.weights(0).unwrap().contains_key("comum"));
}

#[test]
fn top_terms_rank_by_weight_then_term() {
    let keywords = extract_keywords(&corpus(), &KeywordConfig::default());
    assert_eq!(keywords.len(), 10);
    assert_eq!(keywords[0], strings(&["zeta", "alfa", "beta", "delta", "epsilon"]));
    for doc in &keywords[1..5] {
        assert_eq!(*doc, strings(&["alfa", "beta", "delta", "epsilon", "eta"]));
    }
    for doc in &keywords[5..] {
        assert_eq!(*doc, strings(&["teta"]));
    }
}

#[test]
fn document_rows_are_unit_length() {
    let model = TfIdf::fit(&corpus(), &KeywordConfig::default());
    let norm: f64 = model.weights(0).unwrap().values().map(|w| w * w).sum();
    assert!((norm - 1.0).abs() < 1e-9);
}

#[test]
fn small_corpus_yields_no_keywords() {
    let corpus = strings(&["análise de dados abertos", ""]);
    let keywords = extract_keywords(&corpus, &KeywordConfig::default());
    assert_eq!(keywords, vec![Vec::<String>::new(), Vec::new()]);
}

#[test]
fn relaxed_thresholds_rank_a_single_document() {
    let config = KeywordConfig {
        max_doc_freq: 1.0,
        min_doc_freq: 1,
        top_n: 5,
    };
    let keywords = extract_keywords(&strings(&["b dados Dados análise"]), &config);
    assert_eq!(keywords, vec![strings(&["dados", "análise"])]);
}

#[test]
fn terms_are_lowercased_and_at_least_two_characters() {
    assert_eq!(terms("Análise de A e B-2"), strings(&["análise", "de"]));
}

proptest! {
    #[test]
    fn keywords_are_distinct_and_bounded(
        docs in prop::collection::vec(
            prop::collection::vec(prop::sample::select(vec!["rede", "dado", "acervo", "ontologia", "web", "a"]), 0..12),
            0..15,
        ),
        top_n in 0usize..6,
    ) {
        let corpus: Vec<String> = docs.iter().map(|words| words.join(" ")).collect();
        let config = KeywordConfig { max_doc_freq: 0.6, min_doc_freq: 2, top_n };
        let keywords = extract_keywords(&corpus, &config);
        prop_assert_eq!(keywords.len(), corpus.len());
        for (doc, terms) in corpus.iter().zip(&keywords) {
            prop_assert!(terms.len() <= top_n);
            let mut seen = terms.clone();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), terms.len());
            for term in terms {
                prop_assert!(doc.split(' ').any(|w| w == term));
            }
        }
    }
}

#[test]
fn equal_weights_fall_back_to_term_order() {
    let config = KeywordConfig {
        max_doc_freq: 1.0,
        min_doc_freq: 1,
        top_n: 3,
    };
    let keywords = extract_keywords(&strings(&["zeta beta alfa gama"]), &config);
    assert_eq!(keywords, vec![strings(&["alfa", "beta", "gama"])]);
}
