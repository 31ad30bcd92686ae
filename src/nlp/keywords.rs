//! Corpus-relative keyword extraction (tf-idf over content lemmas).

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::nlp::annotation::AnnotatedDoc;

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordConfig {
    /// Terms present in more than this fraction of documents are dropped.
    pub max_doc_freq: f64,
    /// Terms present in fewer than this many documents are dropped.
    pub min_doc_freq: usize,
    pub top_n: usize,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            max_doc_freq: 0.60,
            min_doc_freq: 5,
            top_n: 5,
        }
    }
}

/// Noun and proper-noun lemmas that are neither stopwords nor punctuation,
/// joined with spaces.
pub fn content_text(doc: &AnnotatedDoc) -> String {
    doc.tokens
        .iter()
        .filter(|t| t.pos.is_nominal() && !t.is_stop && !t.is_punct)
        .map(|t| t.lemma.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-case and split into terms of two or more word characters.
pub fn terms(text: &str) -> Vec<String> {
    static TERM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));
    let lower = text.to_lowercase();
    TERM.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// Term weights per document, restricted to the filtered vocabulary.
#[derive(Debug, Clone)]
pub struct TfIdf {
    idf: IndexMap<String, f64>,
    weights: Vec<IndexMap<String, f64>>,
}

impl TfIdf {
    pub fn fit(corpus: &[String], config: &KeywordConfig) -> Self {
        let n_docs = corpus.len();
        let counts: Vec<IndexMap<String, usize>> = corpus
            .iter()
            .map(|text| {
                let mut tf = IndexMap::new();
                for term in terms(text) {
                    *tf.entry(term).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut doc_freq: IndexMap<&str, usize> = IndexMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let max_count = config.max_doc_freq * n_docs as f64;
        let idf: IndexMap<String, f64> = doc_freq
            .iter()
            .filter(|(_, &df)| df as f64 <= max_count && df >= config.min_doc_freq)
            .map(|(term, &df)| {
                let weight = ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0;
                (term.to_string(), weight)
            })
            .collect();
        debug!(
            documents = n_docs,
            terms = doc_freq.len(),
            vocabulary = idf.len(),
            "fitted keyword vocabulary"
        );

        let weights = counts
            .iter()
            .map(|tf| {
                let mut row: IndexMap<String, f64> = tf
                    .iter()
                    .filter_map(|(term, &count)| {
                        idf.get(term).map(|w| (term.clone(), count as f64 * w))
                    })
                    .collect();
                let norm = row.values().map(|v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.values_mut().for_each(|v| *v /= norm);
                }
                row
            })
            .collect();

        Self { idf, weights }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    pub fn weights(&self, doc: usize) -> Option<&IndexMap<String, f64>> {
        self.weights.get(doc)
    }

    /// Highest-weighted terms of one document; ties resolve by ascending term.
    pub fn top_terms(&self, doc: usize, n: usize) -> Vec<String> {
        let Some(row) = self.weights.get(doc) else {
            return Vec::new();
        };
        let mut ranked: Vec<(&String, f64)> = row
            .iter()
            .filter(|(_, &w)| w > 0.0)
            .map(|(t, &w)| (t, w))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.into_iter().take(n).map(|(t, _)| t.clone()).collect()
    }
}

/// Top keywords for every document of the corpus, in corpus order.
pub fn extract_keywords(corpus: &[String], config: &KeywordConfig) -> Vec<Vec<String>> {
    let model = TfIdf::fit(corpus, config);
    (0..corpus.len())
        .map(|doc| model.top_terms(doc, config.top_n))
        .collect()
}
