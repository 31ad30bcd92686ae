//! Controlled-vocabulary phrase matching over the lower-cased token stream.
//! Matches are reported as written in the source text.

use std::collections::{BTreeSet, HashMap};

use crate::nlp::lexicon;

/// Methodology terms recognised in abstracts.
pub const METHODOLOGY_TERMS: &[&str] = &[
    "revisão sistemática",
    "revisão sistemática da literatura",
    "análise de domínio",
    "ciência aberta",
    "web semântica",
    "arquitetura da informação",
    "análise de citação",
    "estudo de caso",
    "estudo bibliométrico",
    "análise de conteúdo",
    "engenharia de ontologias",
    "mineração de dados",
    "mineração de texto",
    "processamento de linguagem natural",
];

#[derive(Debug, Default, Clone)]
struct TrieNode {
    next: HashMap<String, TrieNode>,
    term: Option<usize>,
}

/// Token trie reporting every occurrence of every term, overlaps included.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    terms: Vec<String>,
    root: TrieNode,
}

impl Default for PhraseMatcher {
    fn default() -> Self {
        Self::new(METHODOLOGY_TERMS.iter().copied())
    }
}

impl PhraseMatcher {
    pub fn new<'a>(terms: impl IntoIterator<Item = &'a str>) -> Self {
        let mut matcher = Self {
            terms: Vec::new(),
            root: TrieNode::default(),
        };
        for term in terms {
            let words = normalize(term);
            if words.is_empty() {
                continue;
            }
            let mut node = &mut matcher.root;
            for word in words {
                node = node.next.entry(word).or_default();
            }
            if node.term.is_none() {
                node.term = Some(matcher.terms.len());
                matcher.terms.push(term.trim().to_lowercase());
            }
        }
        matcher
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Every occurrence as `(term index, byte start, byte end)` into `text`.
    pub fn find_iter(&self, text: &str) -> Vec<(usize, usize, usize)> {
        let tokens = lexicon::tokenize(text);
        let words: Vec<String> = tokens.iter().map(|t| t.text.to_lowercase()).collect();
        let mut found = Vec::new();
        for start in 0..words.len() {
            let mut node = &self.root;
            for (offset, word) in words[start..].iter().enumerate() {
                let Some(next) = node.next.get(word) else {
                    break;
                };
                node = next;
                if let Some(term) = node.term {
                    let last = &tokens[start + offset];
                    found.push((term, tokens[start].start, last.end));
                }
            }
        }
        found
    }

    /// Distinct surface forms of the matches in `text`, lexically ordered.
    pub fn find_terms(&self, text: &str) -> Vec<String> {
        self.find_iter(text)
            .into_iter()
            .map(|(_, start, end)| &text[start..end])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

fn normalize(text: &str) -> Vec<String> {
    lexicon::tokenize(text)
        .into_iter()
        .map(|t| t.text.to_lowercase())
        .collect()
}
