//! Token-level annotation model shared by every annotation provider.

use std::ops::Range;

use anyhow::Result;
use serde::Serialize;

/// Universal part-of-speech tags the pipeline distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Determiner,
    Adposition,
    Pronoun,
    Conjunction,
    Numeral,
    Punctuation,
    Symbol,
    Other,
}

impl PartOfSpeech {
    /// Map a UPOS tag (`NOUN`, `PROPN`, ...).
    pub fn from_upos(tag: &str) -> Self {
        match tag {
            "NOUN" => Self::Noun,
            "PROPN" => Self::ProperNoun,
            "VERB" => Self::Verb,
            "AUX" => Self::Auxiliary,
            "ADJ" => Self::Adjective,
            "ADV" => Self::Adverb,
            "DET" => Self::Determiner,
            "ADP" => Self::Adposition,
            "PRON" => Self::Pronoun,
            "CCONJ" | "SCONJ" => Self::Conjunction,
            "NUM" => Self::Numeral,
            "PUNCT" => Self::Punctuation,
            "SYM" => Self::Symbol,
            _ => Self::Other,
        }
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Noun | Self::ProperNoun)
    }
}

/// Dependency relation of a token to its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DependencyRole {
    Root,
    /// `nsubj`
    NominalSubject,
    /// `obj`
    DirectObject,
    Other,
}

impl DependencyRole {
    /// Map a UD relation label. Subtypes such as `nsubj:pass` are not subjects
    /// in the relation-triple sense.
    pub fn from_deprel(label: &str) -> Self {
        match label {
            "root" | "ROOT" => Self::Root,
            "nsubj" => Self::NominalSubject,
            "obj" | "dobj" => Self::DirectObject,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub text: String,
    /// Byte offsets into [`AnnotatedDoc::text`].
    pub start: usize,
    pub end: usize,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub dep: DependencyRole,
    /// Document-level index of the syntactic governor; `None` for roots.
    pub head: Option<usize>,
    pub is_stop: bool,
    pub is_punct: bool,
}

/// Entity span over token indices `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl EntitySpan {
    pub fn overlaps(&self, other: &EntitySpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Output of an annotation provider for one input string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnotatedDoc {
    pub text: String,
    pub tokens: Vec<Token>,
    /// Token ranges, in text order, covering every token exactly once.
    pub sentences: Vec<Range<usize>>,
    /// Entities from the generic recognizer, before custom rules apply.
    pub entities: Vec<EntitySpan>,
}

impl AnnotatedDoc {
    pub fn empty(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Surface text of a token span, trimmed.
    pub fn span_text(&self, start: usize, end: usize) -> &str {
        if start >= end || end > self.tokens.len() {
            return "";
        }
        self.text[self.tokens[start].start..self.tokens[end - 1].end].trim()
    }

    /// Direct syntactic dependents of `head`, in token order.
    pub fn children(&self, head: usize) -> impl Iterator<Item = (usize, &Token)> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.head == Some(head))
    }
}

/// Linguistic annotation capability: one [`AnnotatedDoc`] per input, same order.
pub trait Annotator: Send + Sync {
    fn name(&self) -> &'static str;
    fn annotate(&self, texts: &[String]) -> Result<Vec<AnnotatedDoc>>;
}
