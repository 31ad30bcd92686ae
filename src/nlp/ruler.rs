//! Custom entity rules applied ahead of the generic recognizer.

use crate::{
    data::dataset::{Entity, EntityType},
    nlp::annotation::{AnnotatedDoc, EntitySpan},
};

/// How a rule compares token text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternKind {
    /// Exact, case-sensitive token sequence, e.g. `Plataforma Lattes`.
    Literal(Vec<String>),
    /// Lower-cased token sequence, e.g. `plataforma sucupira`.
    Lowercase(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityPattern {
    pub label: String,
    pub kind: PatternKind,
}

impl EntityPattern {
    pub fn literal(label: &str, phrase: &str) -> Self {
        Self {
            label: label.to_string(),
            kind: PatternKind::Literal(phrase.split_whitespace().map(str::to_string).collect()),
        }
    }

    pub fn lowercase(label: &str, words: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            kind: PatternKind::Lowercase(words.iter().map(|w| w.to_lowercase()).collect()),
        }
    }

    fn len(&self) -> usize {
        match &self.kind {
            PatternKind::Literal(words) | PatternKind::Lowercase(words) => words.len(),
        }
    }

    fn matches_at(&self, doc: &AnnotatedDoc, start: usize) -> bool {
        let len = self.len();
        if len == 0 || start + len > doc.tokens.len() {
            return false;
        }
        let window = &doc.tokens[start..start + len];
        match &self.kind {
            PatternKind::Literal(words) => window.iter().zip(words).all(|(t, w)| t.text == *w),
            PatternKind::Lowercase(words) => window
                .iter()
                .zip(words)
                .all(|(t, w)| t.text.to_lowercase() == *w),
        }
    }
}

/// Rule set whose matches override overlapping generic entities.
#[derive(Debug, Clone)]
pub struct EntityRuler {
    patterns: Vec<EntityPattern>,
}

impl Default for EntityRuler {
    fn default() -> Self {
        Self::new(vec![
            EntityPattern::literal("ORG", "SciELO"),
            EntityPattern::literal("ORG", "CAPES"),
            EntityPattern::literal("ORG", "CNPq"),
            EntityPattern::literal("MISC", "Plataforma Lattes"),
            EntityPattern::lowercase("MISC", &["plataforma", "sucupira"]),
        ])
    }
}

impl EntityRuler {
    pub fn new(patterns: Vec<EntityPattern>) -> Self {
        Self { patterns }
    }

    /// Rule matches, left to right, longest first, never overlapping.
    pub fn find(&self, doc: &AnnotatedDoc) -> Vec<EntitySpan> {
        let mut spans = Vec::new();
        let mut idx = 0;
        while idx < doc.tokens.len() {
            let best = self
                .patterns
                .iter()
                .filter(|p| p.matches_at(doc, idx))
                .max_by_key(|p| p.len());
            match best {
                Some(pattern) => {
                    spans.push(EntitySpan {
                        start: idx,
                        end: idx + pattern.len(),
                        label: pattern.label.clone(),
                    });
                    idx += pattern.len();
                }
                None => idx += 1,
            }
        }
        spans
    }

    /// Merge rule matches with the generic spans of `doc`, keep the
    /// PER/ORG/LOC/MISC categories, and return entities in text order.
    pub fn apply(&self, doc: &AnnotatedDoc) -> Vec<Entity> {
        let mut spans = self.find(doc);
        let generic: Vec<EntitySpan> = doc
            .entities
            .iter()
            .filter(|g| !spans.iter().any(|r| r.overlaps(g)))
            .cloned()
            .collect();
        spans.extend(generic);
        spans.sort_by_key(|s| (s.start, s.end));
        spans
            .into_iter()
            .filter_map(|span| {
                let kind = EntityType::from_label(&span.label)?;
                let text = doc.span_text(span.start, span.end);
                (!text.is_empty()).then(|| Entity {
                    text: text.to_string(),
                    kind,
                })
            })
            .collect()
    }
}
