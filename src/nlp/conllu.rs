//! Annotation provider backed by CoNLL-U output of an external parser.
//!
//! Documents are separated by `# newdoc` comments and must appear in corpus
//! order. Multi-word token lines (`4-5 da`) provide the surface text of their
//! syntactic words. Entities are read from `NER=B-XXX` / `NER=I-XXX` entries
//! in the MISC column. Each document's text, whitespace aside, must equal the
//! abstract it annotates.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, info};

use crate::nlp::{
    annotation::{AnnotatedDoc, Annotator, DependencyRole, EntitySpan, PartOfSpeech, Token},
    stopwords,
};

#[derive(Debug, Clone)]
pub struct ConlluAnnotator {
    docs: Vec<AnnotatedDoc>,
}

impl ConlluAnnotator {
    pub async fn from_path(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading annotations {}", path.display()))?;
        let annotator = Self::parse(&raw).with_context(|| format!("parsing {}", path.display()))?;
        info!(path = %path.display(), documents = annotator.docs.len(), "loaded conllu annotations");
        Ok(annotator)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let mut builder = DocBuilder::default();
        let mut docs = Vec::new();
        let mut started = false;
        let mut sentence: Vec<&str> = Vec::new();

        for (line_no, line) in raw.lines().enumerate() {
            let line = line.trim_end();
            if line.starts_with("# newdoc") {
                builder
                    .push_sentence(&sentence)
                    .with_context(|| format!("sentence ending at line {line_no}"))?;
                sentence.clear();
                if started {
                    docs.push(std::mem::take(&mut builder).finish());
                }
                started = true;
            } else if line.starts_with('#') {
                continue;
            } else if line.is_empty() {
                builder
                    .push_sentence(&sentence)
                    .with_context(|| format!("sentence ending at line {line_no}"))?;
                sentence.clear();
            } else {
                started = true;
                sentence.push(line);
            }
        }
        builder.push_sentence(&sentence)?;
        if started {
            docs.push(builder.finish());
        }
        Ok(Self { docs })
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl Annotator for ConlluAnnotator {
    fn name(&self) -> &'static str {
        "conllu"
    }

    fn annotate(&self, texts: &[String]) -> Result<Vec<AnnotatedDoc>> {
        if texts.len() != self.docs.len() {
            bail!(
                "annotations cover {} documents but the corpus has {}",
                self.docs.len(),
                texts.len()
            );
        }
        for (idx, (text, doc)) in texts.iter().zip(&self.docs).enumerate() {
            if squash(text) != squash(&doc.text) {
                bail!("annotated document {idx} does not match its abstract");
            }
        }
        debug!(documents = texts.len(), "annotations aligned with corpus");
        Ok(self.docs.clone())
    }
}

fn squash(text: &str) -> String {
    text.split_whitespace().collect()
}

#[derive(Default)]
struct DocBuilder {
    doc: AnnotatedDoc,
    open_entity: Option<EntitySpan>,
}

struct Row<'a> {
    id: &'a str,
    form: &'a str,
    lemma: &'a str,
    upos: &'a str,
    head: &'a str,
    deprel: &'a str,
    misc: &'a str,
}

impl<'a> Row<'a> {
    fn parse(line: &'a str) -> Result<Self> {
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() != 10 {
            bail!("expected 10 columns, found {}", cols.len());
        }
        Ok(Self {
            id: cols[0],
            form: cols[1],
            lemma: cols[2],
            upos: cols[3],
            head: cols[6],
            deprel: cols[7],
            misc: cols[9],
        })
    }

    fn misc_value(&self, key: &str) -> Option<&'a str> {
        self.misc
            .split('|')
            .find_map(|entry| entry.strip_prefix(key)?.strip_prefix('='))
    }

    fn space_after(&self) -> bool {
        self.misc_value("SpaceAfter") != Some("No")
    }
}

impl DocBuilder {
    fn push_sentence(&mut self, lines: &[&str]) -> Result<()> {
        if lines.is_empty() {
            return Ok(());
        }
        let base = self.doc.tokens.len();
        if !self.doc.text.is_empty() && !self.doc.text.ends_with(' ') {
            self.doc.text.push(' ');
        }
        // Multi-word token currently being expanded: (last word id, start, end).
        let mut range: Option<(usize, usize, usize)> = None;

        for line in lines {
            let row = Row::parse(line)?;
            if row.id.contains('.') {
                continue;
            }
            if let Some((first, last)) = row.id.split_once('-') {
                first
                    .parse::<usize>()
                    .map_err(|_| anyhow!("bad range id {}", row.id))?;
                let last: usize = last.parse().map_err(|_| anyhow!("bad range id {}", row.id))?;
                let (start, end) = self.append_surface(row.form, row.space_after());
                range = Some((last, start, end));
                continue;
            }
            let id: usize = row.id.parse().map_err(|_| anyhow!("bad token id {}", row.id))?;
            let (start, end) = match range {
                Some((last, start, end)) if id <= last => {
                    if id == last {
                        range = None;
                    }
                    (start, end)
                }
                _ => self.append_surface(row.form, row.space_after()),
            };
            let head = match row.head {
                "_" | "0" => None,
                value => {
                    let head_id: usize = value
                        .parse()
                        .map_err(|_| anyhow!("bad head {value} for token {id}"))?;
                    Some(base + head_id - 1)
                }
            };
            let pos = PartOfSpeech::from_upos(row.upos);
            let is_punct = pos == PartOfSpeech::Punctuation;
            let lemma = if row.lemma == "_" { row.form } else { row.lemma };
            self.doc.tokens.push(Token {
                text: row.form.to_string(),
                start,
                end,
                lemma: lemma.to_string(),
                pos,
                dep: DependencyRole::from_deprel(row.deprel),
                head,
                is_stop: !is_punct && stopwords::is_stopword(row.form),
                is_punct,
            });
            self.push_entity_tag(row.misc_value("NER"));
        }
        self.close_entity();
        let end = self.doc.tokens.len();
        if let Some(bad) = self.doc.tokens[base..end]
            .iter()
            .find(|t| t.head.is_some_and(|h| h >= end))
        {
            bail!("token {} points outside its sentence", bad.text);
        }
        self.doc.sentences.push(base..end);
        Ok(())
    }

    fn append_surface(&mut self, form: &str, space_after: bool) -> (usize, usize) {
        let start = self.doc.text.len();
        self.doc.text.push_str(form);
        let end = self.doc.text.len();
        if space_after {
            self.doc.text.push(' ');
        }
        (start, end)
    }

    fn push_entity_tag(&mut self, tag: Option<&str>) {
        let idx = self.doc.tokens.len() - 1;
        match tag.and_then(|t| t.split_once('-')) {
            Some(("B", label)) => {
                self.close_entity();
                self.open_entity = Some(EntitySpan {
                    start: idx,
                    end: idx + 1,
                    label: label.to_string(),
                });
            }
            Some(("I", label)) => match self.open_entity.as_mut() {
                Some(open) if open.label == label => open.end = idx + 1,
                _ => {
                    self.close_entity();
                    self.open_entity = Some(EntitySpan {
                        start: idx,
                        end: idx + 1,
                        label: label.to_string(),
                    });
                }
            },
            _ => self.close_entity(),
        }
    }

    fn close_entity(&mut self) {
        if let Some(span) = self.open_entity.take() {
            self.doc.entities.push(span);
        }
    }

    fn finish(mut self) -> AnnotatedDoc {
        self.close_entity();
        let trimmed = self.doc.text.trim_end().len();
        self.doc.text.truncate(trimmed);
        self.doc
    }
}
