//! Whole-corpus enrichment pass.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, info_span};

use crate::{
    config::Settings,
    data::{
        dataset::{Document, EnrichedDocument, Entity, EntityType, RelationTriple},
        taxonomy::Taxonomy,
    },
    error::EnrichError,
    nlp::{
        annotation::{AnnotatedDoc, Annotator},
        embeddings::{check_batch, Encoder},
        keywords::{self, KeywordConfig},
        phrases::PhraseMatcher,
        relations::extract_relations,
        ruler::EntityRuler,
        similarity,
        topics::TopicClassifier,
    },
};

/// Algorithm parameters of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichConfig {
    pub keywords: KeywordConfig,
    pub similar_docs: usize,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            keywords: KeywordConfig::default(),
            similar_docs: 5,
        }
    }
}

impl EnrichConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            keywords: KeywordConfig {
                max_doc_freq: settings.keyword_max_df,
                min_doc_freq: settings.keyword_min_df,
                top_n: settings.keyword_top_n,
            },
            similar_docs: settings.similar_docs,
        }
    }
}

/// Per-document results of the annotation passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentAnalysis {
    pub entities: Vec<Entity>,
    pub methodologies: Vec<String>,
    pub relationships: Vec<RelationTriple>,
    /// Content lemmas joined with spaces, input of keyword weighting.
    pub content: String,
}

/// Run the entity, methodology, relation and content-word passes over one
/// abstract and its annotation. Methodologies are matched on `text` itself.
pub fn analyse(
    text: &str,
    doc: &AnnotatedDoc,
    ruler: &EntityRuler,
    matcher: &PhraseMatcher,
) -> DocumentAnalysis {
    DocumentAnalysis {
        entities: ruler.apply(doc),
        methodologies: matcher.find_terms(text),
        relationships: extract_relations(doc),
        content: keywords::content_text(doc),
    }
}

/// Most frequent organisation names across the corpus, first-seen order on ties.
pub fn top_organizations(documents: &[EnrichedDocument], n: usize) -> Vec<(String, usize)> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for entity in documents.iter().flat_map(|d| &d.entities) {
        if entity.kind == EntityType::Organization {
            *counts.entry(entity.text.as_str()).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Annotator, encoder and read-only vocabularies for one batch pass.
pub struct EnrichmentPipeline {
    annotator: Box<dyn Annotator>,
    encoder: Box<dyn Encoder>,
    ruler: EntityRuler,
    methodologies: PhraseMatcher,
    config: EnrichConfig,
}

impl EnrichmentPipeline {
    pub fn new(annotator: Box<dyn Annotator>, encoder: Box<dyn Encoder>, config: EnrichConfig) -> Self {
        Self {
            annotator,
            encoder,
            ruler: EntityRuler::default(),
            methodologies: PhraseMatcher::default(),
            config,
        }
    }

    pub fn with_ruler(mut self, ruler: EntityRuler) -> Self {
        self.ruler = ruler;
        self
    }

    pub fn with_methodologies(mut self, matcher: PhraseMatcher) -> Self {
        self.methodologies = matcher;
        self
    }

    pub fn ruler(&self) -> &EntityRuler {
        &self.ruler
    }

    pub fn methodologies(&self) -> &PhraseMatcher {
        &self.methodologies
    }

    fn encode(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>, EnrichError> {
        let vectors = self
            .encoder
            .encode(texts)
            .map_err(|err| EnrichError::resource("text encoder", err))?;
        check_batch(&vectors, texts.len()).map_err(|err| EnrichError::resource("text encoder", err))?;
        Ok(vectors)
    }

    /// Enrich the corpus. Output order equals input order and every record
    /// carries every enrichment field; any failure aborts the whole run.
    pub fn run(
        &mut self,
        documents: Vec<Document>,
        taxonomy: &Taxonomy,
    ) -> Result<Vec<EnrichedDocument>, EnrichError> {
        let span = info_span!("enrich", documents = documents.len(), categories = taxonomy.len());
        let _guard = span.enter();

        if taxonomy.is_empty() {
            return Err(EnrichError::TaxonomyMalformed {
                path: Default::default(),
                reason: "no categories".to_string(),
            });
        }

        let abstracts: Vec<String> = documents.iter().map(|d| d.abstract_text.clone()).collect();

        let annotated = self
            .annotator
            .annotate(&abstracts)
            .map_err(|err| EnrichError::resource("linguistic annotator", err))?;
        if annotated.len() != abstracts.len() {
            return Err(EnrichError::resource(
                "linguistic annotator",
                format!("{} annotations for {} abstracts", annotated.len(), abstracts.len()),
            ));
        }
        info!(annotator = self.annotator.name(), "annotated abstracts");

        let doc_vectors = self.encode(&abstracts)?;
        let topic_vectors = self.encode(&taxonomy.descriptors())?;
        info!(encoder = self.encoder.name(), "encoded abstracts and taxonomy");

        let classifier = TopicClassifier::new(taxonomy, topic_vectors);
        let mut enriched: Vec<EnrichedDocument> =
            documents.into_iter().map(EnrichedDocument::from).collect();

        for (record, vector) in enriched.iter_mut().zip(&doc_vectors) {
            let topic = classifier.classify(vector);
            record.topic_label = topic.label;
            record.topic = topic.index;
        }
        info!("classified topics");

        let mut content = Vec::with_capacity(enriched.len());
        for (record, doc) in enriched.iter_mut().zip(&annotated) {
            let analysis = analyse(
                &record.document.abstract_text,
                doc,
                &self.ruler,
                &self.methodologies,
            );
            record.entities = analysis.entities;
            record.methodologies = analysis.methodologies;
            record.relationships = analysis.relationships;
            content.push(analysis.content);
        }
        info!(
            entities = enriched.iter().map(|d| d.entities.len()).sum::<usize>(),
            relationships = enriched.iter().map(|d| d.relationships.len()).sum::<usize>(),
            "extracted structured annotations"
        );
        for (name, count) in top_organizations(&enriched, 10) {
            info!(%name, count, "frequent organization");
        }

        let keywords = keywords::extract_keywords(&content, &self.config.keywords);
        for (record, terms) in enriched.iter_mut().zip(keywords) {
            record.auto_keywords = terms;
        }
        info!("extracted keywords");

        let links = similarity::link_all(&doc_vectors, self.config.similar_docs)
            .map_err(|err| EnrichError::resource("similarity matrix", err))?;
        let ids: Vec<_> = enriched.iter().map(|d| d.document.id.clone()).collect();
        for (record, neighbours) in enriched.iter_mut().zip(links) {
            record.similar_docs = neighbours.into_iter().map(|idx| ids[idx].clone()).collect();
        }
        info!(k = self.config.similar_docs, "linked similar documents");

        Ok(enriched)
    }
}
