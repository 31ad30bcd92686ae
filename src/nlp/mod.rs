//! Natural language processing orchestration layer.

pub mod annotation;
pub mod conllu;
pub mod embeddings;
pub mod keywords;
pub mod lexicon;
pub mod phrases;
pub mod pipeline;
pub mod relations;
pub mod ruler;
pub mod similarity;
pub mod stopwords;
pub mod topics;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    config::Settings,
    data::{dataset, taxonomy},
    error::EnrichError,
};

use self::{
    annotation::Annotator,
    conllu::ConlluAnnotator,
    lexicon::LexiconAnnotator,
    phrases::PhraseMatcher,
    pipeline::{DocumentAnalysis, EnrichConfig, EnrichmentPipeline},
    ruler::EntityRuler,
};

/// Pick the annotation provider: precomputed CoNLL-U when configured,
/// the built-in lexicon annotator otherwise.
pub async fn load_annotator(annotations: Option<&Path>) -> Result<Box<dyn Annotator>> {
    match annotations {
        Some(path) => {
            let annotator = ConlluAnnotator::from_path(path)
                .await
                .map_err(|err| EnrichError::resource("conllu annotations", err))?;
            Ok(Box::new(annotator))
        }
        None => Ok(Box::new(LexiconAnnotator::new())),
    }
}

/// Run the end-to-end enrichment from the configured files.
pub async fn enrich_corpus(settings: &Settings) -> Result<()> {
    let documents = dataset::load_documents(&settings.dataset_path).await?;
    let taxonomy = taxonomy::load_taxonomy(&settings.taxonomy_path).await?;
    let annotator = load_annotator(settings.annotations_path.as_deref()).await?;
    let encoder = embeddings::load_encoder(settings)
        .map_err(|err| EnrichError::resource("text encoder", err))?;

    let mut pipeline = EnrichmentPipeline::new(annotator, encoder, EnrichConfig::from_settings(settings));
    let enriched = pipeline
        .run(documents, &taxonomy)
        .context("enrichment pass failed")?;
    dataset::write_documents(&settings.output_path, &enriched).await?;
    info!(count = enriched.len(), "enrichment complete");
    Ok(())
}

/// Annotation passes over a single abstract, for inspection.
pub fn annotate_text(text: &str) -> DocumentAnalysis {
    let doc = LexiconAnnotator::new().annotate_one(text);
    pipeline::analyse(text, &doc, &EntityRuler::default(), &PhraseMatcher::default())
}

/// Prepare external resources once: instantiating the encoder fetches and
/// caches the embedding model.
pub async fn bootstrap(settings: &Settings) -> Result<()> {
    std::fs::create_dir_all(settings.join_data("models")).context("creating model cache dir")?;
    let mut encoder = embeddings::load_encoder(settings)?;
    let probe = encoder.encode(&[String::new()])?;
    let dim = embeddings::check_batch(&probe, 1)?;
    info!(encoder = encoder.name(), dim, "encoder ready");
    Ok(())
}
