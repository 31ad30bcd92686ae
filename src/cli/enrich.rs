//! CLI entry-point for the corpus enrichment pass.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{config::Settings, nlp};

/// Args for the `enrich` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Override the input dataset path.
    #[arg(long)]
    pub dataset: Option<PathBuf>,
    /// Override the taxonomy path.
    #[arg(long)]
    pub taxonomy: Option<PathBuf>,
    /// Override the output path.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// CoNLL-U annotations to use instead of the built-in annotator.
    #[arg(long)]
    pub annotations: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, mut settings: Settings) -> Result<()> {
    if let Some(dataset) = args.dataset {
        settings.dataset_path = dataset;
    }
    if let Some(taxonomy) = args.taxonomy {
        settings.taxonomy_path = taxonomy;
    }
    if let Some(output) = args.output {
        settings.output_path = output;
    }
    if args.annotations.is_some() {
        settings.annotations_path = args.annotations;
    }
    info!(
        dataset = %settings.dataset_path.display(),
        output = %settings.output_path.display(),
        "enriching corpus"
    );
    nlp::enrich_corpus(&settings).await
}
