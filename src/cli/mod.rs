//! Command-line interface wiring for abstract-enricher.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod annotate;
pub mod bootstrap;
pub mod enrich;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Scientific abstract enrichment", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Enrich(args) => enrich::run(args, settings).await,
            Commands::Annotate(args) => annotate::run(args).await,
            Commands::Bootstrap => bootstrap::run(settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Enrich the whole corpus in one batch pass.
    Enrich(enrich::Args),
    /// Print the annotation passes for a single abstract.
    Annotate(annotate::Args),
    /// Fetch and cache the embedding model.
    Bootstrap,
}
