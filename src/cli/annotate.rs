//! CLI entry-point for inspecting the annotation passes on one abstract.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::nlp;

/// Args for the `annotate` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Abstract text to annotate.
    #[arg(long)]
    pub text: String,
}

#[instrument(skip(args))]
pub async fn run(args: Args) -> Result<()> {
    let analysis = nlp::annotate_text(&args.text);
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
