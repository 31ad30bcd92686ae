//! Entry point wiring CLI dispatch to the enrichment pipeline.

use abstract_enricher::{cli::Cli, config::Settings, logging};
use anyhow::Result;
use tracing::{info, instrument};

#[tokio::main]
#[instrument]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    logging::init_tracing(settings.log_format)?;
    let cli = Cli::parse();

    info!(?cli, "starting command");
    cli.dispatch(settings).await
}
