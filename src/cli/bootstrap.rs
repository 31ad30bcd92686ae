//! CLI entry-point for one-time resource preparation.

use anyhow::Result;
use tracing::instrument;

use crate::{config::Settings, nlp};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    nlp::bootstrap(&settings).await
}
