//! Fatal failure taxonomy of an enrichment run.

use std::path::PathBuf;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Every variant aborts the whole run before any output is written.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("dataset {path} could not be read")]
    DatasetUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset {path} is malformed: {reason}")]
    DatasetMalformed { path: PathBuf, reason: String },
    #[error("taxonomy {path} could not be read")]
    TaxonomyUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("taxonomy {path} is malformed: {reason}")]
    TaxonomyMalformed { path: PathBuf, reason: String },
    #[error("{resource} unavailable")]
    ResourceUnavailable {
        resource: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("output {path} could not be written")]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EnrichError {
    /// Wrap a provider failure (annotator, encoder) as a fatal resource error.
    pub fn resource(resource: &'static str, source: impl Into<BoxError>) -> Self {
        Self::ResourceUnavailable {
            resource,
            source: source.into(),
        }
    }
}
