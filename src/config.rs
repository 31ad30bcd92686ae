//! Runtime configuration utilities for abstract-enricher.

use std::{
    env,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::logging::LogFormat;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Input corpus: JSON array of `{id, abstract, ...}` records.
    pub dataset_path: PathBuf,
    /// Taxonomy JSON with a top-level `children` array.
    pub taxonomy_path: PathBuf,
    /// Destination of the enriched corpus.
    pub output_path: PathBuf,
    /// Optional CoNLL-U annotations produced by an external parser.
    pub annotations_path: Option<PathBuf>,
    /// Root folder for cached artefacts (embedding models).
    pub data_dir: PathBuf,
    /// Embedding model identifier used when the `embeddings` feature is on.
    pub embedding_model: String,
    /// Dimension of the hashing encoder fallback.
    pub embedding_dim: usize,
    /// Terms in more than this share of documents are not keyword candidates.
    pub keyword_max_df: f64,
    /// Terms in fewer than this many documents are not keyword candidates.
    pub keyword_min_df: usize,
    /// Keywords kept per document.
    pub keyword_top_n: usize,
    /// Similar documents linked per document.
    pub similar_docs: usize,
    pub log_format: LogFormat,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let dataset_path = env_path("DATASET_PATH", "./dataset/dataset.json");
        let taxonomy_path = env_path("TAXONOMY_PATH", "./dataset/categories.json");
        let output_path = env_path("OUTPUT_PATH", "./dataset/dataset_enriquecido.json");
        let annotations_path = env::var("ANNOTATIONS_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let data_dir = env_path("DATA_DIR", "./data");
        let embedding_model = env::var("EMBEDDING_MODEL")
            .unwrap_or_else(|_| "paraphrase-multilingual-minilm-l12-v2".to_string());
        let log_format = env::var("LOG_FORMAT")
            .map(|v| LogFormat::from_env_value(&v))
            .unwrap_or_default();

        Ok(Self {
            dataset_path,
            taxonomy_path,
            output_path,
            annotations_path,
            data_dir,
            embedding_model,
            embedding_dim: env_parse("EMBEDDING_DIM", 384),
            keyword_max_df: env_parse("KEYWORD_MAX_DF", 0.60),
            keyword_min_df: env_parse("KEYWORD_MIN_DF", 5),
            keyword_top_n: env_parse("KEYWORD_TOP_N", 5),
            similar_docs: env_parse("SIMILAR_DOCS", 5),
            log_format,
        })
    }

    /// Convenience helper for derived path segments.
    pub fn join_data<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.data_dir.join(path)
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
