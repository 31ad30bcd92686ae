//! Text embedding providers built on fastembed, with a hashing fallback.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;

#[cfg(feature = "embeddings")]
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::config::Settings;

/// Text embedding capability: one fixed-dimension vector per input, same
/// order, including for empty strings.
pub trait Encoder {
    fn name(&self) -> &str;
    fn encode(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Signed feature hashing of lower-cased word tokens.
///
/// Deterministic across runs and platforms; the empty string maps to the
/// zero vector.
#[derive(Debug, Clone)]
pub struct HashingEncoder {
    dim: usize,
}

impl HashingEncoder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn encode_one(&self, text: &str) -> Vec<f32> {
        static WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid regex"));
        let mut vector = vec![0.0f32; self.dim];
        for word in WORDS.find_iter(text) {
            let hash = fnv1a(word.as_str().to_lowercase().as_bytes());
            let slot = (hash % self.dim as u64) as usize;
            let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
            vector[slot] += sign;
        }
        vector
    }
}

impl Encoder for HashingEncoder {
    fn name(&self) -> &str {
        "hashing"
    }

    fn encode(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.encode_one(t)).collect())
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, b| (hash ^ u64::from(*b)).wrapping_mul(PRIME))
}

/// Sentence-transformer embeddings through fastembed (ONNX runtime).
#[cfg(feature = "embeddings")]
pub struct FastEmbedEncoder {
    model_name: String,
    model: TextEmbedding,
}

#[cfg(feature = "embeddings")]
impl FastEmbedEncoder {
    pub fn new(settings: &Settings) -> Result<Self> {
        let model = model_for(&settings.embedding_model)?;
        let options = InitOptions::new(model)
            .with_cache_dir(settings.join_data("models"))
            .with_show_download_progress(false);
        let model = TextEmbedding::try_new(options)?;
        tracing::info!(model = %settings.embedding_model, "loaded embedding model");
        Ok(Self {
            model_name: settings.embedding_model.clone(),
            model,
        })
    }
}

#[cfg(feature = "embeddings")]
impl Encoder for FastEmbedEncoder {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn encode(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let documents: Vec<&str> = texts.iter().map(String::as_str).collect();
        Ok(self.model.embed(documents, None)?)
    }
}

#[cfg(feature = "embeddings")]
fn model_for(name: &str) -> Result<EmbeddingModel> {
    Ok(match name.trim().to_ascii_lowercase().as_str() {
        "all-minilm-l6-v2" => EmbeddingModel::AllMiniLML6V2,
        "paraphrase-multilingual-minilm-l12-v2" => EmbeddingModel::ParaphraseMLMiniLML12V2,
        "multilingual-e5-small" => EmbeddingModel::MultilingualE5Small,
        "multilingual-e5-base" => EmbeddingModel::MultilingualE5Base,
        other => bail!("unsupported embedding model {other}"),
    })
}

/// Build the configured encoder: fastembed when compiled in, hashing otherwise.
pub fn load_encoder(settings: &Settings) -> Result<Box<dyn Encoder>> {
    #[cfg(feature = "embeddings")]
    {
        Ok(Box::new(FastEmbedEncoder::new(settings)?))
    }
    #[cfg(not(feature = "embeddings"))]
    {
        tracing::warn!(
            model = %settings.embedding_model,
            dim = settings.embedding_dim,
            "embeddings feature disabled; using hashing encoder"
        );
        Ok(Box::new(HashingEncoder::new(settings.embedding_dim)))
    }
}

/// Reject batches whose shape does not match the request.
pub fn check_batch(vectors: &[Vec<f32>], expected: usize) -> Result<usize> {
    if vectors.len() != expected {
        bail!("encoder returned {} vectors for {expected} inputs", vectors.len());
    }
    let dim = vectors.first().map(Vec::len).unwrap_or(0);
    if vectors.iter().any(|v| v.len() != dim) {
        bail!("encoder returned vectors of mixed dimension");
    }
    Ok(dim)
}

pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot = a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>();
    let norm_a = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
