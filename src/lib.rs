//! Enrichment of scientific abstract corpora with linguistic and semantic annotations.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod nlp;
