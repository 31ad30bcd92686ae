//! Corpus and taxonomy file boundary.

pub mod dataset;
pub mod taxonomy;
