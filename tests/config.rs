use std::path::PathBuf;

use abstract_enricher::{config::Settings, logging::LogFormat, nlp::pipeline::EnrichConfig};

#[test]
fn log_format_parsing_is_lenient() {
    assert_eq!(LogFormat::from_env_value("JSON "), LogFormat::Json);
    assert_eq!(LogFormat::from_env_value("pretty"), LogFormat::Pretty);
    assert_eq!(LogFormat::from_env_value("yaml"), LogFormat::Pretty);
}

// Single test so the environment is not mutated concurrently.
#[test]
fn settings_read_the_environment() {
    std::env::set_var("DATASET_PATH", "/corpus/in.json");
    std::env::set_var("ANNOTATIONS_PATH", "  ");
    std::env::set_var("DATA_DIR", "/cache");
    std::env::set_var("KEYWORD_MIN_DF", "2");
    std::env::set_var("SIMILAR_DOCS", "not a number");

    let settings = Settings::load().unwrap();
    assert_eq!(settings.dataset_path, PathBuf::from("/corpus/in.json"));
    assert_eq!(settings.annotations_path, None);
    assert_eq!(settings.join_data("models"), PathBuf::from("/cache/models"));

    let config = EnrichConfig::from_settings(&settings);
    assert_eq!(config.keywords.min_doc_freq, 2);
    assert_eq!(config.keywords.max_doc_freq, 0.60);
    assert_eq!(config.similar_docs, 5);
}
