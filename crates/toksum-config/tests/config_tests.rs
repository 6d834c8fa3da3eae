//! File-backed configuration loading tests

use toksum_config::{ChunkerConfig, ConfigError, ConfigurationLoader, TomlFileSource, Validate};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let file = tempfile::NamedTempFile::new().expect("create temp file");
    std::fs::write(file.path(), contents).expect("write temp file");
    file
}

#[test]
fn test_loads_chunker_settings_from_toml_file() {
    let file = write_config(
        r#"
[chunker]
model = "gpt-4o"
max_tokens = 1024
code_guard_threshold = 400
"#,
    );

    let config = ConfigurationLoader::new()
        .add_source(Box::new(TomlFileSource::new(file.path())))
        .load()
        .expect("config should load");

    assert_eq!(
        config,
        ChunkerConfig {
            model: "gpt-4o".to_string(),
            max_tokens: 1024,
            code_guard_threshold: 400,
        }
    );
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config("[chunker]\nmax_tokens = 64\n");

    let config = ConfigurationLoader::new()
        .add_source(Box::new(TomlFileSource::new(file.path())))
        .load()
        .expect("config should load");

    assert_eq!(config.model, "gpt-4");
    assert_eq!(config.max_tokens, 64);
    assert_eq!(config.code_guard_threshold, 100);
}

#[test]
fn test_malformed_file_is_skipped_with_defaults() {
    let file = write_config("[chunker\nmax_tokens = ");

    let config = ConfigurationLoader::new()
        .add_source(Box::new(TomlFileSource::new(file.path())))
        .load()
        .expect("defaults remain valid");

    assert_eq!(config, ChunkerConfig::default());
}

#[test]
fn test_out_of_range_budget_in_file_fails_validation() {
    let file = write_config("[chunker]\nmax_tokens = 0\n");

    let result = ConfigurationLoader::new()
        .add_source(Box::new(TomlFileSource::new(file.path())))
        .load();

    match result {
        Err(ConfigError::OutOfRange { field, value, .. }) => {
            assert_eq!(field, "chunker.max_tokens");
            assert_eq!(value, 0);
        }
        other => panic!("expected OutOfRange, got {other:?}"),
    }
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = ChunkerConfig::new("text-davinci-003", 4097);
    let serialized = toml::to_string(&config).expect("serialize");
    let restored: ChunkerConfig = toml::from_str(&serialized).expect("deserialize");

    assert_eq!(restored, config);
    assert!(restored.validate().is_ok());
}
