//! Configuration source loading and composition

use crate::validation::Validate;
use crate::{ChunkerConfig, ChunkerOverrides, ConfigResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Trait for loading configuration from different sources
pub trait ConfigurationSource {
    /// Load the fields this source provides
    ///
    /// # Errors
    /// Returns configuration loading errors
    fn load(&self) -> ConfigResult<ChunkerOverrides>;

    /// Get the name of this configuration source
    fn name(&self) -> &str;

    /// Get the priority of this source (higher number = higher priority)
    fn priority(&self) -> u8;
}

/// Load configuration from environment variables
pub struct EnvironmentSource;

impl ConfigurationSource for EnvironmentSource {
    fn load(&self) -> ConfigResult<ChunkerOverrides> {
        ChunkerOverrides::from_lookup(|key| std::env::var(key).ok())
    }

    fn name(&self) -> &'static str {
        "environment"
    }

    fn priority(&self) -> u8 {
        100 // environment variables override everything
    }
}

/// On-disk layout: settings live under a `[chunker]` table
#[derive(Debug, Default, Deserialize)]
struct TomlDocument {
    #[serde(default)]
    chunker: ChunkerOverrides,
}

/// Load configuration from TOML file
pub struct TomlFileSource {
    path: PathBuf,
}

impl TomlFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse TOML text with the same rules as a file
    ///
    /// # Errors
    /// Returns `ConfigError::TomlParsing` for malformed documents
    pub fn parse(content: &str) -> ConfigResult<ChunkerOverrides> {
        let document: TomlDocument = toml::from_str(content)?;
        Ok(document.chunker)
    }
}

impl ConfigurationSource for TomlFileSource {
    fn load(&self) -> ConfigResult<ChunkerOverrides> {
        let content = std::fs::read_to_string(&self.path)?;
        Self::parse(&content)
    }

    fn name(&self) -> &'static str {
        "toml_file"
    }

    fn priority(&self) -> u8 {
        50 // below env vars, above defaults
    }
}

/// Type alias for configuration sources
type ConfigSources = Vec<Box<dyn ConfigurationSource>>;

/// Configuration loader that combines multiple sources
pub struct ConfigurationLoader {
    sources: ConfigSources,
}

impl ConfigurationLoader {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    #[must_use]
    pub fn add_source(mut self, source: Box<dyn ConfigurationSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Load configuration from all sources with priority ordering
    ///
    /// A source that fails to load is skipped with a warning; the merged
    /// result must still validate.
    ///
    /// # Errors
    /// Returns validation errors for the merged configuration
    pub fn load(&self) -> ConfigResult<ChunkerConfig> {
        let mut config = ChunkerConfig::default();

        // lowest priority first so higher priorities overwrite
        let mut sorted_sources = self.sources.iter().collect::<Vec<_>>();
        sorted_sources.sort_by_key(|source| source.priority());

        for source in sorted_sources {
            match source.load() {
                Ok(overrides) => {
                    tracing::debug!(source = source.name(), "Loaded chunker configuration");
                    config.apply(overrides);
                }
                Err(e) => {
                    tracing::warn!("Failed to load from source {}: {e}", source.name());
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigurationLoader {
    fn default() -> Self {
        Self::new()
    }
}
