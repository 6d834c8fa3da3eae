//! Centralized configuration for toksum chunkers
//!
//! Configuration follows a simple hierarchy:
//! 1. Safe defaults (defined as constants)
//! 2. TOML file overrides
//! 3. Environment variable overrides
//! 4. Runtime validation

pub mod error;
pub mod source;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use source::{ConfigurationLoader, ConfigurationSource, EnvironmentSource, TomlFileSource};
pub use validation::Validate;

use serde::{Deserialize, Serialize};

// =============================================================================
// SAFE DEFAULTS
// =============================================================================

const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_MAX_TOKENS: usize = 512;
const DEFAULT_CODE_GUARD_THRESHOLD: usize = 100; // chars, function/class merge guard

const MAX_TOKENS_CEILING: u64 = 1_000_000;
const CODE_GUARD_CEILING: u64 = 1_000_000;

/// Environment variable names
pub const ENV_MODEL: &str = "TOKSUM_CHUNKER_MODEL";
pub const ENV_MAX_TOKENS: &str = "TOKSUM_CHUNKER_MAX_TOKENS";
pub const ENV_CODE_GUARD_CHARS: &str = "TOKSUM_CHUNKER_CODE_GUARD_CHARS";

/// Settings a chunker is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Model identifier handed to the token counter untouched
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens per chunk
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Character length above which a function block and a class block
    /// are never merged into one chunk
    #[serde(default = "default_code_guard_threshold")]
    pub code_guard_threshold: usize,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

const fn default_max_tokens() -> usize {
    DEFAULT_MAX_TOKENS
}

const fn default_code_guard_threshold() -> usize {
    DEFAULT_CODE_GUARD_THRESHOLD
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: DEFAULT_MAX_TOKENS,
            code_guard_threshold: DEFAULT_CODE_GUARD_THRESHOLD,
        }
    }
}

impl ChunkerConfig {
    /// Create a config for a model and budget, keeping the default guard
    pub fn new(model: impl Into<String>, max_tokens: usize) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            ..Self::default()
        }
    }

    /// Load from environment variables with safe defaults
    ///
    /// Unparsable values fall back to the default for that field.
    pub fn from_env() -> Self {
        let model = std::env::var(ENV_MODEL).unwrap_or_else(|_| default_model());
        let max_tokens = std::env::var(ENV_MAX_TOKENS)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);
        let code_guard_threshold = std::env::var(ENV_CODE_GUARD_CHARS)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_CODE_GUARD_THRESHOLD);

        Self {
            model,
            max_tokens,
            code_guard_threshold,
        }
    }

    /// Apply every field present in `overrides`
    pub fn apply(&mut self, overrides: ChunkerOverrides) {
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(max_tokens) = overrides.max_tokens {
            self.max_tokens = max_tokens;
        }
        if let Some(threshold) = overrides.code_guard_threshold {
            self.code_guard_threshold = threshold;
        }
    }
}

impl Validate for ChunkerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_non_empty(&self.model, "chunker.model")?;
        validation::validate_range(
            self.max_tokens as u64,
            1,
            MAX_TOKENS_CEILING,
            "chunker.max_tokens",
        )?;
        validation::validate_range(
            self.code_guard_threshold as u64,
            1,
            CODE_GUARD_CEILING,
            "chunker.code_guard_threshold",
        )?;
        Ok(())
    }
}

/// Partial configuration produced by a single source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerOverrides {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<usize>,
    #[serde(default)]
    pub code_guard_threshold: Option<usize>,
}

impl ChunkerOverrides {
    /// Read overrides through an arbitrary variable lookup
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` when a numeric variable is set
    /// but does not parse
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            model: lookup(ENV_MODEL),
            max_tokens: parse_number(&lookup, ENV_MAX_TOKENS)?,
            code_guard_threshold: parse_number(&lookup, ENV_CODE_GUARD_CHARS)?,
        })
    }
}

fn parse_number<F>(lookup: &F, key: &str) -> ConfigResult<Option<usize>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue {
                    field: key.to_string(),
                    value: raw.clone(),
                })
        })
        .transpose()
}
