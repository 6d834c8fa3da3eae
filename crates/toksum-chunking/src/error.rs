//! Error types for the chunking crate

use thiserror::Error;
use toksum_config::ConfigError;

/// Chunking-specific error types
#[derive(Error, Debug)]
pub enum ChunkingError {
    /// A chunker was built with a zero token budget
    #[error("max_tokens must be positive")]
    InvalidBudget,

    /// The token counter does not know the requested model
    #[error("Unknown model: {model}")]
    UnknownModel { model: String },

    /// Token counting error
    #[error("Token counting error: {0}")]
    TokenCounting(String),

    /// Invalid chunker configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tokenizer construction error (BPE tables, etc.)
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] anyhow::Error),
}

impl ChunkingError {
    /// Create an unknown model error
    pub fn unknown_model(model: impl Into<String>) -> Self {
        Self::UnknownModel {
            model: model.into(),
        }
    }

    /// Create a token counting error
    pub fn token_counting_error(msg: impl Into<String>) -> Self {
        Self::TokenCounting(msg.into())
    }
}

/// Result type alias for chunking operations
pub type ChunkingResult<T> = Result<T, ChunkingError>;
