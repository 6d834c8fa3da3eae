//! Chunking service binding a token counter, a model and a budget

use super::packer::{Chunk, DefinitionKindGuard, GreedyPacker, TokenBudget};
use super::traits::TokenCounterRef;
use crate::ChunkingResult;
use crate::splitting::{self, Unit};
use toksum_config::{ChunkerConfig, Validate};

/// Separator between sentences and between words
pub const SENTENCE_SEPARATOR: &str = " ";
/// Separator between paragraphs and between code blocks
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Splits text into chunks that stay within a token budget
///
/// Immutable after construction; every call works on its own state, so one
/// chunker can be reused and shared freely.
pub struct SmartChunker {
    counter: TokenCounterRef,
    model: String,
    budget: TokenBudget,
    code_guard: DefinitionKindGuard,
}

impl SmartChunker {
    /// Create a chunker for `model` with at most `max_tokens` per chunk
    ///
    /// # Errors
    /// Returns `ChunkingError::InvalidBudget` when `max_tokens` is zero
    pub fn new(
        counter: TokenCounterRef,
        model: impl Into<String>,
        max_tokens: usize,
    ) -> ChunkingResult<Self> {
        Ok(Self {
            counter,
            model: model.into(),
            budget: TokenBudget::new(max_tokens)?,
            code_guard: DefinitionKindGuard::default(),
        })
    }

    /// Create a chunker from validated configuration
    ///
    /// # Errors
    /// Returns `ChunkingError::InvalidBudget` for a zero budget and
    /// `ChunkingError::Config` for any other invalid setting
    pub fn from_config(counter: TokenCounterRef, config: &ChunkerConfig) -> ChunkingResult<Self> {
        let chunker = Self::new(counter, config.model.clone(), config.max_tokens)?;
        config.validate()?;
        Ok(chunker.with_code_guard_threshold(config.code_guard_threshold))
    }

    /// Override the character threshold of the function/class merge guard
    #[must_use]
    pub const fn with_code_guard_threshold(mut self, chars: usize) -> Self {
        self.code_guard = DefinitionKindGuard::new(chars);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub const fn max_tokens(&self) -> usize {
        self.budget.max_tokens()
    }

    pub const fn code_guard_threshold(&self) -> usize {
        self.code_guard.threshold()
    }

    /// Chunk text at sentence boundaries, joining sentences with a space
    ///
    /// # Errors
    /// Propagates token counter failures
    pub fn chunk_by_sentences(&self, text: &str) -> ChunkingResult<Vec<Chunk>> {
        let units = splitting::split_sentences(text);
        self.pack("sentences", &units, SENTENCE_SEPARATOR, None)
    }

    /// Chunk text at blank lines, joining paragraphs with a blank line
    ///
    /// # Errors
    /// Propagates token counter failures
    pub fn chunk_by_paragraphs(&self, text: &str) -> ChunkingResult<Vec<Chunk>> {
        let units = splitting::split_paragraphs(text);
        self.pack("paragraphs", &units, PARAGRAPH_SEPARATOR, None)
    }

    /// Chunk text at word boundaries, joining words with a space
    ///
    /// Whitespace between words is collapsed to a single space.
    ///
    /// # Errors
    /// Propagates token counter failures
    pub fn chunk_by_words(&self, text: &str) -> ChunkingResult<Vec<Chunk>> {
        let units = splitting::split_words(text);
        self.pack("words", &units, SENTENCE_SEPARATOR, None)
    }

    /// Chunk source code
    ///
    /// Indentation-delimited languages (Python) are cut at top-level
    /// function and class boundaries. Any other language is chunked
    /// exactly like [`SmartChunker::chunk_by_paragraphs`].
    ///
    /// # Errors
    /// Propagates token counter failures
    pub fn chunk_code(&self, code: &str, language: &str) -> ChunkingResult<Vec<Chunk>> {
        match splitting::get_language_config(language).filter(|c| c.supports_block_splitting()) {
            Some(config) => {
                let units = splitting::split_code_blocks(code, config);
                self.pack("code", &units, PARAGRAPH_SEPARATOR, Some(self.code_guard))
            }
            None => {
                tracing::debug!(
                    language,
                    "No block splitter for language, chunking by paragraph"
                );
                self.chunk_by_paragraphs(code)
            }
        }
    }

    fn pack(
        &self,
        strategy: &'static str,
        units: &[Unit],
        separator: &str,
        guard: Option<DefinitionKindGuard>,
    ) -> ChunkingResult<Vec<Chunk>> {
        let mut packer =
            GreedyPacker::new(self.counter.as_ref(), &self.model, self.budget, separator);
        if let Some(guard) = guard {
            packer = packer.with_guard(guard);
        }

        let chunks = packer.pack(units)?;
        tracing::debug!(
            strategy,
            model = %self.model,
            max_tokens = self.budget.max_tokens(),
            units = units.len(),
            chunks = chunks.len(),
            "Chunked text"
        );
        Ok(chunks)
    }
}
