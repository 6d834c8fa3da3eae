//! Trait definitions for token counting

use crate::ChunkingResult;
use std::fmt;
use std::sync::Arc;

/// Trait for counting tokens in text
///
/// This is the only way the chunker measures text. Implementations may be
/// slow and may fail for model identifiers they do not recognize; the
/// chunker neither caches nor recovers from their results.
pub trait TokenCounter: Send + Sync {
    /// Get the name/identifier of this counter
    fn name(&self) -> &str;

    /// Count tokens in `text` as seen by `model`
    ///
    /// Must be deterministic for the same input.
    ///
    /// # Errors
    /// Returns an error when the model is not supported or counting fails
    fn count(&self, text: &str, model: &str) -> ChunkingResult<usize>;

    /// Count tokens for multiple texts, stopping at the first failure
    ///
    /// # Errors
    /// Propagates the first error returned by [`TokenCounter::count`]
    fn count_batch(&self, texts: &[&str], model: &str) -> ChunkingResult<Vec<usize>> {
        texts.iter().map(|text| self.count(text, model)).collect()
    }
}

/// Type alias for shared token counter
pub type TokenCounterRef = Arc<dyn TokenCounter>;

type CountFn = dyn Fn(&str, &str) -> ChunkingResult<usize> + Send + Sync;

/// Token counter backed by a closure
///
/// Handy for plugging in an external tokenizer service or a deterministic
/// stand-in during tests.
pub struct FnCounter {
    name: String,
    count_fn: Box<CountFn>,
}

impl FnCounter {
    pub fn new<F>(name: &str, count_fn: F) -> Self
    where
        F: Fn(&str, &str) -> ChunkingResult<usize> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            count_fn: Box::new(count_fn),
        }
    }
}

impl fmt::Debug for FnCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCounter")
            .field("name", &self.name)
            .finish()
    }
}

impl TokenCounter for FnCounter {
    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self, text: &str, model: &str) -> ChunkingResult<usize> {
        (self.count_fn)(text, model)
    }
}
