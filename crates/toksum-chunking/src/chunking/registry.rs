//! Token counter registry for model selection

use super::tiktoken_counter::TiktokenCounter;
use super::traits::{TokenCounter, TokenCounterRef};
use crate::{ChunkingError, ChunkingResult};
use std::collections::HashMap;
use std::sync::Arc;

/// OpenAI model identifiers served by the shared tiktoken counter
const OPENAI_MODELS: &[&str] = &[
    "gpt-4",
    "gpt-4-0314",
    "gpt-4-0613",
    "gpt-4-32k",
    "gpt-4-32k-0314",
    "gpt-4-32k-0613",
    "gpt-4-turbo",
    "gpt-4-turbo-preview",
    "gpt-4-1106-preview",
    "gpt-4-0125-preview",
    "gpt-4o",
    "gpt-4o-2024-05-13",
    "gpt-4o-mini",
    "gpt-4o-mini-2024-07-18",
    "gpt-3.5-turbo",
    "gpt-3.5-turbo-0301",
    "gpt-3.5-turbo-0613",
    "gpt-3.5-turbo-16k",
    "gpt-3.5-turbo-16k-0613",
    "o1-preview",
    "o1-mini",
    "text-davinci-003",
    "text-davinci-002",
    "code-davinci-002",
    "code-cushman-001",
    "text-embedding-ada-002",
];

/// Registry of token counters keyed by exact model identifier
///
/// The registry is itself a [`TokenCounter`]: it forwards to the counter
/// registered for the requested model. Lookups are exact; an unregistered
/// model is an error, never a silent fallback.
#[derive(Default, Clone)]
pub struct TokenCounterRegistry {
    counters: HashMap<String, TokenCounterRef>,
}

impl TokenCounterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the common OpenAI models mapped to one
    /// shared [`TiktokenCounter`]
    pub fn with_openai_models() -> Self {
        let mut registry = Self::new();
        let tiktoken: TokenCounterRef = Arc::new(TiktokenCounter::new());
        for model in OPENAI_MODELS {
            registry.register(*model, Arc::clone(&tiktoken));
        }
        registry
    }

    /// Register a counter for a model, replacing any previous one
    pub fn register(&mut self, model_id: impl Into<String>, counter: TokenCounterRef) {
        self.counters.insert(model_id.into(), counter);
    }

    /// Get the token counter registered for a model
    pub fn for_model(&self, model_id: &str) -> Option<TokenCounterRef> {
        self.counters.get(model_id).cloned()
    }

    /// List all registered model IDs, sorted
    pub fn list_models(&self) -> Vec<String> {
        let mut models: Vec<String> = self.counters.keys().cloned().collect();
        models.sort();
        models
    }
}

impl TokenCounter for TokenCounterRegistry {
    fn name(&self) -> &'static str {
        "registry"
    }

    fn count(&self, text: &str, model: &str) -> ChunkingResult<usize> {
        let counter = self
            .counters
            .get(model)
            .ok_or_else(|| ChunkingError::unknown_model(model))?;
        counter.count(text, model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::traits::FnCounter;

    #[test]
    fn test_dispatches_to_registered_counter() {
        let mut registry = TokenCounterRegistry::new();
        let words = FnCounter::new("words", |text, _| Ok(text.split_whitespace().count()));
        let chars = FnCounter::new("chars", |text, _| Ok(text.chars().count()));
        registry.register("words", Arc::new(words));
        registry.register("chars", Arc::new(chars));

        assert_eq!(registry.count("one two three", "words").unwrap(), 3);
        assert_eq!(registry.count("one two three", "chars").unwrap(), 13);
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        let registry = TokenCounterRegistry::new();
        assert!(matches!(
            registry.count("text", "gpt-4"),
            Err(ChunkingError::UnknownModel { model }) if model == "gpt-4"
        ));
        assert!(registry.for_model("gpt-4").is_none());
    }

    #[test]
    fn test_lookup_is_exact() {
        let registry = TokenCounterRegistry::with_openai_models();
        assert!(registry.for_model("gpt-4").is_some());
        assert!(registry.for_model("gpt-4-custom-finetune").is_none());
    }

    #[test]
    fn test_openai_models_are_listed_sorted() {
        let models = TokenCounterRegistry::with_openai_models().list_models();
        assert_eq!(models.len(), OPENAI_MODELS.len());
        assert!(models.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(models.iter().any(|m| m.starts_with("gpt-3.5")));
        assert!(models.iter().any(|m| m.starts_with("o1")));
    }
}
