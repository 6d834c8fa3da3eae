//! Heuristic-based token counter for fast estimation

use super::traits::TokenCounter;
use crate::ChunkingResult;
use std::collections::HashMap;

/// Fast heuristic token counter that estimates based on character classes
///
/// Ignores the model identifier. Word characters are divided by a
/// chars-per-token ratio (4.0 by default); punctuation and symbols are
/// weighted close to one token each.
#[derive(Debug, Clone)]
pub struct HeuristicCounter {
    name: String,
    chars_per_token: f64,
    /// Exact counts for texts seen during calibration
    calibration: HashMap<String, usize>,
}

impl HeuristicCounter {
    pub fn new(name: &str) -> Self {
        Self::with_ratio(name, 4.0)
    }

    pub fn with_ratio(name: &str, chars_per_token: f64) -> Self {
        Self {
            name: name.to_string(),
            chars_per_token,
            calibration: HashMap::new(),
        }
    }

    /// Derive the ratio from texts with known token counts
    ///
    /// Calibrated texts are afterwards answered exactly.
    pub fn calibrate(&mut self, samples: &[(&str, usize)]) {
        if samples.is_empty() {
            return;
        }

        let total_chars: usize = samples.iter().map(|(text, _)| text.len()).sum();
        let total_tokens: usize = samples.iter().map(|(_, tokens)| *tokens).sum();

        if total_tokens > 0 {
            self.chars_per_token = total_chars as f64 / total_tokens as f64;
        }

        self.calibration.extend(
            samples
                .iter()
                .map(|(text, tokens)| ((*text).to_string(), *tokens)),
        );
    }

    pub const fn chars_per_token(&self) -> f64 {
        self.chars_per_token
    }

    fn estimate_tokens(&self, text: &str) -> usize {
        if let Some(&exact) = self.calibration.get(text) {
            return exact;
        }

        let mut word_chars = 0_u32;
        let mut whitespace = 0_u32;
        let mut punctuation = 0_u32;
        let mut other = 0_u32;

        for ch in text.chars() {
            if ch.is_alphanumeric() {
                word_chars = word_chars.saturating_add(1);
            } else if ch.is_whitespace() {
                whitespace = whitespace.saturating_add(1);
            } else if ch.is_ascii_punctuation() {
                punctuation = punctuation.saturating_add(1);
            } else {
                other = other.saturating_add(1);
            }
        }

        let estimated = f64::from(word_chars) / self.chars_per_token
            + f64::from(punctuation) * 0.8
            + f64::from(other) * 0.9
            + f64::from(whitespace) * 0.1;

        estimated.ceil() as usize
    }
}

impl Default for HeuristicCounter {
    fn default() -> Self {
        Self::new("heuristic")
    }
}

impl TokenCounter for HeuristicCounter {
    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self, text: &str, _model: &str) -> ChunkingResult<usize> {
        if text.is_empty() {
            return Ok(0);
        }
        Ok(self.estimate_tokens(text))
    }
}
