//! Greedy, order-preserving packing of units into token-limited chunks

use super::traits::TokenCounter;
use crate::splitting::{BlockKind, Unit};
use crate::{ChunkingError, ChunkingResult};
use serde::Serialize;
use std::num::NonZeroUsize;

/// Token ceiling per chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    max_tokens: NonZeroUsize,
}

impl TokenBudget {
    /// Create a new token budget
    ///
    /// # Errors
    /// Returns `ChunkingError::InvalidBudget` for a zero budget
    pub fn new(max_tokens: usize) -> ChunkingResult<Self> {
        NonZeroUsize::new(max_tokens)
            .map(|max_tokens| Self { max_tokens })
            .ok_or(ChunkingError::InvalidBudget)
    }

    pub const fn max_tokens(self) -> usize {
        self.max_tokens.get()
    }

    /// Whether a measured count is within budget (inclusive)
    pub const fn fits(self, tokens: usize) -> bool {
        tokens <= self.max_tokens.get()
    }
}

/// A run of consecutive units joined by the splitter's separator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// The chunk text
    pub content: String,
    /// Number of units joined into this chunk
    pub unit_count: usize,
    /// Token count of exactly `content`, when it was measured
    pub token_count: Option<usize>,
}

impl AsRef<str> for Chunk {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

/// Keeps function and class definitions apart once text is non-trivial
///
/// When the accumulated chunk already holds a function block and a class
/// block arrives (or the other way round), and the merged text would be
/// longer than `threshold` characters, the merge is refused without asking
/// the counter. This is a heuristic that stops an approximate counter from
/// packing unrelated top-level definitions together; it is not a size
/// limit.
///
/// Kinds come from the block splitter, not from searching the text. A class
/// whose body defines methods is a class block only, so two such classes
/// may still share a chunk. An `async def` header opens a function block
/// just like `def`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefinitionKindGuard {
    threshold: usize,
}

impl DefinitionKindGuard {
    pub const DEFAULT_THRESHOLD: usize = 100;

    pub const fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub const fn threshold(self) -> usize {
        self.threshold
    }

    fn rejects(self, current: &Accumulator, incoming: Option<BlockKind>, candidate: &str) -> bool {
        let dissimilar = match incoming {
            Some(BlockKind::Class) => current.has_function,
            Some(BlockKind::Function) => current.has_class,
            Some(BlockKind::Loose) | None => false,
        };
        dissimilar && candidate.chars().count() > self.threshold
    }
}

impl Default for DefinitionKindGuard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

/// The chunk being built
#[derive(Debug, Default)]
struct Accumulator {
    content: String,
    unit_count: usize,
    token_count: Option<usize>,
    has_function: bool,
    has_class: bool,
}

impl Accumulator {
    fn starting_with(unit: &Unit, token_count: Option<usize>) -> Self {
        let mut accumulator = Self::default();
        accumulator.accept(unit.text().to_string(), unit, token_count);
        accumulator
    }

    const fn is_empty(&self) -> bool {
        self.unit_count == 0
    }

    fn candidate(&self, unit: &Unit, separator: &str) -> String {
        if self.is_empty() {
            return unit.text().to_string();
        }
        let mut candidate =
            String::with_capacity(self.content.len() + separator.len() + unit.text().len());
        candidate.push_str(&self.content);
        candidate.push_str(separator);
        candidate.push_str(unit.text());
        candidate
    }

    fn accept(&mut self, content: String, unit: &Unit, token_count: Option<usize>) {
        self.content = content;
        self.unit_count = self.unit_count.saturating_add(1);
        self.token_count = token_count;
        match unit.block_kind() {
            Some(BlockKind::Function) => self.has_function = true,
            Some(BlockKind::Class) => self.has_class = true,
            Some(BlockKind::Loose) | None => {}
        }
    }

    fn seal(self) -> Option<Chunk> {
        (!self.is_empty()).then_some(Chunk {
            content: self.content,
            unit_count: self.unit_count,
            token_count: self.token_count,
        })
    }
}

/// Single forward pass over units with one unit of lookahead
///
/// Each unit is tried against the chunk in progress. If the counter
/// reports the merged text within budget the unit joins; otherwise the
/// chunk is sealed and the unit starts the next one. A unit that is over
/// budget on its own still becomes its own chunk; units are never split,
/// dropped or reordered.
pub struct GreedyPacker<'a> {
    counter: &'a dyn TokenCounter,
    model: &'a str,
    budget: TokenBudget,
    separator: &'a str,
    guard: Option<DefinitionKindGuard>,
}

impl<'a> GreedyPacker<'a> {
    pub fn new(
        counter: &'a dyn TokenCounter,
        model: &'a str,
        budget: TokenBudget,
        separator: &'a str,
    ) -> Self {
        Self {
            counter,
            model,
            budget,
            separator,
            guard: None,
        }
    }

    /// Enable the function/class merge guard
    #[must_use]
    pub const fn with_guard(mut self, guard: DefinitionKindGuard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Pack units into chunks
    ///
    /// An empty unit list produces no chunks and no counter calls.
    ///
    /// # Errors
    /// Returns the counter's error unchanged; no partial result is kept
    pub fn pack(&self, units: &[Unit]) -> ChunkingResult<Vec<Chunk>> {
        let mut chunks = Vec::new();
        let mut current = Accumulator::default();

        for unit in units {
            let candidate = current.candidate(unit, self.separator);

            if self
                .guard
                .is_some_and(|guard| guard.rejects(&current, unit.block_kind(), &candidate))
            {
                tracing::trace!(
                    candidate_chars = candidate.chars().count(),
                    "Definition kind guard split function and class blocks"
                );
                chunks.extend(std::mem::take(&mut current).seal());
                current = Accumulator::starting_with(unit, None);
                continue;
            }

            let tokens = self.counter.count(&candidate, self.model)?;
            tracing::trace!(
                tokens,
                budget = self.budget.max_tokens(),
                "Measured candidate"
            );

            if self.budget.fits(tokens) {
                current.accept(candidate, unit, Some(tokens));
            } else if current.is_empty() {
                tracing::debug!(
                    tokens,
                    budget = self.budget.max_tokens(),
                    "Unit exceeds budget on its own, emitting it as a single chunk"
                );
                current = Accumulator::starting_with(unit, Some(tokens));
            } else {
                chunks.extend(std::mem::take(&mut current).seal());
                current = Accumulator::starting_with(unit, None);
            }
        }

        chunks.extend(current.seal());
        Ok(chunks)
    }
}
