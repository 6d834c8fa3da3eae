//! toksum chunking crate
//!
//! Splits prose or source code into ordered chunks that each stay within a
//! token budget. Text is first cut into indivisible units (sentences,
//! paragraphs, words or top-level code blocks) and the units are then
//! packed greedily, asking a [`TokenCounter`] how large each candidate
//! chunk is.

pub mod chunking;
pub mod error;
pub mod splitting;

// Re-export main types
pub use chunking::{
    Chunk, DefinitionKindGuard, FnCounter, GreedyPacker, HeuristicCounter, SmartChunker,
    TiktokenCounter, TokenBudget, TokenCounter, TokenCounterRef, TokenCounterRegistry,
};
pub use error::{ChunkingError, ChunkingResult};
pub use splitting::{BlockKind, Unit, UnitKind};
pub use toksum_config::ChunkerConfig;
