//! Token-aware chunking: counters, the greedy packer and the chunker facade

pub mod heuristic_counter;
pub mod packer;
pub mod registry;
pub mod service;
pub mod tiktoken_counter;
pub mod traits;

pub use heuristic_counter::HeuristicCounter;
pub use packer::{Chunk, DefinitionKindGuard, GreedyPacker, TokenBudget};
pub use registry::TokenCounterRegistry;
pub use service::{PARAGRAPH_SEPARATOR, SENTENCE_SEPARATOR, SmartChunker};
pub use tiktoken_counter::{Encoding, TiktokenCounter};
pub use traits::{FnCounter, TokenCounter, TokenCounterRef};
