//! Boundary detection: turning raw text into indivisible units
//!
//! Every splitter is a pure function from text to an ordered list of
//! [`Unit`]s. Units are trimmed, never empty, and appear in document order.

pub mod code;
pub mod languages;
pub mod text;

pub use code::split_code_blocks;
pub use languages::{LanguageConfig, get_language_config};
pub use text::{split_paragraphs, split_sentences, split_words};

use serde::Serialize;

/// Kind of top-level block produced by the code splitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Function definition (`def`, `async def`)
    Function,
    /// Class definition
    Class,
    /// Statements between definitions
    Loose,
}

/// What boundary a unit was cut at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Sentence,
    Paragraph,
    Word,
    Block(BlockKind),
}

/// An atomic, never-further-split piece of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    text: String,
    kind: UnitKind,
}

impl Unit {
    pub fn new(text: impl Into<String>, kind: UnitKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Block kind for code units, `None` for prose units
    pub const fn block_kind(&self) -> Option<BlockKind> {
        match self.kind {
            UnitKind::Block(kind) => Some(kind),
            UnitKind::Sentence | UnitKind::Paragraph | UnitKind::Word => None,
        }
    }
}
