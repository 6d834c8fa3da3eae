//! Tiktoken-based token counter for OpenAI models

use super::traits::TokenCounter;
use crate::{ChunkingError, ChunkingResult};
use once_cell::sync::OnceCell;
use tiktoken_rs::{CoreBPE, cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base};

/// BPE vocabularies used by OpenAI model families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    O200kBase,
    Cl100kBase,
    P50kBase,
    P50kEdit,
    R50kBase,
}

const O200K_PREFIXES: &[&str] = &["gpt-4o", "gpt-5", "o1", "o3"];
const CL100K_PREFIXES: &[&str] = &["gpt-4", "gpt-3.5", "text-embedding-"];
const P50K_PREFIXES: &[&str] = &["text-davinci", "code-"];
const R50K_PREFIXES: &[&str] = &[
    "davinci",
    "curie",
    "babbage",
    "ada",
    "text-curie",
    "text-babbage",
    "text-ada",
];

impl Encoding {
    /// Pick the encoding for a model identifier, or `None` if the model is
    /// not an OpenAI family this counter understands
    pub fn for_model(model: &str) -> Option<Self> {
        let has_prefix = |prefixes: &[&str]| prefixes.iter().any(|p| model.starts_with(p));

        // order matters: "gpt-4o" must win over "gpt-4"
        if has_prefix(O200K_PREFIXES) {
            Some(Self::O200kBase)
        } else if has_prefix(CL100K_PREFIXES) {
            Some(Self::Cl100kBase)
        } else if model.contains("-edit") {
            Some(Self::P50kEdit)
        } else if has_prefix(P50K_PREFIXES) {
            Some(Self::P50kBase)
        } else if has_prefix(R50K_PREFIXES) {
            Some(Self::R50kBase)
        } else {
            None
        }
    }
}

/// Token counter using tiktoken for OpenAI models
///
/// Encoders are built on first use and reused afterwards.
#[derive(Default)]
pub struct TiktokenCounter {
    o200k: OnceCell<CoreBPE>,
    cl100k: OnceCell<CoreBPE>,
    p50k: OnceCell<CoreBPE>,
    p50k_edit: OnceCell<CoreBPE>,
    r50k: OnceCell<CoreBPE>,
}

impl TiktokenCounter {
    pub fn new() -> Self {
        Self::default()
    }

    fn encoder(&self, encoding: Encoding) -> ChunkingResult<&CoreBPE> {
        let encoder = match encoding {
            Encoding::O200kBase => self.o200k.get_or_try_init(o200k_base)?,
            Encoding::Cl100kBase => self.cl100k.get_or_try_init(cl100k_base)?,
            Encoding::P50kBase => self.p50k.get_or_try_init(p50k_base)?,
            Encoding::P50kEdit => self.p50k_edit.get_or_try_init(p50k_edit)?,
            Encoding::R50kBase => self.r50k.get_or_try_init(r50k_base)?,
        };
        Ok(encoder)
    }
}

impl TokenCounter for TiktokenCounter {
    fn name(&self) -> &'static str {
        "tiktoken"
    }

    fn count(&self, text: &str, model: &str) -> ChunkingResult<usize> {
        let encoding =
            Encoding::for_model(model).ok_or_else(|| ChunkingError::unknown_model(model))?;
        Ok(self.encoder(encoding)?.encode_ordinary(text).len())
    }
}
