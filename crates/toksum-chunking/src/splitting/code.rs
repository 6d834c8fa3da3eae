//! Definition-aware block splitter for indentation-delimited code
//!
//! A single forward scan over the lines of the (trimmed) source. Each
//! top-level definition becomes one block; the statements between
//! definitions become loose blocks.
//!
//! A line opens a definition when it starts with one of the language's
//! function or class keywords at its own first column. The definition
//! then owns every following line that is blank or indented strictly
//! deeper than the header. The first other line closes the block and is
//! scanned again as ordinary code.

use super::languages::LanguageConfig;
use super::{BlockKind, Unit, UnitKind};

/// Scanner state between two lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Accumulating loose code
    Outside,
    /// Accumulating a definition whose header sits at `base_indent`
    InsideDef { base_indent: usize, kind: BlockKind },
}

/// Split code into definition and loose-code blocks
///
/// Blocks are trimmed and empty blocks are dropped. Block order follows
/// the source.
pub fn split_code_blocks(code: &str, language: &LanguageConfig) -> Vec<Unit> {
    let mut scanner = BlockScanner::new(language);
    for line in code.trim().split('\n') {
        scanner.feed(line);
    }
    scanner.finish()
}

struct BlockScanner<'lang, 'src> {
    language: &'lang LanguageConfig,
    state: ScanState,
    lines: Vec<&'src str>,
    blocks: Vec<Unit>,
}

impl<'lang, 'src> BlockScanner<'lang, 'src> {
    const fn new(language: &'lang LanguageConfig) -> Self {
        Self {
            language,
            state: ScanState::Outside,
            lines: Vec::new(),
            blocks: Vec::new(),
        }
    }

    fn feed(&mut self, line: &'src str) {
        loop {
            match self.state {
                ScanState::Outside => {
                    if let Some(kind) = self.definition_kind(line) {
                        self.flush(BlockKind::Loose);
                        self.state = ScanState::InsideDef {
                            base_indent: indentation(line),
                            kind,
                        };
                    }
                    self.lines.push(line);
                    return;
                }
                ScanState::InsideDef { base_indent, kind } => {
                    if is_blank(line) || indentation(line) > base_indent {
                        self.lines.push(line);
                        return;
                    }
                    // line is not consumed, rescan it outside the definition
                    self.flush(kind);
                    self.state = ScanState::Outside;
                }
            }
        }
    }

    fn finish(mut self) -> Vec<Unit> {
        let kind = match self.state {
            ScanState::Outside => BlockKind::Loose,
            ScanState::InsideDef { kind, .. } => kind,
        };
        self.flush(kind);
        self.blocks
    }

    fn flush(&mut self, kind: BlockKind) {
        let block = self.lines.join("\n");
        self.lines.clear();

        let block = block.trim();
        if !block.is_empty() {
            self.blocks.push(Unit::new(block, UnitKind::Block(kind)));
        }
    }

    fn definition_kind(&self, line: &str) -> Option<BlockKind> {
        let starts_with_any =
            |keywords: &[&str]| keywords.iter().any(|keyword| line.starts_with(keyword));

        if starts_with_any(self.language.function_keywords) {
            Some(BlockKind::Function)
        } else if starts_with_any(self.language.class_keywords) {
            Some(BlockKind::Class)
        } else {
            None
        }
    }
}

/// Number of leading whitespace characters
fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
