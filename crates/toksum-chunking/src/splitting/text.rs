//! Prose splitters: sentences, paragraphs and words

use super::{Unit, UnitKind};
use regex::Regex;
use std::sync::OnceLock;

/// Terminal punctuation followed by the whitespace run to cut on
fn sentence_break() -> Option<&'static Regex> {
    static SENTENCE_BREAK: OnceLock<Option<Regex>> = OnceLock::new();
    SENTENCE_BREAK
        .get_or_init(|| Regex::new(r"[.!?](\s+)").ok())
        .as_ref()
}

/// One or more blank lines
fn paragraph_break() -> Option<&'static Regex> {
    static PARAGRAPH_BREAK: OnceLock<Option<Regex>> = OnceLock::new();
    PARAGRAPH_BREAK
        .get_or_init(|| Regex::new(r"\n\s*\n").ok())
        .as_ref()
}

/// Split text into sentences
///
/// Cuts on whitespace that directly follows `.`, `!` or `?`. Repeated
/// terminal punctuation stays with its sentence. Abbreviations such as
/// "e.g. this" are split too.
pub fn split_sentences(text: &str) -> Vec<Unit> {
    let text = text.trim();
    let mut units = Vec::new();
    let mut start = 0;

    if let Some(pattern) = sentence_break() {
        for caps in pattern.captures_iter(text) {
            let Some(gap) = caps.get(1) else { continue };
            push_trimmed(&mut units, text.get(start..gap.start()), UnitKind::Sentence);
            start = gap.end();
        }
    }
    push_trimmed(&mut units, text.get(start..), UnitKind::Sentence);

    units
}

/// Split text into paragraphs separated by blank lines
pub fn split_paragraphs(text: &str) -> Vec<Unit> {
    let text = text.trim();
    let mut units = Vec::new();
    let Some(pattern) = paragraph_break() else {
        push_trimmed(&mut units, Some(text), UnitKind::Paragraph);
        return units;
    };
    for paragraph in pattern.split(text) {
        push_trimmed(&mut units, Some(paragraph), UnitKind::Paragraph);
    }
    units
}

/// Split text into whitespace-separated words
pub fn split_words(text: &str) -> Vec<Unit> {
    text.split_whitespace()
        .map(|word| Unit::new(word, UnitKind::Word))
        .collect()
}

fn push_trimmed(units: &mut Vec<Unit>, piece: Option<&str>, kind: UnitKind) {
    if let Some(piece) = piece.map(str::trim).filter(|p| !p.is_empty()) {
        units.push(Unit::new(piece, kind));
    }
}
