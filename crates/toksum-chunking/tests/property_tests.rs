//! Property-based tests for the chunker
//!
//! A character-counting oracle makes every budget decision checkable from
//! the chunk text alone.
//!
//! Case counts honour `PROPTEST_CASES` (default: 64).

use proptest::prelude::*;
use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use toksum_chunking::splitting::split_sentences;
use toksum_chunking::{Chunk, FnCounter, SmartChunker, TokenCounterRef};

const DEFAULT_PROPTEST_CASES: u32 = 64;

fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_PROPTEST_CASES);

    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

fn char_counter() -> TokenCounterRef {
    Arc::new(FnCounter::new("chars", |text, _| Ok(text.chars().count())))
}

fn joined(chunks: &[Chunk], separator: &str) -> String {
    chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

/// A sentence of lowercase words ending in terminal punctuation
fn arb_sentence() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[a-z]{1,8}", 1..6),
        prop_oneof![Just("."), Just("!"), Just("?")],
    )
        .prop_map(|(words, end)| format!("{}{end}", words.join(" ")))
}

/// A top-level Python block: function, class or loose statement
fn arb_python_block() -> impl Strategy<Value = String> {
    ("[a-z]{1,6}", 0..3usize, 0..3u8).prop_map(|(name, body_lines, kind)| {
        let body: String = (0..=body_lines)
            .map(|i| format!("\n    v{i} = {name}"))
            .collect();
        match kind {
            0 => format!("def {name}():{body}"),
            1 => format!("class K{name}:{body}"),
            _ => format!("x_{name} = {body_lines}"),
        }
    })
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn prop_sentence_chunks_reconstruct_input(
        sentences in prop::collection::vec(arb_sentence(), 0..12),
        budget in 1..80usize,
    ) {
        let chunker = SmartChunker::new(char_counter(), "gpt-4", budget).unwrap();
        let text = sentences.join(" ");

        let chunks = chunker.chunk_by_sentences(&text).unwrap();

        prop_assert_eq!(joined(&chunks, " "), text);
        prop_assert_eq!(chunks.iter().map(|c| c.unit_count).sum::<usize>(), sentences.len());
    }

    #[test]
    fn prop_multi_unit_chunks_fit_budget(
        sentences in prop::collection::vec(arb_sentence(), 1..12),
        budget in 1..80usize,
    ) {
        let chunker = SmartChunker::new(char_counter(), "gpt-4", budget).unwrap();
        let chunks = chunker.chunk_by_sentences(&sentences.join(" ")).unwrap();

        for chunk in &chunks {
            prop_assert!(chunk.unit_count >= 1);
            if chunk.unit_count > 1 {
                prop_assert!(chunk.content.chars().count() <= budget);
            }
            if let Some(tokens) = chunk.token_count {
                prop_assert_eq!(tokens, chunk.content.chars().count());
            }
        }
    }

    #[test]
    fn prop_next_unit_never_fits_previous_chunk(
        sentences in prop::collection::vec(arb_sentence(), 2..12),
        budget in 1..80usize,
    ) {
        let chunker = SmartChunker::new(char_counter(), "gpt-4", budget).unwrap();
        let chunks = chunker.chunk_by_sentences(&sentences.join(" ")).unwrap();

        for pair in chunks.windows(2) {
            let next = split_sentences(&pair[1].content);
            let candidate = format!("{} {}", pair[0].content, next[0].text());
            prop_assert!(candidate.chars().count() > budget);
        }
    }

    #[test]
    fn prop_one_counter_call_per_unit(
        paragraphs in prop::collection::vec(arb_sentence(), 0..10),
        budget in 1..80usize,
    ) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let counter: TokenCounterRef = Arc::new(FnCounter::new("counting", move |text, _| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(text.chars().count())
        }));
        let chunker = SmartChunker::new(counter, "gpt-4", budget).unwrap();
        let text = paragraphs.join("\n\n");

        let chunks = chunker.chunk_by_paragraphs(&text).unwrap();

        prop_assert_eq!(calls.load(Ordering::SeqCst), paragraphs.len());
        prop_assert_eq!(joined(&chunks, "\n\n"), text);
    }

    #[test]
    fn prop_code_chunks_reconstruct_blocks(
        blocks in prop::collection::vec(arb_python_block(), 0..8),
        budget in 1..200usize,
    ) {
        let chunker = SmartChunker::new(char_counter(), "gpt-4", budget).unwrap();
        let code = blocks.join("\n\n");

        let chunks = chunker.chunk_code(&code, "python").unwrap();

        // adjacent loose statements fold into one block, so only the text is compared
        prop_assert_eq!(joined(&chunks, "\n\n"), code);
        prop_assert!(chunks.iter().all(|c| !c.content.trim().is_empty()));
    }

    #[test]
    fn prop_chunking_is_deterministic(
        sentences in prop::collection::vec(arb_sentence(), 0..10),
        budget in 1..80usize,
    ) {
        let chunker = SmartChunker::new(char_counter(), "gpt-4", budget).unwrap();
        let text = sentences.join(" ");

        prop_assert_eq!(
            chunker.chunk_by_sentences(&text).unwrap(),
            chunker.chunk_by_sentences(&text).unwrap()
        );
        prop_assert_eq!(
            chunker.chunk_code(&text, "go").unwrap(),
            chunker.chunk_by_paragraphs(&text).unwrap()
        );
    }
}
