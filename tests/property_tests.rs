//! Property-based tests for chunking and card synthesis.
//!
//! These tests verify the pipeline's invariants:
//! - Idempotence: chunking the same text twice gives the same chunks
//! - Coverage: own sentences of all chunks reproduce the sentence sequence
//! - Size: every chunk but the last sits inside the word budget
//! - Groundedness: ghost words occur in the paragraph or a bullet
//! - Spacing: selected ghost words are more than five tokens apart
//! - Truncation: headlines and bullets respect their word limits

use microcards::card::{BULLETS_MIN, BULLET_MAX_WORDS, DETAIL_MAX_WORDS, HEADLINE_MAX_WORDS};
use microcards::ghost::is_grounded;
use microcards::text::{truncate_words, whitespace_words};
use microcards::{
    extract_ghost_words, CardContext, CardDraft, CardSynthesizer, Chunk, ChunkOptions, Chunker,
    RawCard, SemanticChunker, SentenceSplitter,
};
use proptest::prelude::*;

// =============================================================================
// Test Generators
// =============================================================================

/// One capitalized sentence of 3 to 29 words.
fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::string::string_regex("[a-z]{2,10}").unwrap(), 3..30).prop_map(
        |words| {
            let mut s = words.join(" ");
            s[..1].make_ascii_uppercase();
            s.push('.');
            s
        },
    )
}

/// Sentences joined by spaces, with the occasional paragraph break.
fn document() -> impl Strategy<Value = String> {
    prop::collection::vec((sentence(), prop::bool::weighted(0.15)), 1..40).prop_map(|parts| {
        let mut text = String::new();
        for (i, (s, paragraph)) in parts.iter().enumerate() {
            if i > 0 {
                text.push_str(if *paragraph { "\n\n" } else { " " });
            }
            text.push_str(s);
        }
        text
    })
}

/// A reply field that is often far too long.
fn wordy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::string::string_regex("[A-Za-z]{1,8}").unwrap(), 0..40)
        .prop_map(|words| words.join(" "))
}

fn raw_card(ghost_pool: Vec<String>) -> impl Strategy<Value = RawCard> {
    (
        prop::option::of(wordy()),
        prop::option::of(wordy()),
        prop::option::of(prop::collection::vec(wordy(), 0..8)),
        prop::option::of(prop::sample::subsequence(ghost_pool.clone(), 0..=ghost_pool.len())),
    )
        .prop_map(|(headline, detail_paragraph, bullet_points, ghost_words)| RawCard {
            headline,
            detail_paragraph,
            bullet_points,
            ghost_words,
            ..RawCard::default()
        })
}

// =============================================================================
// Invariant Helpers
// =============================================================================

fn assert_card_limits(card: &CardDraft) -> Result<(), TestCaseError> {
    prop_assert!(!card.headline.trim().is_empty());
    prop_assert!(whitespace_words(&card.headline) <= HEADLINE_MAX_WORDS, "{}", card.headline);
    prop_assert!(whitespace_words(&card.detail_paragraph) <= DETAIL_MAX_WORDS);
    prop_assert!(card.bullet_points.len() >= BULLETS_MIN);
    for bullet in &card.bullet_points {
        prop_assert!(whitespace_words(bullet) <= BULLET_MAX_WORDS, "{}", bullet);
    }
    prop_assert!(card.ghost_words.len() <= 3);
    for word in &card.ghost_words {
        prop_assert!(
            is_grounded(word, &card.detail_paragraph, &card.bullet_points),
            "ghost word {word:?} not in card text"
        );
    }
    Ok(())
}

fn own_sentences(chunks: &[Chunk]) -> Vec<String> {
    chunks
        .iter()
        .flat_map(|c| c.own_sentences().iter().cloned())
        .collect()
}

// =============================================================================
// Chunking
// =============================================================================

proptest! {
    #[test]
    fn chunking_is_idempotent(text in document()) {
        let chunker = SemanticChunker::default();
        prop_assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
    }

    #[test]
    fn chunks_cover_sentences_in_order(text in document()) {
        let chunks = SemanticChunker::default().chunk(&text);
        let expected = SentenceSplitter::new().with_paragraph_breaks(true).split(&text);
        prop_assert_eq!(own_sentences(&chunks), expected);

        for window in chunks.windows(2) {
            prop_assert_eq!(window[0].sentence_range.end, window[1].sentence_range.start);
        }
    }

    #[test]
    fn chunks_respect_word_budget(text in document()) {
        let options = ChunkOptions::default();
        let chunks = SemanticChunker::new(options).unwrap().chunk(&text);
        let (min, max) = (options.budget.min(), options.budget.max());

        for chunk in chunks.iter().take(chunks.len().saturating_sub(1)) {
            prop_assert!(chunk.word_count >= min, "{chunk}");
            prop_assert!(chunk.word_count * 5 <= max * 6, "{chunk}");
        }
    }

    #[test]
    fn chunk_ids_are_contiguous(text in document()) {
        let chunks = SemanticChunker::default().chunk(&text);
        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert_eq!(chunk.id, i);
            prop_assert!(chunk.keywords.len() <= 5);
        }
    }
}

// =============================================================================
// Ghost Words
// =============================================================================

proptest! {
    #[test]
    fn ghost_words_are_spaced(text in document(), max in 1usize..6) {
        let ghost = extract_ghost_words(&text, max);
        prop_assert!(ghost.words.len() <= max);
        prop_assert_eq!(ghost.words.len(), ghost.positions.len());

        for (i, a) in ghost.positions.iter().enumerate() {
            for b in &ghost.positions[i + 1..] {
                prop_assert!(a.abs_diff(*b) > 5, "positions {a} and {b}");
            }
        }
    }

    #[test]
    fn ghost_words_occur_in_source(text in document()) {
        let ghost = extract_ghost_words(&text, 3);
        for word in &ghost.words {
            prop_assert!(microcards::text::contains_whole_word(&text, word));
        }
    }
}

// =============================================================================
// Cards
// =============================================================================

proptest! {
    #[test]
    fn fallback_cards_respect_limits(text in document()) {
        let synth = CardSynthesizer::default();
        for chunk in SemanticChunker::default().chunk(&text) {
            assert_card_limits(&synth.fallback(&chunk, &CardContext::default()))?;
        }
    }

    #[test]
    fn normalized_cards_respect_limits(
        (text, raw) in document().prop_flat_map(|text| {
            let pool: Vec<String> = text
                .split_whitespace()
                .take(12)
                .map(|w| w.trim_end_matches('.').to_string())
                .collect();
            (Just(text), raw_card(pool))
        })
    ) {
        let synth = CardSynthesizer::default();
        let chunk = SemanticChunker::default().chunk(&text).remove(0);
        let fallback = synth.fallback(&chunk, &CardContext::default());
        let card = synth.normalize(raw, fallback);

        assert_card_limits(&card)?;
        prop_assert!(card.bullet_points.len() <= 5);
    }

    #[test]
    fn truncation_never_exceeds_limit(text in wordy(), max in 1usize..20) {
        let cut = truncate_words(&text, max);
        prop_assert!(whitespace_words(&cut) <= max);
        if whitespace_words(&text) <= max {
            prop_assert_eq!(cut, text.split_whitespace().collect::<Vec<_>>().join(" "));
        } else {
            prop_assert!(cut.ends_with("..."));
        }
    }
}
