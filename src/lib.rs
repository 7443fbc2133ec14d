//! # microcards
//!
//! Micro-learning flashcards from plain text.
//!
//! ## The Problem
//!
//! A chapter of notes is not a study aid. Turning it into cards means cutting
//! it into pieces small enough to hold one idea each, but large enough to
//! explain that idea, then writing a headline, a short paragraph, a few
//! bullets, and picking the words worth hiding for cloze practice.
//!
//! Language models write good cards, sometimes. They also time out, refuse,
//! and answer with half a JSON object. Everything here works without one:
//! the model only ever improves text that a deterministic path already
//! produced.
//!
//! ## The Pipeline
//!
//! ```text
//! text
//!  │ SentenceSplitter     abbreviations, decimals, blank lines
//!  ▼
//! sentences
//!  │ Boundaries           headers, "However,", vocabulary shifts
//!  │ SemanticChunker      greedy partition, merge small, re-split large
//!  ▼
//! chunks ── classify ──► intro | definition | example | list | ...
//!  │        keywords ──► ranked ghost-word candidates
//!  │ recap placeholders every N chunks
//!  ▼
//! CardSynthesizer ──► deterministic draft ──┐
//!        └── Generator (optional, timeout) ─┴─► normalize ──► CardDraft
//! ```
//!
//! ### Chunk Sizing
//!
//! Chunks aim for 50 to 150 words. Section breaks (headers, transition
//! phrases) only count once the current chunk has reached the minimum; size
//! breaks carry one sentence of context into the next chunk. See
//! [`SemanticChunker`] for the balancing passes.
//!
//! ### Ghost Words
//!
//! Every word in a chunk is scored from its surface form and neighbours:
//! technical affixes, proper nouns, numbers, nouns after determiners, verbs
//! after pronouns. The best-scoring words, at least six tokens apart, become
//! the cloze terms. See [`ghost`].
//!
//! ## Quick Start
//!
//! ```rust
//! use microcards::{Chunker, SemanticChunker, extract_ghost_words};
//!
//! let text = "Photosynthesis is defined as the process by which plants \
//!             convert light into energy. For example, chlorophyll absorbs \
//!             sunlight. This is a key concept in biology.";
//!
//! let chunks = SemanticChunker::default().chunk(text);
//! assert_eq!(chunks.len(), 1);
//!
//! let ghost = extract_ghost_words(text, 2);
//! assert_eq!(ghost.words, vec!["Photosynthesis", "biology"]);
//! ```
//!
//! ## Building a Deck
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use microcards::{DeckPipeline, PipelineConfig};
//!
//! let pipeline = DeckPipeline::new(PipelineConfig::default())?
//!     .with_generator(Arc::new(my_model));
//! let cards = pipeline.build_deck(&text, Some("Cell Biology")).await?;
//! ```
//!
//! ## Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`sentence`] | sentence splitting |
//! | [`boundary`] | header and topic-shift detection |
//! | [`semantic`] | chunking and balancing |
//! | [`classify`] | chunk types, recap placeholders |
//! | [`ghost`] | keyword and ghost-word ranking |
//! | [`card`] | the card record and its limits |
//! | [`synth`] | card synthesis and normalization |
//! | [`review`] | SM-2 scheduling |

pub mod boundary;
mod budget;
pub mod card;
mod chunk;
pub mod classify;
mod config;
mod error;
mod generator;
pub mod ghost;
pub mod lexicon;
mod pipeline;
mod prompt;
mod response;
pub mod review;
pub mod semantic;
pub mod sentence;
pub mod synth;
pub mod text;

pub use budget::WordBudget;
pub use card::{emoji_for, CardDraft, CardSource, Difficulty};
pub use chunk::{Chunk, ChunkType};
pub use config::{ChunkOptions, PipelineConfig, SynthesisConfig};
pub use error::{Error, Result};
pub use generator::Generator;
pub use ghost::{extract_ghost_words, GhostWordCandidate, GhostWords};
pub use pipeline::DeckPipeline;
pub use prompt::CardPromptBuilder;
pub use response::RawCard;
pub use review::ReviewState;
pub use semantic::{chunk, SemanticChunker};
pub use sentence::{split_sentences, SentenceSplitter};
pub use synth::{CardContext, CardSynthesizer};

/// A text chunking strategy.
///
/// ```rust
/// use microcards::{Chunk, Chunker, SemanticChunker};
///
/// fn chunk_document(chunker: &dyn Chunker, text: &str) -> Vec<Chunk> {
///     chunker.chunk(text)
/// }
///
/// let chunks = chunk_document(&SemanticChunker::default(), "Hello world. This is a test.");
/// assert_eq!(chunks.len(), 1);
/// ```
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Each [`Chunk`] records its sentences and their indices in the
    /// document's sentence sequence.
    fn chunk(&self, text: &str) -> Vec<Chunk>;

    /// Estimate the number of chunks for a given text length.
    ///
    /// Useful for pre-allocation. May be approximate.
    fn estimate_chunks(&self, text_len: usize) -> usize {
        (text_len / 500).max(1)
    }
}
