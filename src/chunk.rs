//! The Chunk type: a run of sentences sized for one card.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Rhetorical role of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkType {
    /// Opening material.
    Intro,
    /// Names and explains an idea.
    Concept,
    /// Illustrates with an instance.
    Example,
    /// States what something is.
    Definition,
    /// Enumerates items.
    List,
    /// Recaps earlier material.
    Summary,
    /// Nothing more specific matched.
    #[default]
    General,
    /// Contrasts two things.
    Comparison,
    /// Walks through steps.
    Process,
    /// Bridges two sections.
    Transition,
}

impl ChunkType {
    /// Lowercase label, as serialized.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Concept => "concept",
            Self::Example => "example",
            Self::Definition => "definition",
            Self::List => "list",
            Self::Summary => "summary",
            Self::General => "general",
            Self::Comparison => "comparison",
            Self::Process => "process",
            Self::Transition => "transition",
        }
    }
}

impl std::fmt::Display for ChunkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A group of consecutive sentences treated as one topical unit.
///
/// ## Own Sentences vs Context
///
/// A chunk that starts because its predecessor ran out of room carries the
/// predecessor's last sentence(s) as leading context:
///
/// ```text
/// Document:  S0 S1 S2 S3 S4 S5
/// Chunk 0:   S0 S1 S2              sentence_range 0..3, overlap 0
/// Chunk 1:         S2 S3 S4 S5     sentence_range 3..6, overlap 1
///                  ^ context only
/// ```
///
/// `sentences` and `content` include the context; `sentence_range` and
/// `word_count` cover only the chunk's own sentences, so concatenating the
/// own sentences of every chunk reproduces the document exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Zero-based position of this chunk in the sequence.
    pub id: usize,
    /// Sentences joined with single spaces, context included.
    pub content: String,
    /// Words in the chunk's own sentences.
    pub word_count: usize,
    /// Context sentences followed by own sentences.
    pub sentences: Vec<String>,
    /// Number of leading entries in `sentences` carried from the previous chunk.
    pub overlap: usize,
    /// Indices of the own sentences in the document's sentence sequence.
    pub sentence_range: Range<usize>,
    /// Up to five salient terms.
    pub keywords: Vec<String>,
    /// Rhetorical role.
    pub chunk_type: ChunkType,
    /// Whether any sentence is a list item.
    pub is_list_content: bool,
    /// A recap placeholder with no source text, filled from earlier cards.
    pub synthetic: bool,
}

impl Chunk {
    /// A summary placeholder to be filled from earlier card headlines.
    #[must_use]
    pub fn summary_placeholder(id: usize, at_sentence: usize) -> Self {
        Self {
            id,
            content: String::new(),
            word_count: 0,
            sentences: Vec::new(),
            overlap: 0,
            sentence_range: at_sentence..at_sentence,
            keywords: Vec::new(),
            chunk_type: ChunkType::Summary,
            is_list_content: false,
            synthetic: true,
        }
    }

    /// The chunk's own sentences, context excluded.
    #[must_use]
    pub fn own_sentences(&self) -> &[String] {
        &self.sentences[self.overlap.min(self.sentences.len())..]
    }

    /// Whether this chunk has no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {{ id: {}, type: {}, sentences: {}..{}, words: {} }}",
            self.id,
            self.chunk_type,
            self.sentence_range.start,
            self.sentence_range.end,
            self.word_count
        )
    }
}
