//! The card record produced for each chunk.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ChunkType;

/// Words allowed in a headline.
pub const HEADLINE_MAX_WORDS: usize = 8;

/// Words allowed in the detail paragraph.
pub const DETAIL_MAX_WORDS: usize = 60;

/// Words the detail paragraph aims for before taking a second sentence.
pub const DETAIL_MIN_WORDS: usize = 40;

/// Words allowed per bullet.
pub const BULLET_MAX_WORDS: usize = 15;

/// Fewest bullets a card carries.
pub const BULLETS_MIN: usize = 2;

/// How hard a card is to study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Short, light material.
    #[default]
    Easy,
    /// Moderate length.
    Medium,
    /// Long, dense material.
    Hard,
}

impl Difficulty {
    /// Difficulty from the source chunk's size: over 100 words is hard,
    /// over 60 medium.
    pub const fn from_word_count(words: usize) -> Self {
        if words > 100 {
            Self::Hard
        } else if words > 60 {
            Self::Medium
        } else {
            Self::Easy
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "beginner" => Ok(Self::Easy),
            "medium" | "intermediate" => Ok(Self::Medium),
            "hard" | "advanced" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Where a card's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSource {
    /// Generator output, post-validated.
    Generated,
    /// Deterministic synthesis.
    Fallback,
}

/// An unpersisted card. The store assigns `id` and `deckId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    /// Position in the deck's study sequence.
    pub order: usize,
    /// At most [`HEADLINE_MAX_WORDS`] words.
    pub headline: String,
    /// At most [`DETAIL_MAX_WORDS`] words.
    pub detail_paragraph: String,
    /// At least [`BULLETS_MIN`] items of at most [`BULLET_MAX_WORDS`] words.
    pub bullet_points: Vec<String>,
    /// Single emoji.
    pub emoji: String,
    /// Study difficulty.
    pub difficulty: Difficulty,
    /// Up to three cloze terms, each found in the paragraph or a bullet.
    pub ghost_words: Vec<String>,
    /// Simplified explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eli5_version: Option<String>,
    /// True/false question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_question: Option<String>,
    /// Answer to `quiz_question`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_answer: Option<bool>,
    /// Type of the chunk the card came from.
    pub chunk_type: ChunkType,
    /// Generated or deterministic.
    pub source: CardSource,
}

/// Emoji shown for a chunk type.
pub const fn emoji_for(chunk_type: ChunkType) -> &'static str {
    match chunk_type {
        ChunkType::Intro => "👋",
        ChunkType::Concept => "💡",
        ChunkType::Example => "🔍",
        ChunkType::Definition => "📖",
        ChunkType::List => "📝",
        ChunkType::Summary => "🎯",
        ChunkType::General => "📚",
        ChunkType::Comparison => "⚖️",
        ChunkType::Process => "⚙️",
        ChunkType::Transition => "➡️",
    }
}
