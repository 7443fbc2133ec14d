//! Turning chunks into cards.
//!
//! Every card starts as a deterministic draft built from the chunk's own
//! sentences. When a [`Generator`] is attached, its reply is parsed and
//! normalized field by field; anything missing or unusable falls back to the
//! draft. A generator that errors, times out, or answers with garbage costs
//! nothing but the generated text.
//!
//! ```text
//! chunk ──► fallback draft ──────────────────────────────┐
//!   │                                                    ▼
//!   └──► prompt ──► generator ──► RawCard ──► normalize ──► CardDraft
//!                   (timeout)      (parse)
//! ```
//!
//! ## Deterministic Draft
//!
//! | Field | Built from |
//! |-------|-----------|
//! | headline | first sentence, cut to 8 words (document title for an intro) |
//! | detailParagraph | first sentence, plus the second when the first is under 40 words; cut to 60 |
//! | bulletPoints | following sentences cut to 15 words, padded with `Key: <keyword>` |
//! | difficulty | chunk size: over 100 words hard, over 60 medium |
//! | quiz | definitions only: "True or false: <first sentence>", answer true |
//!
//! Recap placeholders become a "Quick Recap" card listing earlier headlines.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::card::{
    emoji_for, CardDraft, CardSource, Difficulty, BULLETS_MIN, BULLET_MAX_WORDS, DETAIL_MAX_WORDS,
    DETAIL_MIN_WORDS, HEADLINE_MAX_WORDS,
};
use crate::ghost::{card_ghost_words, is_grounded};
use crate::prompt::CardPromptBuilder;
use crate::text::{collapse_whitespace, contains_whole_word, grapheme_len, truncate_words, whitespace_words};
use crate::{Chunk, ChunkType, Error, Generator, RawCard, Result, SynthesisConfig};

/// Headline of recap cards.
pub const RECAP_HEADLINE: &str = "Quick Recap";

/// Last-resort bullets, used only when a chunk offers too little text.
const FILLER_BULLETS: [&str; 2] = [
    "Explain this idea in your own words.",
    "Connect this idea to what you already know.",
];

static BULLET_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+").expect("bullet marker pattern"));

/// What a card may know beyond its own chunk.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardContext<'a> {
    /// Document title.
    pub title: Option<&'a str>,
    /// Headlines of the cards since the last recap, oldest first.
    pub prior_headlines: &'a [String],
}

/// Produces one [`CardDraft`] per chunk.
///
/// ## Example
///
/// ```rust
/// use microcards::{CardContext, CardSynthesizer, Chunker, SemanticChunker};
///
/// let chunks = SemanticChunker::default().chunk(
///     "Osmosis is the movement of water across a membrane. It needs no energy.",
/// );
/// let card = CardSynthesizer::default().fallback(&chunks[0], &CardContext::default());
///
/// assert!(card.bullet_points.len() >= 2);
/// assert!(card.headline.split_whitespace().count() <= 8);
/// ```
#[derive(Clone)]
pub struct CardSynthesizer {
    generator: Option<Arc<dyn Generator>>,
    prompts: CardPromptBuilder,
    config: SynthesisConfig,
}

impl Default for CardSynthesizer {
    fn default() -> Self {
        Self::new(SynthesisConfig::default())
    }
}

impl CardSynthesizer {
    /// A deterministic synthesizer.
    pub fn new(config: SynthesisConfig) -> Self {
        Self {
            generator: None,
            prompts: CardPromptBuilder::new(),
            config,
        }
    }

    /// Attach a generator.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Replace the prompt builder.
    #[must_use]
    pub fn with_prompts(mut self, prompts: CardPromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    /// The configuration in effect.
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Whether a generator is attached.
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Produce a card for `chunk`. Never fails.
    pub async fn synthesize(&self, chunk: &Chunk, ctx: &CardContext<'_>) -> CardDraft {
        let fallback = self.fallback(chunk, ctx);
        let Some(generator) = self.generator.as_deref() else {
            return fallback;
        };
        if chunk.synthetic {
            return fallback;
        }

        match self.generate(generator, chunk, ctx).await {
            Ok(raw) => self.normalize(raw, fallback),
            Err(err) => {
                tracing::warn!(chunk = chunk.id, error = %err, "card generation failed, using fallback");
                fallback
            }
        }
    }

    async fn generate(
        &self,
        generator: &dyn Generator,
        chunk: &Chunk,
        ctx: &CardContext<'_>,
    ) -> Result<RawCard> {
        let prompt = self.prompts.build(chunk, ctx.title);
        let timeout = self.config.timeout();
        let reply = tokio::time::timeout(timeout, generator.generate(&prompt))
            .await
            .map_err(|_| Error::Timeout(timeout))??;
        tracing::debug!(chunk = chunk.id, reply_len = reply.len(), "generator replied");
        RawCard::parse(&reply)
    }

    /// The deterministic card for `chunk`.
    pub fn fallback(&self, chunk: &Chunk, ctx: &CardContext<'_>) -> CardDraft {
        if chunk.synthetic {
            return self.recap(ctx);
        }

        let sentences: Vec<String> = chunk
            .own_sentences()
            .iter()
            .map(|s| collapse_whitespace(s))
            .filter(|s| !s.is_empty())
            .collect();
        let first = sentences
            .first()
            .cloned()
            .unwrap_or_else(|| collapse_whitespace(&chunk.content));

        let headline = match ctx.title.map(str::trim) {
            Some(title) if chunk.chunk_type == ChunkType::Intro && !title.is_empty() => {
                truncate_words(title, HEADLINE_MAX_WORDS)
            }
            _ => truncate_words(&first, HEADLINE_MAX_WORDS),
        };

        let used = if whitespace_words(&first) < DETAIL_MIN_WORDS && sentences.len() > 1 {
            2
        } else {
            sentences.len().min(1)
        };
        let detail = if used == 2 {
            format!("{} {}", sentences[0], sentences[1])
        } else {
            first.clone()
        };
        let detail_paragraph = truncate_words(&detail, DETAIL_MAX_WORDS);

        let mut bullet_points: Vec<String> = sentences[used..]
            .iter()
            .map(|s| truncate_words(s, BULLET_MAX_WORDS))
            .take(self.config.bullets_max)
            .collect();
        let unused_keywords: Vec<String> = chunk
            .keywords
            .iter()
            .filter(|k| !bullet_points.iter().any(|b| contains_whole_word(b, k)))
            .map(|k| format!("Key: {k}"))
            .collect();
        pad_bullets(
            &mut bullet_points,
            unused_keywords
                .into_iter()
                .chain(sentences[..used].iter().map(|s| truncate_words(s, BULLET_MAX_WORDS)))
                .chain(std::iter::once(format!("Remember: {headline}")))
                .chain(FILLER_BULLETS.iter().map(|s| (*s).to_string())),
        );

        let (quiz_question, quiz_answer) = if chunk.chunk_type == ChunkType::Definition {
            (Some(format!("True or false: {first}")), Some(true))
        } else {
            (None, None)
        };

        let ghost_words = card_ghost_words(
            &headline,
            &detail_paragraph,
            &bullet_points,
            self.config.ghost_words_max,
        );

        CardDraft {
            order: chunk.id,
            headline,
            detail_paragraph,
            bullet_points,
            emoji: emoji_for(chunk.chunk_type).to_string(),
            difficulty: Difficulty::from_word_count(chunk.word_count),
            ghost_words,
            eli5_version: None,
            quiz_question,
            quiz_answer,
            chunk_type: chunk.chunk_type,
            source: CardSource::Fallback,
        }
    }

    fn recap(&self, ctx: &CardContext<'_>) -> CardDraft {
        let skip = ctx.prior_headlines.len().saturating_sub(self.config.bullets_max);
        let recent = &ctx.prior_headlines[skip..];

        let detail_paragraph = if recent.is_empty() {
            "Take a moment to review the cards so far.".to_string()
        } else {
            let covered: Vec<&str> = recent
                .iter()
                .map(|h| h.trim_end_matches(['.', '!', '?']))
                .collect();
            truncate_words(&format!("So far: {}.", covered.join("; ")), DETAIL_MAX_WORDS)
        };

        let mut bullet_points: Vec<String> = recent
            .iter()
            .map(|h| truncate_words(h, BULLET_MAX_WORDS))
            .collect();
        pad_bullets(
            &mut bullet_points,
            FILLER_BULLETS.iter().map(|s| (*s).to_string()),
        );

        let headline = RECAP_HEADLINE.to_string();
        let ghost_words = card_ghost_words(
            &headline,
            &detail_paragraph,
            &bullet_points,
            self.config.ghost_words_max,
        );

        CardDraft {
            order: 0,
            headline,
            detail_paragraph,
            bullet_points,
            emoji: emoji_for(ChunkType::Summary).to_string(),
            difficulty: Difficulty::Easy,
            ghost_words,
            eli5_version: None,
            quiz_question: None,
            quiz_answer: None,
            chunk_type: ChunkType::Summary,
            source: CardSource::Fallback,
        }
    }

    /// Merge a parsed reply into `fallback`, enforcing every card limit.
    ///
    /// A field the reply omits, or provides in an unusable form, keeps the
    /// fallback's value. Ghost words the reply proposes survive only when they
    /// occur in the final paragraph or bullets.
    pub fn normalize(&self, raw: RawCard, fallback: CardDraft) -> CardDraft {
        if raw == RawCard::default() {
            return fallback;
        }

        let headline = raw
            .headline
            .as_deref()
            .map(clean_line)
            .filter(|h| !h.is_empty())
            .map_or_else(
                || fallback.headline.clone(),
                |h| truncate_words(&h, HEADLINE_MAX_WORDS),
            );
        let detail_paragraph = raw
            .detail_paragraph
            .as_deref()
            .map(collapse_whitespace)
            .filter(|d| !d.is_empty())
            .map_or_else(
                || fallback.detail_paragraph.clone(),
                |d| truncate_words(&d, DETAIL_MAX_WORDS),
            );

        let mut bullet_points: Vec<String> = Vec::new();
        for bullet in raw.bullet_points.unwrap_or_default() {
            if bullet_points.len() >= self.config.ai_bullets_max {
                break;
            }
            let bullet = truncate_words(&clean_bullet(&bullet), BULLET_MAX_WORDS);
            if !bullet.is_empty() && !bullet_points.contains(&bullet) {
                bullet_points.push(bullet);
            }
        }
        pad_bullets(
            &mut bullet_points,
            fallback
                .bullet_points
                .iter()
                .cloned()
                .chain(FILLER_BULLETS.iter().map(|s| (*s).to_string())),
        );

        let emoji = raw
            .emoji
            .map(|e| e.trim().to_string())
            .filter(|e| is_single_emoji(e))
            .unwrap_or(fallback.emoji);
        let difficulty = raw
            .difficulty
            .and_then(|d| d.parse().ok())
            .unwrap_or(fallback.difficulty);

        let max_ghost = self.config.ghost_words_max;
        let mut ghost_words: Vec<String> = Vec::new();
        for word in raw.ghost_words.unwrap_or_default() {
            if ghost_words.len() >= max_ghost {
                break;
            }
            let word = word.trim().to_string();
            let duplicate = ghost_words.iter().any(|g| g.to_lowercase() == word.to_lowercase());
            if !duplicate && is_grounded(&word, &detail_paragraph, &bullet_points) {
                ghost_words.push(word);
            }
        }
        if ghost_words.is_empty() {
            ghost_words = card_ghost_words(&headline, &detail_paragraph, &bullet_points, max_ghost);
        }

        let eli5_version = raw
            .eli5_version
            .as_deref()
            .map(collapse_whitespace)
            .filter(|e| !e.is_empty())
            .or(fallback.eli5_version);
        let (quiz_question, quiz_answer) = match raw
            .quiz_question
            .as_deref()
            .map(collapse_whitespace)
            .filter(|q| !q.is_empty())
        {
            Some(question) => (Some(question), raw.quiz_answer),
            None => (fallback.quiz_question, fallback.quiz_answer),
        };

        CardDraft {
            order: fallback.order,
            headline,
            detail_paragraph,
            bullet_points,
            emoji,
            difficulty,
            ghost_words,
            eli5_version,
            quiz_question,
            quiz_answer,
            chunk_type: fallback.chunk_type,
            source: CardSource::Generated,
        }
    }
}

impl std::fmt::Debug for CardSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardSynthesizer")
            .field("generator", &self.generator.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Append distinct, non-empty candidates until there are [`BULLETS_MIN`] bullets.
fn pad_bullets(bullets: &mut Vec<String>, candidates: impl IntoIterator<Item = String>) {
    for candidate in candidates {
        if bullets.len() >= BULLETS_MIN {
            break;
        }
        if !candidate.trim().is_empty() && !bullets.contains(&candidate) {
            bullets.push(candidate);
        }
    }
}

fn clean_line(text: &str) -> String {
    collapse_whitespace(text.trim_matches(|c: char| c == '"' || c == '*' || c == '#' || c.is_whitespace()))
}

fn clean_bullet(text: &str) -> String {
    clean_line(&BULLET_MARKER.replace(text, ""))
}

fn is_single_emoji(text: &str) -> bool {
    grapheme_len(text) == 1 && !text.chars().any(char::is_alphanumeric)
}
