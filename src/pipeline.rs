//! Text in, ordered card drafts out.
//!
//! ```text
//! text ─► length check ─► SemanticChunker ─► recap placeholders ─► CardSynthesizer ─► cards
//!          (min chars)     (split, balance,     (every N chunks)      (per chunk, in order)
//!                           classify)
//! ```

use std::sync::Arc;

use crate::classify::insert_summary_placeholders;
use crate::synth::CardContext;
use crate::{
    CardDraft, CardSynthesizer, Chunk, ChunkType, Chunker, Error, Generator, PipelineConfig,
    Result, SemanticChunker,
};

/// Builds a deck of card drafts from extracted text.
///
/// ## Example
///
/// ```rust
/// use microcards::{DeckPipeline, PipelineConfig};
///
/// let pipeline = DeckPipeline::new(PipelineConfig::default()).unwrap();
/// let chunks = pipeline
///     .plan("Tides are caused by the gravitational pull of the moon on the oceans of the earth.")
///     .unwrap();
/// assert_eq!(chunks.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DeckPipeline {
    config: PipelineConfig,
    chunker: SemanticChunker,
    synthesizer: CardSynthesizer,
}

impl DeckPipeline {
    /// A deterministic pipeline.
    ///
    /// # Errors
    ///
    /// Returns the configuration's validation error.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            chunker: SemanticChunker::new(config.chunking)?,
            synthesizer: CardSynthesizer::new(config.synthesis),
            config,
        })
    }

    /// Route card text through `generator`, falling back per card.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.synthesizer = self.synthesizer.with_generator(generator);
        self
    }

    /// The configuration in effect.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Chunk `text` and insert recap placeholders.
    ///
    /// # Errors
    ///
    /// - [`Error::InsufficientContent`] when the trimmed text is shorter than
    ///   `min_content_chars`.
    /// - [`Error::NoSections`] when chunking yields nothing with a keyword.
    pub fn plan(&self, text: &str) -> Result<Vec<Chunk>> {
        let chars = text.trim().chars().count();
        if chars < self.config.min_content_chars {
            return Err(Error::InsufficientContent {
                chars,
                min: self.config.min_content_chars,
            });
        }

        let chunks = self.chunker.chunk(text);
        if chunks.iter().all(|c| c.keywords.is_empty()) {
            return Err(Error::NoSections);
        }

        let chunks = insert_summary_placeholders(chunks, self.config.summary_interval);
        tracing::debug!(chars, chunks = chunks.len(), "planned deck");
        Ok(chunks)
    }

    /// Plan `text` and synthesize one card per chunk.
    ///
    /// Cards come back in document order with `order` running `0..n`. Recap
    /// cards list the headlines of the cards since the previous recap.
    ///
    /// # Errors
    ///
    /// The errors of [`DeckPipeline::plan`]. Generator failures never
    /// surface; the affected card falls back to deterministic text.
    pub async fn build_deck(&self, text: &str, title: Option<&str>) -> Result<Vec<CardDraft>> {
        let chunks = self.plan(text)?;
        let cards = self.synthesize_all(&chunks, title).await;

        tracing::info!(
            cards = cards.len(),
            generated = self.synthesizer.has_generator(),
            "deck built"
        );
        Ok(cards)
    }

    /// One card per chunk, in order. Any summary chunk, real or placeholder,
    /// closes the run of headlines the next recap lists.
    async fn synthesize_all(&self, chunks: &[Chunk], title: Option<&str>) -> Vec<CardDraft> {
        let mut cards = Vec::with_capacity(chunks.len());
        let mut since_recap: Vec<String> = Vec::new();

        for chunk in chunks {
            let ctx = CardContext {
                title,
                prior_headlines: &since_recap,
            };
            let mut card = self.synthesizer.synthesize(chunk, &ctx).await;
            card.order = cards.len();

            if chunk.chunk_type == ChunkType::Summary {
                since_recap.clear();
            } else {
                since_recap.push(card.headline.clone());
            }
            cards.push(card);
        }
        cards
    }
}
