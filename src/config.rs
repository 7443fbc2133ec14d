//! Pipeline configuration.
//!
//! Everything the pipeline needs is passed in explicitly; nothing is read from
//! process-wide state. Every section has defaults, so a TOML file only names
//! what it changes:
//!
//! ```toml
//! summary_interval = 4
//!
//! [chunking]
//! overlap_sentences = 0
//!
//! [chunking.budget]
//! min = 150
//! target = 225
//! max = 300
//!
//! [synthesis]
//! timeout_ms = 5000
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classify::DEFAULT_SUMMARY_INTERVAL;
use crate::{Error, Result, WordBudget};

/// How text is cut into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkOptions {
    /// Word bounds per chunk.
    pub budget: WordBudget,
    /// Sentences carried into a chunk started by a size break.
    pub overlap_sentences: usize,
    /// Treat blank lines as hard sentence breaks.
    pub respect_paragraphs: bool,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            budget: WordBudget::default(),
            overlap_sentences: 1,
            respect_paragraphs: true,
        }
    }
}

impl ChunkOptions {
    /// Options with explicit word bounds; the target is their midpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBudget`] unless `0 < min <= max`.
    pub fn new(min_words: usize, max_words: usize, overlap_sentences: usize) -> Result<Self> {
        let target = min_words + max_words.saturating_sub(min_words) / 2;
        Ok(Self {
            budget: WordBudget::new(min_words, target, max_words)?,
            overlap_sentences,
            ..Self::default()
        })
    }

    /// Check the budget.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBudget`] for inconsistent bounds.
    pub fn validate(&self) -> Result<()> {
        self.budget.validate()
    }
}

/// How cards are produced from chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Milliseconds to wait for the generator before falling back.
    pub timeout_ms: u64,
    /// Bullets on a deterministic card.
    pub bullets_max: usize,
    /// Bullets kept from a generated card.
    pub ai_bullets_max: usize,
    /// Ghost words per card.
    pub ghost_words_max: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 15_000,
            bullets_max: 3,
            ai_bullets_max: 5,
            ghost_words_max: 3,
        }
    }
}

impl SynthesisConfig {
    /// The generator timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a zero timeout, fewer than two
    /// bullets, more than five bullets, or more than three ghost words.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(Error::InvalidConfig("timeout_ms must be > 0".into()));
        }
        for (name, value) in [("bullets_max", self.bullets_max), ("ai_bullets_max", self.ai_bullets_max)] {
            if !(2..=5).contains(&value) {
                return Err(Error::InvalidConfig(format!("{name} must be in 2..=5, got {value}")));
            }
        }
        if self.ghost_words_max > 3 {
            return Err(Error::InvalidConfig(format!(
                "ghost_words_max must be <= 3, got {}",
                self.ghost_words_max
            )));
        }
        Ok(())
    }
}

/// Top-level configuration for [`DeckPipeline`](crate::DeckPipeline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Chunking options.
    pub chunking: ChunkOptions,
    /// Non-summary chunks between recap cards; 0 disables recaps.
    pub summary_interval: usize,
    /// Shortest input worth processing, in characters.
    pub min_content_chars: usize,
    /// Card synthesis options.
    pub synthesis: SynthesisConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunking: ChunkOptions::default(),
            summary_interval: DEFAULT_SUMMARY_INTERVAL,
            min_content_chars: 50,
            synthesis: SynthesisConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for malformed TOML and the validation
    /// errors of [`PipelineConfig::validate`].
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns the first failing section's error.
    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()?;
        self.synthesis.validate()
    }
}
