//! Error types for microcards.

use std::time::Duration;

/// Errors that can occur while turning text into cards.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Word budget bounds are inconsistent.
    #[error("invalid word budget: min {min}, target {target}, max {max} (need 0 < min <= target <= max)")]
    InvalidBudget {
        /// Minimum words per chunk.
        min: usize,
        /// Target words per chunk.
        target: usize,
        /// Maximum words per chunk.
        max: usize,
    },

    /// A configuration value is out of range or could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Extracted text is too short to be worth chunking.
    #[error("not enough content: {chars} characters (need at least {min})")]
    InsufficientContent {
        /// Characters in the trimmed input.
        chars: usize,
        /// Configured minimum.
        min: usize,
    },

    /// Chunking produced nothing usable.
    #[error("could not identify meaningful sections")]
    NoSections,

    /// The card generator failed.
    #[error("generation error: {0}")]
    Generation(String),

    /// The card generator did not answer in time.
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    /// The card generator answered with something that is not a card.
    #[error("malformed generator response: {0}")]
    MalformedResponse(String),

    /// A review grade outside 0..=5.
    #[error("invalid review grade {0} (expected 0..=5)")]
    InvalidGrade(u8),
}

/// Result type for microcards operations.
pub type Result<T> = std::result::Result<T, Error>;
