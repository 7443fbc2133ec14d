//! Rule-based sentence splitting.
//!
//! ## The Hard Part: Periods That Don't End Sentences
//!
//! ```text
//! "Dr. Smith measured 3.5 liters, e.g. in Fig. 2. Then he left."
//!     ^              ^         ^ ^     ^   ^
//!     abbreviation   decimal   abbreviations   real boundary
//! ```
//!
//! Before splitting, known abbreviations and decimal points have their
//! periods swapped for a private-use sentinel. The splitter then breaks on
//! `[.!?]+` followed by whitespace and an uppercase letter, or at the end of
//! the text, and restores the sentinels afterwards.
//!
//! An abbreviation followed by a capitalized name ("Dr. Smith") stays in one
//! sentence. An abbreviation that really does end a sentence ("... pears,
//! etc. Then ...") is missed; that false negative is accepted.
//!
//! ## Paragraphs
//!
//! Extracted documents often carry headings on their own line with no
//! terminal punctuation. With [`SentenceSplitter::with_paragraph_breaks`],
//! blank lines become hard breaks so a heading never swallows the paragraph
//! after it. [`split_sentences`] leaves them off: text without terminal
//! punctuation comes back as one sentence.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Stand-in for a protected period. Private-use code point.
const SENTINEL: char = '\u{E000}';

static ABBREVIATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:Mr|Mrs|Dr|Prof|vs|etc|e\.g|i\.e|al|Fig|Vol|No|pp|ed)\.")
        .expect("abbreviation pattern")
});

static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)\.(\d)").expect("decimal pattern"));

static TERMINATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("terminator pattern"));

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").expect("paragraph pattern"));

/// Abbreviation-aware sentence splitter.
///
/// ## Example
///
/// ```rust
/// use microcards::SentenceSplitter;
///
/// let splitter = SentenceSplitter::new();
/// let sentences = splitter.split("Dr. Smith arrived. He measured 3.5 liters!");
///
/// assert_eq!(sentences, vec!["Dr. Smith arrived.", "He measured 3.5 liters!"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSplitter {
    paragraph_breaks: bool,
}

impl SentenceSplitter {
    /// Create a splitter that only breaks on punctuation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also treat blank lines as sentence breaks.
    #[must_use]
    pub fn with_paragraph_breaks(mut self, enabled: bool) -> Self {
        self.paragraph_breaks = enabled;
        self
    }

    /// Split `text` into trimmed, non-empty sentences in source order.
    pub fn split(&self, text: &str) -> Vec<String> {
        if self.paragraph_breaks {
            PARAGRAPH_BREAK
                .split(text)
                .flat_map(split_block)
                .collect()
        } else {
            split_block(text)
        }
    }
}

/// Split with the default splitter (punctuation only).
///
/// ```rust
/// let sentences = microcards::split_sentences("no punctuation here");
/// assert_eq!(sentences, vec!["no punctuation here"]);
/// ```
pub fn split_sentences(text: &str) -> Vec<String> {
    SentenceSplitter::new().split(text)
}

fn protect(text: &str) -> String {
    let protected = ABBREVIATION.replace_all(text, |caps: &Captures<'_>| {
        caps[0].replace('.', &SENTINEL.to_string())
    });
    let mut protected = protected.into_owned();
    // Twice, so "1.2.3" is fully covered despite non-overlapping matches.
    for _ in 0..2 {
        protected = DECIMAL
            .replace_all(&protected, |caps: &Captures<'_>| {
                format!("{}{SENTINEL}{}", &caps[1], &caps[2])
            })
            .into_owned();
    }
    protected
}

fn restore(sentence: &str) -> String {
    sentence.replace(SENTINEL, ".")
}

fn split_block(text: &str) -> Vec<String> {
    let protected = protect(text);
    let mut sentences = Vec::new();
    let mut start = 0;

    for mat in TERMINATOR.find_iter(&protected) {
        let next_is_upper = protected[mat.end()..]
            .chars()
            .next()
            .is_some_and(char::is_uppercase);
        if !next_is_upper {
            continue;
        }
        push_sentence(&mut sentences, &protected[start..mat.end()]);
        start = mat.end();
    }
    push_sentence(&mut sentences, &protected[start..]);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(restore(trimmed));
    }
}
