//! Keyword and ghost-word extraction.
//!
//! A ghost word is a term hidden in the study view and revealed on tap, so it
//! has to carry meaning: "photosynthesis", not "process" or "the".
//!
//! ## Pipeline
//!
//! ```text
//! tokens ──► clean + filter ──► part-of-speech guess ──► score ──► frequency ──► select
//!            (≥3 chars,          proper / technical /      base +      bonus       spaced,
//!             no stopwords)      number / verb / adj /     length +               deduplicated,
//!                                noun, or discard          context                grounded
//! ```
//!
//! ## Scoring
//!
//! | Signal | Points |
//! |--------|--------|
//! | technical / proper / number / noun / verb / adjective | 10 / 8 / 7 / 6 / 4 / 3 |
//! | length beyond 3 characters | up to 5 |
//! | capitalized | 2 |
//! | within 5 tokens after "is defined as", "refers to", "means" | 5 |
//! | among the first 10 tokens | 2 |
//! | not an everyday word | 3 |
//! | occurs once / 2-3 times / 4-5 times / more | 1 / 2 / 1 / 0 |
//!
//! Moderate repetition wins: a term used two or three times is probably the
//! subject, a term used everywhere is probably filler.
//!
//! ## Selection
//!
//! Highest score first. A candidate is skipped when its lowercase form is
//! already taken, when it sits within [`MIN_SPACING`] tokens of a selected
//! candidate, or when it does not occur as a whole word in the source.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::{
    has_prefix, has_suffix, is_common_word, is_determiner, is_intensifier, is_stopword,
    is_subject_pronoun, ADJECTIVE_SUFFIXES, NOUN_SUFFIXES, TECHNICAL_PREFIXES, TECHNICAL_SUFFIXES,
    VERB_SUFFIXES,
};
use crate::text::contains_whole_word;

/// Selected candidates must be more than this many tokens apart.
pub const MIN_SPACING: usize = 5;

/// Tokens before a candidate searched for a definitional phrase.
const DEFINITION_WINDOW: usize = 5;

/// Candidates before this token index get a position bonus.
const EARLY_POSITION: usize = 10;

/// Tokens on each side kept as a candidate's context.
const CONTEXT_RADIUS: usize = 3;

static DEFINITIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:is defined as|refers to|means)\b").expect("definitional pattern")
});

/// Guessed part of speech of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    /// Common noun.
    Noun,
    /// Verb form.
    Verb,
    /// Adjective.
    Adjective,
    /// Scientific or technical term.
    Technical,
    /// Capitalized mid-sentence name.
    Proper,
    /// Quantity with a unit, such as `5kg`.
    Number,
}

impl CandidateKind {
    /// Base importance before contextual bonuses.
    pub const fn base_score(self) -> u32 {
        match self {
            Self::Technical => 10,
            Self::Proper => 8,
            Self::Number => 7,
            Self::Noun => 6,
            Self::Verb => 4,
            Self::Adjective => 3,
        }
    }
}

/// One scored occurrence of a candidate term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostWordCandidate {
    /// The cleaned token, original case.
    pub word: String,
    /// Whitespace-token index in the source.
    pub position: usize,
    /// Score after the frequency adjustment.
    pub importance: u32,
    /// Guessed part of speech.
    pub kind: CandidateKind,
    /// Nearby source tokens.
    pub context: String,
}

/// Result of one extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GhostWords {
    /// Selected terms, best first.
    pub words: Vec<String>,
    /// Token position of each selected term, parallel to `words`.
    pub positions: Vec<usize>,
    /// Every candidate, best first.
    pub candidates: Vec<GhostWordCandidate>,
}

struct Token<'a> {
    raw: &'a str,
    clean: String,
    lower: String,
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .map(|raw| {
            let clean: String = raw
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '-')
                .collect();
            let clean = clean.trim_matches('-').to_string();
            let lower = clean.to_lowercase();
            Token { raw, clean, lower }
        })
        .collect()
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn ends_sentence(raw: &str) -> bool {
    raw.trim_end_matches(['"', '\'', ')', ']'])
        .ends_with(['.', '!', '?'])
}

/// Lowercase letter followed later by an uppercase one: `mRNA`, `JavaScript`.
fn is_mixed_case(word: &str) -> bool {
    let mut seen_lower = false;
    for c in word.chars() {
        if c.is_lowercase() {
            seen_lower = true;
        } else if seen_lower && c.is_uppercase() {
            return true;
        }
    }
    false
}

/// Letter first, digits later: `H2O`, `COVID19`.
fn is_letter_digit_mix(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_alphabetic) && word.chars().any(|c| c.is_ascii_digit())
}

/// Digits first, then a unit: `5kg`, `30ml`. Bare numbers do not qualify.
fn is_quantity(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_digit()) && word.chars().any(char::is_alphabetic)
}

fn is_eligible(token: &Token<'_>) -> bool {
    token.clean.chars().count() >= 3 && !is_stopword(&token.lower)
}

fn classify(tokens: &[Token<'_>], i: usize) -> Option<CandidateKind> {
    let token = &tokens[i];
    let word = token.clean.as_str();
    let lower = token.lower.as_str();
    let prev = i.checked_sub(1).map(|p| tokens[p].lower.as_str());
    let next = tokens.get(i + 1).map(|t| t.lower.as_str());
    let sentence_initial = i == 0 || ends_sentence(tokens[i - 1].raw);

    if is_capitalized(word) && !sentence_initial {
        return Some(CandidateKind::Proper);
    }
    if is_mixed_case(word)
        || is_letter_digit_mix(word)
        || has_prefix(lower, TECHNICAL_PREFIXES)
        || has_suffix(lower, TECHNICAL_SUFFIXES)
    {
        return Some(CandidateKind::Technical);
    }
    if is_quantity(word) {
        return Some(CandidateKind::Number);
    }
    if (lower.len() >= 5 && lower.ends_with("ing"))
        || (has_suffix(lower, VERB_SUFFIXES) && prev.is_some_and(is_subject_pronoun))
        || prev == Some("to")
    {
        return Some(CandidateKind::Verb);
    }
    if has_suffix(lower, ADJECTIVE_SUFFIXES)
        || next.is_some_and(|n| has_suffix(n, NOUN_SUFFIXES))
        || prev.is_some_and(is_intensifier)
    {
        return Some(CandidateKind::Adjective);
    }
    if has_suffix(lower, NOUN_SUFFIXES)
        || prev.is_some_and(is_determiner)
        || is_capitalized(word)
        || word.chars().count() >= 4
    {
        return Some(CandidateKind::Noun);
    }
    None
}

fn score(tokens: &[Token<'_>], i: usize, kind: CandidateKind) -> u32 {
    let word = tokens[i].clean.as_str();
    let len = word.chars().count() as u32;
    let mut importance = kind.base_score() + len.saturating_sub(3).min(5);

    if is_capitalized(word) {
        importance += 2;
    }
    let window = tokens[i.saturating_sub(DEFINITION_WINDOW)..i]
        .iter()
        .map(|t| t.raw)
        .collect::<Vec<_>>()
        .join(" ");
    if DEFINITIONAL.is_match(&window) {
        importance += 5;
    }
    if i < EARLY_POSITION {
        importance += 2;
    }
    if !is_common_word(word) {
        importance += 3;
    }
    importance
}

/// Bonus for how often a term occurs in the whole source.
pub const fn frequency_bonus(count: usize) -> u32 {
    match count {
        1 | 4 | 5 => 1,
        2 | 3 => 2,
        _ => 0,
    }
}

fn context(tokens: &[Token<'_>], i: usize) -> String {
    let start = i.saturating_sub(CONTEXT_RADIUS);
    let end = (i + CONTEXT_RADIUS + 1).min(tokens.len());
    tokens[start..end]
        .iter()
        .map(|t| t.raw)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Score every candidate occurrence in `text`, best first.
pub fn candidates(text: &str) -> Vec<GhostWordCandidate> {
    let tokens = tokenize(text);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in &tokens {
        if !token.lower.is_empty() {
            *counts.entry(token.lower.as_str()).or_default() += 1;
        }
    }

    let mut found: Vec<GhostWordCandidate> = (0..tokens.len())
        .filter(|&i| is_eligible(&tokens[i]))
        .filter_map(|i| {
            let kind = classify(&tokens, i)?;
            let count = counts.get(tokens[i].lower.as_str()).copied().unwrap_or(1);
            Some(GhostWordCandidate {
                word: tokens[i].clean.clone(),
                position: i,
                importance: score(&tokens, i, kind) + frequency_bonus(count),
                kind,
                context: context(&tokens, i),
            })
        })
        .collect();

    found.sort_by(|a, b| {
        b.importance
            .cmp(&a.importance)
            .then(a.position.cmp(&b.position))
    });
    found
}

/// Pick up to `max_words` spaced, distinct, grounded terms from `text`.
///
/// ```rust
/// let text = "Photosynthesis is defined as the process by which plants \
///             convert light into energy.";
/// let ghost = microcards::extract_ghost_words(text, 2);
/// assert_eq!(ghost.words[0], "Photosynthesis");
/// ```
pub fn extract_ghost_words(text: &str, max_words: usize) -> GhostWords {
    let candidates = candidates(text);
    let mut words = Vec::new();
    let mut taken: HashSet<String> = HashSet::new();
    let mut positions: Vec<usize> = Vec::new();

    for candidate in &candidates {
        if words.len() >= max_words {
            break;
        }
        let lower = candidate.word.to_lowercase();
        if taken.contains(&lower) {
            continue;
        }
        if positions
            .iter()
            .any(|&p| p.abs_diff(candidate.position) <= MIN_SPACING)
        {
            continue;
        }
        if !contains_whole_word(text, &candidate.word) {
            continue;
        }
        taken.insert(lower);
        positions.push(candidate.position);
        words.push(candidate.word.clone());
    }

    GhostWords {
        words,
        positions,
        candidates,
    }
}

/// Ghost words for a finished card.
///
/// Extraction runs over headline, paragraph, and bullets together; the result
/// keeps only words that occur in the paragraph or a bullet, since the
/// headline is never hidden.
pub fn card_ghost_words(
    headline: &str,
    detail: &str,
    bullets: &[String],
    max_words: usize,
) -> Vec<String> {
    let mut parts: Vec<&str> = vec![headline, detail];
    parts.extend(bullets.iter().map(String::as_str));
    let source = parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| {
            if ends_sentence(p) {
                p.to_string()
            } else {
                format!("{p}.")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    extract_ghost_words(&source, max_words)
        .words
        .into_iter()
        .filter(|w| is_grounded(w, detail, bullets))
        .collect()
}

/// Whether `word` occurs as a whole word in `detail` or any bullet.
pub fn is_grounded(word: &str, detail: &str, bullets: &[String]) -> bool {
    contains_whole_word(detail, word) || bullets.iter().any(|b| contains_whole_word(b, word))
}

/// Most frequent non-stopword terms longer than four characters, lowercase.
///
/// Ties keep first-occurrence order. Used for topic-continuity checks between
/// sentences, where ranking sophistication buys nothing.
pub fn frequent_terms(text: &str, n: usize) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for token in tokenize(text) {
        if token.lower.chars().count() <= 4 || is_stopword(&token.lower) {
            continue;
        }
        let count = counts.entry(token.lower.clone()).or_default();
        if *count == 0 {
            order.push(token.lower);
        }
        *count += 1;
    }

    let mut ranked: Vec<(usize, String)> = order.into_iter().enumerate().collect();
    ranked.sort_by(|(ia, a), (ib, b)| counts[b].cmp(&counts[a]).then(ia.cmp(ib)));
    ranked.into_iter().take(n).map(|(_, w)| w).collect()
}
