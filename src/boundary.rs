//! Section headers and topic-shift boundaries between sentences.
//!
//! Two independent signals:
//!
//! - **Headers** start a new section. A header is short (4 to 99 characters)
//!   and is all caps, numbered (`3.`, `IV)`), or lacks terminal punctuation.
//! - **Semantic boundaries** mark a likely topic shift at sentence `i`:
//!
//! ```text
//! S[i-1]: "Mitochondria produce cellular energy."
//! S[i]:   "However, chloroplasts capture sunlight."   <- transition phrase
//!
//! S[i-1]: "Plants need water."
//! S[i]:   "- Roots absorb moisture"                   <- list status flips
//!
//! S[i-1]: "Glaciers carve valleys."
//! S[i]:   "Markets reward efficient traders."         <- no shared keywords
//! ```
//!
//! Index 0 is never a boundary: there is nothing before it to shift from.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ghost::frequent_terms;

static TOPIC_SHIFT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(?:however|but|although|nevertheless|on the other hand|first|second|third|finally|next|then|after|before|for example|for instance|such as|specifically|in summary|to summarize|in conclusion|therefore|another|additionally|furthermore|moreover)\b",
    )
    .expect("topic shift pattern")
});

static DEFINITION_OPENER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:the|a|an)\s+\w+\s+is\b").expect("definition opener"));

static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*•\d]|\([A-Za-z0-9]{1,3}\))").expect("list marker"));

static NUMBERED_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\d+|[IVXLCDM]+)[.)]").expect("numbered heading"));

/// Keywords per sentence compared for topic continuity.
const OVERLAP_KEYWORDS: usize = 5;

/// Whether a sentence looks like a section heading.
///
/// ```rust
/// use microcards::boundary::is_likely_header;
///
/// assert!(is_likely_header("CELL STRUCTURE"));
/// assert!(is_likely_header("2. Membrane transport"));
/// assert!(is_likely_header("Why cells divide"));
/// assert!(!is_likely_header("Cells divide to grow."));
/// ```
pub fn is_likely_header(sentence: &str) -> bool {
    let trimmed = sentence.trim();
    let len = trimmed.chars().count();
    if !(4..100).contains(&len) {
        return false;
    }

    let has_letters = trimmed.chars().any(char::is_alphabetic);
    let all_caps = has_letters && !trimmed.chars().any(char::is_lowercase);
    let numbered = NUMBERED_HEADING.is_match(trimmed);
    let unterminated = !trimmed.ends_with(['.', '!', '?']);

    all_caps || numbered || unterminated
}

/// Whether a sentence begins with a bullet, digit, or `(a)`-style marker.
pub fn is_list_item(sentence: &str) -> bool {
    LIST_MARKER.is_match(sentence)
}

/// Whether a sentence opens with a transition or definitional phrase.
pub fn starts_topic_shift(sentence: &str) -> bool {
    TOPIC_SHIFT.is_match(sentence) || DEFINITION_OPENER.is_match(sentence)
}

/// Header and semantic-boundary indices for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boundaries {
    headers: BTreeSet<usize>,
    semantic: BTreeSet<usize>,
}

impl Boundaries {
    /// Detect boundaries over a sentence sequence.
    pub fn detect<S: AsRef<str>>(sentences: &[S]) -> Self {
        let headers = sentences
            .iter()
            .enumerate()
            .filter(|(_, s)| is_likely_header(s.as_ref()))
            .map(|(i, _)| i)
            .collect();

        let keywords: Vec<Vec<String>> = sentences
            .iter()
            .map(|s| frequent_terms(s.as_ref(), OVERLAP_KEYWORDS))
            .collect();

        let semantic = (1..sentences.len())
            .filter(|&i| {
                let (prev, cur) = (sentences[i - 1].as_ref(), sentences[i].as_ref());
                starts_topic_shift(cur)
                    || is_list_item(prev) != is_list_item(cur)
                    || disjoint(&keywords[i - 1], &keywords[i])
            })
            .collect();

        Self { headers, semantic }
    }

    /// Whether sentence `index` looks like a heading.
    pub fn is_header(&self, index: usize) -> bool {
        self.headers.contains(&index)
    }

    /// Whether sentence `index` starts a new topic.
    pub fn is_semantic(&self, index: usize) -> bool {
        self.semantic.contains(&index)
    }

    /// Every index that begins a new section, headers included.
    pub fn section_starts(&self) -> BTreeSet<usize> {
        self.headers.union(&self.semantic).copied().collect()
    }
}

fn disjoint(a: &[String], b: &[String]) -> bool {
    !a.is_empty() && !b.is_empty() && !a.iter().any(|w| b.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_length_window() {
        assert!(!is_likely_header("ABC"));
        assert!(is_likely_header("ABCD"));
        assert!(!is_likely_header(&"A".repeat(100)));
    }

    #[test]
    fn test_header_kinds() {
        assert!(is_likely_header("INTRODUCTION TO CELLS."));
        assert!(is_likely_header("IV) The late period."));
        assert!(is_likely_header("Chapter summary"));
        assert!(!is_likely_header("A normal sentence ends here."));
        assert!(!is_likely_header("1999 was a busy year for 42."), "digits alone are not all caps");
    }

    #[test]
    fn test_list_items() {
        assert!(is_list_item("- bullet"));
        assert!(is_list_item("• bullet"));
        assert!(is_list_item("3) third"));
        assert!(is_list_item("(a) first option"));
        assert!(!is_list_item("Plain sentence."));
    }

    #[test]
    fn test_topic_shift_phrases() {
        assert!(starts_topic_shift("However, the data disagree."));
        assert!(starts_topic_shift("on the other hand it rained"));
        assert!(starts_topic_shift("The mitochondrion is an organelle."));
        assert!(!starts_topic_shift("Butterflies migrate south."));
    }

    #[test]
    fn test_keyword_overlap_boundary() {
        let sentences = [
            "Glaciers carve valleys through mountains.",
            "Glaciers also deposit moraines.",
            "Markets reward efficient traders.",
        ];
        let boundaries = Boundaries::detect(&sentences);
        assert!(!boundaries.is_semantic(0));
        assert!(!boundaries.is_semantic(1), "shared keyword 'glaciers'");
        assert!(boundaries.is_semantic(2));
    }

    #[test]
    fn test_list_status_change() {
        let sentences = ["Plants need water daily.", "- water roots daily", "- water leaves daily"];
        let boundaries = Boundaries::detect(&sentences);
        assert!(boundaries.is_semantic(1));
        assert!(!boundaries.is_semantic(2));
    }

    #[test]
    fn test_empty_keyword_sets_are_not_boundaries() {
        let sentences = ["It is so.", "It was not."];
        let boundaries = Boundaries::detect(&sentences);
        assert!(!boundaries.is_semantic(1));
    }

    #[test]
    fn test_section_starts_union() {
        let sentences = ["CELLS", "Cells divide constantly.", "However, neurons rarely divide."];
        let boundaries = Boundaries::detect(&sentences);
        assert!(boundaries.is_header(0));
        assert!(boundaries.section_starts().contains(&2));
    }
}
