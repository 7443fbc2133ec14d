//! Small text helpers shared across the pipeline.

use unicode_segmentation::UnicodeSegmentation;

/// Marker appended to text cut by [`truncate_words`].
pub const ELLIPSIS: &str = "...";

/// Count words using Unicode word segmentation (UAX #29).
///
/// Punctuation-only tokens such as a lone dash do not count.
///
/// ```rust
/// assert_eq!(microcards::text::word_count("Plants convert light -- mostly."), 4);
/// ```
pub fn word_count(text: &str) -> usize {
    text.unicode_words().count()
}

/// Collapse every run of whitespace into one space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `max` whitespace-separated words.
///
/// When words are dropped, trailing punctuation is stripped from the last
/// kept word and [`ELLIPSIS`] is glued onto it, so the result never has more
/// than `max` words.
///
/// ```rust
/// use microcards::text::truncate_words;
///
/// assert_eq!(truncate_words("one two three", 5), "one two three");
/// assert_eq!(truncate_words("one two, three four", 2), "one two...");
/// ```
pub fn truncate_words(text: &str, max: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max {
        return words.join(" ");
    }
    if max == 0 {
        return String::new();
    }
    let mut kept = words[..max].join(" ");
    let trimmed_len = kept
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .len();
    kept.truncate(trimmed_len);
    kept.push_str(ELLIPSIS);
    kept
}

/// Number of whitespace-separated words, the measure truncation uses.
pub fn whitespace_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Case-insensitive whole-word search.
///
/// A match counts when neither neighbour is a letter, digit, or underscore.
///
/// ```rust
/// use microcards::text::contains_whole_word;
///
/// assert!(contains_whole_word("Plants absorb Light.", "light"));
/// assert!(!contains_whole_word("Sunlight is bright.", "light"));
/// ```
pub fn contains_whole_word(haystack: &str, word: &str) -> bool {
    let word = word.trim();
    if word.is_empty() {
        return false;
    }
    let haystack = haystack.to_lowercase();
    let word = word.to_lowercase();

    let mut from = 0;
    while let Some(offset) = haystack[from..].find(word.as_str()) {
        let at = from + offset;
        let before = haystack[..at].chars().next_back();
        let after = haystack[at + word.len()..].chars().next();
        if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
            return true;
        }
        // Overlapping occurrences start inside this one.
        from = at + haystack[at..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Letters, digits, and underscore: the complement of a regex `\W`.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Number of user-perceived characters.
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}
