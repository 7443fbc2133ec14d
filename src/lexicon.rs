//! Closed word lists shared by the splitter, boundary detector, classifier,
//! and ghost-word extractor.
//!
//! Every lookup lowercases its argument first, so callers can pass tokens as
//! they appear in the text.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// English function words that never become keywords or ghost words.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each",
    "either", "else", "etc", "even", "ever", "every", "few", "for", "from", "further", "had",
    "has", "have", "having", "he", "her", "here", "hers", "herself", "him", "himself", "his",
    "how", "however", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "let", "like",
    "many", "may", "me", "might", "more", "most", "much", "must", "my", "myself", "neither", "no",
    "nor", "not", "now", "of", "off", "often", "on", "once", "only", "or", "other", "ought",
    "our", "ours", "ourselves", "out", "over", "own", "per", "quite", "rather", "same", "shall",
    "she", "should", "since", "so", "some", "still", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those", "though",
    "through", "thus", "to", "too", "under", "until", "up", "upon", "us", "very", "was", "we",
    "were", "what", "when", "where", "whether", "which", "while", "who", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Everyday words that make poor cloze targets even when they pass the
/// stopword filter.
const COMMON_WORDS: &[&str] = &[
    "able", "another", "area", "back", "become", "began", "best", "better", "call", "came",
    "case", "change", "come", "common", "day", "different", "done", "end", "example", "fact",
    "find", "first", "form", "found", "general", "get", "give", "given", "good", "great",
    "group", "help", "high", "important", "instance", "keep", "kind", "know", "large", "last",
    "later", "less", "life", "little", "long", "look", "made", "make", "makes", "making", "mean",
    "means", "need", "new", "next", "number", "old", "part", "people", "place", "point",
    "possible", "put", "really", "right", "said", "say", "second", "see", "seen", "set", "show",
    "small", "something", "take", "thing", "things", "think", "third", "time", "today", "turn",
    "two", "use", "used", "using", "way", "well", "without", "work", "world", "year", "years",
];

/// Prefixes that mark a scientific or technical coinage.
pub const TECHNICAL_PREFIXES: &[&str] = &[
    "bio", "geo", "hydro", "thermo", "electro", "neuro", "cardio", "photo", "auto", "micro",
    "macro", "poly", "mono", "multi",
];

/// Suffixes that mark a scientific or technical coinage.
pub const TECHNICAL_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ology", "osis", "itis", "ism", "ist", "ase", "ide",
    "ate", "ine", "oid", "oma",
];

/// Noun-forming suffixes.
pub const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ance", "ence", "er", "or", "ist", "ism",
];

/// Adjective-forming suffixes.
pub const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ful", "less", "able", "ible", "ous", "ive", "al", "ical", "ary", "ory",
];

/// Verb endings that count only after a subject pronoun.
pub const VERB_SUFFIXES: &[&str] = &["ed", "es", "ify", "ize", "ate"];

const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they"];

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "each", "every", "some", "any",
];

const INTENSIFIERS: &[&str] = &["very", "more", "most", "quite", "rather", "extremely"];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());
static COMMON_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| COMMON_WORDS.iter().copied().collect());

fn contains(list: &[&str], word: &str) -> bool {
    let lower = word.to_lowercase();
    list.iter().any(|w| *w == lower)
}

/// Whether `word` is a function word.
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word.to_lowercase().as_str())
}

/// Whether `word` is in the everyday-vocabulary list.
pub fn is_common_word(word: &str) -> bool {
    COMMON_SET.contains(word.to_lowercase().as_str())
}

/// Whether `word` is a subject pronoun (`I`, `we`, `they`, ...).
pub fn is_subject_pronoun(word: &str) -> bool {
    contains(SUBJECT_PRONOUNS, word)
}

/// Whether `word` is an article or determiner.
pub fn is_determiner(word: &str) -> bool {
    contains(DETERMINERS, word)
}

/// Whether `word` is an intensifier (`very`, `quite`, ...).
pub fn is_intensifier(word: &str) -> bool {
    contains(INTENSIFIERS, word)
}

/// Whether the lowercase form of `word` ends with any of `suffixes`,
/// leaving at least two characters of stem.
pub fn has_suffix(word: &str, suffixes: &[&str]) -> bool {
    let lower = word.to_lowercase();
    suffixes
        .iter()
        .any(|s| lower.len() >= s.len() + 2 && lower.ends_with(s))
}

/// Whether the lowercase form of `word` starts with any of `prefixes`,
/// leaving at least three characters after the prefix.
pub fn has_prefix(word: &str, prefixes: &[&str]) -> bool {
    let lower = word.to_lowercase();
    prefixes
        .iter()
        .any(|p| lower.len() >= p.len() + 3 && lower.starts_with(p))
}
