//! Rhetorical classification of chunks.
//!
//! Classification is an ordered table of named rules; the first rule whose
//! predicate holds decides the label.
//!
//! | # | Rule | Label | Fires on |
//! |---|------|-------|----------|
//! | 1 | `opening` | intro | first chunk of a multi-chunk document, or "Introduction", "Overview", "This chapter/section/document" |
//! | 2 | `definitional` | definition | "is defined as", "refers to", "means that", "is the X of", "is a", "are" |
//! | 3 | `exemplar` | example | "for example", "for instance", "such as", "consider", "imagine" |
//! | 4 | `enumeration` | list | a list-marker sentence, or three or more sentences all under 100 characters |
//! | 5 | `recap` | summary | "in summary", "to summarize", "in conclusion", "key takeaway", "remember" |
//! | 6 | `contrast` | comparison | "compared to", "in contrast", "whereas", "similar to", "difference between", "on the other hand" |
//! | 7 | `procedure` | process | "step N", "first ... then", "process", "procedure", "sequence" |
//! | 8 | `abstraction` | concept | "concept", "theory", "principle", "law", "rule" |
//! | - | | general | nothing matched |
//!
//! A single-chunk document is not an introduction just because it comes
//! first: its only chunk is the whole document.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::boundary::is_list_item;
use crate::chunk::{Chunk, ChunkType};

/// Sentences shorter than this count as list-like.
const SHORT_SENTENCE_CHARS: usize = 100;

/// Short sentences needed for the enumeration rule.
const MIN_SHORT_SENTENCES: usize = 3;

/// Non-summary chunks between recap placeholders.
pub const DEFAULT_SUMMARY_INTERVAL: usize = 6;

static INTRO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:introduction|overview|this (?:chapter|section|document))\b")
        .expect("intro pattern")
});
static DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:is defined as|refers to|means that|is the \w+(?: \w+)? of|is a|are)\b")
        .expect("definition pattern")
});
static EXAMPLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:for example|for instance|such as|consider|imagine)\b")
        .expect("example pattern")
});
static SUMMARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:in summary|to summarize|in conclusion|key takeaway|remember)\b")
        .expect("summary pattern")
});
static COMPARISON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:compared to|in contrast|whereas|similar to|difference between|on the other hand)\b",
    )
    .expect("comparison pattern")
});
static PROCESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\b(?:step \d+|first\b.*\bthen|process|procedure|sequence)\b")
        .expect("process pattern")
});
static CONCEPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:concept|theory|principle|law|rule)\b").expect("concept pattern")
});

/// What a rule gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyInput<'a> {
    /// Position of the chunk in the document.
    pub index: usize,
    /// Chunks in the document.
    pub total: usize,
    /// Joined chunk text.
    pub text: &'a str,
    /// The chunk's sentences.
    pub sentences: &'a [String],
}

/// A named predicate and the label it assigns.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Rule name, for tracing and tests.
    pub name: &'static str,
    /// Label assigned when the predicate holds.
    pub label: ChunkType,
    /// The predicate.
    pub test: fn(&ClassifyInput<'_>) -> bool,
}

fn opening(input: &ClassifyInput<'_>) -> bool {
    (input.index == 0 && input.total > 1) || INTRO.is_match(input.text)
}

fn definitional(input: &ClassifyInput<'_>) -> bool {
    DEFINITION.is_match(input.text)
}

fn exemplar(input: &ClassifyInput<'_>) -> bool {
    EXAMPLE.is_match(input.text)
}

/// Whether the sentences read as a list.
pub fn enumeration(input: &ClassifyInput<'_>) -> bool {
    input.sentences.iter().any(|s| is_list_item(s))
        || (input.sentences.len() >= MIN_SHORT_SENTENCES
            && input
                .sentences
                .iter()
                .all(|s| s.chars().count() < SHORT_SENTENCE_CHARS))
}

fn recap(input: &ClassifyInput<'_>) -> bool {
    SUMMARY.is_match(input.text)
}

fn contrast(input: &ClassifyInput<'_>) -> bool {
    COMPARISON.is_match(input.text)
}

fn procedure(input: &ClassifyInput<'_>) -> bool {
    PROCESS.is_match(input.text)
}

fn abstraction(input: &ClassifyInput<'_>) -> bool {
    CONCEPT.is_match(input.text)
}

/// Classification rules in precedence order.
pub const RULES: &[Rule] = &[
    Rule { name: "opening", label: ChunkType::Intro, test: opening },
    Rule { name: "definitional", label: ChunkType::Definition, test: definitional },
    Rule { name: "exemplar", label: ChunkType::Example, test: exemplar },
    Rule { name: "enumeration", label: ChunkType::List, test: enumeration },
    Rule { name: "recap", label: ChunkType::Summary, test: recap },
    Rule { name: "contrast", label: ChunkType::Comparison, test: contrast },
    Rule { name: "procedure", label: ChunkType::Process, test: procedure },
    Rule { name: "abstraction", label: ChunkType::Concept, test: abstraction },
];

/// Label a chunk with the first matching rule, `General` otherwise.
///
/// ```rust
/// use microcards::classify::{classify, ClassifyInput};
/// use microcards::ChunkType;
///
/// let sentences = vec!["For example, bees pollinate flowers.".to_string()];
/// let input = ClassifyInput { index: 3, total: 5, text: &sentences[0], sentences: &sentences };
/// assert_eq!(classify(&input), ChunkType::Example);
/// ```
pub fn classify(input: &ClassifyInput<'_>) -> ChunkType {
    RULES
        .iter()
        .find(|rule| (rule.test)(input))
        .map(|rule| {
            tracing::trace!(rule = rule.name, index = input.index, "chunk classified");
            rule.label
        })
        .unwrap_or_default()
}

/// Insert a recap placeholder after every `interval` non-summary chunks.
///
/// A placeholder only goes between real chunks, never at the end. A real
/// summary chunk restarts the count. Ids are renumbered to stay contiguous.
pub fn insert_summary_placeholders(chunks: Vec<Chunk>, interval: usize) -> Vec<Chunk> {
    if interval == 0 {
        return chunks;
    }

    let total = chunks.len();
    let mut out = Vec::with_capacity(total + total / interval);
    let mut since_summary = 0;

    for (i, chunk) in chunks.into_iter().enumerate() {
        if chunk.chunk_type == ChunkType::Summary {
            since_summary = 0;
        } else {
            since_summary += 1;
        }
        let at = chunk.sentence_range.end;
        out.push(chunk);

        if since_summary == interval && i + 1 < total {
            out.push(Chunk::summary_placeholder(0, at));
            since_summary = 0;
        }
    }

    for (id, chunk) in out.iter_mut().enumerate() {
        chunk.id = id;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(index: usize, total: usize, sentences: &[&str]) -> ChunkType {
        let sentences: Vec<String> = sentences.iter().map(|s| (*s).to_string()).collect();
        let text = sentences.join(" ");
        classify(&ClassifyInput { index, total, text: &text, sentences: &sentences })
    }

    fn rule(name: &str) -> &'static Rule {
        RULES.iter().find(|r| r.name == name).unwrap()
    }

    fn fires(name: &str, text: &str) -> bool {
        let sentences = vec![text.to_string()];
        (rule(name).test)(&ClassifyInput { index: 2, total: 4, text, sentences: &sentences })
    }

    #[test]
    fn test_each_rule_independently() {
        assert!(fires("opening", "Overview of the immune system."));
        assert!(fires("definitional", "Entropy is defined as disorder."));
        assert!(fires("definitional", "Mitochondria is the powerhouse of the cell."));
        assert!(fires("exemplar", "Imagine a frictionless plane."));
        assert!(fires("enumeration", "- first item"));
        assert!(fires("recap", "In conclusion, water matters."));
        assert!(fires("contrast", "Cats, in contrast, purr."));
        assert!(fires("procedure", "Step 2 involves heating."));
        assert!(fires("procedure", "First mix the flour, then knead it."));
        assert!(fires("abstraction", "Newton stated a law of motion."));
        assert!(!fires("abstraction", "Lawyers argued fiercely."));
    }

    #[test]
    fn test_first_chunk_of_many_is_intro() {
        assert_eq!(label(0, 3, &["Water boils at high heat."]), ChunkType::Intro);
    }

    #[test]
    fn test_single_chunk_document_is_not_intro() {
        assert_eq!(label(0, 1, &["Water boils at high heat."]), ChunkType::General);
    }

    #[test]
    fn test_definition_beats_example() {
        let sentences = [
            "Photosynthesis is defined as the process by which plants convert light into energy.",
            "For example, chlorophyll absorbs sunlight.",
        ];
        assert_eq!(label(0, 1, &sentences), ChunkType::Definition);
    }

    #[test]
    fn test_short_sentences_read_as_list() {
        assert_eq!(label(4, 9, &["Bring water.", "Bring food.", "Bring maps."]), ChunkType::List);
        assert_eq!(label(4, 9, &["Bring water.", "Bring food."]), ChunkType::General);
    }

    #[test]
    fn test_default_is_general() {
        assert_eq!(label(5, 9, &["Rain fell all night long."]), ChunkType::General);
    }

    fn chunk(id: usize, chunk_type: ChunkType) -> Chunk {
        Chunk {
            id,
            content: format!("chunk {id}"),
            word_count: 2,
            sentences: vec![format!("chunk {id}")],
            overlap: 0,
            sentence_range: id..id + 1,
            keywords: vec![],
            chunk_type,
            is_list_content: false,
            synthetic: false,
        }
    }

    #[test]
    fn test_placeholders_every_interval() {
        let chunks: Vec<Chunk> = (0..13).map(|i| chunk(i, ChunkType::General)).collect();
        let out = insert_summary_placeholders(chunks, 6);

        assert_eq!(out.len(), 15);
        assert!(out[6].synthetic);
        assert!(out[13].synthetic);
        assert!(out.iter().enumerate().all(|(i, c)| c.id == i));
    }

    #[test]
    fn test_no_trailing_placeholder() {
        let chunks: Vec<Chunk> = (0..6).map(|i| chunk(i, ChunkType::General)).collect();
        let out = insert_summary_placeholders(chunks, 6);
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn test_real_summary_resets_count() {
        let mut chunks: Vec<Chunk> = (0..8).map(|i| chunk(i, ChunkType::General)).collect();
        chunks[3].chunk_type = ChunkType::Summary;
        let out = insert_summary_placeholders(chunks, 6);
        assert!(out.iter().all(|c| !c.synthetic));
    }
}
