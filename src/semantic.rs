//! Boundary-aware chunking with size balancing.
//!
//! Splits text where the topic shifts, detected by headers and transition
//! cues, while keeping every chunk inside a word budget.
//!
//! ## Pass 1: Greedy Partition
//!
//! Sentences accumulate into the current chunk. A break happens:
//!
//! - at a header or semantic boundary, once the chunk has reached `min`
//!   (a **section break**, no overlap), or
//! - when the next sentence would push the chunk past `max`
//!   (a **size break**: the new chunk opens with the last `overlap_sentences`
//!   sentences of its predecessor as context).
//!
//! A header that coincides with a size break wins: the break counts as a
//! section break and carries no overlap.
//!
//! ```text
//! words:    30  25  40 | 20  35  60  45 | ...
//!                      ^ "However, ..."  ^ would exceed 150
//!                        section break     size break (+1 sentence overlap)
//! ```
//!
//! ## Pass 2: Balance
//!
//! Chunks below `min` are held in a pending buffer and merged with the
//! following chunk. A merge that overshoots `max` is re-split greedily
//! toward `target`; a short remainder goes back into the pending buffer.
//! Whatever is still pending at the end joins the last chunk if it fits, or
//! stands alone as a short final chunk.
//!
//! ## Pass 3: Annotate
//!
//! Each chunk gets its keywords, list flag, and rhetorical type.

use std::cmp::Ordering;

use crate::boundary::{is_list_item, Boundaries};
use crate::classify::{classify, ClassifyInput};
use crate::ghost::extract_ghost_words;
use crate::text::word_count;
use crate::{Chunk, ChunkOptions, Chunker, Result, SentenceSplitter};

/// Keywords kept per chunk.
pub const CHUNK_KEYWORDS: usize = 5;

/// Own sentences `start..end`, preceded by `overlap` context sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    overlap: usize,
}

/// Rule-based semantic chunker.
///
/// ## Example
///
/// ```rust
/// use microcards::{ChunkOptions, Chunker, SemanticChunker};
///
/// let chunker = SemanticChunker::new(ChunkOptions::new(10, 40, 1).unwrap()).unwrap();
/// let text = "Cells are the basic unit of life. They contain organelles. \
///             However, viruses are not cells. They need a host to replicate.";
/// let chunks = chunker.chunk(text);
///
/// assert_eq!(chunks.len(), 2);
/// assert!(chunks[1].content.starts_with("However"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SemanticChunker {
    options: ChunkOptions,
}

impl SemanticChunker {
    /// Create a chunker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBudget`](crate::Error::InvalidBudget) for
    /// inconsistent word bounds.
    pub fn new(options: ChunkOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> &ChunkOptions {
        &self.options
    }

    /// Chunk an already split sentence sequence.
    pub fn chunk_sentences(&self, sentences: &[String]) -> Vec<Chunk> {
        if sentences.is_empty() {
            return vec![];
        }

        let words: Vec<usize> = sentences.iter().map(|s| word_count(s)).collect();
        let boundaries = Boundaries::detect(sentences);
        let spans = self.partition(&words, &boundaries);
        let spans = self.balance(spans, &words);

        tracing::debug!(
            sentences = sentences.len(),
            chunks = spans.len(),
            "chunked document"
        );

        let total = spans.len();
        spans
            .into_iter()
            .enumerate()
            .map(|(id, span)| build_chunk(id, total, span, sentences, &words))
            .collect()
    }

    fn partition(&self, words: &[usize], boundaries: &Boundaries) -> Vec<Span> {
        let budget = self.options.budget;
        let mut spans = Vec::new();
        let mut start = 0;
        let mut overlap = 0;
        let mut current = 0;

        for (i, &w) in words.iter().enumerate() {
            if i > start {
                let header = boundaries.is_header(i);
                let topical = header || boundaries.is_semantic(i);
                let overflow = budget.would_overflow(current, w);

                if (topical && budget.fits(current) != Ordering::Less) || (header && overflow) {
                    spans.push(Span { start, end: i, overlap });
                    overlap = 0;
                    start = i;
                    current = 0;
                } else if overflow {
                    spans.push(Span { start, end: i, overlap });
                    overlap = self.options.overlap_sentences.min(i - start);
                    start = i;
                    current = 0;
                }
            }
            current += w;
        }
        if start < words.len() {
            spans.push(Span {
                start,
                end: words.len(),
                overlap,
            });
        }
        spans
    }

    fn balance(&self, spans: Vec<Span>, words: &[usize]) -> Vec<Span> {
        let budget = self.options.budget;
        let mut out: Vec<Span> = Vec::with_capacity(spans.len());
        let mut pending: Option<Span> = None;

        for span in spans {
            let span = match pending.take() {
                Some(held) => Span {
                    start: held.start,
                    end: span.end,
                    overlap: held.overlap,
                },
                None => span,
            };

            match budget.fits(span_words(span, words)) {
                Ordering::Less => pending = Some(span),
                Ordering::Equal => out.push(span),
                Ordering::Greater => {
                    let mut pieces = self.resplit(span, words);
                    if pieces.len() > 1
                        && pieces
                            .last()
                            .is_some_and(|p| budget.fits(span_words(*p, words)) == Ordering::Less)
                    {
                        pending = pieces.pop();
                    }
                    out.extend(pieces);
                }
            }
        }

        if let Some(held) = pending {
            match out.last_mut() {
                Some(last)
                    if !budget.would_overflow(span_words(*last, words), span_words(held, words)) =>
                {
                    last.end = held.end;
                }
                _ => out.push(held),
            }
        }
        out
    }

    fn resplit(&self, span: Span, words: &[usize]) -> Vec<Span> {
        let budget = self.options.budget;
        let mut pieces = Vec::new();
        let mut start = span.start;
        let mut overlap = span.overlap;
        let mut acc = 0;

        for i in span.start..span.end {
            let w = words[i];
            let reached_target = acc >= budget.target();
            let would_spill = budget.would_overflow(acc, w) && budget.fits(acc) != Ordering::Less;
            if acc > 0 && (reached_target || would_spill) {
                pieces.push(Span { start, end: i, overlap });
                overlap = self.options.overlap_sentences.min(i - start);
                start = i;
                acc = 0;
            }
            acc += w;
        }
        pieces.push(Span {
            start,
            end: span.end,
            overlap,
        });
        pieces
    }
}

impl Chunker for SemanticChunker {
    fn chunk(&self, text: &str) -> Vec<Chunk> {
        if text.trim().is_empty() {
            return vec![];
        }
        let sentences = SentenceSplitter::new()
            .with_paragraph_breaks(self.options.respect_paragraphs)
            .split(text);
        self.chunk_sentences(&sentences)
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        // ~6 bytes per word
        (text_len / (self.options.budget.target() * 6).max(1)).max(1)
    }
}

/// Chunk `text` with the given options.
///
/// # Errors
///
/// Returns [`Error::InvalidBudget`](crate::Error::InvalidBudget) for
/// inconsistent word bounds.
pub fn chunk(text: &str, options: &ChunkOptions) -> Result<Vec<Chunk>> {
    Ok(SemanticChunker::new(*options)?.chunk(text))
}

fn span_words(span: Span, words: &[usize]) -> usize {
    words[span.start..span.end].iter().sum()
}

fn build_chunk(id: usize, total: usize, span: Span, sentences: &[String], words: &[usize]) -> Chunk {
    let context_start = span.start - span.overlap;
    let own = &sentences[span.start..span.end];
    let own_text = own.join(" ");

    let chunk_type = classify(&ClassifyInput {
        index: id,
        total,
        text: &own_text,
        sentences: own,
    });

    Chunk {
        id,
        content: sentences[context_start..span.end].join(" "),
        word_count: span_words(span, words),
        sentences: sentences[context_start..span.end].to_vec(),
        overlap: span.overlap,
        sentence_range: span.start..span.end,
        keywords: extract_ghost_words(&own_text, CHUNK_KEYWORDS).words,
        chunk_type,
        is_list_content: own.iter().any(|s| is_list_item(s)),
        synthetic: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChunkType;

    fn sentence(topic: &str, n: usize) -> String {
        let mut words: Vec<String> = (0..n.saturating_sub(1)).map(|i| format!("{topic}{i}")).collect();
        words.push("end.".into());
        let mut s = words.join(" ");
        s[..1].make_ascii_uppercase();
        s
    }

    fn chunker(min: usize, target: usize, max: usize, overlap: usize) -> SemanticChunker {
        SemanticChunker::new(ChunkOptions {
            budget: crate::WordBudget::new(min, target, max).unwrap(),
            overlap_sentences: overlap,
            respect_paragraphs: true,
        })
        .unwrap()
    }

    #[test]
    fn test_short_input_single_chunk() {
        let text = "Rivers move water from mountains to the sea over many years of slow and patient flow.";
        let chunks = SemanticChunker::default().chunk(text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, text);
        assert_eq!(chunks[0].overlap, 0);
    }

    #[test]
    fn test_size_break_carries_overlap() {
        let sentences: Vec<String> = (0..6).map(|_| sentence("alpha", 10)).collect();
        let chunks = chunker(20, 25, 30, 1).chunk_sentences(&sentences);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].sentence_range, 0..3);
        assert_eq!(chunks[1].sentence_range, 3..6);
        assert_eq!(chunks[1].overlap, 1);
        assert_eq!(chunks[1].sentences.len(), 4);
        assert_eq!(chunks[1].word_count, 30);
    }

    #[test]
    fn test_section_break_has_no_overlap() {
        let mut sentences: Vec<String> = (0..3).map(|_| sentence("alpha", 10)).collect();
        sentences.push("However, beta0 beta1 beta2 beta3 beta4 beta5 beta6 beta7 end.".into());
        sentences.push(sentence("beta", 10));
        sentences.push(sentence("beta", 10));
        let chunks = chunker(20, 30, 60, 1).chunk_sentences(&sentences);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].sentence_range, 3..6);
        assert_eq!(chunks[1].overlap, 0);
        assert!(chunks[1].content.starts_with("However"));
    }

    #[test]
    fn test_boundary_ignored_below_min() {
        let sentences = vec![
            sentence("alpha", 10),
            "However, beta0 beta1 beta2 beta3 beta4 beta5 beta6 beta7 end.".to_string(),
            sentence("beta", 10),
        ];
        let chunks = chunker(25, 30, 60, 1).chunk_sentences(&sentences);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_small_tail_merges_into_previous() {
        // The header closes a 30-word section; the 5-word tail joins it.
        let mut sentences: Vec<String> = (0..3).map(|_| sentence("alpha", 10)).collect();
        sentences.push("CELL DIVISION".into());
        sentences.push(sentence("alpha", 3));
        let chunks = chunker(10, 20, 40, 0).chunk_sentences(&sentences);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].word_count, 35);
        assert_eq!(chunks[0].sentence_range, 0..5);
    }

    #[test]
    fn test_oversized_merge_is_resplit() {
        let words = vec![5; 10];
        let spans = vec![
            Span { start: 0, end: 1, overlap: 0 },
            Span { start: 1, end: 10, overlap: 0 },
        ];
        // 5 is pending, 5 + 45 = 50 > 40 re-splits at the 20-word target,
        // and the 10-word remainder folds into the last piece.
        let balanced = chunker(15, 20, 40, 1).balance(spans, &words);
        assert_eq!(
            balanced,
            vec![
                Span { start: 0, end: 4, overlap: 0 },
                Span { start: 4, end: 10, overlap: 1 },
            ]
        );
    }

    #[test]
    fn test_unsplittable_sentence_stands_alone() {
        let sentences = vec![sentence("alpha", 12), sentence("alpha", 35), sentence("alpha", 10)];
        let chunks = chunker(15, 20, 40, 0).chunk_sentences(&sentences);

        let covered: Vec<usize> = chunks.iter().flat_map(|c| c.sentence_range.clone()).collect();
        assert_eq!(covered, vec![0, 1, 2]);
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.word_count >= 15, "{chunk}");
        }
    }

    #[test]
    fn test_header_starts_section() {
        let mut sentences: Vec<String> = (0..3).map(|_| sentence("alpha", 10)).collect();
        sentences.push("CELL DIVISION".into());
        sentences.extend((0..3).map(|_| sentence("alpha", 10)));
        let chunks = chunker(20, 40, 80, 1).chunk_sentences(&sentences);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].sentences[0], "CELL DIVISION");
    }

    #[test]
    fn test_header_wins_over_size_break() {
        // The header arrives below `min` but would overflow `max`.
        let header = (0..16).map(|i| format!("AB{i}")).collect::<Vec<_>>().join(" ");
        let with_header = vec![sentence("alpha", 15), header, sentence("alpha", 10)];
        let chunker = chunker(20, 25, 30, 1);
        let words: Vec<usize> = with_header.iter().map(|s| word_count(s)).collect();
        assert_eq!(words, vec![15, 16, 10]);

        let spans = chunker.partition(&words, &Boundaries::detect(&with_header));
        assert_eq!(
            spans,
            vec![
                Span { start: 0, end: 1, overlap: 0 },
                Span { start: 1, end: 3, overlap: 0 },
            ]
        );

        let plain = vec![sentence("alpha", 15), sentence("alpha", 16), sentence("alpha", 10)];
        let spans = chunker.partition(&words, &Boundaries::detect(&plain));
        assert_eq!(
            spans,
            vec![
                Span { start: 0, end: 1, overlap: 0 },
                Span { start: 1, end: 3, overlap: 1 },
            ]
        );
    }

    #[test]
    fn test_list_content_flag() {
        let text = "Pack these items for the trip.\n\n- a warm jacket\n\n- sturdy boots\n\n- a water bottle";
        let chunks = SemanticChunker::default().chunk(text);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_list_content);
        assert_eq!(chunks[0].chunk_type, ChunkType::List);
    }

    #[test]
    fn test_keywords_bounded() {
        let text = "Photosynthesis is defined as the process by which plants convert light into energy. \
                    For example, chlorophyll absorbs sunlight. This is a key concept in biology.";
        let chunks = SemanticChunker::default().chunk(text);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].keywords.len() <= CHUNK_KEYWORDS);
        assert_eq!(chunks[0].keywords[0], "Photosynthesis");
        assert_eq!(chunks[0].chunk_type, ChunkType::Definition);
    }

    #[test]
    fn test_empty_text() {
        assert!(SemanticChunker::default().chunk("").is_empty());
        assert!(SemanticChunker::default().chunk("  \n ").is_empty());
    }

    #[test]
    fn test_free_function_validates() {
        let options = ChunkOptions {
            budget: crate::WordBudget::default(),
            overlap_sentences: 1,
            respect_paragraphs: false,
        };
        assert!(chunk("Some text here.", &options).is_ok());
    }
}
