//! Prompts for the card generator.

use crate::card::{BULLET_MAX_WORDS, DETAIL_MAX_WORDS, HEADLINE_MAX_WORDS};
use crate::text::ELLIPSIS;
use crate::Chunk;

/// Builder for card prompts.
#[derive(Debug, Clone)]
pub struct CardPromptBuilder {
    /// Instructions placed ahead of the chunk.
    system_prompt: String,

    /// Maximum chunk length in the prompt (characters).
    max_content_length: usize,
}

impl Default for CardPromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CardPromptBuilder {
    /// Create a builder with default instructions.
    pub fn new() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            max_content_length: 2000,
        }
    }

    /// Replace the instructions.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set maximum chunk length.
    #[must_use]
    pub fn with_max_content_length(mut self, length: usize) -> Self {
        self.max_content_length = length;
        self
    }

    /// Build the prompt for one chunk.
    pub fn build(&self, chunk: &Chunk, title: Option<&str>) -> String {
        let mut prompt = self.system_prompt.clone();
        prompt.push_str("\n\n");
        if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
            prompt.push_str(&format!("Document: {}\n", title.trim()));
        }
        prompt.push_str(&format!("Section type: {}\n", chunk.chunk_type));
        if !chunk.keywords.is_empty() {
            prompt.push_str(&format!("Key terms: {}\n", chunk.keywords.join(", ")));
        }
        prompt.push_str(&format!(
            "\nText:\n\"\"\"\n{}\n\"\"\"\n",
            self.truncate_content(&chunk.content)
        ));
        prompt
    }

    /// Cut content at the last space before the limit.
    fn truncate_content(&self, content: &str) -> String {
        if content.len() <= self.max_content_length {
            return content.to_string();
        }
        let mut end = self.max_content_length;
        while !content.is_char_boundary(end) {
            end -= 1;
        }
        let truncated = &content[..end];
        match truncated.rfind(' ') {
            Some(last_space) => format!("{}{ELLIPSIS}", &truncated[..last_space]),
            None => format!("{truncated}{ELLIPSIS}"),
        }
    }
}

fn default_system_prompt() -> String {
    format!(
        r#"You write one study flashcard for the text below. Use only facts from the text.

Respond with a single JSON object with these fields:
- headline: at most {HEADLINE_MAX_WORDS} words
- detailParagraph: at most {DETAIL_MAX_WORDS} words
- bulletPoints: 2 to 5 strings, each at most {BULLET_MAX_WORDS} words
- emoji: one emoji
- difficulty: "easy", "medium" or "hard"
- ghostWords: up to 3 important words copied exactly from detailParagraph or bulletPoints
- eli5Version: the idea explained to a child
- quizQuestion: a true/false question
- quizAnswer: true or false"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChunkType;

    fn chunk(content: &str) -> Chunk {
        Chunk {
            id: 0,
            content: content.to_string(),
            word_count: crate::text::word_count(content),
            sentences: vec![content.to_string()],
            overlap: 0,
            sentence_range: 0..1,
            keywords: vec!["osmosis".into()],
            chunk_type: ChunkType::Definition,
            is_list_content: false,
            synthetic: false,
        }
    }

    #[test]
    fn test_prompt_carries_chunk() {
        let prompt = CardPromptBuilder::new().build(&chunk("Osmosis moves water."), Some("Biology"));
        assert!(prompt.contains("Osmosis moves water."));
        assert!(prompt.contains("Document: Biology"));
        assert!(prompt.contains("Section type: definition"));
        assert!(prompt.contains("Key terms: osmosis"));
    }

    #[test]
    fn test_long_content_truncated_at_word() {
        let builder = CardPromptBuilder::new().with_max_content_length(14);
        let prompt = builder.build(&chunk("Osmosis moves water across membranes."), None);
        assert!(prompt.contains("Osmosis moves..."));
        assert!(!prompt.contains("membranes"));
    }
}
