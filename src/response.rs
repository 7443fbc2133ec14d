//! Tolerant parsing of generator replies.
//!
//! Replies arrive in every shape a language model can produce:
//!
//! ```text
//! bare JSON          {"headline": "...", ...}
//! fenced JSON        ```json\n{...}\n```
//! JSON inside prose  Sure! Here is your card: {...} Enjoy!
//! plain text         Plants make sugar from light.
//! ```
//!
//! Each field is read independently, so one bad field does not cost the
//! others. Keys are accepted in camelCase or snake_case. Nothing here
//! enforces word limits; that happens in
//! [`CardSynthesizer::normalize`](crate::CardSynthesizer::normalize).

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Fields a generator reply may provide. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCard {
    /// Proposed headline.
    pub headline: Option<String>,
    /// Proposed paragraph.
    pub detail_paragraph: Option<String>,
    /// Proposed bullets.
    pub bullet_points: Option<Vec<String>>,
    /// Proposed emoji.
    pub emoji: Option<String>,
    /// Proposed difficulty label, unparsed.
    pub difficulty: Option<String>,
    /// Proposed cloze terms.
    pub ghost_words: Option<Vec<String>>,
    /// Simplified explanation.
    pub eli5_version: Option<String>,
    /// True/false question.
    pub quiz_question: Option<String>,
    /// Answer to the question.
    pub quiz_answer: Option<bool>,
}

impl RawCard {
    /// Parse a reply.
    ///
    /// A reply without any `{` is taken as plain text and becomes the
    /// paragraph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResponse`] for an empty reply, for a JSON
    /// object that does not parse, and for JSON that is not an object.
    ///
    /// ```rust
    /// use microcards::RawCard;
    ///
    /// let raw = RawCard::parse("Here you go:\n```json\n{\"headline\": \"Osmosis\"}\n```").unwrap();
    /// assert_eq!(raw.headline.as_deref(), Some("Osmosis"));
    /// ```
    pub fn parse(reply: &str) -> Result<Self> {
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(Error::MalformedResponse("empty reply".into()));
        }

        let Some(json) = outermost_object(reply) else {
            if reply.contains('{') {
                return Err(Error::MalformedResponse("unterminated JSON object".into()));
            }
            return Ok(Self {
                detail_paragraph: Some(reply.to_string()),
                ..Self::default()
            });
        };

        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::MalformedResponse(e.to_string()))?;
        match value {
            Value::Object(map) => Ok(Self::from_map(&map)),
            other => Err(Error::MalformedResponse(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            headline: text_field(map, &["headline", "title"]),
            detail_paragraph: text_field(map, &["detailParagraph", "detail_paragraph", "detail"]),
            bullet_points: list_field(map, &["bulletPoints", "bullet_points", "bullets"]),
            emoji: text_field(map, &["emoji"]),
            difficulty: text_field(map, &["difficulty"]),
            ghost_words: list_field(map, &["ghostWords", "ghost_words"]),
            eli5_version: text_field(map, &["eli5Version", "eli5_version", "eli5"]),
            quiz_question: text_field(map, &["quizQuestion", "quiz_question"]),
            quiz_answer: lookup(map, &["quizAnswer", "quiz_answer"]).and_then(as_bool),
        }
    }
}

/// The slice from the first `{` to the last `}`.
fn outermost_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (start < end).then(|| &reply[start..=end])
}

fn lookup<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| map.get(*k)).filter(|v| !v.is_null())
}

fn text_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    lookup(map, keys).and_then(as_text)
}

fn list_field(map: &Map<String, Value>, keys: &[&str]) -> Option<Vec<String>> {
    match lookup(map, keys)? {
        Value::Array(items) => Some(items.iter().filter_map(as_text).collect()),
        Value::String(s) => Some(
            s.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect(),
        ),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
