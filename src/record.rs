//! The message record decoded from a chat export.
//!
//! Chat exports are heterogeneous: the same file can mix objects that carry a
//! string timestamp with objects that carry epoch milliseconds, and fields can
//! be missing or hold the wrong type. [`MessageRecord::from_object`] takes a
//! generic JSON object and pattern-matches each recognized field, falling back
//! to a default instead of failing.
//!
//! | JSON key          | Accepted shape                        | Default     |
//! |-------------------|---------------------------------------|-------------|
//! | `author`          | string                                | `"Unknown"` |
//! | `content`         | string                                | `""`        |
//! | `timestamp`       | string or integer epoch milliseconds  | none        |
//! | `mentions`        | array of strings or integers          | empty       |
//! | `reaction_counts` | object of label to integer            | empty       |
//!
//! # Example
//!
//! ```
//! use chatview::record::{MessageRecord, Timestamp};
//! use serde_json::json;
//!
//! let value = json!({"author": "ana", "content": "hi <@7>", "mentions": [7], "timestamp": 1700000000000_i64});
//! let record = MessageRecord::from_object(value.as_object().unwrap());
//!
//! assert_eq!(record.author(), "ana");
//! assert_eq!(record.mentions(), ["7"]);
//! assert_eq!(record.timestamp(), Some(&Timestamp::EpochMillis(1700000000000)));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Author shown when a record has no usable `author` field.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// When a message was sent, as found in the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch; rendered in local time.
    EpochMillis(i64),
    /// Already formatted by the exporter; rendered verbatim.
    Text(String),
}

/// One emoji (or label) and how many times it was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub label: String,
    pub count: i64,
}

impl Reaction {
    pub fn new(label: impl Into<String>, count: i64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// A single chat message reduced to the fields the renderer understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Display name or id of the author.
    pub author: String,

    /// Raw message text. May contain `<@id>` mention placeholders and URLs.
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp: Option<Timestamp>,

    /// Mention identifiers, in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub mentions: Vec<String>,

    /// Reaction counts, in source insertion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

impl MessageRecord {
    /// Creates a record with only author and content.
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
            timestamp: None,
            mentions: Vec::new(),
            reactions: Vec::new(),
        }
    }

    /// Builds a record from a decoded JSON object.
    ///
    /// Unknown keys are ignored. Wrong-typed recognized keys fall back to
    /// their defaults silently.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let author = match object.get("author") {
            Some(Value::String(s)) => s.clone(),
            _ => UNKNOWN_AUTHOR.to_string(),
        };

        let content = match object.get("content") {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };

        let timestamp = match object.get("timestamp") {
            Some(Value::String(s)) => Some(Timestamp::Text(s.clone())),
            Some(Value::Number(n)) => n.as_i64().map(Timestamp::EpochMillis),
            _ => None,
        };

        let mentions = match object.get("mentions") {
            Some(Value::Array(items)) => items.iter().filter_map(mention_id).collect(),
            _ => Vec::new(),
        };

        let reactions = match object.get("reaction_counts") {
            Some(Value::Object(counts)) => counts
                .iter()
                .filter_map(|(label, count)| count.as_i64().map(|n| Reaction::new(label, n)))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            author,
            content,
            timestamp,
            mentions,
            reactions,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn with_mention(mut self, id: impl Into<String>) -> Self {
        self.mentions.push(id.into());
        self
    }

    #[must_use]
    pub fn with_reaction(mut self, label: impl Into<String>, count: i64) -> Self {
        self.reactions.push(Reaction::new(label, count));
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> Option<&Timestamp> {
        self.timestamp.as_ref()
    }

    pub fn mentions(&self) -> &[String] {
        &self.mentions
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }
}

impl Default for MessageRecord {
    fn default() -> Self {
        Self::new(UNKNOWN_AUTHOR, "")
    }
}

/// Mention ids are usually numeric snowflakes but some exporters quote them.
fn mention_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> MessageRecord {
        MessageRecord::from_object(value.as_object().unwrap())
    }

    #[test]
    fn test_all_fields() {
        let rec = record(json!({
            "author": "alice",
            "content": "hello <@42>",
            "timestamp": "2024-01-15 10:30:00",
            "mentions": [42, "bob"],
            "reaction_counts": {"👍": 3, "🎉": 1}
        }));

        assert_eq!(rec.author(), "alice");
        assert_eq!(rec.content(), "hello <@42>");
        assert_eq!(
            rec.timestamp(),
            Some(&Timestamp::Text("2024-01-15 10:30:00".into()))
        );
        assert_eq!(rec.mentions(), ["42", "bob"]);
        assert_eq!(
            rec.reactions(),
            [Reaction::new("👍", 3), Reaction::new("🎉", 1)]
        );
    }

    #[test]
    fn test_defaults_for_empty_object() {
        let rec = record(json!({}));
        assert_eq!(rec, MessageRecord::default());
        assert_eq!(rec.author(), UNKNOWN_AUTHOR);
        assert!(rec.content().is_empty());
        assert!(rec.timestamp().is_none());
    }

    #[test]
    fn test_wrong_types_fall_back() {
        let rec = record(json!({
            "author": {"name": "alice"},
            "content": 12,
            "timestamp": true,
            "mentions": "42",
            "reaction_counts": [1, 2]
        }));
        assert_eq!(rec, MessageRecord::default());
    }

    #[test]
    fn test_integer_timestamp() {
        let rec = record(json!({"timestamp": 1700000000000_i64}));
        assert_eq!(rec.timestamp(), Some(&Timestamp::EpochMillis(1700000000000)));
    }

    #[test]
    fn test_float_timestamp_is_dropped() {
        let rec = record(json!({"timestamp": 1700000000000.5}));
        assert!(rec.timestamp().is_none());
    }

    #[test]
    fn test_invalid_mentions_and_reactions_are_dropped() {
        let rec = record(json!({
            "mentions": [1, null, 2.5, {"id": 3}, "x"],
            "reaction_counts": {"a": 1, "b": "two", "c": 3}
        }));
        assert_eq!(rec.mentions(), ["1", "x"]);
        assert_eq!(rec.reactions(), [Reaction::new("a", 1), Reaction::new("c", 3)]);
    }

    #[test]
    fn test_reaction_order_is_insertion_order() {
        let value: Value =
            serde_json::from_str(r#"{"reaction_counts": {"z": 1, "a": 2, "m": 3}}"#).unwrap();
        let rec = record(value);
        let labels: Vec<&str> = rec.reactions().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["z", "a", "m"]);
    }

    #[test]
    fn test_builder() {
        let rec = MessageRecord::new("ana", "hi")
            .with_timestamp(Timestamp::EpochMillis(0))
            .with_mention("7")
            .with_reaction("👍", 2);
        assert_eq!(rec.mentions(), ["7"]);
        assert_eq!(rec.reactions().len(), 1);
        assert_eq!(rec.timestamp(), Some(&Timestamp::EpochMillis(0)));
    }

    #[test]
    fn test_serialization_skips_empty() {
        let json = serde_json::to_string(&MessageRecord::new("ana", "hi")).unwrap();
        assert_eq!(json, r#"{"author":"ana","content":"hi"}"#);

        let rec = MessageRecord::new("ana", "hi").with_timestamp(Timestamp::EpochMillis(5));
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains(r#""timestamp":5"#));
    }
}
