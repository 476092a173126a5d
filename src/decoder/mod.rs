//! Tolerant decoder for concatenated JSON chat exports.
//!
//! Chat exports in the wild are rarely one clean JSON document. A single file
//! may hold:
//!
//! - one JSON array of message objects
//! - one bare message object
//! - many objects and arrays back to back, joined by newlines, commas or
//!   nothing at all
//! - stray bytes or a truncated value between otherwise valid values
//!
//! [`StreamDecoder`] walks the text with a cursor. At each position it tries
//! to decode one complete JSON value. On success the cursor jumps past the
//! value; on failure it moves forward by exactly one character and tries
//! again. One corrupt byte therefore never hides the values around it.
//!
//! Values must be strict JSON. Tokens such as `NaN`, `Infinity` and
//! `-Infinity` are rejected by `serde_json`, so an object containing one is
//! lost to resynchronization while its neighbours decode normally.
//!
//! # Example
//!
//! ```rust
//! use chatview::decoder::StreamDecoder;
//!
//! let decoder = StreamDecoder::new();
//! let outcome = decoder.decode_str(r#"{"author":"a"}#[{"author":"b"}, 7]"#, "inline");
//!
//! let authors: Vec<&str> = outcome.records.iter().map(|r| r.author()).collect();
//! assert_eq!(authors, ["a", "b"]);
//! assert_eq!(outcome.diagnostics.len(), 1); // the bare `7`
//! assert_eq!(outcome.skipped_bytes, 1); // the `#`
//! ```

mod unescape;

pub use unescape::{is_quoted, unescape};

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Deserializer, Value};
use tracing::{debug, warn};

use crate::config::DecoderConfig;
use crate::error::{ChatviewError, Result};
use crate::record::MessageRecord;

/// A record-shape anomaly found while decoding.
///
/// Offsets are byte offsets into the decoded text (after trimming and the
/// optional quoted-document unwrap).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Where the offending value starts
    pub offset: usize,
    pub kind: DiagnosticKind,
}

/// What kind of value was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A top-level value that is neither an object nor an array.
    NonObjectValue { found: &'static str },
    /// An element of a top-level array that is not an object.
    NonObjectElement { index: usize, found: &'static str },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::NonObjectValue { found } => write!(
                f,
                "skipping non-object JSON value ({found}) at position {}",
                self.offset
            ),
            DiagnosticKind::NonObjectElement { index, found } => write!(
                f,
                "skipping array element {index} ({found}) of the array at position {}: not an object",
                self.offset
            ),
        }
    }
}

/// Everything recovered from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// Message records in file order, arrays flattened in place
    pub records: Vec<MessageRecord>,

    /// Values that decoded but were not message objects
    pub diagnostics: Vec<Diagnostic>,

    /// Bytes stepped over while resynchronizing after decode failures
    pub skipped_bytes: usize,
}

impl DecodeOutcome {
    /// Returns `true` if no record was recovered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Decoder for concatenated, possibly damaged JSON chat exports.
#[derive(Debug, Clone, Default)]
pub struct StreamDecoder {
    config: DecoderConfig,
}

impl StreamDecoder {
    /// Creates a decoder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder with custom configuration.
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Reads and decodes the file at `path`.
    ///
    /// Only a failure to read the file is an error. Anything wrong inside
    /// the file degrades to skipped bytes and diagnostics.
    pub fn decode_file(&self, path: &Path) -> Result<DecodeOutcome> {
        let content =
            fs::read_to_string(path).map_err(|source| ChatviewError::read(path, source))?;
        Ok(self.decode_str(&content, &path.display().to_string()))
    }

    /// Decodes export text already in memory.
    ///
    /// `source` names the text in log lines (usually the file path).
    pub fn decode_str(&self, content: &str, source: &str) -> DecodeOutcome {
        let trimmed = content.trim();
        let unwrapped;
        let text = if self.config.unwrap_quoted && is_quoted(trimmed) {
            unwrapped = unescape(&trimmed[1..trimmed.len() - 1]);
            unwrapped.as_str()
        } else {
            trimmed
        };

        let mut outcome = DecodeOutcome::default();
        let mut cursor = 0;

        while cursor < text.len() {
            let rest = &text[cursor..];
            let mut values = Deserializer::from_str(rest).into_iter::<Value>();

            match values.next() {
                // Only whitespace left.
                None => break,
                Some(Ok(value)) => {
                    let start = cursor + leading_whitespace(rest);
                    cursor += values.byte_offset();
                    collect(value, start, source, &mut outcome);
                }
                Some(Err(_)) => {
                    let step = rest.chars().next().map_or(1, char::len_utf8);
                    cursor += step;
                    outcome.skipped_bytes += step;
                }
            }
        }

        if outcome.skipped_bytes > 0 {
            debug!(
                source,
                skipped_bytes = outcome.skipped_bytes,
                "resynchronized past undecodable bytes"
            );
        }
        debug!(source, records = outcome.records.len(), "decoded document");

        outcome
    }
}

/// Appends the records held by one decoded top-level value.
fn collect(value: Value, offset: usize, source: &str, outcome: &mut DecodeOutcome) {
    match value {
        Value::Object(object) => outcome.records.push(MessageRecord::from_object(&object)),
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    Value::Object(object) => {
                        outcome.records.push(MessageRecord::from_object(&object));
                    }
                    other => report(
                        outcome,
                        source,
                        Diagnostic {
                            offset,
                            kind: DiagnosticKind::NonObjectElement {
                                index,
                                found: kind_name(&other),
                            },
                        },
                    ),
                }
            }
        }
        other => report(
            outcome,
            source,
            Diagnostic {
                offset,
                kind: DiagnosticKind::NonObjectValue {
                    found: kind_name(&other),
                },
            },
        ),
    }
}

fn report(outcome: &mut DecodeOutcome, source: &str, diagnostic: Diagnostic) {
    warn!(source, "{diagnostic}");
    outcome.diagnostics.push(diagnostic);
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Length of the JSON whitespace prefix, so diagnostics point at the value.
fn leading_whitespace(text: &str) -> usize {
    text.len() - text.trim_start_matches([' ', '\t', '\n', '\r']).len()
}
