//! HTML rendering of message records.
//!
//! Each record becomes one self-contained fragment:
//!
//! ```html
//! <p>
//!     <b>AUTHOR</b> [TIMESTAMP]:
//!     <br>
//!     CONTENT
//! </p>
//! <hr>
//! ```
//!
//! Before it is placed in the fragment the content goes through three
//! transforms, in order: mention placeholders (`<@id>`) become bold `@id`,
//! URLs become links, and reaction counts are appended.
//!
//! # Caveats
//!
//! Author, content and URLs are inserted verbatim. A message containing
//! `<script>` is emitted as markup. Only render exports you trust.
//!
//! Mention substitution runs once per listed id, in list order, over the
//! already substituted text. If an earlier substitution produces a later
//! id's placeholder, that placeholder is substituted too: content
//! `<@<@1>>` with mentions `["1", "<b>@1</b>"]` renders as
//! `<b>@<b>@1</b></b>`.
//!
//! # Example
//!
//! ```rust
//! use chatview::record::MessageRecord;
//! use chatview::render::HtmlRenderer;
//!
//! let renderer = HtmlRenderer::new();
//! let record = MessageRecord::new("ana", "hi <@7>, see https://x.io").with_mention("7");
//! let html = renderer.render_record(&record);
//!
//! assert!(html.contains("<b>@7</b>"));
//! assert!(html.contains(r#"<a href="https://x.io">https://x.io</a>"#));
//! ```

mod timestamp;

pub use timestamp::{DISPLAY_FORMAT, display_timestamp, format_epoch_millis_in};

use std::fmt::Write;

use regex::Regex;
use tracing::debug;

use crate::record::{MessageRecord, Reaction};

/// Renders message records to HTML fragments.
///
/// Holds the compiled link pattern, so build one and reuse it.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    link_re: Regex,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            link_re: Regex::new(r"(https?://\S+)").unwrap(),
        }
    }

    /// Renders one record to its fragment.
    pub fn render_record(&self, record: &MessageRecord) -> String {
        let content = self.render_content(record);
        let timestamp = display_timestamp(record.timestamp());

        format!(
            "<p>\n    <b>{}</b> [{}]:\n    <br>\n    {}\n</p>\n<hr>\n",
            record.author(),
            timestamp,
            content
        )
    }

    /// Renders all records of a document, concatenating their fragments.
    ///
    /// `source` only labels the log line.
    pub fn render_records(&self, records: &[MessageRecord], source: &str) -> String {
        let mut html = String::with_capacity(records.len() * 128);
        for record in records {
            html.push_str(&self.render_record(record));
        }
        debug!(source, records = records.len(), bytes = html.len(), "rendered document");
        html
    }

    /// Applies mention, link and reaction transforms to the content.
    pub fn render_content(&self, record: &MessageRecord) -> String {
        let mut content = record.content().to_string();

        for id in record.mentions() {
            let placeholder = format!("<@{id}>");
            if content.contains(&placeholder) {
                content = content.replace(&placeholder, &format!("<b>@{id}</b>"));
            }
        }

        let mut content = self
            .link_re
            .replace_all(&content, r#"<a href="$1">$1</a>"#)
            .into_owned();

        if !record.reactions().is_empty() {
            content.push_str("<br>Reactions: ");
            content.push_str(&format_reactions(record.reactions()));
        }

        content
    }
}

/// Formats reactions as space-separated `label: count` pairs.
fn format_reactions(reactions: &[Reaction]) -> String {
    let mut out = String::new();
    for (i, reaction) in reactions.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}: {}", reaction.label, reaction.count);
    }
    out
}
