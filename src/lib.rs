//! # chatview
//!
//! A Rust library for turning JSON chat exports into readable HTML.
//!
//! ## Overview
//!
//! Chat exports from bots and scrapers are rarely one clean JSON document.
//! chatview reads whatever is in the file (a single array, objects written
//! back to back, comma-joined fragments, a document wrapped in one big quoted
//! string, stray bytes in between) and recovers every message object it can.
//!
//! On top of the decoder sit:
//! - an HTML renderer (mentions, links, reaction counts)
//! - a batch converter that mirrors a directory tree of exports as HTML
//! - a viewer core with a render cache, a persisted session and text search
//!
//! ## Quick Start
//!
//! ```rust
//! use chatview::prelude::*;
//!
//! let outcome = StreamDecoder::new().decode_str(
//!     r#"{"author":"ana","content":"hi <@7>","mentions":[7]}{"author":"bo","content":"yo"}"#,
//!     "inline",
//! );
//! let html = HtmlRenderer::new().render_records(&outcome.records, "inline");
//!
//! assert_eq!(outcome.records.len(), 2);
//! assert!(html.contains("<b>@7</b>"));
//! ```
//!
//! ## Batch conversion
//!
//! ```rust,no_run
//! use chatview::prelude::*;
//! use std::path::Path;
//!
//! let summary = convert_tree(
//!     Path::new("exports"),
//!     Path::new("html_output"),
//!     &ConvertConfig::default(),
//!     &stdout_progress(),
//! )?;
//! println!("{} files written", summary.written);
//! # Ok::<(), ChatviewError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`decoder`] - tolerant stream decoder ([`StreamDecoder`], [`DecodeOutcome`])
//! - [`record`] - the decoded message ([`MessageRecord`])
//! - [`render`] - HTML fragments ([`HtmlRenderer`])
//! - [`convert`] - directory tree conversion ([`convert::convert_tree`])
//! - [`discovery`] - recursive, sorted file discovery
//! - [`progress`] - per-file progress callbacks
//! - `cache` - render cache keyed by path hash (feature `viewer`)
//! - `viewer` - session, open documents and search (feature `viewer`)
//! - `cli`, `logging` - binary support (feature `cli`)
//! - [`config`] - configuration structs
//! - [`error`] - unified error type ([`ChatviewError`], [`Result`])
//! - [`prelude`] - convenient re-exports

pub mod config;
pub mod convert;
pub mod decoder;
pub mod discovery;
pub mod error;
pub mod progress;
pub mod record;
pub mod render;

#[cfg(feature = "viewer")]
pub mod cache;
#[cfg(feature = "viewer")]
pub mod viewer;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod logging;

// Re-export the main types at the crate root for convenience
pub use decoder::{DecodeOutcome, StreamDecoder};
pub use error::{ChatviewError, Result};
pub use record::MessageRecord;
pub use render::HtmlRenderer;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatview::prelude::*;
/// ```
pub mod prelude {
    pub use crate::record::{MessageRecord, Reaction, Timestamp};

    pub use crate::error::{ChatviewError, Result};

    pub use crate::decoder::{DecodeOutcome, Diagnostic, DiagnosticKind, StreamDecoder};

    pub use crate::render::HtmlRenderer;

    pub use crate::config::{ConvertConfig, DecoderConfig};

    pub use crate::convert::{ConvertSummary, convert_tree};

    pub use crate::progress::{Progress, ProgressCallback, no_progress, stdout_progress};

    #[cfg(feature = "viewer")]
    pub use crate::cache::{RenderCache, RenderOrigin, Rendered};

    #[cfg(feature = "viewer")]
    pub use crate::config::ViewerConfig;

    #[cfg(feature = "viewer")]
    pub use crate::viewer::{OpenDocument, SearchOutcome, Viewer};
}
