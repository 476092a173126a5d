//! Batch conversion of a directory tree of exports to HTML.
//!
//! Every `.json` file under the input directory is decoded, rendered and
//! written to the same relative location under the output directory, with
//! the extension swapped:
//!
//! ```text
//! input/a/b.json  ->  output/a/b.html
//! input/c.JSON    ->  output/c.html
//! ```
//!
//! Files are processed one at a time in sorted order. A file that cannot be
//! read, holds no records or cannot be written is logged and skipped; it
//! never stops the run.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatview::config::ConvertConfig;
//! use chatview::convert::convert_tree;
//! use chatview::progress::stdout_progress;
//! use std::path::Path;
//!
//! let summary = convert_tree(
//!     Path::new("exports"),
//!     Path::new("html"),
//!     &ConvertConfig::default(),
//!     &stdout_progress(),
//! )?;
//! println!("{} of {} files written", summary.written, summary.discovered);
//! # Ok::<(), chatview::ChatviewError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::ConvertConfig;
use crate::decoder::StreamDecoder;
use crate::discovery::find_files;
use crate::error::{ChatviewError, Result};
use crate::progress::{Progress, ProgressCallback};
use crate::render::HtmlRenderer;

/// Counters for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Matching files found under the input directory
    pub discovered: usize,

    /// Files rendered and written
    pub written: usize,

    /// Files skipped because they could not be read or held no records
    pub empty: usize,

    /// Files whose output could not be written
    pub failed: usize,

    /// Records rendered across all written files
    pub records: usize,
}

impl ConvertSummary {
    /// Returns `true` if the input tree had no matching files.
    pub fn is_empty(&self) -> bool {
        self.discovered == 0
    }
}

/// Where `source` (found under `input`) is written under `output`.
pub fn output_path_for(source: &Path, input: &Path, output: &Path, extension: &str) -> PathBuf {
    let relative = source.strip_prefix(input).unwrap_or(source);
    output.join(relative).with_extension(extension)
}

/// Converts every matching file under `input` into HTML under `output`.
///
/// `progress` is called once after each file, skipped or not. An `input`
/// that is missing or not a directory has no matching files, so the summary
/// comes back empty.
///
/// # Errors
///
/// Per-file problems are logged, counted in the summary and never returned.
pub fn convert_tree(
    input: &Path,
    output: &Path,
    config: &ConvertConfig,
    progress: &ProgressCallback,
) -> Result<ConvertSummary> {
    let files = if input.is_dir() {
        find_files(input, &config.input_extension)
    } else {
        Vec::new()
    };
    let mut summary = ConvertSummary {
        discovered: files.len(),
        ..ConvertSummary::default()
    };

    if files.is_empty() {
        info!(input = %input.display(), "no matching files");
        return Ok(summary);
    }

    let decoder = StreamDecoder::with_config(config.decoder);
    let renderer = HtmlRenderer::new();

    for (index, source) in files.iter().enumerate() {
        let target = output_path_for(source, input, output, &config.output_extension);

        match convert_file(&decoder, &renderer, source, &target) {
            Ok(records) => {
                summary.written += 1;
                summary.records += records;
            }
            Err(err) if err.is_no_records() || err.is_read() => {
                warn!("{err}");
                summary.empty += 1;
            }
            Err(err) => {
                warn!("{err}");
                summary.failed += 1;
            }
        }

        progress(Progress::new(index + 1, files.len(), source.clone()));
    }

    info!(
        written = summary.written,
        empty = summary.empty,
        failed = summary.failed,
        "conversion finished"
    );

    Ok(summary)
}

/// Decodes `source`, renders it and writes `target`. Returns the record count.
fn convert_file(
    decoder: &StreamDecoder,
    renderer: &HtmlRenderer,
    source: &Path,
    target: &Path,
) -> Result<usize> {
    let outcome = decoder.decode_file(source)?;
    if outcome.is_empty() {
        return Err(ChatviewError::no_records(source));
    }

    let html = renderer.render_records(&outcome.records, &source.display().to_string());

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| ChatviewError::write(parent, e))?;
    }
    fs::write(target, html).map_err(|e| ChatviewError::write(target, e))?;

    Ok(outcome.len())
}
