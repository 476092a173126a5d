//! Progress reporting for batch conversion.
//!
//! The converter pushes one [`Progress`] update after each file it finishes,
//! whether the file was written or skipped. Library users pass their own
//! [`ProgressCallback`], the CLI uses [`stdout_progress`].
//!
//! # Example
//!
//! ```rust
//! use chatview::progress::{Progress, ProgressCallback};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|progress| {
//!     println!("{:.1}% done", progress.percentage());
//! });
//!
//! for i in 0..4usize {
//!     callback(Progress::new(i + 1, 4, format!("chat-{i}.json")));
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

/// Where a batch conversion stands after finishing one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Progress {
    /// Number of files finished so far, including the current one.
    pub processed: usize,

    /// Number of files discovered for this run.
    pub total: usize,

    /// The file just finished.
    pub path: PathBuf,
}

impl Progress {
    pub fn new(processed: usize, total: usize, path: impl Into<PathBuf>) -> Self {
        Self {
            processed,
            total,
            path: path.into(),
        }
    }

    /// Returns the progress as a percentage (0.0 - 100.0).
    ///
    /// An empty run counts as complete.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatview::progress::Progress;
    ///
    /// assert_eq!(Progress::new(1, 4, "a.json").percentage(), 25.0);
    /// assert_eq!(Progress::new(0, 0, "").percentage(), 100.0);
    /// ```
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.processed as f64 / self.total as f64) * 100.0
        }
    }
}

impl std::fmt::Display for Progress {
    /// `Processed 3/8 files (37.50%)`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Processed {}/{} files ({:.2}%)",
            self.processed,
            self.total,
            self.percentage()
        )
    }
}

/// Callback type for receiving progress updates.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Creates a no-op progress callback.
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Creates a callback that prints one `Processed i/n files (pct%)` line per
/// update to stdout.
pub fn stdout_progress() -> ProgressCallback {
    Arc::new(|progress| println!("{progress}"))
}
