//! Unified error types for chatview.
//!
//! Every fallible operation in the crate returns [`ChatviewError`]. Most
//! anomalies in chat exports are *not* errors: malformed bytes are skipped by
//! the decoder and wrong-typed fields fall back to defaults. What remains here
//! are the failures a caller has to decide about:
//!
//! - a source file that cannot be read ([`ChatviewError::Read`])
//! - an output or cache file that cannot be written ([`ChatviewError::Write`])
//! - a file that decodes to zero messages ([`ChatviewError::NoRecords`])
//! - a broken session file ([`ChatviewError::Session`])

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A specialized [`Result`] type for chatview operations.
///
/// # Example
///
/// ```rust
/// use chatview::error::Result;
/// use chatview::MessageRecord;
///
/// fn load() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatviewError>;

/// The error type for all chatview operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatviewError {
    /// An I/O error without a more specific context.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A source file could not be opened or read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// The file that failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An output, cache or session file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// The file that failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The session file exists but does not hold a JSON list of paths.
    #[error("Invalid session file {}: {source}", path.display())]
    Session {
        /// The session file
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The file was readable but contained no message objects.
    #[error("No valid data found in {}", path.display())]
    NoRecords {
        /// The source file
        path: PathBuf,
    },

    /// A caller-supplied path or argument is unusable.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what's wrong
        message: String,
    },

    /// The cache directory could not be located or created.
    #[error("Cache directory unavailable: {message}")]
    CacheDir {
        /// Description of what's wrong
        message: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatviewError {
    /// Creates a read error for `path`.
    pub fn read(path: impl AsRef<Path>, source: io::Error) -> Self {
        ChatviewError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a write error for `path`.
    pub fn write(path: impl AsRef<Path>, source: io::Error) -> Self {
        ChatviewError::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a session error for `path`.
    pub fn session(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        ChatviewError::Session {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a "no records" error for `path`.
    pub fn no_records(path: impl AsRef<Path>) -> Self {
        ChatviewError::NoRecords {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ChatviewError::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a cache directory error.
    pub fn cache_dir(message: impl Into<String>) -> Self {
        ChatviewError::CacheDir {
            message: message.into(),
        }
    }

    /// Returns `true` if a source file could not be read.
    pub fn is_read(&self) -> bool {
        matches!(self, ChatviewError::Read { .. })
    }

    /// Returns `true` if the file decoded to zero records.
    pub fn is_no_records(&self) -> bool {
        matches!(self, ChatviewError::NoRecords { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = ChatviewError::from(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_read_error_display() {
        let err = ChatviewError::read(
            "/exports/general.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let display = err.to_string();
        assert!(display.contains("/exports/general.json"));
        assert!(display.contains("denied"));
        assert!(err.is_read());
    }

    #[test]
    fn test_write_error_is_not_read() {
        let err = ChatviewError::write("/out/a.html", io::Error::other("disk full"));
        assert!(matches!(err, ChatviewError::Write { .. }));
        assert!(!err.is_read());
        assert!(err.to_string().contains("Failed to write"));
    }

    #[test]
    fn test_no_records_display() {
        let err = ChatviewError::no_records("empty.json");
        assert!(err.is_no_records());
        assert_eq!(err.to_string(), "No valid data found in empty.json");
    }

    #[test]
    fn test_session_error_source() {
        use std::error::Error;
        let json_err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err = ChatviewError::session("session.json", json_err);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("session.json"));
    }

    #[test]
    fn test_invalid_input() {
        let err = ChatviewError::invalid_input("search query is empty");
        assert!(matches!(err, ChatviewError::InvalidInput { .. }));
        assert_eq!(err.to_string(), "Invalid input: search query is empty");
    }

    #[test]
    fn test_cache_dir_display() {
        let err = ChatviewError::cache_dir("no platform cache directory");
        assert!(err.to_string().contains("Cache directory unavailable"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ChatviewError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }
}
