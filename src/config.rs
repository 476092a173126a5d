//! Configuration types for decoding, conversion and the viewer.
//!
//! These are plain builder-style structs with no CLI framework dependency, so
//! library users can construct them directly.
//!
//! - [`DecoderConfig`] - how raw export text is decoded
//! - [`ConvertConfig`] - batch conversion settings
//! - [`ViewerConfig`] - where the viewer keeps its cache and session (requires
//!   the `viewer` feature)
//!
//! # Example
//!
//! ```rust
//! use chatview::config::ConvertConfig;
//!
//! let config = ConvertConfig::new().with_output_extension("htm");
//! assert_eq!(config.output_extension, "htm");
//! ```

use serde::{Deserialize, Serialize};

#[cfg(feature = "viewer")]
use std::path::{Path, PathBuf};

/// Configuration for the stream decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Unwrap a document that is itself one quoted JSON string (default: true)
    pub unwrap_quoted: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            unwrap_quoted: true,
        }
    }
}

impl DecoderConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the quoted-document unwrap.
    #[must_use]
    pub fn with_unwrap_quoted(mut self, enabled: bool) -> Self {
        self.unwrap_quoted = enabled;
        self
    }
}

/// Configuration for batch conversion of a directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Extension of source files, matched case-insensitively (default: `json`)
    pub input_extension: String,

    /// Extension given to written files (default: `html`)
    pub output_extension: String,

    pub decoder: DecoderConfig,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_extension: "json".to_string(),
            output_extension: "html".to_string(),
            decoder: DecoderConfig::default(),
        }
    }
}

impl ConvertConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source file extension (without dot).
    #[must_use]
    pub fn with_input_extension(mut self, ext: impl Into<String>) -> Self {
        self.input_extension = ext.into();
        self
    }

    /// Sets the output file extension (without dot).
    #[must_use]
    pub fn with_output_extension(mut self, ext: impl Into<String>) -> Self {
        self.output_extension = ext.into();
        self
    }

    /// Sets the decoder configuration.
    #[must_use]
    pub fn with_decoder(mut self, decoder: DecoderConfig) -> Self {
        self.decoder = decoder;
        self
    }
}

/// Configuration for the interactive viewer core.
///
/// Defaults live under the platform cache/data directories:
///
/// | Setting        | Default                                    |
/// |----------------|--------------------------------------------|
/// | `cache_dir`    | `<cache_dir>/chatview/html` or `./.cache`  |
/// | `session_file` | `<data_dir>/chatview/session.json` or `./session.json` |
#[cfg(feature = "viewer")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Directory holding one rendered artifact per opened source file
    pub cache_dir: PathBuf,

    /// JSON file listing the opened source files between sessions
    pub session_file: PathBuf,

    pub decoder: DecoderConfig,
}

#[cfg(feature = "viewer")]
impl Default for ViewerConfig {
    fn default() -> Self {
        let cache_dir = dirs::cache_dir()
            .map(|base| base.join("chatview").join("html"))
            .unwrap_or_else(|| PathBuf::from(".cache"));
        let session_file = dirs::data_dir()
            .map(|base| base.join("chatview").join("session.json"))
            .unwrap_or_else(|| PathBuf::from("session.json"));

        Self {
            cache_dir,
            session_file,
            decoder: DecoderConfig::default(),
        }
    }
}

#[cfg(feature = "viewer")]
impl ViewerConfig {
    /// Creates a new configuration with platform defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps both the cache and the session file under `root`.
    ///
    /// Handy for tests and portable installs.
    pub fn in_dir(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            cache_dir: root.join(".cache"),
            session_file: root.join("session.json"),
            decoder: DecoderConfig::default(),
        }
    }

    /// Sets the cache directory.
    #[must_use]
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Sets the session file.
    #[must_use]
    pub fn with_session_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.session_file = file.into();
        self
    }
}
