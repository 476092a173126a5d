//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - global flags and the subcommand
//! - [`Command`] - batch conversion plus the viewer and debugging subcommands
//! - [`LogLevel`] - default verbosity for the stderr log
//!
//! The flags resolve into the plain config structs of [`crate::config`], so
//! the binary stays a thin layer over the library:
//!
//! ```rust
//! use chatview::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatview", "--cache-dir", "/tmp/c", "list"]);
//! assert_eq!(args.viewer_config().cache_dir, std::path::PathBuf::from("/tmp/c"));
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{ConvertConfig, DecoderConfig, ViewerConfig};

/// Convert and view JSON chat exports as HTML.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatview")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatview convert ./exports ./html_output
    chatview open ./exports general.json
    chatview search general.json \"release date\" --count 3
    chatview show general.json > general.html
    chatview decode broken.json")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Default log level (overridden by CHATVIEW_LOG)
    #[arg(long, global = true, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Directory for cached renderings
    #[arg(long, global = true, value_name = "DIR", env = "CHATVIEW_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// File listing the opened exports
    #[arg(long, global = true, value_name = "FILE", env = "CHATVIEW_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Treat a file that is one quoted JSON string as plain text
    #[arg(long, global = true)]
    pub no_unwrap: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Convert every .json file under INPUT_DIR to HTML under OUTPUT_DIR
    Convert {
        input_dir: PathBuf,
        output_dir: PathBuf,
    },

    /// Register files or directories in the session
    Open {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List the files registered in the session
    List,

    /// Print the rendered HTML of a file
    Show {
        file: PathBuf,

        /// Print the plain text a reader would see instead of HTML
        #[arg(long)]
        text: bool,
    },

    /// Find a phrase in a rendered file (case-insensitive, wraps around)
    Search {
        file: PathBuf,
        query: String,

        /// Search backwards from the end
        #[arg(long)]
        previous: bool,

        /// Number of search steps to take
        #[arg(long, default_value_t = 1, value_name = "N")]
        count: usize,
    },

    /// Delete all cached renderings
    ClearCache,

    /// Forget all registered files
    ClearSession,

    /// Print the records decoded from a file as JSON Lines
    Decode {
        file: PathBuf,

        /// Also print diagnostics for skipped values to stderr
        #[arg(long)]
        diagnostics: bool,
    },
}

impl Args {
    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig::new().with_unwrap_quoted(!self.no_unwrap)
    }

    pub fn convert_config(&self) -> ConvertConfig {
        ConvertConfig::new().with_decoder(self.decoder_config())
    }

    /// Platform defaults with `--cache-dir` and `--session-file` applied.
    pub fn viewer_config(&self) -> ViewerConfig {
        let mut config = ViewerConfig::new();
        if let Some(dir) = &self.cache_dir {
            config = config.with_cache_dir(dir);
        }
        if let Some(file) = &self.session_file {
            config = config.with_session_file(file);
        }
        config.decoder = self.decoder_config();
        config
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
