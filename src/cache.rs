//! Render cache for the viewer.
//!
//! Rendering a large export is the slow part of opening it, so each rendered
//! document is kept as an artifact keyed by the SHA-256 of the source's
//! absolute path. An artifact is served while it is at least as new as its
//! source file; otherwise the source is decoded and rendered again and the
//! artifact overwritten.
//!
//! The key is derived from the path, not the content. Two copies of the same
//! export at different paths get two artifacts.
//!
//! Storage goes through [`ArtifactStore`]. [`DirectoryStore`] keeps one
//! `<hex>.html` file per source in a directory and writes through a temp file
//! plus rename, so a reader never sees a half-written artifact. Clearing it
//! removes those files only; the directory may be shared with other data.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::config::DecoderConfig;
use crate::decoder::StreamDecoder;
use crate::discovery::absolute_path;
use crate::error::{ChatviewError, Result};
use crate::render::HtmlRenderer;

/// Extension of artifact files in a [`DirectoryStore`].
pub const ARTIFACT_EXTENSION: &str = "html";

/// A stored rendering and when it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub html: String,
    pub stored_at: SystemTime,
}

/// Keyed storage for rendered documents.
pub trait ArtifactStore {
    /// Returns the artifact stored under `key`, or `None` if there is none.
    fn get(&self, key: &str) -> Result<Option<Artifact>>;

    /// Stores `html` under `key`, replacing any previous artifact.
    fn put(&self, key: &str, html: &str) -> Result<()>;

    /// Removes every artifact.
    fn clear(&self) -> Result<()>;
}

/// Artifact store backed by a directory of `<key>.html` files.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    /// Opens the store, creating `dir` if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            ChatviewError::cache_dir(format!("cannot create {}: {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the artifact for `key`.
    pub fn artifact_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{ARTIFACT_EXTENSION}"))
    }
}

impl ArtifactStore for DirectoryStore {
    fn get(&self, key: &str) -> Result<Option<Artifact>> {
        let path = self.artifact_path(key);
        let stored_at = match fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(time) => time,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ChatviewError::read(&path, e)),
        };
        let html = fs::read_to_string(&path).map_err(|e| ChatviewError::read(&path, e))?;
        Ok(Some(Artifact { html, stored_at }))
    }

    fn put(&self, key: &str, html: &str) -> Result<()> {
        let path = self.artifact_path(key);
        let temp = self.dir.join(format!("{key}.{ARTIFACT_EXTENSION}.tmp"));

        fs::create_dir_all(&self.dir).map_err(|e| ChatviewError::write(&self.dir, e))?;
        fs::write(&temp, html).map_err(|e| ChatviewError::write(&temp, e))?;
        fs::rename(&temp, &path).map_err(|e| ChatviewError::write(&path, e))?;
        Ok(())
    }

    /// Removes the artifact files (and leftover temp files) only. Anything
    /// else in the directory is left alone.
    fn clear(&self) -> Result<()> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return fs::create_dir_all(&self.dir)
                    .map_err(|e| ChatviewError::write(&self.dir, e));
            }
            Err(e) => return Err(ChatviewError::read(&self.dir, e)),
        };

        let mut removed = 0;
        for entry in entries {
            let entry = entry.map_err(|e| ChatviewError::read(&self.dir, e))?;
            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_file()) && is_artifact_file(&path) {
                fs::remove_file(&path).map_err(|e| ChatviewError::write(&path, e))?;
                removed += 1;
            }
        }
        debug!(dir = %self.dir.display(), removed, "removed cached artifacts");
        Ok(())
    }
}

/// `<key>.html` or an interrupted `<key>.html.tmp`.
fn is_artifact_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let artifact = format!(".{ARTIFACT_EXTENSION}");
    let temp = format!(".{ARTIFACT_EXTENSION}.tmp");
    name.ends_with(&artifact) || name.ends_with(&temp)
}

/// Whether a rendering was served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOrigin {
    Cache,
    Fresh,
}

/// HTML for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub origin: RenderOrigin,
}

impl Rendered {
    pub fn is_cached(&self) -> bool {
        self.origin == RenderOrigin::Cache
    }
}

/// Cache key for `path`: lowercase hex SHA-256 of its absolute form, with
/// `.` and `..` removed.
///
/// # Errors
///
/// Fails only if `path` is relative and the working directory is unknown.
pub fn cache_key(path: &Path) -> Result<String> {
    let absolute = absolute_path(path)?;
    Ok(sha256_hex(absolute.to_string_lossy().as_bytes()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Decode-and-render front end with a freshness-checked artifact store.
///
/// # Example
///
/// ```rust,no_run
/// use chatview::cache::RenderCache;
/// use chatview::config::DecoderConfig;
/// use std::path::Path;
///
/// let cache = RenderCache::in_dir("/tmp/chatview-cache", DecoderConfig::default())?;
/// let first = cache.get_or_render(Path::new("chat.json"))?;
/// let second = cache.get_or_render(Path::new("chat.json"))?;
/// assert!(second.is_cached());
/// assert_eq!(first.html, second.html);
/// # Ok::<(), chatview::ChatviewError>(())
/// ```
#[derive(Debug)]
pub struct RenderCache<S = DirectoryStore> {
    store: S,
    decoder: StreamDecoder,
    renderer: HtmlRenderer,
}

impl RenderCache<DirectoryStore> {
    /// Creates a cache storing artifacts in `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>, decoder: DecoderConfig) -> Result<Self> {
        Ok(Self::with_store(DirectoryStore::open(dir)?, decoder))
    }
}

impl<S: ArtifactStore> RenderCache<S> {
    pub fn with_store(store: S, decoder: DecoderConfig) -> Self {
        Self {
            store,
            decoder: StreamDecoder::with_config(decoder),
            renderer: HtmlRenderer::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the HTML for `path`, rendering it if the artifact is missing
    /// or older than the source.
    ///
    /// # Errors
    ///
    /// - [`ChatviewError::Read`] if the source cannot be read
    /// - [`ChatviewError::NoRecords`] if it holds no message records
    ///
    /// A failure to store the fresh artifact is logged, not returned.
    pub fn get_or_render(&self, path: &Path) -> Result<Rendered> {
        let absolute = absolute_path(path)?;
        let key = cache_key(&absolute)?;
        let modified = fs::metadata(&absolute)
            .and_then(|m| m.modified())
            .map_err(|e| ChatviewError::read(&absolute, e))?;

        match self.store.get(&key) {
            Ok(Some(artifact)) if artifact.stored_at >= modified => {
                debug!(path = %absolute.display(), "serving cached rendering");
                return Ok(Rendered {
                    html: artifact.html,
                    origin: RenderOrigin::Cache,
                });
            }
            Ok(_) => {}
            Err(err) => warn!("ignoring unreadable cache artifact: {err}"),
        }

        let html = self.render(&absolute)?;
        if let Err(err) = self.store.put(&key, &html) {
            warn!("failed to store rendering of {}: {err}", absolute.display());
        }

        Ok(Rendered {
            html,
            origin: RenderOrigin::Fresh,
        })
    }

    /// Decodes and renders `path`, bypassing the store.
    pub fn render(&self, path: &Path) -> Result<String> {
        let outcome = self.decoder.decode_file(path)?;
        if outcome.is_empty() {
            return Err(ChatviewError::no_records(path));
        }
        Ok(self
            .renderer
            .render_records(&outcome.records, &path.display().to_string()))
    }

    /// Deletes every stored artifact.
    pub fn clear(&self) -> Result<()> {
        self.store.clear()
    }
}
