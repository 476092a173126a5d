//! Viewer core: the state behind a chat-export viewer front end.
//!
//! A [`Viewer`] keeps three things:
//!
//! - the ordered list of registered source files (the sidebar), persisted
//!   to the session file after every change
//! - the open documents (the tabs), each a rendering plus a search cursor
//! - a [`RenderCache`] so reopening an unchanged file skips decoding
//!
//! Front ends own presentation only. The CLI subcommands `open`, `list`,
//! `show`, `search`, `clear-cache` and `clear-session` map one-to-one onto
//! methods here.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatview::config::ViewerConfig;
//! use chatview::viewer::Viewer;
//!
//! let mut viewer = Viewer::new(ViewerConfig::default())?;
//! viewer.load_session()?;
//! let added = viewer.open_paths(["exports/"])?;
//!
//! if let Some(first) = added.first() {
//!     let doc = viewer.open_document(first)?;
//!     doc.find_next("hello");
//!     println!("{}", doc.selected_text());
//! }
//! # Ok::<(), chatview::ChatviewError>(())
//! ```

mod search;
pub mod session;

pub use search::{SearchOutcome, Selection, TextSearch, plain_text};

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cache::{RenderCache, RenderOrigin, Rendered};
use crate::config::ViewerConfig;
use crate::discovery::{absolute_path, find_json_files, has_extension};
use crate::error::Result;

/// A rendered source file with its own search state.
#[derive(Debug, Clone)]
pub struct OpenDocument {
    path: PathBuf,
    html: String,
    origin: RenderOrigin,
    search: TextSearch,
}

impl OpenDocument {
    pub fn new(path: impl Into<PathBuf>, rendered: Rendered) -> Self {
        let search = TextSearch::from_html(&rendered.html);
        Self {
            path: path.into(),
            html: rendered.html,
            origin: rendered.origin,
            search,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file name, as shown on a tab.
    pub fn title(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Whether the HTML came from the cache when the document was opened.
    pub fn origin(&self) -> RenderOrigin {
        self.origin
    }

    pub fn plain_text(&self) -> String {
        self.search.text()
    }

    pub fn find_next(&mut self, query: &str) -> SearchOutcome {
        self.search.find_next(query)
    }

    pub fn find_previous(&mut self, query: &str) -> SearchOutcome {
        self.search.find_previous(query)
    }

    /// Collapses the current selection.
    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn selection(&self) -> Selection {
        self.search.selection()
    }

    pub fn selected_text(&self) -> String {
        self.search.selected_text()
    }

    pub fn match_count(&self, query: &str) -> usize {
        self.search.count(query)
    }
}

/// Registered files, open documents and the render cache.
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
    cache: RenderCache,
    files: Vec<PathBuf>,
    documents: Vec<OpenDocument>,
}

impl Viewer {
    /// Creates a viewer with an empty session.
    ///
    /// The cache directory is created if missing. Call
    /// [`load_session`](Self::load_session) to restore saved files.
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let cache = RenderCache::in_dir(&config.cache_dir, config.decoder)?;
        Ok(Self {
            config,
            cache,
            files: Vec::new(),
            documents: Vec::new(),
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Registered source files, in the order they were added.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn documents(&self) -> &[OpenDocument] {
        &self.documents
    }

    pub fn document(&self, path: &Path) -> Option<&OpenDocument> {
        let path = absolute_path(path).ok()?;
        self.documents.iter().find(|d| d.path == path)
    }

    /// Registers files and directories.
    ///
    /// Directories are searched recursively for `.json` files. Plain files
    /// are accepted only with a `.json` extension. Paths are made absolute,
    /// with `.` and `..` removed, and already registered ones are ignored. The session is saved
    /// afterwards.
    ///
    /// Returns the paths that were newly registered, in order.
    pub fn open_paths<I, P>(&mut self, paths: I) -> Result<Vec<PathBuf>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut candidates = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if path.is_dir() {
                candidates.extend(find_json_files(path));
            } else if path.is_file() && has_extension(path, "json") {
                candidates.push(path.to_path_buf());
            } else {
                warn!(path = %path.display(), "ignoring path: not a directory or .json file");
            }
        }

        let mut added = Vec::new();
        for candidate in candidates {
            let absolute = absolute_path(&candidate)?;
            if self.register(absolute.clone()) {
                added.push(absolute);
            }
        }

        info!(added = added.len(), total = self.files.len(), "registered files");
        self.save_session()?;
        Ok(added)
    }

    /// Returns the HTML for `path`, from the cache when it is fresh.
    pub fn render(&self, path: &Path) -> Result<Rendered> {
        self.cache.get_or_render(path)
    }

    /// Opens `path` as a document, reusing it if it is already open.
    pub fn open_document(&mut self, path: &Path) -> Result<&mut OpenDocument> {
        let path = absolute_path(path)?;

        let index = match self.documents.iter().position(|d| d.path == path) {
            Some(index) => index,
            None => {
                let rendered = self.cache.get_or_render(&path)?;
                debug!(path = %path.display(), origin = ?rendered.origin, "opened document");
                self.documents.push(OpenDocument::new(path, rendered));
                self.documents.len() - 1
            }
        };

        Ok(&mut self.documents[index])
    }

    /// Closes the document for `path`. Returns `false` if it was not open.
    pub fn close_document(&mut self, path: &Path) -> bool {
        let Ok(path) = absolute_path(path) else {
            return false;
        };
        let before = self.documents.len();
        self.documents.retain(|d| d.path != path);
        self.documents.len() != before
    }

    /// Deletes every cached rendering. Open documents are kept as they are.
    pub fn clear_cache_artifacts(&self) -> Result<()> {
        self.cache.clear()?;
        info!(dir = %self.config.cache_dir.display(), "cache cleared");
        Ok(())
    }

    /// Writes the registered file list to the session file.
    pub fn save_session(&self) -> Result<()> {
        session::save(&self.config.session_file, &self.files)
    }

    /// Replaces the registered files with the saved session.
    ///
    /// Files are registered, not rendered. Returns how many were restored.
    pub fn load_session(&mut self) -> Result<usize> {
        let saved = session::load(&self.config.session_file)?;
        self.files.clear();
        for path in saved {
            self.register(path);
        }
        debug!(files = self.files.len(), "restored session");
        Ok(self.files.len())
    }

    /// Forgets every registered file and open document, then saves the
    /// empty session.
    pub fn clear_session(&mut self) -> Result<()> {
        self.files.clear();
        self.documents.clear();
        self.save_session()?;
        info!("session cleared");
        Ok(())
    }

    /// Adds `path` unless already registered.
    fn register(&mut self, path: PathBuf) -> bool {
        if self.files.contains(&path) {
            return false;
        }
        self.files.push(path);
        true
    }
}
