//! Persisted list of opened source files.
//!
//! The session file is a JSON array of absolute paths in the order they were
//! opened, e.g. `["/home/ana/exports/general.json"]`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ChatviewError, Result};

/// Reads the session at `path`. A missing file is an empty session.
pub fn load(path: &Path) -> Result<Vec<PathBuf>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no saved session");
            return Ok(Vec::new());
        }
        Err(e) => return Err(ChatviewError::read(path, e)),
    };

    serde_json::from_str(&content).map_err(|e| ChatviewError::session(path, e))
}

/// Writes `files` to `path`, creating the parent directory if needed.
pub fn save(path: &Path, files: &[PathBuf]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ChatviewError::write(parent, e))?;
    }

    let json = serde_json::to_string_pretty(files)?;
    let temp = path.with_extension("json.tmp");
    fs::write(&temp, json).map_err(|e| ChatviewError::write(&temp, e))?;
    fs::rename(&temp, path).map_err(|e| ChatviewError::write(path, e))?;

    debug!(path = %path.display(), files = files.len(), "saved session");
    Ok(())
}
