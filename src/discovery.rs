//! Recursive discovery of export files.
//!
//! Both the batch converter and the viewer look for files by extension under
//! a directory tree. Matching is case-insensitive (`a.JSON` counts) and the
//! result is sorted, so runs over the same tree always visit files in the
//! same order.
//!
//! [`absolute_path`] gives every discovered or user-supplied path one
//! canonical spelling, so the same file is never registered or cached twice.

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// Makes `path` absolute and drops `.` and `..` components.
///
/// Purely lexical: symlinks are not resolved and the file need not exist.
/// `..` at the root stays at the root.
///
/// ```rust
/// use chatview::discovery::absolute_path;
/// use std::path::Path;
///
/// let path = absolute_path(Path::new("/exports/2024/../general.json")).unwrap();
/// # #[cfg(unix)]
/// assert_eq!(path, Path::new("/exports/general.json"));
/// ```
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Returns `true` if `path` has the extension `ext`, ignoring ASCII case.
///
/// `ext` is given without the leading dot.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Collects every regular file under `root` with extension `ext`, sorted.
///
/// Entries that cannot be read (permission errors, broken links) are logged
/// and skipped. A missing `root` yields an empty list.
pub fn find_files(root: &Path, ext: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(root = %root.display(), "skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && has_extension(entry.path(), ext))
        .map(walkdir::DirEntry::into_path)
        .collect();

    files.sort();
    files
}

/// Collects JSON export files under `root`.
pub fn find_json_files(root: &Path) -> Vec<PathBuf> {
    find_files(root, "json")
}
