//! Integration tests for the viewer core: session, documents and search.

#![cfg(feature = "viewer")]

use std::fs;
use std::path::{Path, PathBuf};

use chatview::prelude::*;
use chatview::viewer::{Selection, plain_text};
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn config(&self) -> ViewerConfig {
        ViewerConfig::in_dir(self.dir.path().join("state"))
    }

    fn viewer(&self) -> Viewer {
        Viewer::new(self.config()).unwrap()
    }

    fn export(&self, rel: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join("exports").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, body).unwrap();
        path
    }

    fn exports(&self) -> PathBuf {
        self.dir.path().join("exports")
    }
}

#[test]
fn test_open_directory_twice_registers_once() {
    let ws = Workspace::new();
    ws.export("general.json", r#"{"author":"a"}"#);
    ws.export("2024/jan.json", r#"{"author":"b"}"#);
    let mut viewer = ws.viewer();

    let first = viewer.open_paths([ws.exports()]).unwrap();
    let second = viewer.open_paths([ws.exports()]).unwrap();

    assert_eq!(first.len(), 2);
    assert!(second.is_empty());
    assert_eq!(viewer.files(), first.as_slice());
    assert!(viewer.files().iter().all(|p| p.is_absolute()));
}

#[test]
fn test_dotted_path_is_the_same_file() {
    let ws = Workspace::new();
    let a = ws.export("a.json", r#"{"author":"a"}"#);
    ws.export("sub/b.json", r#"{"author":"b"}"#);
    let dotted = ws.exports().join("sub").join("..").join("a.json");
    let mut viewer = ws.viewer();

    viewer.open_paths([&a]).unwrap();
    assert!(viewer.open_paths([&dotted]).unwrap().is_empty());
    assert_eq!(viewer.files(), [a.clone()]);

    viewer.open_document(&dotted).unwrap();
    assert_eq!(viewer.document(&a).unwrap().path(), a);
    viewer.open_document(&a).unwrap();
    assert_eq!(viewer.documents().len(), 1);

    assert!(viewer.close_document(&dotted));
    assert!(viewer.documents().is_empty());

    let saved: Vec<PathBuf> =
        serde_json::from_str(&fs::read_to_string(ws.config().session_file).unwrap()).unwrap();
    assert_eq!(saved, [a]);
}

#[test]
fn test_explicit_file_and_directory_mix() {
    let ws = Workspace::new();
    let single = ws.export("one.json", r#"{"author":"a"}"#);
    ws.export("more/two.json", r#"{"author":"b"}"#);
    let mut viewer = ws.viewer();

    viewer.open_paths([&single]).unwrap();
    let added = viewer.open_paths([ws.exports()]).unwrap();

    assert_eq!(added, [ws.exports().join("more/two.json")]);
    assert_eq!(viewer.files().len(), 2);
    assert_eq!(viewer.files()[0], single);
}

#[test]
fn test_session_persists_across_viewers() {
    let ws = Workspace::new();
    let b = ws.export("b.json", r#"{"author":"b"}"#);
    let a = ws.export("a.json", r#"{"author":"a"}"#);

    let mut first = ws.viewer();
    first.open_paths([&b]).unwrap();
    first.open_paths([&a]).unwrap();

    let mut second = ws.viewer();
    assert_eq!(second.load_session().unwrap(), 2);
    assert_eq!(second.files(), [b, a]);
    assert!(second.documents().is_empty());
}

#[test]
fn test_session_file_is_plain_json_list() {
    let ws = Workspace::new();
    let a = ws.export("a.json", "{}");
    let mut viewer = ws.viewer();
    viewer.open_paths([&a]).unwrap();

    let saved: Vec<PathBuf> =
        serde_json::from_str(&fs::read_to_string(ws.config().session_file).unwrap()).unwrap();
    assert_eq!(saved, [a]);
}

#[test]
fn test_load_session_tolerates_missing_files() {
    let ws = Workspace::new();
    let a = ws.export("a.json", r#"{"author":"a"}"#);
    let mut viewer = ws.viewer();
    viewer.open_paths([&a]).unwrap();
    fs::remove_file(&a).unwrap();

    let mut restored = ws.viewer();
    assert_eq!(restored.load_session().unwrap(), 1);
    assert!(restored.open_document(&a).unwrap_err().is_read());
}

#[test]
fn test_clear_session_empties_everything() {
    let ws = Workspace::new();
    let a = ws.export("a.json", r#"{"author":"a"}"#);
    let mut viewer = ws.viewer();
    viewer.open_paths([&a]).unwrap();
    viewer.open_document(&a).unwrap();

    viewer.clear_session().unwrap();

    assert!(viewer.files().is_empty());
    assert!(viewer.documents().is_empty());
    assert_eq!(ws.viewer().load_session().unwrap(), 0);
}

#[test]
fn test_open_document_empty_file_reports_no_records() {
    let ws = Workspace::new();
    let junk = ws.export("junk.json", "nothing here");
    let mut viewer = ws.viewer();

    let err = viewer.open_document(&junk).unwrap_err();
    assert!(err.is_no_records());
    assert!(viewer.documents().is_empty());
}

#[test]
fn test_relative_and_absolute_paths_share_a_document() {
    let ws = Workspace::new();
    let a = ws.export("a.json", r#"{"author":"a"}"#);
    let mut viewer = ws.viewer();

    viewer.open_document(&a).unwrap();
    let cwd = std::env::current_dir().unwrap();
    if let Ok(relative) = a.strip_prefix(&cwd) {
        viewer.open_document(relative).unwrap();
    }
    assert_eq!(viewer.documents().len(), 1);
    assert!(viewer.document(&a).is_some());
}

#[test]
fn test_clear_cache_forces_fresh_render_for_every_path() {
    let ws = Workspace::new();
    let paths: Vec<PathBuf> = ["a.json", "b.json"]
        .iter()
        .map(|name| ws.export(name, r#"{"author":"x"}"#))
        .collect();
    let viewer = ws.viewer();

    for path in &paths {
        viewer.render(path).unwrap();
        assert!(viewer.render(path).unwrap().is_cached());
    }

    viewer.clear_cache_artifacts().unwrap();

    for path in &paths {
        assert_eq!(viewer.render(path).unwrap().origin, RenderOrigin::Fresh);
    }
}

#[test]
fn test_search_walks_matches_and_wraps() {
    let ws = Workspace::new();
    let chat = ws.export(
        "chat.json",
        r#"[{"author":"ana","content":"Deploy on Friday?"},
            {"author":"bo","content":"no deploy on fridays"},
            {"author":"cy","content":"ok"}]"#,
    );
    let mut viewer = ws.viewer();
    let doc = viewer.open_document(&chat).unwrap();

    assert_eq!(
        doc.plain_text(),
        "ana []:\nDeploy on Friday?\nbo []:\nno deploy on fridays\ncy []:\nok"
    );

    let first = doc.find_next("DEPLOY");
    assert_eq!(first, SearchOutcome::Found(Selection::new(8, 14)));
    assert_eq!(doc.selected_text(), "Deploy");

    assert!(matches!(doc.find_next("deploy"), SearchOutcome::Found(_)));
    assert_eq!(doc.selected_text(), "deploy");

    assert_eq!(doc.find_next("deploy"), first.selection().map(SearchOutcome::Wrapped).unwrap());

    assert!(matches!(doc.find_previous("friday"), SearchOutcome::Wrapped(_)));
    assert_eq!(doc.selected_text(), "friday");

    assert_eq!(doc.find_next("tuesday"), SearchOutcome::NoMatches);
    assert_eq!(doc.find_next(""), SearchOutcome::EmptyQuery);

    doc.clear_search();
    assert!(doc.selection().is_empty());
}

#[test]
fn test_plain_text_matches_document_view() {
    let ws = Workspace::new();
    let chat = ws.export("c.json", r#"{"author":"a","content":"x &amp; y"}"#);
    let mut viewer = ws.viewer();
    let html = viewer.render(&chat).unwrap().html;
    let doc = viewer.open_document(&chat).unwrap();
    assert_eq!(doc.plain_text(), plain_text(&html));
    assert!(doc.plain_text().ends_with("x & y"));
}

#[test]
fn test_closed_document_is_gone() {
    let ws = Workspace::new();
    let a = ws.export("a.json", r#"{"author":"a"}"#);
    let mut viewer = ws.viewer();
    viewer.open_document(&a).unwrap();

    assert!(viewer.close_document(Path::new(&a)));
    assert!(viewer.document(&a).is_none());
}
