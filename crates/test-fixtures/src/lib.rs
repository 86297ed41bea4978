//! Test fixture loader for lexvec document sets and golden filter cases.
//!
//! Fixture files live in the workspace-level `test-fixtures/` directory and
//! are loaded the same way from any crate's tests.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

/// Subdirectory that marks the fixture data root, so the loader doesn't
/// stop at this crate's own directory.
const MARKER: &str = "documents";

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join(MARKER).exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as a raw string (TOML configs and the like).
pub fn load_fixture_text(relative_path: &str) -> String {
    let path = fixtures_root().join(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// A document set. Documents stay raw JSON so this crate doesn't depend on
/// the document model; callers deserialize them into `Document`.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSet {
    pub description: String,
    pub documents: Vec<serde_json::Value>,
}

/// Load a document set by path relative to `test-fixtures/documents/`.
pub fn load_documents<T: DeserializeOwned>(name: &str) -> Vec<T> {
    let set: DocumentSet = load_fixture(&format!("{MARKER}/{name}"));
    set.documents
        .into_iter()
        .enumerate()
        .map(|(i, doc)| {
            serde_json::from_value(doc)
                .unwrap_or_else(|e| panic!("Document {} in {} is invalid: {}", i, name, e))
        })
        .collect()
}

/// One filter and the ids it must select, in insertion order.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterCase {
    pub name: String,
    pub filter: serde_json::Value,
    pub expected_ids: Vec<String>,
}

/// A golden file: which document set to load, then the cases to run.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterCaseFile {
    pub documents: String,
    pub cases: Vec<FilterCase>,
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

/// Load every golden filter file under `test-fixtures/golden/filters/`.
pub fn load_filter_cases() -> Vec<FilterCaseFile> {
    list_fixtures("golden/filters")
        .into_iter()
        .map(|path| {
            let content = std::fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
            serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
        })
        .collect()
}
