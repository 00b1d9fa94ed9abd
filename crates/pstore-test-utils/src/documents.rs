//! [`TestDocuments`] builder for import, deletion, and settings files.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding document files for a test.
///
/// # Example
///
/// ```rust
/// use pstore_test_utils::TestDocuments;
/// use serde_json::json;
///
/// let docs = TestDocuments::new();
/// let path = docs.write_json("import.json", &json!({"/app/a": "1"}));
/// docs.assert_file_contains("import.json", "/app/a");
/// # let _ = path;
/// ```
pub struct TestDocuments {
    temp_dir: TempDir,
}

impl Default for TestDocuments {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDocuments {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `name` inside the directory, whether or not it exists.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `value` as pretty JSON to `name` and return its path.
    pub fn write_json(&self, name: &str, value: &serde_json::Value) -> PathBuf {
        let content = serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| panic!("write_json: failed to serialize {name}: {e}"));
        self.write_raw(name, &content)
    }

    /// Write `content` verbatim to `name` and return its path.
    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("write_raw: failed to write {}: {e}", path.display()));
        path
    }

    /// Read `name` back as text.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, name: &str) -> String {
        let path = self.path(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that the file `name` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, name: &str, content: &str) {
        let file_content = self.read(name);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            name,
            content,
            file_content
        );
    }
}
