//! Output types of code generation.
//!
//! Every generator produces [`GeneratedFile`] values: a relative path and
//! the textual content to place there. The pipeline collects them into a
//! [`GeneratedCode`] which the caller hands to a writer.
//!
//! # Examples
//!
//! ```
//! use svcgen_codegen::{GeneratedCode, GeneratedFile};
//!
//! let file = GeneratedFile::new("com/acme/SearchService.java", "public interface SearchService {}\n");
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(file);
//!
//! assert_eq!(code.file_count(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Result of one pipeline run containing all generated files.
///
/// Files keep the order in which generators emitted them.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::GeneratedCode;
///
/// let code = GeneratedCode::new();
/// assert_eq!(code.file_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Generated files with paths and contents
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    /// Creates a new empty generated code container.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a generated file to the collection.
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Appends every file of `files`, preserving their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use svcgen_codegen::{GeneratedCode, GeneratedFile};
    ///
    /// let mut code = GeneratedCode::new();
    /// code.extend([
    ///     GeneratedFile::new("a.py", ""),
    ///     GeneratedFile::new("b.py", ""),
    /// ]);
    /// assert_eq!(code.paths().collect::<Vec<_>>(), ["a.py", "b.py"]);
    /// ```
    pub fn extend(&mut self, files: impl IntoIterator<Item = GeneratedFile>) {
        self.files.extend(files);
    }

    /// Returns the number of generated files.
    #[inline]
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns an iterator over the generated files.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Returns an iterator over the generated file paths.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    /// Looks up a generated file by its path.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

impl Default for GeneratedCode {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoIterator for GeneratedCode {
    type Item = GeneratedFile;
    type IntoIter = std::vec::IntoIter<GeneratedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

/// A single generated artifact with path and content.
///
/// The path is relative and uses `/` as separator regardless of platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Relative path where the file should be written
    pub path: String,
    /// File content
    pub content: String,
}

impl GeneratedFile {
    /// Creates a generated file.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_default_is_empty() {
        let code = GeneratedCode::default();
        assert_eq!(code.file_count(), 0);
        assert!(code.files().next().is_none());
    }

    #[test]
    fn test_find_by_path() {
        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile::new("x/Y.java", "class Y {}"));
        assert_eq!(code.find("x/Y.java").map(|f| f.content.as_str()), Some("class Y {}"));
        assert!(code.find("x/Z.java").is_none());
    }

    #[test]
    fn test_into_iter_preserves_order() {
        let mut code = GeneratedCode::new();
        code.extend([GeneratedFile::new("1", ""), GeneratedFile::new("2", "")]);
        let paths: Vec<String> = code.into_iter().map(|f| f.path).collect();
        assert_eq!(paths, ["1", "2"]);
    }

    #[test]
    fn test_serialization_shape() {
        let file = GeneratedFile::new("a.py", "pass\n");
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["path"], "a.py");
        assert_eq!(json["content"], "pass\n");
    }
}
