//! In-memory artifact tree.
//!
//! Holds generated artifacts keyed by [`ArtifactPath`]. Paths are unique:
//! two generators producing the same path is an error rather than a silent
//! overwrite.

use crate::types::{ArtifactPath, FilesError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Generated artifacts, ordered by path.
///
/// # Examples
///
/// ```
/// use svcgen_files::ArtifactTree;
///
/// let mut tree = ArtifactTree::new();
/// tree.add_file("com/acme/SearchService.java", "public interface SearchService {}\n").unwrap();
///
/// assert!(tree.exists("com/acme/SearchService.java"));
/// assert_eq!(tree.directories(), ["com", "com/acme"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactTree {
    files: BTreeMap<ArtifactPath, String>,
}

impl ArtifactTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    /// Adds an artifact.
    ///
    /// # Errors
    ///
    /// Returns a path validation error, or [`FilesError::DuplicatePath`] if
    /// an artifact already exists at `path`.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Result<()> {
        let path = ArtifactPath::new(path)?;
        if self.files.contains_key(&path) {
            return Err(FilesError::DuplicatePath {
                path: path.as_str().to_string(),
            });
        }
        self.files.insert(path, content.into());
        Ok(())
    }

    /// Returns the content stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns a path validation error or [`FilesError::FileNotFound`].
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<&str> {
        let path = ArtifactPath::new(path)?;
        self.files
            .get(&path)
            .map(String::as_str)
            .ok_or_else(|| FilesError::FileNotFound {
                path: path.as_str().to_string(),
            })
    }

    /// Returns `true` if an artifact exists at `path`.
    #[must_use]
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        ArtifactPath::new(path)
            .ok()
            .is_some_and(|p| self.files.contains_key(&p))
    }

    /// Returns the number of artifacts.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the tree holds no artifacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns the total content size in bytes.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.files.values().map(String::len).sum()
    }

    /// Returns every artifact path in sorted order.
    #[must_use]
    pub fn all_paths(&self) -> Vec<&ArtifactPath> {
        self.files.keys().collect()
    }

    /// Iterates over `(path, content)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&ArtifactPath, &str)> {
        self.files.iter().map(|(path, content)| (path, content.as_str()))
    }

    /// Returns every directory implied by the artifact paths, sorted.
    #[must_use]
    pub fn directories(&self) -> Vec<&str> {
        let mut dirs = BTreeSet::new();
        for path in self.files.keys() {
            let mut current = path.parent();
            while let Some(dir) = current {
                if !dirs.insert(dir) {
                    break;
                }
                current = dir.rfind('/').map(|pos| &dir[..pos]);
            }
        }
        dirs.into_iter().collect()
    }
}
