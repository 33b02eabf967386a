//! Builder that collects generated artifacts and writes them to disk.
//!
//! Errors from individual `add_file` calls are collected and reported by
//! [`FilesBuilder::build`], keeping the fluent chain intact.
//!
//! # Examples
//!
//! ```
//! use svcgen_codegen::{GeneratedCode, GeneratedFile};
//! use svcgen_files::FilesBuilder;
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile::new("com/acme/SearchService.java", "public interface SearchService {}\n"));
//! code.add_file(GeneratedFile::new("search_service.py", "class SearchService(object):\n"));
//!
//! let tree = FilesBuilder::from_generated_code(code).build().unwrap();
//! assert_eq!(tree.file_count(), 2);
//! assert!(tree.exists("search_service.py"));
//! ```

use crate::tree::ArtifactTree;
use crate::types::{FilesError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use svcgen_codegen::GeneratedCode;
use tracing::debug;

/// Collects artifacts into an [`ArtifactTree`].
#[derive(Debug, Default)]
pub struct FilesBuilder {
    tree: ArtifactTree,
    errors: Vec<FilesError>,
}

impl FilesBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder holding every file of a pipeline run.
    #[must_use]
    pub fn from_generated_code(code: GeneratedCode) -> Self {
        Self::new().add_files(code.into_iter().map(|file| (file.path, file.content)))
    }

    /// Adds one artifact. Invalid or duplicate paths are reported by
    /// [`build`](Self::build).
    #[must_use]
    pub fn add_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Err(e) = self.tree.add_file(path, content) {
            self.errors.push(e);
        }
        self
    }

    /// Adds several artifacts.
    #[must_use]
    pub fn add_files<P, C>(mut self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<Path>,
        C: Into<String>,
    {
        for (path, content) in files {
            if let Err(e) = self.tree.add_file(path, content) {
                self.errors.push(e);
            }
        }
        self
    }

    /// Returns the number of artifacts accepted so far.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.tree.file_count()
    }

    /// Finishes the tree.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded by `add_file`/`add_files`.
    pub fn build(self) -> Result<ArtifactTree> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        Ok(self.tree)
    }

    /// Finishes the tree and writes every artifact below `base_path`.
    ///
    /// A leading `~` expands to the home directory. Parent directories are
    /// created as needed and existing files are replaced. Nothing is
    /// written if the tree has errors.
    ///
    /// # Errors
    ///
    /// Returns the first recorded tree error, or [`FilesError::IoError`] if
    /// writing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use svcgen_files::FilesBuilder;
    /// use tempfile::TempDir;
    ///
    /// let out = TempDir::new().unwrap();
    /// FilesBuilder::new()
    ///     .add_file("META-INF/services/com.acme.SearchService", "com.acme.SearchDefaultBlockingImpl\n")
    ///     .build_and_export(out.path())
    ///     .unwrap();
    ///
    /// assert!(out.path().join("META-INF/services/com.acme.SearchService").is_file());
    /// ```
    pub fn build_and_export(self, base_path: impl AsRef<Path>) -> Result<ArtifactTree> {
        let tree = self.build()?;
        export(&tree, base_path)?;
        Ok(tree)
    }
}

/// Writes every artifact of `tree` below `base_path`.
///
/// # Errors
///
/// Returns [`FilesError::IoError`] if a directory or file cannot be
/// written, or [`FilesError::InvalidPath`] if `base_path` is not UTF-8.
pub fn export(tree: &ArtifactTree, base_path: impl AsRef<Path>) -> Result<()> {
    let base = expand_tilde(base_path.as_ref())?;
    if tree.is_empty() {
        return Ok(());
    }

    create_dir(&base)?;
    for dir in tree.directories() {
        create_dir(&base.join(dir))?;
    }

    for (path, content) in tree.iter() {
        let disk_path = base.join(path.as_path());
        write_file_atomic(&disk_path, content)?;
        debug!("Wrote {} ({} bytes)", disk_path.display(), content.len());
    }

    Ok(())
}

fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_str().ok_or_else(|| FilesError::InvalidPath {
        path: path.display().to_string(),
    })?;

    if path_str == "~" || path_str.starts_with("~/") {
        let home = dirs::home_dir().ok_or_else(|| FilesError::IoError {
            path: path_str.to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Cannot determine home directory",
            ),
        })?;
        match path_str.strip_prefix("~/") {
            Some(rest) => Ok(home.join(rest)),
            None => Ok(home),
        }
    } else {
        Ok(path.to_path_buf())
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| FilesError::IoError {
        path: dir.display().to_string(),
        source: e,
    })
}

fn write_file_atomic(disk_path: &Path, content: &str) -> Result<()> {
    // Sibling temp file so the rename stays on one filesystem
    let mut temp_name = disk_path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    fs::write(&temp_path, content).map_err(|e| FilesError::IoError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, disk_path).map_err(|e| FilesError::IoError {
        path: disk_path.display().to_string(),
        source: e,
    })
}
