//! Path and error types for the artifact tree.
//!
//! Generated artifact paths are always relative and use forward slashes,
//! so the same tree exports identically on every platform. [`ArtifactPath`]
//! enforces that at construction time.

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors raised while building or exporting an artifact tree.
#[derive(Error, Debug)]
pub enum FilesError {
    /// Path is empty, absolute or not valid UTF-8.
    #[error("Invalid artifact path: {path}")]
    InvalidPath {
        /// The rejected path
        path: String,
    },

    /// Path contains an empty, `.` or `..` component.
    #[error("Artifact path contains invalid components: {path}")]
    InvalidPathComponent {
        /// The rejected path
        path: String,
    },

    /// Two artifacts were given the same path.
    #[error("Artifact path produced more than once: {path}")]
    DuplicatePath {
        /// The conflicting path
        path: String,
    },

    /// No artifact exists at the path.
    #[error("Artifact not found: {path}")]
    FileNotFound {
        /// The missing path
        path: String,
    },

    /// Writing to the real filesystem failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        /// Disk path being written
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl FilesError {
    /// Returns `true` for path validation failures.
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath { .. } | Self::InvalidPathComponent { .. }
        )
    }

    /// Returns `true` if two artifacts collided.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicatePath { .. })
    }

    /// Returns `true` if the artifact does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Returns `true` for filesystem failures.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }
}

/// Result type for artifact tree operations.
pub type Result<T> = std::result::Result<T, FilesError>;

/// A validated, relative, forward-slash separated artifact path.
///
/// # Examples
///
/// ```
/// use svcgen_files::ArtifactPath;
///
/// let path = ArtifactPath::new("com/acme/SearchService.java").unwrap();
/// assert_eq!(path.file_name(), "SearchService.java");
/// assert_eq!(path.parent(), Some("com/acme"));
///
/// assert!(ArtifactPath::new("/etc/passwd").is_err());
/// assert!(ArtifactPath::new("com/../../escape").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactPath(String);

impl ArtifactPath {
    /// Validates `path` as an artifact path.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::InvalidPath`] if the path is empty, absolute or
    /// not UTF-8, and [`FilesError::InvalidPathComponent`] if any component
    /// is empty, `.` or `..`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = path.to_str().ok_or_else(|| FilesError::InvalidPath {
            path: path.display().to_string(),
        })?;

        let normalized = if cfg!(target_os = "windows") {
            raw.replace('\\', "/")
        } else {
            raw.to_string()
        };

        if normalized.is_empty() || normalized.starts_with('/') || path.is_absolute() {
            return Err(FilesError::InvalidPath { path: normalized });
        }

        if normalized
            .split('/')
            .any(|component| component.is_empty() || component == "." || component == "..")
        {
            return Err(FilesError::InvalidPathComponent { path: normalized });
        }

        Ok(Self(normalized))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path as a [`Path`].
    #[must_use]
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Returns the directory part, or `None` for a top-level artifact.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.0.rfind('/').map(|pos| &self.0[..pos])
    }

    /// Returns the last component.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rfind('/').map_or(self.0.as_str(), |pos| &self.0[pos + 1..])
    }
}

impl fmt::Display for ArtifactPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for ArtifactPath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}
