//! Error types for the service code generator.
//!
//! A single error hierarchy shared by every crate in the workspace. Variants
//! carry enough context to name the offending schema file, template or option.
//!
//! # Examples
//!
//! ```
//! use svcgen_core::{Error, Result};
//!
//! fn require_name(file: &str, name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::MalformedSchema {
//!             file: file.to_string(),
//!             reason: "service without a name".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_name("search.proto", "").unwrap_err();
//! assert!(err.is_schema_error());
//! ```

use thiserror::Error;

/// Main error type for the service code generator.
#[derive(Error, Debug)]
pub enum Error {
    /// Schema input could not be ingested.
    ///
    /// Always fatal: the namespace table would be incomplete, so no partial
    /// output is produced.
    #[error("Malformed schema in '{file}': {reason}")]
    MalformedSchema {
        /// Name of the schema file that failed validation
        file: String,
        /// What is wrong with it
        reason: String,
    },

    /// A file selected for generation is not part of the input set.
    #[error("File to generate is not among the input schema files: {file}")]
    UnknownFileToGenerate {
        /// Name of the missing schema file
        file: String,
    },

    /// Template registration or rendering failed.
    #[error("Template '{template}' failed: {message}")]
    TemplateError {
        /// Name of the template
        template: String,
        /// Description of the failure
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` if this error comes from malformed schema input.
    ///
    /// # Examples
    ///
    /// ```
    /// use svcgen_core::Error;
    ///
    /// let err = Error::UnknownFileToGenerate {
    ///     file: "missing.proto".to_string(),
    /// };
    /// assert!(err.is_schema_error());
    /// ```
    #[must_use]
    pub const fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedSchema { .. } | Self::UnknownFileToGenerate { .. }
        )
    }

    /// Returns `true` if this is a template error.
    ///
    /// # Examples
    ///
    /// ```
    /// use svcgen_core::Error;
    ///
    /// let err = Error::TemplateError {
    ///     template: "java/contract".to_string(),
    ///     message: "missing field".to_string(),
    /// };
    /// assert!(err.is_template_error());
    /// ```
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use svcgen_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "bad option".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. } | Self::InvalidArgument(_))
    }
}

/// Result type alias used throughout the workspace.
///
/// # Examples
///
/// ```
/// use svcgen_core::{Error, Result};
///
/// fn check_mode(mode: &str) -> Result<()> {
///     match mode {
///         "sync" | "async" => Ok(()),
///         other => Err(Error::InvalidArgument(format!("unknown mode: {other}"))),
///     }
/// }
///
/// assert!(check_mode("sync").is_ok());
/// assert!(check_mode("eventual").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
