//! The generator seam.
//!
//! Every artifact kind (contracts, default implementations, registration
//! metadata, scripting bindings) is produced by one [`ServiceGenerator`].
//! The pipeline owns the enabled generators and calls each of them for
//! every selected schema file.

use crate::resolver::NamespaceTable;
use crate::types::GeneratedFile;
use std::fmt;
use svcgen_core::{Result, SchemaFile};

/// Produces artifacts for the services of one schema file.
///
/// Implementations must be pure functions of the file and the table: the
/// same inputs always yield the same files in the same order.
pub trait ServiceGenerator: fmt::Debug + Send + Sync {
    /// Stable identifier of the generator, used in logs and summaries.
    fn name(&self) -> &'static str;

    /// Generates the artifacts of every service declared in `file`.
    ///
    /// # Errors
    ///
    /// Returns an error if an artifact cannot be rendered.
    fn generate(&self, file: &SchemaFile, table: &NamespaceTable) -> Result<Vec<GeneratedFile>>;
}
