//! Artifact tree and filesystem export for generated service bindings.
//!
//! Generators emit relative paths; this crate validates them, rejects
//! collisions and writes the result below an output directory, creating
//! parent directories as needed.
//!
//! # Examples
//!
//! ```
//! use svcgen_codegen::pipeline;
//! use svcgen_core::{GeneratorOptions, MethodSchema, SchemaFile, ServiceSchema};
//! use svcgen_files::FilesBuilder;
//!
//! let file = SchemaFile::new("search.proto")
//!     .with_package("acme")
//!     .with_message("Query")
//!     .with_service(ServiceSchema::new("Search").with_method(MethodSchema::unary(
//!         "Find",
//!         ".acme.Query",
//!         ".acme.Query",
//!     )));
//!
//! let code = pipeline::run(&[file], &["search.proto"], &GeneratorOptions::default()).unwrap();
//! let tree = FilesBuilder::from_generated_code(code).build().unwrap();
//!
//! assert!(tree.exists("search_service.py"));
//! assert!(tree.directories().contains(&"META-INF/services"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod tree;
pub mod types;

pub use builder::{FilesBuilder, export};
pub use tree::ArtifactTree;
pub use types::{ArtifactPath, FilesError, Result};
