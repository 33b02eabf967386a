//! Service binding generation.
//!
//! Turns schema files into Java contracts, Java default implementations,
//! service registration metadata and Python bindings:
//! - [`resolver`] builds the message-to-namespace table for an invocation
//! - [`shape`] classifies each method into one of eight calling shapes
//! - [`synth`] produces signatures and call sites for a shape
//! - [`java`] and [`python`] render artifacts through Handlebars templates
//! - [`pipeline`] composes the enabled generators
//!
//! # Examples
//!
//! ```
//! use svcgen_codegen::pipeline;
//! use svcgen_core::{GeneratorOptions, MethodSchema, SchemaFile, ServiceSchema};
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
//! assert!(code.find("acme/SearchOuterClass/SearchService.java").is_some());
//! assert!(code.find("search_service.py").is_some());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod generator;
pub mod java;
pub mod naming;
pub mod pipeline;
pub mod python;
pub mod resolver;
pub mod shape;
pub mod synth;
pub mod template_engine;
pub mod types;

pub use generator::ServiceGenerator;
pub use pipeline::Pipeline;
pub use resolver::{NamespaceTable, ResolvedType, build_namespace_table, resolve_type};
pub use shape::{CallMode, GenerationShape};
pub use synth::{CallSite, Signature, synthesize_body, synthesize_declaration};
pub use types::{GeneratedCode, GeneratedFile};
