//! Core types, options and errors for the service code generator.
//!
//! This crate provides the foundational types used across the workspace:
//! - The schema data model (`SchemaFile`, `ServiceSchema`, `MethodSchema`)
//! - The error hierarchy shared by every crate
//! - Generator options parsed from `key=value` strings
//! - CLI value types

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;

pub mod cli;
pub mod options;
pub mod schema;

pub use error::{Error, Result};
pub use options::GeneratorOptions;
pub use schema::{FileOptions, MessageSchema, MethodSchema, SchemaFile, ServiceSchema, TypeRef};
