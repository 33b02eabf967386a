//! protoc plugin and command-line driver for the service code generator.
//!
//! Exposes the command implementations, descriptor ingestion and output
//! formatters so they can be tested without spawning the binary.

#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]

pub mod commands;
pub mod descriptor;
pub mod formatters;
