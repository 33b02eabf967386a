//! Inspect command.
//!
//! Lists the services of a descriptor set with the calling shape every
//! method takes in each call mode, and the names of the generated classes.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use svcgen_codegen::naming::{contract_name, default_impl_name};
use svcgen_codegen::{CallMode, GenerationShape};
use svcgen_core::SchemaFile;
use svcgen_core::cli::{ExitCode, OutputFormat};
use tracing::info;

use crate::descriptor::{decode_descriptor_set, schema_files_from_descriptors};
use crate::formatters::format_output;

/// One method and its classified shapes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MethodReport {
    /// Method name as declared
    pub name: String,
    /// Fully qualified input type
    pub input_type: String,
    /// Fully qualified output type
    pub output_type: String,
    /// Shape in the blocking call mode
    pub sync_shape: GenerationShape,
    /// Shape in the callback call mode
    pub async_shape: GenerationShape,
    /// Whether the blocking default implementation provides the method
    pub blocking_default_impl: bool,
}

/// One service with its generated class names.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ServiceReport {
    /// Schema file declaring the service
    pub file: String,
    /// Service name
    pub name: String,
    /// Contract names, blocking first
    pub contracts: [String; 2],
    /// Default implementation names, blocking first
    pub default_impls: [String; 2],
    /// Methods in declaration order
    pub methods: Vec<MethodReport>,
}

/// Builds a report for every service of `files`.
///
/// # Examples
///
/// ```
/// use svcgen_cli::commands::inspect::inspect;
/// use svcgen_codegen::GenerationShape;
/// use svcgen_core::{MethodSchema, SchemaFile, ServiceSchema};
///
/// let file = SchemaFile::new("feed.proto").with_service(
///     ServiceSchema::new("Feed").with_method(MethodSchema::new("Watch", ".In", ".Out", false, true)),
/// );
///
/// let report = inspect(&[file]);
/// assert_eq!(report[0].contracts, ["FeedService", "AsyncFeedService"]);
/// assert_eq!(report[0].methods[0].sync_shape, GenerationShape::SyncServerStreaming);
/// ```
#[must_use]
pub fn inspect(files: &[SchemaFile]) -> Vec<ServiceReport> {
    files
        .iter()
        .flat_map(|file| {
            file.services.iter().map(|service| ServiceReport {
                file: file.name.clone(),
                name: service.name.clone(),
                contracts: CallMode::ALL.map(|mode| contract_name(&service.name, mode)),
                default_impls: CallMode::ALL.map(|mode| default_impl_name(&service.name, mode)),
                methods: service
                    .methods
                    .iter()
                    .map(|method| {
                        let sync_shape = GenerationShape::of(method, CallMode::Sync);
                        MethodReport {
                            name: method.name.clone(),
                            input_type: method.input_type.full_name().to_string(),
                            output_type: method.output_type.full_name().to_string(),
                            sync_shape,
                            async_shape: GenerationShape::of(method, CallMode::Async),
                            blocking_default_impl: sync_shape.supported_in_default_impl(),
                        }
                    })
                    .collect(),
            })
        })
        .collect()
}

/// Runs the inspect command on a serialized descriptor set.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub async fn run(descriptor_set: &Path, output_format: OutputFormat) -> Result<ExitCode> {
    let bytes = match tokio::fs::read(descriptor_set).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::error!("Descriptor set not found: {}", descriptor_set.display());
            return Ok(ExitCode::INVALID_INPUT);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", descriptor_set.display()));
        }
    };

    let descriptors = decode_descriptor_set(&descriptor_set.display().to_string(), &bytes)?;
    let files = schema_files_from_descriptors(&descriptors)?;
    let report = inspect(&files);
    info!("Inspected {} services in {} schema files", report.len(), files.len());

    println!("{}", format_output(&report, output_format)?);
    Ok(ExitCode::SUCCESS)
}
