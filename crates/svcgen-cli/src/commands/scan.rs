//! Directory scan mode.
//!
//! Walks a directory of serialized `FileDescriptorSet` files, generates
//! for every schema file found and writes the artifacts below an output
//! directory.

use anyhow::{Context, Result};
use prost_types::FileDescriptorProto;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use svcgen_codegen::pipeline;
use svcgen_core::GeneratorOptions;
use svcgen_core::cli::{ExitCode, OutputFormat};
use svcgen_files::FilesBuilder;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::descriptor::{decode_descriptor_set, schema_files_from_descriptors};
use crate::formatters::format_output;

/// Result of a scan run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScanSummary {
    /// Directory that was scanned
    pub source_dir: String,
    /// Directory artifacts were written to
    pub output_dir: String,
    /// Number of descriptor set files read
    pub descriptor_sets: usize,
    /// Number of distinct schema files generated for
    pub schema_files: usize,
    /// Number of artifacts written
    pub generated_files: usize,
    /// Total bytes written
    pub total_bytes: usize,
    /// Artifact paths relative to the output directory, sorted
    pub files: Vec<String>,
}

/// Schema descriptors collected from a directory tree.
#[derive(Debug, Default)]
pub struct CollectedDescriptors {
    /// Distinct descriptors in walk order
    pub files: Vec<FileDescriptorProto>,
    /// Number of descriptor set files read
    pub descriptor_sets: usize,
}

/// Reads every regular file below `source` as a descriptor set.
///
/// Entries are visited in file-name order. A schema file contained in more
/// than one set is kept once, at its first occurrence.
///
/// # Errors
///
/// Returns an error if the walk fails, a file cannot be read, or a file is
/// not a valid descriptor set.
pub async fn collect_descriptors(source: &Path) -> Result<CollectedDescriptors> {
    let mut collected = CollectedDescriptors::default();
    let mut seen = HashSet::new();

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", source.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let descriptors = decode_descriptor_set(&path.display().to_string(), &bytes)?;
        collected.descriptor_sets += 1;
        debug!("{}: {} schema files", path.display(), descriptors.len());

        for descriptor in descriptors {
            if seen.insert(descriptor.name().to_string()) {
                collected.files.push(descriptor);
            } else {
                debug!("Skipping repeated schema file {}", descriptor.name());
            }
        }
    }

    Ok(collected)
}

/// Generates artifacts for everything under `source_dir` into `output_dir`.
///
/// # Errors
///
/// Returns an error if descriptors cannot be read, generation fails or
/// artifacts cannot be written.
pub async fn generate(
    source_dir: &Path,
    output_dir: &Path,
    options: &GeneratorOptions,
) -> Result<ScanSummary> {
    let collected = collect_descriptors(source_dir).await?;
    let schema_files = schema_files_from_descriptors(&collected.files)?;
    let selected: Vec<&str> = schema_files.iter().map(|f| f.name.as_str()).collect();

    let code = pipeline::run(&schema_files, &selected, options)?;

    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let tree = FilesBuilder::from_generated_code(code)
        .build_and_export(output_dir)
        .with_context(|| format!("failed to write artifacts to {}", output_dir.display()))?;

    info!(
        "Wrote {} files for {} schema files to {}",
        tree.file_count(),
        schema_files.len(),
        output_dir.display()
    );

    Ok(ScanSummary {
        source_dir: source_dir.display().to_string(),
        output_dir: output_dir.display().to_string(),
        descriptor_sets: collected.descriptor_sets,
        schema_files: schema_files.len(),
        generated_files: tree.file_count(),
        total_bytes: tree.total_bytes(),
        files: tree.all_paths().iter().map(ToString::to_string).collect(),
    })
}

/// Runs the scan command.
///
/// # Errors
///
/// Returns an error if generation fails or the summary cannot be printed.
pub async fn run(
    source_dir: &Path,
    output_dir: &Path,
    options: &[String],
    output_format: OutputFormat,
) -> Result<ExitCode> {
    if !source_dir.exists() {
        error!("Source directory does not exist: {}", source_dir.display());
        return Ok(ExitCode::INVALID_INPUT);
    }

    let options = GeneratorOptions::from_args(options);
    let summary = generate(source_dir, output_dir, &options).await?;
    if summary.schema_files == 0 {
        warn!("No schema files found under {}", source_dir.display());
    }

    println!("{}", format_output(&summary, output_format)?);
    Ok(ExitCode::SUCCESS)
}
