//! protoc plugin mode.
//!
//! Reads a `CodeGeneratorRequest` from stdin and writes a
//! `CodeGeneratorResponse` to stdout. Generation failures travel back to
//! protoc in the response's `error` field; only an unreadable request is a
//! process-level failure.

use anyhow::{Context, Result};
use prost::Message;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse, code_generator_response};
use svcgen_codegen::{GeneratedCode, pipeline};
use svcgen_core::GeneratorOptions;
use svcgen_core::cli::ExitCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{error, info};

use crate::descriptor::schema_files_from_descriptors;

/// Decodes a serialized `CodeGeneratorRequest`.
///
/// # Errors
///
/// Returns an error if `bytes` is not a valid request.
pub fn decode_request(bytes: &[u8]) -> Result<CodeGeneratorRequest> {
    CodeGeneratorRequest::decode(bytes)
        .context("could not read CodeGeneratorRequest; run this binary as a protoc plugin or pass a subcommand")
}

/// Answers one plugin request.
///
/// Never fails: errors are reported through the response.
///
/// # Examples
///
/// ```
/// use prost_types::compiler::CodeGeneratorRequest;
/// use svcgen_cli::commands::plugin::process_request;
///
/// let response = process_request(&CodeGeneratorRequest::default());
/// assert!(response.error.is_none());
/// assert!(response.file.is_empty());
/// ```
#[must_use]
pub fn process_request(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let mut response = CodeGeneratorResponse {
        supported_features: Some(code_generator_response::Feature::Proto3Optional as u64),
        ..Default::default()
    };

    match generate(request) {
        Ok(code) => {
            response.file = code
                .into_iter()
                .map(|file| code_generator_response::File {
                    name: Some(file.path),
                    content: Some(file.content),
                    ..Default::default()
                })
                .collect();
        }
        Err(e) => {
            error!("Generation failed: {e}");
            response.error = Some(e.to_string());
        }
    }

    response
}

fn generate(request: &CodeGeneratorRequest) -> svcgen_core::Result<GeneratedCode> {
    let options = GeneratorOptions::parse(request.parameter());
    let files = schema_files_from_descriptors(&request.proto_file)?;
    pipeline::run(&files, &request.file_to_generate, &options)
}

/// Runs plugin mode over stdin and stdout.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or decoded, or stdout cannot
/// be written.
pub async fn run() -> Result<ExitCode> {
    let mut input = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut input)
        .await
        .context("failed to read plugin request from stdin")?;

    let request = decode_request(&input)?;
    info!(
        "Plugin request: {} files to generate, {} descriptors",
        request.file_to_generate.len(),
        request.proto_file.len()
    );

    let response = process_request(&request);

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(&response.encode_to_vec())
        .await
        .context("failed to write plugin response to stdout")?;
    stdout.flush().await?;

    Ok(ExitCode::SUCCESS)
}
