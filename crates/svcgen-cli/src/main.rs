//! protoc-gen-svcgen.
//!
//! Generates Java service contracts, default implementations, service
//! registration files and Python bindings from protobuf service
//! definitions.
//!
//! Without a subcommand the binary runs as a protoc plugin:
//!
//! ```bash
//! protoc --plugin=protoc-gen-svcgen --svcgen_out=enablePython=false:gen act.proto
//! ```
//!
//! Subcommands drive it directly:
//!
//! ```bash
//! # Generate from a directory of descriptor sets
//! protoc-gen-svcgen scan descriptors/ gen/ --javaMetaInfPath=resources
//!
//! # Show the calling shape of every method
//! protoc-gen-svcgen --format json inspect descriptors/act.pb
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use svcgen_cli::commands;
use svcgen_core::cli::{ExitCode, OutputFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Service binding generator for protobuf gRPC services.
///
/// Runs as a protoc plugin when invoked without a subcommand.
#[derive(Parser, Debug)]
#[command(name = "protoc-gen-svcgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute; plugin mode when absent
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate from every descriptor set found under a directory.
    ///
    /// Each regular file below SOURCE_DIR is read as a serialized
    /// FileDescriptorSet. Generator options follow the directories as
    /// `key=value` or `--key=value` arguments.
    Scan {
        /// Directory holding descriptor set files
        source_dir: PathBuf,

        /// Directory receiving the generated files
        output_dir: PathBuf,

        /// Generator options, e.g. --enablePython=false javaMetaInfPath=res
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        options: Vec<String>,
    },

    /// Show every service method with its calling shape per call mode.
    Inspect {
        /// Serialized FileDescriptorSet
        descriptor_set: PathBuf,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let exit_code = execute_command(cli.command, output_format).await?;

    std::process::exit(exit_code.as_i32());
}

/// Installs the tracing subscriber.
///
/// Logs go to stderr; stdout carries the plugin response.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

async fn execute_command(command: Option<Commands>, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        None => commands::plugin::run().await,
        Some(Commands::Scan {
            source_dir,
            output_dir,
            options,
        }) => commands::scan::run(&source_dir, &output_dir, &options, output_format).await,
        Some(Commands::Inspect { descriptor_set }) => {
            commands::inspect::run(&descriptor_set, output_format).await
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd).await
        }
    }
}
