//! Emission pipeline.
//!
//! Runs in two passes: the namespace table is built once from every input
//! schema file, then each enabled generator runs over every selected file.
//! The table is never modified after the first pass.
//!
//! # Examples
//!
//! ```
//! use svcgen_codegen::Pipeline;
//! use svcgen_core::{GeneratorOptions, MethodSchema, SchemaFile, ServiceSchema};
//!
//! let file = SchemaFile::new("echo.proto")
//!     .with_package("demo")
//!     .with_message("Ping")
//!     .with_service(ServiceSchema::new("Echo").with_method(MethodSchema::unary(
//!         "Say",
//!         ".demo.Ping",
//!         ".demo.Ping",
//!     )));
//!
//! let options = GeneratorOptions::parse("enablePython=false");
//! let pipeline = Pipeline::from_options(&options).unwrap();
//! let code = pipeline.run(&[file], &["echo.proto"]).unwrap();
//!
//! // Two contracts, two implementations, two registrations
//! assert_eq!(code.file_count(), 6);
//! ```

use crate::generator::ServiceGenerator;
use crate::java::{ContractGenerator, DefaultImplGenerator, RegistryGenerator};
use crate::python::PythonGenerator;
use crate::resolver::NamespaceTable;
use crate::template_engine::TemplateEngine;
use crate::types::GeneratedCode;
use std::collections::HashMap;
use std::sync::Arc;
use svcgen_core::{Error, GeneratorOptions, Result, SchemaFile};
use tracing::{debug, info};

/// Composes the enabled generators over a set of schema files.
#[derive(Debug)]
pub struct Pipeline {
    generators: Vec<Box<dyn ServiceGenerator>>,
}

impl Pipeline {
    /// Creates a pipeline running exactly `generators`, in order.
    #[must_use]
    pub fn new(generators: Vec<Box<dyn ServiceGenerator>>) -> Self {
        Self { generators }
    }

    /// Creates the pipeline selected by generator options.
    ///
    /// Generators run in the order contract, default implementation,
    /// scripting binding, registration. Disabled generators are not
    /// constructed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the built-in templates fail to
    /// register.
    pub fn from_options(options: &GeneratorOptions) -> Result<Self> {
        let engine = Arc::new(TemplateEngine::new()?);
        let mut generators: Vec<Box<dyn ServiceGenerator>> = Vec::with_capacity(4);

        if options.java_interfaces_enabled() {
            generators.push(Box::new(ContractGenerator::new(
                Arc::clone(&engine),
                options.java_interfaces_path.clone(),
            )));
        }
        if options.java_default_impl_enabled() {
            generators.push(Box::new(DefaultImplGenerator::new(
                Arc::clone(&engine),
                options.java_interfaces_impl_path.clone(),
            )));
        }
        if options.enable_python {
            generators.push(Box::new(PythonGenerator::new(
                Arc::clone(&engine),
                options.python_path.clone(),
            )));
        }
        if options.java_meta_inf_enabled() {
            generators.push(Box::new(RegistryGenerator::new(
                options.java_meta_inf_path.clone(),
            )));
        }

        let pipeline = Self::new(generators);
        debug!("Enabled generators: {:?}", pipeline.generator_names());
        Ok(pipeline)
    }

    /// Returns the names of the enabled generators, in run order.
    #[must_use]
    pub fn generator_names(&self) -> Vec<&'static str> {
        self.generators.iter().map(|g| g.name()).collect()
    }

    /// Generates artifacts for the selected files.
    ///
    /// `schema_files` is the complete input set: files that are only
    /// referenced still contribute to type resolution. Output follows the
    /// order of `files_to_generate`, then generator order, then service
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSchema`] if any input file is invalid or
    /// two files share a name, [`Error::UnknownFileToGenerate`] if a
    /// selected file is not in the input set, and
    /// [`Error::TemplateError`] if rendering fails. No partial output is
    /// returned.
    pub fn run<S: AsRef<str>>(
        &self,
        schema_files: &[SchemaFile],
        files_to_generate: &[S],
    ) -> Result<GeneratedCode> {
        let by_name = index_files(schema_files)?;
        let selected = files_to_generate
            .iter()
            .map(|name| {
                let name = name.as_ref();
                by_name
                    .get(name)
                    .copied()
                    .ok_or_else(|| Error::UnknownFileToGenerate {
                        file: name.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let table = NamespaceTable::build(schema_files);
        info!(
            "Generating for {} of {} schema files ({} messages resolved)",
            selected.len(),
            schema_files.len(),
            table.len()
        );

        let mut code = GeneratedCode::new();
        for file in selected {
            info!("Processing {} ({} services)", file.name, file.services.len());
            for generator in &self.generators {
                let files = generator.generate(file, &table)?;
                debug!("{} produced {} files for {}", generator.name(), files.len(), file.name);
                code.extend(files);
            }
        }

        info!("Generated {} files", code.file_count());
        Ok(code)
    }
}

fn index_files(schema_files: &[SchemaFile]) -> Result<HashMap<&str, &SchemaFile>> {
    let mut by_name = HashMap::with_capacity(schema_files.len());
    for file in schema_files {
        file.validate()?;
        if by_name.insert(file.name.as_str(), file).is_some() {
            return Err(Error::MalformedSchema {
                file: file.name.clone(),
                reason: "file supplied more than once".to_string(),
            });
        }
    }
    Ok(by_name)
}

/// Runs the pipeline selected by `options` once.
///
/// # Errors
///
/// See [`Pipeline::run`].
pub fn run<S: AsRef<str>>(
    schema_files: &[SchemaFile],
    files_to_generate: &[S],
    options: &GeneratorOptions,
) -> Result<GeneratedCode> {
    Pipeline::from_options(options)?.run(schema_files, files_to_generate)
}
