//! Java contract (interface) generator.
//!
//! For every service and call mode, emits one interface declaring both
//! routing-property variants of every method. Contracts declare every
//! method regardless of its streaming shape.

use super::{MethodContext, method_contexts};
use crate::generator::ServiceGenerator;
use crate::naming::{contract_name, java_source_path};
use crate::resolver::{NamespaceTable, file_namespace};
use crate::shape::CallMode;
use crate::template_engine::{JAVA_CONTRACT, TemplateEngine};
use crate::types::GeneratedFile;
use serde::Serialize;
use std::sync::Arc;
use svcgen_core::{Result, SchemaFile, ServiceSchema};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ContractContext<'a> {
    namespace: &'a str,
    class_name: String,
    methods: Vec<MethodContext>,
}

/// Generator of `<Svc>Service` and `Async<Svc>Service` interfaces.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use svcgen_codegen::java::ContractGenerator;
/// use svcgen_codegen::template_engine::TemplateEngine;
/// use svcgen_codegen::{CallMode, NamespaceTable};
/// use svcgen_core::{MethodSchema, ServiceSchema};
///
/// let generator = ContractGenerator::new(Arc::new(TemplateEngine::new().unwrap()), None);
/// let service = ServiceSchema::new("Echo").with_method(MethodSchema::unary("Say", ".Ping", ".Pong"));
///
/// let file = generator
///     .generate_contract("com.demo", &service, &NamespaceTable::default(), CallMode::Async)
///     .unwrap();
/// assert_eq!(file.path, "com/demo/AsyncEchoService.java");
/// assert!(file.content.contains("public interface AsyncEchoService {"));
/// ```
#[derive(Debug, Clone)]
pub struct ContractGenerator {
    engine: Arc<TemplateEngine<'static>>,
    root: Option<String>,
}

impl ContractGenerator {
    /// Creates a contract generator placing files under `root`.
    #[must_use]
    pub const fn new(engine: Arc<TemplateEngine<'static>>, root: Option<String>) -> Self {
        Self { engine, root }
    }

    /// Generates the contract of one service for one call mode.
    ///
    /// # Errors
    ///
    /// Returns [`svcgen_core::Error::TemplateError`] if rendering fails.
    pub fn generate_contract(
        &self,
        namespace: &str,
        service: &ServiceSchema,
        table: &NamespaceTable,
        mode: CallMode,
    ) -> Result<GeneratedFile> {
        let class_name = contract_name(&service.name, mode);
        let path = java_source_path(self.root.as_deref(), namespace, &class_name);

        let context = ContractContext {
            namespace,
            methods: method_contexts(service, namespace, table, mode, false, |_| true),
            class_name,
        };
        let content = self.engine.render(JAVA_CONTRACT, &context)?;

        debug!("Generated contract {path}");
        Ok(GeneratedFile { path, content })
    }
}

impl ServiceGenerator for ContractGenerator {
    fn name(&self) -> &'static str {
        "java-contract"
    }

    fn generate(&self, file: &SchemaFile, table: &NamespaceTable) -> Result<Vec<GeneratedFile>> {
        let namespace = file_namespace(file);
        let mut files = Vec::with_capacity(file.services.len() * CallMode::ALL.len());

        for service in &file.services {
            for mode in CallMode::ALL {
                files.push(self.generate_contract(&namespace, service, table, mode)?);
            }
        }

        Ok(files)
    }
}
