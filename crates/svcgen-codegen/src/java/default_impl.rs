//! Java default implementation generator.
//!
//! Each implementation extends the runtime `AbstractGrpcService` over the
//! service's stub type and delegates every call to it. The blocking
//! implementation leaves out client-streaming methods; the matching
//! contract still declares them.

use super::{MethodContext, method_contexts};
use crate::generator::ServiceGenerator;
use crate::naming::{
    RUNTIME_PACKAGE, contract_name, default_impl_name, grpc_class_name, java_source_path,
    qualify, stub_class_name, stub_factory,
};
use crate::resolver::{NamespaceTable, file_namespace};
use crate::shape::{CallMode, GenerationShape};
use crate::template_engine::{JAVA_DEFAULT_IMPL, TemplateEngine};
use crate::types::GeneratedFile;
use serde::Serialize;
use std::sync::Arc;
use svcgen_core::{Result, SchemaFile, ServiceSchema};
use tracing::debug;

#[derive(Debug, Serialize)]
struct DefaultImplContext<'a> {
    namespace: &'a str,
    class_name: String,
    base_class: String,
    contract: String,
    retry_policy: String,
    stub_storage: String,
    stub_class: String,
    grpc_class: String,
    stub_factory: &'static str,
    methods: Vec<MethodContext>,
}

/// Generator of `<Svc>DefaultBlockingImpl` and `<Svc>DefaultAsyncImpl` classes.
#[derive(Debug, Clone)]
pub struct DefaultImplGenerator {
    engine: Arc<TemplateEngine<'static>>,
    root: Option<String>,
}

impl DefaultImplGenerator {
    /// Creates a default implementation generator placing files under `root`.
    #[must_use]
    pub const fn new(engine: Arc<TemplateEngine<'static>>, root: Option<String>) -> Self {
        Self { engine, root }
    }

    /// Generates the default implementation of one service for one call mode.
    ///
    /// # Errors
    ///
    /// Returns [`svcgen_core::Error::TemplateError`] if rendering fails.
    pub fn generate_default_implementation(
        &self,
        namespace: &str,
        service: &ServiceSchema,
        table: &NamespaceTable,
        mode: CallMode,
    ) -> Result<GeneratedFile> {
        let class_name = default_impl_name(&service.name, mode);
        let path = java_source_path(self.root.as_deref(), namespace, &class_name);
        let stub_class = stub_class_name(namespace, &service.name, mode);

        let context = DefaultImplContext {
            namespace,
            base_class: format!("{RUNTIME_PACKAGE}.AbstractGrpcService<{stub_class}>"),
            contract: qualify(namespace, &contract_name(&service.name, mode)),
            retry_policy: format!("{RUNTIME_PACKAGE}.RetryPolicy"),
            stub_storage: format!("{RUNTIME_PACKAGE}.StubStorage<{stub_class}>"),
            grpc_class: grpc_class_name(namespace, &service.name),
            stub_factory: stub_factory(mode),
            methods: method_contexts(
                service,
                namespace,
                table,
                mode,
                true,
                GenerationShape::supported_in_default_impl,
            ),
            stub_class,
            class_name,
        };
        let content = self.engine.render(JAVA_DEFAULT_IMPL, &context)?;

        debug!("Generated default implementation {path}");
        Ok(GeneratedFile { path, content })
    }
}

impl ServiceGenerator for DefaultImplGenerator {
    fn name(&self) -> &'static str {
        "java-default-impl"
    }

    fn generate(&self, file: &SchemaFile, table: &NamespaceTable) -> Result<Vec<GeneratedFile>> {
        let namespace = file_namespace(file);
        let mut files = Vec::with_capacity(file.services.len() * CallMode::ALL.len());

        for service in &file.services {
            for mode in CallMode::ALL {
                files.push(self.generate_default_implementation(&namespace, service, table, mode)?);
            }
        }

        Ok(files)
    }
}
