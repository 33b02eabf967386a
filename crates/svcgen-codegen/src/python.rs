//! Python service binding generator.
//!
//! The binding does not model streaming: every method, whatever its shape,
//! becomes one blocking, routed call forwarding
//! `(request, timeout, properties)` to the router connection.

use crate::generator::ServiceGenerator;
use crate::naming::{join_path, split_file_name, to_snake_case};
use crate::resolver::NamespaceTable;
use crate::template_engine::{PYTHON_SERVICE, TemplateEngine};
use crate::types::GeneratedFile;
use serde::Serialize;
use std::sync::Arc;
use svcgen_core::{Result, SchemaFile, ServiceSchema};
use tracing::debug;

const FILE_SUFFIX: &str = "_service.py";

#[derive(Debug, Serialize)]
struct PythonServiceContext<'a> {
    module: String,
    class_name: String,
    stub_name: String,
    methods: Vec<&'a str>,
}

/// Generator of one `<svc>_service.py` module per service.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use svcgen_codegen::python::PythonGenerator;
/// use svcgen_codegen::template_engine::TemplateEngine;
/// use svcgen_core::{MethodSchema, SchemaFile, ServiceSchema};
///
/// let generator = PythonGenerator::new(Arc::new(TemplateEngine::new().unwrap()), None);
/// let file = SchemaFile::new("acme/search.proto");
/// let service = ServiceSchema::new("SearchIndex").with_method(MethodSchema::unary("Find", ".Q", ".R"));
///
/// let module = generator.generate_binding(&file, &service).unwrap();
/// assert_eq!(module.path, "acme/search_index_service.py");
/// assert!(module.content.contains("from . import search_pb2_grpc as importStub"));
/// ```
#[derive(Debug, Clone)]
pub struct PythonGenerator {
    engine: Arc<TemplateEngine<'static>>,
    root: Option<String>,
}

impl PythonGenerator {
    /// Creates a Python generator placing files under `root`.
    #[must_use]
    pub const fn new(engine: Arc<TemplateEngine<'static>>, root: Option<String>) -> Self {
        Self { engine, root }
    }

    /// Generates the binding module of one service.
    ///
    /// # Errors
    ///
    /// Returns [`svcgen_core::Error::TemplateError`] if rendering fails.
    pub fn generate_binding(&self, file: &SchemaFile, service: &ServiceSchema) -> Result<GeneratedFile> {
        let (dir, base) = split_file_name(&file.name);
        let file_name = module_file_name(&service.name);
        let path = join_path(&[self.root.as_deref().unwrap_or_default(), dir, &file_name]);

        let context = PythonServiceContext {
            module: base.replace('-', "_"),
            class_name: format!("{}Service", service.name),
            stub_name: format!("{}Stub", service.name),
            methods: service.methods.iter().map(|m| m.name.as_str()).collect(),
        };
        let content = self.engine.render(PYTHON_SERVICE, &context)?;

        debug!("Generated python binding {path}");
        Ok(GeneratedFile { path, content })
    }
}

/// Returns the module file name of a service binding.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::python::module_file_name;
///
/// assert_eq!(module_file_name("HTTPGateway"), "http_gateway_service.py");
/// ```
#[must_use]
pub fn module_file_name(service_name: &str) -> String {
    format!("{}{FILE_SUFFIX}", to_snake_case(service_name))
}

impl ServiceGenerator for PythonGenerator {
    fn name(&self) -> &'static str {
        "python-service"
    }

    fn generate(&self, file: &SchemaFile, _table: &NamespaceTable) -> Result<Vec<GeneratedFile>> {
        file.services
            .iter()
            .map(|service| self.generate_binding(file, service))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svcgen_core::MethodSchema;

    fn generator(root: Option<&str>) -> PythonGenerator {
        PythonGenerator::new(
            Arc::new(TemplateEngine::new().unwrap()),
            root.map(str::to_string),
        )
    }

    #[test]
    fn test_binding_content() {
        let file = SchemaFile::new("event-store.proto");
        let service = ServiceSchema::new("Events")
            .with_method(MethodSchema::unary("Append", ".A", ".B"))
            .with_method(MethodSchema::new("Tail", ".A", ".B", false, true));

        let module = generator(None).generate_binding(&file, &service).unwrap();
        assert_eq!(module.path, "events_service.py");
        assert!(module.content.contains("from . import event_store_pb2_grpc as importStub"));
        assert!(module.content.contains("class EventsService(object):"));
        assert!(module.content.contains(
            "self.connector = router.get_connection(EventsService, importStub.EventsStub)"
        ));
        assert!(module.content.contains("    def Append(self, request, timeout=None, properties=None):"));
        assert!(module.content.contains(
            "        return self.connector.create_request('Tail', request, timeout, properties)"
        ));
    }

    #[test]
    fn test_binding_root_and_directory() {
        let file = SchemaFile::new("a/b/c.proto");
        let module = generator(Some("py"))
            .generate_binding(&file, &ServiceSchema::new("Echo"))
            .unwrap();
        assert_eq!(module.path, "py/a/b/echo_service.py");
    }

    #[test]
    fn test_generate_one_module_per_service() {
        let file = SchemaFile::new("x.proto")
            .with_service(ServiceSchema::new("One"))
            .with_service(ServiceSchema::new("Two"));
        let files = generator(None)
            .generate(&file, &NamespaceTable::default())
            .unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].path, "two_service.py");
    }
}
