//! Service registration metadata.
//!
//! One `META-INF/services/<contract>` file per service and call mode,
//! naming the default implementation so a service loader can find it from
//! the contract alone.

use crate::generator::ServiceGenerator;
use crate::naming::{SERVICE_REGISTRY_DIR, contract_name, default_impl_name, join_path, qualify};
use crate::resolver::{NamespaceTable, file_namespace};
use crate::shape::CallMode;
use crate::types::GeneratedFile;
use svcgen_core::{Result, SchemaFile, ServiceSchema};
use tracing::debug;

/// Generator of service loader registration files.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::CallMode;
/// use svcgen_codegen::java::RegistryGenerator;
/// use svcgen_core::ServiceSchema;
///
/// let file = RegistryGenerator::new(None).registration(
///     "com.demo",
///     &ServiceSchema::new("Echo"),
///     CallMode::Sync,
/// );
/// assert_eq!(file.path, "META-INF/services/com.demo.EchoService");
/// assert_eq!(file.content, "com.demo.EchoDefaultBlockingImpl\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegistryGenerator {
    root: Option<String>,
}

impl RegistryGenerator {
    /// Creates a registry generator placing `META-INF/services` under `root`.
    #[must_use]
    pub const fn new(root: Option<String>) -> Self {
        Self { root }
    }

    /// Returns the registration entry of one service for one call mode.
    #[must_use]
    pub fn registration(
        &self,
        namespace: &str,
        service: &ServiceSchema,
        mode: CallMode,
    ) -> GeneratedFile {
        let contract = qualify(namespace, &contract_name(&service.name, mode));
        let implementation = qualify(namespace, &default_impl_name(&service.name, mode));

        let path = join_path(&[
            self.root.as_deref().unwrap_or_default(),
            SERVICE_REGISTRY_DIR,
            &contract,
        ]);
        debug!("Generated registration {path}");

        GeneratedFile {
            path,
            content: format!("{implementation}\n"),
        }
    }
}

impl ServiceGenerator for RegistryGenerator {
    fn name(&self) -> &'static str {
        "java-registry"
    }

    fn generate(&self, file: &SchemaFile, _table: &NamespaceTable) -> Result<Vec<GeneratedFile>> {
        let namespace = file_namespace(file);
        Ok(file
            .services
            .iter()
            .flat_map(|service| {
                CallMode::ALL
                    .into_iter()
                    .map(|mode| self.registration(&namespace, service, mode))
            })
            .collect())
    }
}
