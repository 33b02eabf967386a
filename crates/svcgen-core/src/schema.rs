//! Schema data model.
//!
//! Plain values describing the services and messages of one code generation
//! invocation. They are produced by descriptor ingestion (outside this crate)
//! and never mutated afterwards.
//!
//! # Examples
//!
//! ```
//! use svcgen_core::schema::{MethodSchema, SchemaFile, ServiceSchema};
//!
//! let file = SchemaFile::new("search.proto")
//!     .with_package("acme.search")
//!     .with_message("Query")
//!     .with_message("Hit")
//!     .with_service(ServiceSchema::new("Search").with_method(MethodSchema::unary(
//!         "Find",
//!         ".acme.search.Query",
//!         ".acme.search.Hit",
//!     )));
//!
//! assert!(file.validate().is_ok());
//! assert_eq!(file.services[0].methods[0].input_type.full_name(), "acme.search.Query");
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A fully-qualified, dot-separated message name.
///
/// Descriptor references carry a leading `.` (`.pkg.Message`); it is
/// stripped on construction so lookups never depend on it.
///
/// # Examples
///
/// ```
/// use svcgen_core::schema::TypeRef;
///
/// let type_ref = TypeRef::new(".acme.search.Query");
/// assert_eq!(type_ref.full_name(), "acme.search.Query");
/// assert_eq!(type_ref.simple_name(), "Query");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    /// Creates a type reference, dropping any leading separators.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim_start_matches('.').to_string())
    }

    /// Returns the fully-qualified name without the leading separator.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.0
    }

    /// Returns the segment after the last separator.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Returns `true` if the reference is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Namespace-affecting options of a schema file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOptions {
    /// Explicit target namespace, overrides the declared package
    pub java_package: Option<String>,
    /// Emit one top-level type per output unit instead of an outer container
    pub java_multiple_files: bool,
    /// Explicit name of the outer container
    pub java_outer_classname: Option<String>,
}

/// A message declaration, with its nested declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSchema {
    /// Simple name of the message
    pub name: String,
    /// Messages declared inside this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<MessageSchema>,
}

impl MessageSchema {
    /// Creates a message without nested declarations.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nested: Vec::new(),
        }
    }

    /// Adds a nested message declaration.
    #[must_use]
    pub fn with_nested(mut self, nested: Self) -> Self {
        self.nested.push(nested);
        self
    }
}

/// One remote-call method of a service.
///
/// The two streaming flags plus the requested call mode fully determine the
/// generated calling shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSchema {
    /// Method name as declared in the schema
    pub name: String,
    /// Request message
    pub input_type: TypeRef,
    /// Response message
    pub output_type: TypeRef,
    /// Requests arrive as a stream
    pub client_streaming: bool,
    /// Responses are returned as a stream
    pub server_streaming: bool,
}

impl MethodSchema {
    /// Creates a method with explicit streaming flags.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        input_type: impl AsRef<str>,
        output_type: impl AsRef<str>,
        client_streaming: bool,
        server_streaming: bool,
    ) -> Self {
        Self {
            name: name.into(),
            input_type: TypeRef::new(input_type),
            output_type: TypeRef::new(output_type),
            client_streaming,
            server_streaming,
        }
    }

    /// Creates a single-request, single-response method.
    #[must_use]
    pub fn unary(
        name: impl Into<String>,
        input_type: impl AsRef<str>,
        output_type: impl AsRef<str>,
    ) -> Self {
        Self::new(name, input_type, output_type, false, false)
    }
}

/// A named service and its ordered methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSchema {
    /// Service name, unique within its file
    pub name: String,
    /// Methods in declaration order
    pub methods: Vec<MethodSchema>,
}

impl ServiceSchema {
    /// Creates a service without methods.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Appends a method.
    #[must_use]
    pub fn with_method(mut self, method: MethodSchema) -> Self {
        self.methods.push(method);
        self
    }
}

/// A named schema unit: services, messages and namespace options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Source-relative file name, e.g. `acme/search.proto`
    pub name: String,
    /// Declared package, if any
    pub package: Option<String>,
    /// Namespace-affecting options
    #[serde(default)]
    pub options: FileOptions,
    /// Top-level message declarations
    #[serde(default)]
    pub messages: Vec<MessageSchema>,
    /// Top-level enum names
    #[serde(default)]
    pub enums: Vec<String>,
    /// Services in declaration order
    #[serde(default)]
    pub services: Vec<ServiceSchema>,
}

impl SchemaFile {
    /// Creates an empty schema file.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: None,
            options: FileOptions::default(),
            messages: Vec::new(),
            enums: Vec::new(),
            services: Vec::new(),
        }
    }

    /// Sets the declared package.
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Replaces the namespace options.
    #[must_use]
    pub fn with_options(mut self, options: FileOptions) -> Self {
        self.options = options;
        self
    }

    /// Adds a top-level message without nested declarations.
    #[must_use]
    pub fn with_message(self, name: impl Into<String>) -> Self {
        self.with_message_schema(MessageSchema::new(name))
    }

    /// Adds a top-level message declaration.
    #[must_use]
    pub fn with_message_schema(mut self, message: MessageSchema) -> Self {
        self.messages.push(message);
        self
    }

    /// Adds a top-level enum name.
    #[must_use]
    pub fn with_enum(mut self, name: impl Into<String>) -> Self {
        self.enums.push(name.into());
        self
    }

    /// Adds a service.
    #[must_use]
    pub fn with_service(mut self, service: ServiceSchema) -> Self {
        self.services.push(service);
        self
    }

    /// Returns the declared package, or `""` when the file has none.
    #[must_use]
    pub fn package_or_empty(&self) -> &str {
        self.package.as_deref().unwrap_or_default()
    }

    /// Returns the fully-qualified name of a top-level declaration.
    ///
    /// # Examples
    ///
    /// ```
    /// use svcgen_core::schema::SchemaFile;
    ///
    /// let with_package = SchemaFile::new("a.proto").with_package("acme");
    /// assert_eq!(with_package.qualify("Query"), "acme.Query");
    ///
    /// let without_package = SchemaFile::new("b.proto");
    /// assert_eq!(without_package.qualify("Query"), "Query");
    /// ```
    #[must_use]
    pub fn qualify(&self, name: &str) -> String {
        match self.package.as_deref() {
            Some(package) if !package.is_empty() => format!("{package}.{name}"),
            _ => name.to_string(),
        }
    }

    /// Checks the structural invariants the generators rely on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSchema`] if the file has no name, a
    /// declaration has an empty name, two services share a name, or a method
    /// lacks its input or output type.
    pub fn validate(&self) -> Result<()> {
        let malformed = |reason: String| Error::MalformedSchema {
            file: self.name.clone(),
            reason,
        };

        if self.name.is_empty() {
            return Err(malformed("file without a name".to_string()));
        }

        if let Some(message) = self.messages.iter().find(|m| !message_names_valid(m)) {
            return Err(malformed(format!(
                "message declaration with an empty name near '{}'",
                message.name
            )));
        }

        let mut seen = HashSet::new();
        for service in &self.services {
            if service.name.is_empty() {
                return Err(malformed("service without a name".to_string()));
            }
            if !seen.insert(service.name.as_str()) {
                return Err(malformed(format!("duplicate service '{}'", service.name)));
            }
            for method in &service.methods {
                if method.name.is_empty() {
                    return Err(malformed(format!(
                        "method without a name in service '{}'",
                        service.name
                    )));
                }
                if method.input_type.is_empty() || method.output_type.is_empty() {
                    return Err(malformed(format!(
                        "method '{}.{}' is missing its input or output type",
                        service.name, method.name
                    )));
                }
            }
        }

        Ok(())
    }
}

fn message_names_valid(message: &MessageSchema) -> bool {
    !message.name.is_empty() && message.nested.iter().all(message_names_valid)
}
