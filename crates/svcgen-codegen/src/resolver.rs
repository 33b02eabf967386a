//! Type resolution.
//!
//! Builds the [`NamespaceTable`] mapping every fully-qualified message name
//! of an invocation to the Java namespace its class lives in. The table is
//! built from all schema files before any generation begins, so a method
//! may reference a message declared in any input file regardless of the
//! order files were supplied in.
//!
//! # Examples
//!
//! ```
//! use svcgen_codegen::NamespaceTable;
//! use svcgen_core::schema::{FileOptions, SchemaFile, TypeRef};
//!
//! let file = SchemaFile::new("acme/search.proto")
//!     .with_package("acme")
//!     .with_options(FileOptions {
//!         java_package: Some("com.acme".to_string()),
//!         java_multiple_files: true,
//!         java_outer_classname: None,
//!     })
//!     .with_message("Query");
//!
//! let table = NamespaceTable::build(&[file]);
//! let resolved = table.resolve(&TypeRef::new(".acme.Query"));
//! assert_eq!(resolved.to_string(), "com.acme.Query");
//! ```

use crate::naming::{qualify, split_file_name, to_upper_camel};
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use svcgen_core::schema::{MessageSchema, SchemaFile, TypeRef};
use tracing::{debug, warn};

const OUTER_CLASS_SUFFIX: &str = "OuterClass";

/// Read-only mapping from fully-qualified message name to Java namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NamespaceTable {
    entries: BTreeMap<String, String>,
}

/// A type reference split into the namespace and the bare class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedType {
    /// Namespace of the class, empty when unresolved
    pub namespace: String,
    /// Simple class name
    pub name: String,
}

impl ResolvedType {
    /// Returns `true` if the reference was found in the table.
    #[must_use]
    pub fn is_qualified(&self) -> bool {
        !self.namespace.is_empty()
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&qualify(&self.namespace, &self.name))
    }
}

impl NamespaceTable {
    /// Builds the table from every schema file of an invocation.
    ///
    /// Nested messages are registered under their full dotted path with the
    /// enclosing class appended to the namespace. When two files declare
    /// the same fully-qualified name the first registration is kept.
    #[must_use]
    pub fn build(schema_files: &[SchemaFile]) -> Self {
        let mut entries = BTreeMap::new();

        for file in schema_files {
            let namespace = file_namespace(file);
            for message in &file.messages {
                register(
                    &mut entries,
                    &file.name,
                    &file.qualify(&message.name),
                    &namespace,
                    message,
                );
            }
        }

        debug!("Built namespace table with {} entries", entries.len());
        Self { entries }
    }

    /// Returns the namespace registered for a fully-qualified message name.
    #[must_use]
    pub fn namespace_of(&self, full_name: &str) -> Option<&str> {
        self.entries.get(full_name).map(String::as_str)
    }

    /// Resolves a type reference.
    ///
    /// A reference missing from the table resolves to the empty namespace
    /// so generation can proceed; a warning is logged.
    #[must_use]
    pub fn resolve(&self, type_ref: &TypeRef) -> ResolvedType {
        let name = type_ref.simple_name().to_string();
        let namespace = self.namespace_of(type_ref.full_name()).map_or_else(
            || {
                warn!("Unresolved message type '{type_ref}', emitting it without a namespace");
                String::new()
            },
            str::to_string,
        );
        ResolvedType { namespace, name }
    }

    /// Returns the number of registered messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no message is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(full name, namespace)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn register(
    entries: &mut BTreeMap<String, String>,
    file_name: &str,
    full_name: &str,
    namespace: &str,
    message: &MessageSchema,
) {
    match entries.entry(full_name.to_string()) {
        Entry::Vacant(slot) => {
            slot.insert(namespace.to_string());
        }
        Entry::Occupied(existing) => {
            warn!(
                "Message '{full_name}' from '{file_name}' is already registered under '{}', keeping the first",
                existing.get()
            );
        }
    }

    let nested_namespace = qualify(namespace, &message.name);
    for nested in &message.nested {
        register(
            entries,
            file_name,
            &format!("{full_name}.{}", nested.name),
            &nested_namespace,
            nested,
        );
    }
}

/// Builds the namespace table for a set of schema files.
///
/// Equivalent to [`NamespaceTable::build`].
#[must_use]
pub fn build_namespace_table(schema_files: &[SchemaFile]) -> NamespaceTable {
    NamespaceTable::build(schema_files)
}

/// Resolves a fully-qualified message name against a table.
///
/// Returns `(namespace, bare name)`; the namespace is empty on a miss.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::resolver::{NamespaceTable, resolve_type};
///
/// let table = NamespaceTable::default();
/// assert_eq!(resolve_type(&table, ".acme.Query"), (String::new(), "Query".to_string()));
/// ```
#[must_use]
pub fn resolve_type(table: &NamespaceTable, full_name: &str) -> (String, String) {
    let resolved = table.resolve(&TypeRef::new(full_name));
    (resolved.namespace, resolved.name)
}

/// Returns the Java namespace generated classes of a schema file live in.
///
/// The base is the explicit `java_package` option, else the declared
/// package. With `java_multiple_files` the base is used as is; otherwise
/// the outer container class is appended.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::resolver::file_namespace;
/// use svcgen_core::schema::SchemaFile;
///
/// let file = SchemaFile::new("acme/search_api.proto").with_package("acme");
/// assert_eq!(file_namespace(&file), "acme.SearchApi");
/// ```
#[must_use]
pub fn file_namespace(file: &SchemaFile) -> String {
    let base = file
        .options
        .java_package
        .as_deref()
        .unwrap_or_else(|| file.package_or_empty());

    if file.options.java_multiple_files {
        base.to_string()
    } else {
        qualify(base, &outer_class_name(file))
    }
}

/// Returns the outer container class name of a schema file.
///
/// An explicit `java_outer_classname` wins. Otherwise the base name of the
/// file in UpperCamelCase, with `OuterClass` appended when that collides
/// with a top-level message, enum or service of the same file.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::resolver::outer_class_name;
/// use svcgen_core::schema::SchemaFile;
///
/// let plain = SchemaFile::new("search.proto");
/// assert_eq!(outer_class_name(&plain), "Search");
///
/// let colliding = SchemaFile::new("search.proto").with_message("Search");
/// assert_eq!(outer_class_name(&colliding), "SearchOuterClass");
/// ```
#[must_use]
pub fn outer_class_name(file: &SchemaFile) -> String {
    if let Some(explicit) = file.options.java_outer_classname.as_deref() {
        return explicit.to_string();
    }

    let (_, base) = split_file_name(&file.name);
    let derived = to_upper_camel(base);

    let collides = file.messages.iter().any(|m| m.name == derived)
        || file.enums.iter().any(|e| *e == derived)
        || file.services.iter().any(|s| s.name == derived);

    if collides {
        format!("{derived}{OUTER_CLASS_SUFFIX}")
    } else {
        derived
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svcgen_core::schema::{FileOptions, ServiceSchema};

    fn options(java_package: Option<&str>, multiple: bool, outer: Option<&str>) -> FileOptions {
        FileOptions {
            java_package: java_package.map(str::to_string),
            java_multiple_files: multiple,
            java_outer_classname: outer.map(str::to_string),
        }
    }

    #[test]
    fn test_namespace_precedence_explicit_package() {
        let file = SchemaFile::new("a.proto")
            .with_package("acme")
            .with_options(options(Some("com.acme"), true, None));
        assert_eq!(file_namespace(&file), "com.acme");
    }

    #[test]
    fn test_namespace_precedence_declared_package_flattened() {
        let file = SchemaFile::new("a.proto")
            .with_package("acme")
            .with_options(options(None, true, None));
        assert_eq!(file_namespace(&file), "acme");
    }

    #[test]
    fn test_namespace_with_explicit_outer_class() {
        let file = SchemaFile::new("a.proto")
            .with_package("acme")
            .with_options(options(Some("com.acme"), false, Some("Protos")));
        assert_eq!(file_namespace(&file), "com.acme.Protos");
    }

    #[test]
    fn test_namespace_without_package_is_outer_class() {
        let file = SchemaFile::new("dir/event_store.proto");
        assert_eq!(file_namespace(&file), "EventStore");
    }

    #[test]
    fn test_namespace_without_package_flattened_is_empty() {
        let file = SchemaFile::new("a.proto").with_options(options(None, true, None));
        assert_eq!(file_namespace(&file), "");
    }

    #[test]
    fn test_outer_class_collision_with_enum_and_service() {
        let with_enum = SchemaFile::new("status.proto").with_enum("Status");
        assert_eq!(outer_class_name(&with_enum), "StatusOuterClass");

        let with_service = SchemaFile::new("echo.proto").with_service(ServiceSchema::new("Echo"));
        assert_eq!(outer_class_name(&with_service), "EchoOuterClass");
    }

    #[test]
    fn test_nested_messages_resolve_through_enclosing_class() {
        let file = SchemaFile::new("a.proto")
            .with_package("acme")
            .with_options(options(Some("com.acme"), true, None))
            .with_message_schema(
                MessageSchema::new("Outer")
                    .with_nested(MessageSchema::new("Inner").with_nested(MessageSchema::new("Deep"))),
            );
        let table = NamespaceTable::build(&[file]);

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.resolve(&TypeRef::new(".acme.Outer.Inner")).to_string(),
            "com.acme.Outer.Inner"
        );
        assert_eq!(
            table.resolve(&TypeRef::new("acme.Outer.Inner.Deep")).to_string(),
            "com.acme.Outer.Inner.Deep"
        );
    }

    #[test]
    fn test_first_registration_wins() {
        let first = SchemaFile::new("a.proto")
            .with_package("acme")
            .with_options(options(Some("first"), true, None))
            .with_message("Query");
        let second = SchemaFile::new("b.proto")
            .with_package("acme")
            .with_options(options(Some("second"), true, None))
            .with_message("Query");
        let table = NamespaceTable::build(&[first, second]);
        assert_eq!(table.namespace_of("acme.Query"), Some("first"));
    }

    #[test]
    fn test_resolve_miss_is_unqualified() {
        let table = NamespaceTable::default();
        let resolved = table.resolve(&TypeRef::new(".google.protobuf.Empty"));
        assert!(!resolved.is_qualified());
        assert_eq!(resolved.to_string(), "Empty");
    }

    #[test]
    fn test_iter_is_sorted() {
        let file = SchemaFile::new("a.proto")
            .with_package("p")
            .with_message("Zeta")
            .with_message("Alpha");
        let table = NamespaceTable::build(&[file]);
        let names: Vec<_> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["p.Alpha", "p.Zeta"]);
    }
}
