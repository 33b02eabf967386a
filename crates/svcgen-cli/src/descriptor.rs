//! Descriptor ingestion.
//!
//! Converts compiled protobuf descriptors (`prost-types`) into the
//! generator's schema model. Only what generation needs is carried over:
//! names, nesting, streaming flags and the Java file options.
//!
//! # Examples
//!
//! ```
//! use prost_types::{DescriptorProto, FileDescriptorProto};
//! use svcgen_cli::descriptor::schema_file_from_descriptor;
//!
//! let proto = FileDescriptorProto {
//!     name: Some("acme/search.proto".to_string()),
//!     package: Some("acme".to_string()),
//!     message_type: vec![DescriptorProto {
//!         name: Some("Query".to_string()),
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let file = schema_file_from_descriptor(&proto).unwrap();
//! assert_eq!(file.name, "acme/search.proto");
//! assert_eq!(file.package.as_deref(), Some("acme"));
//! assert_eq!(file.messages[0].name, "Query");
//! ```

use prost::Message;
use prost_types::{
    DescriptorProto, FileDescriptorProto, FileDescriptorSet, MethodDescriptorProto,
    ServiceDescriptorProto,
};
use svcgen_core::schema::{FileOptions, MessageSchema};
use svcgen_core::{Error, MethodSchema, Result, SchemaFile, ServiceSchema};
use tracing::debug;

/// Converts one file descriptor.
///
/// # Errors
///
/// Returns [`Error::MalformedSchema`] if the file, a message, a service or
/// a method has no name, or the converted file fails validation.
pub fn schema_file_from_descriptor(proto: &FileDescriptorProto) -> Result<SchemaFile> {
    let name = non_empty(proto.name.as_deref()).ok_or_else(|| Error::MalformedSchema {
        file: "<unnamed>".to_string(),
        reason: "file descriptor has no name".to_string(),
    })?;

    let options = proto
        .options
        .as_ref()
        .map(|opts| FileOptions {
            java_package: non_empty(opts.java_package.as_deref()).map(str::to_string),
            java_multiple_files: opts.java_multiple_files(),
            java_outer_classname: non_empty(opts.java_outer_classname.as_deref())
                .map(str::to_string),
        })
        .unwrap_or_default();

    let mut file = SchemaFile::new(name).with_options(options);
    if let Some(package) = non_empty(proto.package.as_deref()) {
        file = file.with_package(package);
    }

    for message in &proto.message_type {
        file = file.with_message_schema(convert_message(name, message)?);
    }
    for enum_type in &proto.enum_type {
        let enum_name = non_empty(enum_type.name.as_deref())
            .ok_or_else(|| malformed(name, "enum without a name"))?;
        file = file.with_enum(enum_name);
    }
    for service in &proto.service {
        file = file.with_service(convert_service(name, service)?);
    }

    file.validate()?;
    debug!(
        "Ingested {} ({} messages, {} services)",
        file.name,
        file.messages.len(),
        file.services.len()
    );
    Ok(file)
}

/// Converts every file descriptor, preserving order.
///
/// # Errors
///
/// Returns the first conversion error.
pub fn schema_files_from_descriptors(protos: &[FileDescriptorProto]) -> Result<Vec<SchemaFile>> {
    protos.iter().map(schema_file_from_descriptor).collect()
}

/// Decodes a serialized `FileDescriptorSet`.
///
/// `source` names the origin of the bytes in error messages.
///
/// # Errors
///
/// Returns [`Error::MalformedSchema`] if the bytes are not a valid set.
pub fn decode_descriptor_set(source: &str, bytes: &[u8]) -> Result<Vec<FileDescriptorProto>> {
    FileDescriptorSet::decode(bytes)
        .map(|set| set.file)
        .map_err(|e| malformed(source, &format!("not a FileDescriptorSet: {e}")))
}

fn convert_message(file: &str, message: &DescriptorProto) -> Result<MessageSchema> {
    let name = non_empty(message.name.as_deref())
        .ok_or_else(|| malformed(file, "message without a name"))?;

    message
        .nested_type
        .iter()
        .try_fold(MessageSchema::new(name), |outer, nested| {
            Ok(outer.with_nested(convert_message(file, nested)?))
        })
}

fn convert_service(file: &str, service: &ServiceDescriptorProto) -> Result<ServiceSchema> {
    let name = non_empty(service.name.as_deref())
        .ok_or_else(|| malformed(file, "service without a name"))?;

    service
        .method
        .iter()
        .try_fold(ServiceSchema::new(name), |schema, method| {
            Ok(schema.with_method(convert_method(file, name, method)?))
        })
}

fn convert_method(file: &str, service: &str, method: &MethodDescriptorProto) -> Result<MethodSchema> {
    let name = non_empty(method.name.as_deref())
        .ok_or_else(|| malformed(file, &format!("method without a name in service {service}")))?;

    Ok(MethodSchema::new(
        name,
        method.input_type(),
        method.output_type(),
        method.client_streaming(),
        method.server_streaming(),
    ))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn malformed(file: &str, reason: &str) -> Error {
    Error::MalformedSchema {
        file: file.to_string(),
        reason: reason.to_string(),
    }
}
