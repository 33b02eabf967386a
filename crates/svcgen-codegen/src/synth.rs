//! Shape code synthesis.
//!
//! Given a classified [`GenerationShape`], produces the Java method
//! [`Signature`] and the [`CallSite`] body of one routing-property variant.
//! Both functions are pure; generators feed their output to templates.
//!
//! Unrouted bodies always forward to the routed variant with an empty
//! mapping, so the two variants can differ only in the routing metadata
//! they pass along.
//!
//! # Examples
//!
//! ```
//! use svcgen_codegen::synth::{synthesize_body, synthesize_declaration};
//! use svcgen_codegen::{CallMode, GenerationShape, NamespaceTable};
//! use svcgen_core::MethodSchema;
//!
//! let method = MethodSchema::unary("Find", ".acme.Query", ".acme.Hit");
//! let table = NamespaceTable::default();
//! let shape = GenerationShape::of(&method, CallMode::Sync);
//!
//! let signature = synthesize_declaration(shape, &method, &table, false);
//! assert_eq!(signature.to_string(), "Hit find(Query input)");
//!
//! let body = synthesize_body(shape, "Search", "", &method, false);
//! assert_eq!(body.lines, ["return find(input, java.util.Collections.emptyMap());"]);
//! ```

use crate::naming::{ITERATOR, PROPERTIES_TYPE, STREAM_OBSERVER, lower_first, stub_class_name};
use crate::resolver::NamespaceTable;
use crate::shape::{CallMode, GenerationShape};
use serde::Serialize;
use std::fmt;
use svcgen_core::MethodSchema;

/// Name of the request parameter.
pub const INPUT_ARG: &str = "input";
/// Name of the routing properties parameter.
pub const PROPERTIES_ARG: &str = "properties";
/// Name of the callback sink parameter.
pub const OBSERVER_ARG: &str = "observer";

const EMPTY_PROPERTIES: &str = "java.util.Collections.emptyMap()";
const ANY_DEFAULT_INSTANCE: &str = "com.google.protobuf.Any.getDefaultInstance()";

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Fully-qualified Java type
    pub java_type: String,
    /// Parameter name
    pub name: &'static str,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.java_type, self.name)
    }
}

/// A method declaration without modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    /// Java method name
    pub method_name: String,
    /// Fully-qualified return type, `void` for none
    pub return_type: String,
    /// Parameters in declaration order
    pub parameters: Vec<Parameter>,
}

impl Signature {
    /// Renders the parameter list without parentheses.
    #[must_use]
    pub fn parameter_list(&self) -> String {
        self.parameters
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns `true` if the declaration carries routing properties.
    #[must_use]
    pub fn has_properties(&self) -> bool {
        self.parameters.iter().any(|p| p.name == PROPERTIES_ARG)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}({})",
            self.return_type,
            self.method_name,
            self.parameter_list()
        )
    }
}

/// Statements of a synthesized method body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallSite {
    /// One Java statement per line
    pub lines: Vec<String>,
}

/// What the routed body does once it holds a stub.
enum Wiring {
    Blocking,
    Callback,
    Stream,
}

impl GenerationShape {
    fn return_type(self, input: &str, output: &str) -> String {
        match self {
            Self::Sync | Self::SyncClientStreaming => output.to_string(),
            Self::SyncServerStreaming | Self::SyncBidirectional => format!("{ITERATOR}<{output}>"),
            Self::Async | Self::AsyncServerStreaming => "void".to_string(),
            Self::AsyncClientStreaming | Self::AsyncBidirectional => {
                format!("{STREAM_OBSERVER}<{input}>")
            }
        }
    }

    const fn wiring(self) -> Wiring {
        match self {
            Self::Sync
            | Self::SyncClientStreaming
            | Self::SyncServerStreaming
            | Self::SyncBidirectional => Wiring::Blocking,
            Self::Async | Self::AsyncServerStreaming => Wiring::Callback,
            Self::AsyncClientStreaming | Self::AsyncBidirectional => Wiring::Stream,
        }
    }
}

/// Synthesizes the declaration of one method variant.
///
/// Parameters appear in the order request, routing properties, callback
/// sink; each only when the shape and variant call for it.
#[must_use]
pub fn synthesize_declaration(
    shape: GenerationShape,
    method: &MethodSchema,
    table: &NamespaceTable,
    with_properties: bool,
) -> Signature {
    let input = table.resolve(&method.input_type).to_string();
    let output = table.resolve(&method.output_type).to_string();

    let mut parameters = Vec::with_capacity(3);
    if shape.takes_input() {
        parameters.push(Parameter {
            java_type: input.clone(),
            name: INPUT_ARG,
        });
    }
    if with_properties {
        parameters.push(Parameter {
            java_type: PROPERTIES_TYPE.to_string(),
            name: PROPERTIES_ARG,
        });
    }
    if matches!(shape.mode(), CallMode::Async) {
        parameters.push(Parameter {
            java_type: format!("{STREAM_OBSERVER}<{output}>"),
            name: OBSERVER_ARG,
        });
    }

    Signature {
        method_name: lower_first(&method.name),
        return_type: shape.return_type(&input, &output),
        parameters,
    }
}

/// Synthesizes the body of one method variant of a default implementation.
///
/// `namespace` is the namespace of the service's generated transport class.
#[must_use]
pub fn synthesize_body(
    shape: GenerationShape,
    service_name: &str,
    namespace: &str,
    method: &MethodSchema,
    with_properties: bool,
) -> CallSite {
    let name = lower_first(&method.name);
    let lines = if with_properties {
        routed_body(shape, service_name, namespace, &name)
    } else {
        forwarding_body(shape, &name)
    };
    CallSite { lines }
}

fn routed_body(
    shape: GenerationShape,
    service_name: &str,
    namespace: &str,
    name: &str,
) -> Vec<String> {
    let stub = stub_class_name(namespace, service_name, shape.mode());
    match shape.wiring() {
        Wiring::Blocking => vec![
            format!("{stub} stub = getStub({INPUT_ARG}, {PROPERTIES_ARG});"),
            format!("return createBlockingRequest(() -> stub.{name}({INPUT_ARG}));"),
        ],
        Wiring::Callback => vec![
            format!("{stub} stub = getStub({INPUT_ARG}, {PROPERTIES_ARG});"),
            format!(
                "createAsyncRequest({OBSERVER_ARG}, (newObserver) -> stub.{name}({INPUT_ARG}, newObserver));"
            ),
        ],
        Wiring::Stream => vec![
            format!("{stub} stub = getStub({ANY_DEFAULT_INSTANCE}, {PROPERTIES_ARG});"),
            format!("return createAsyncStreamRequest({OBSERVER_ARG}, stub::{name});"),
        ],
    }
}

fn forwarding_body(shape: GenerationShape, name: &str) -> Vec<String> {
    let line = match shape.wiring() {
        Wiring::Blocking => format!("return {name}({INPUT_ARG}, {EMPTY_PROPERTIES});"),
        Wiring::Callback => format!("{name}({INPUT_ARG}, {EMPTY_PROPERTIES}, {OBSERVER_ARG});"),
        Wiring::Stream => format!("return {name}({EMPTY_PROPERTIES}, {OBSERVER_ARG});"),
    };
    vec![line]
}

#[cfg(test)]
mod tests {
    use super::*;
    use svcgen_core::schema::{FileOptions, SchemaFile};

    fn table() -> NamespaceTable {
        let file = SchemaFile::new("echo.proto")
            .with_package("demo")
            .with_options(FileOptions {
                java_package: Some("com.demo".to_string()),
                java_multiple_files: true,
                java_outer_classname: None,
            })
            .with_message("Ping")
            .with_message("Pong");
        NamespaceTable::build(&[file])
    }

    fn method(client: bool, server: bool) -> MethodSchema {
        MethodSchema::new("Echo", ".demo.Ping", ".demo.Pong", client, server)
    }

    #[test]
    fn test_sync_unary_declarations() {
        let m = method(false, false);
        let shape = GenerationShape::of(&m, CallMode::Sync);
        assert_eq!(
            synthesize_declaration(shape, &m, &table(), false).to_string(),
            "com.demo.Pong echo(com.demo.Ping input)"
        );
        assert_eq!(
            synthesize_declaration(shape, &m, &table(), true).to_string(),
            "com.demo.Pong echo(com.demo.Ping input, java.util.Map<java.lang.String, java.lang.String> properties)"
        );
    }

    #[test]
    fn test_sync_server_streaming_returns_iterator() {
        let m = method(false, true);
        let sig = synthesize_declaration(GenerationShape::SyncServerStreaming, &m, &table(), false);
        assert_eq!(sig.return_type, "java.util.Iterator<com.demo.Pong>");
        assert_eq!(sig.parameters.len(), 1);
    }

    #[test]
    fn test_sync_client_streaming_has_no_input() {
        let m = method(true, false);
        let sig = synthesize_declaration(GenerationShape::SyncClientStreaming, &m, &table(), true);
        assert_eq!(sig.return_type, "com.demo.Pong");
        assert_eq!(sig.parameters.len(), 1);
        assert!(sig.has_properties());
    }

    #[test]
    fn test_async_unary_declaration() {
        let m = method(false, false);
        let sig = synthesize_declaration(GenerationShape::Async, &m, &table(), true);
        assert_eq!(
            sig.to_string(),
            "void echo(com.demo.Ping input, java.util.Map<java.lang.String, java.lang.String> properties, io.grpc.stub.StreamObserver<com.demo.Pong> observer)"
        );
    }

    #[test]
    fn test_async_bidirectional_returns_request_sink() {
        let m = method(true, true);
        let sig = synthesize_declaration(GenerationShape::AsyncBidirectional, &m, &table(), false);
        assert_eq!(
            sig.to_string(),
            "io.grpc.stub.StreamObserver<com.demo.Ping> echo(io.grpc.stub.StreamObserver<com.demo.Pong> observer)"
        );
    }

    #[test]
    fn test_routed_blocking_body() {
        let body = synthesize_body(GenerationShape::Sync, "Echo", "com.demo", &method(false, false), true);
        assert_eq!(
            body.lines,
            [
                "com.demo.EchoGrpc.EchoBlockingStub stub = getStub(input, properties);",
                "return createBlockingRequest(() -> stub.echo(input));",
            ]
        );
    }

    #[test]
    fn test_routed_async_body() {
        let body = synthesize_body(
            GenerationShape::AsyncServerStreaming,
            "Echo",
            "com.demo",
            &method(false, true),
            true,
        );
        assert_eq!(
            body.lines,
            [
                "com.demo.EchoGrpc.EchoStub stub = getStub(input, properties);",
                "createAsyncRequest(observer, (newObserver) -> stub.echo(input, newObserver));",
            ]
        );
    }

    #[test]
    fn test_routed_async_stream_body() {
        let body = synthesize_body(
            GenerationShape::AsyncClientStreaming,
            "Echo",
            "com.demo",
            &method(true, false),
            true,
        );
        assert_eq!(
            body.lines,
            [
                "com.demo.EchoGrpc.EchoStub stub = getStub(com.google.protobuf.Any.getDefaultInstance(), properties);",
                "return createAsyncStreamRequest(observer, stub::echo);",
            ]
        );
    }

    #[test]
    fn test_forwarding_bodies_pass_empty_map() {
        for shape in GenerationShape::ALL {
            let m = method(shape.client_streaming(), shape.server_streaming());
            let body = synthesize_body(shape, "Echo", "com.demo", &m, false);
            assert_eq!(body.lines.len(), 1);
            assert!(body.lines[0].contains("echo("), "{shape}: {:?}", body.lines);
            assert!(body.lines[0].contains(EMPTY_PROPERTIES), "{shape}: {:?}", body.lines);
        }
    }

    #[test]
    fn test_async_forwarding_body_passes_observer() {
        let body = synthesize_body(GenerationShape::Async, "Echo", "", &method(false, false), false);
        assert_eq!(
            body.lines,
            ["echo(input, java.util.Collections.emptyMap(), observer);"]
        );
    }
}
