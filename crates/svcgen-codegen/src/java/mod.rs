//! Java artifact generators.
//!
//! Contracts and default implementations are rendered from Handlebars
//! templates; registration metadata is a single line per service and mode.
//! All type references are fully qualified, so generated sources need no
//! imports.

mod contract;
mod default_impl;
mod registry;

pub use contract::ContractGenerator;
pub use default_impl::DefaultImplGenerator;
pub use registry::RegistryGenerator;

use crate::resolver::NamespaceTable;
use crate::shape::{CallMode, GenerationShape};
use crate::synth::{synthesize_body, synthesize_declaration};
use serde::Serialize;
use svcgen_core::ServiceSchema;

/// One rendered method of a contract or implementation.
#[derive(Debug, Serialize)]
struct MethodContext {
    declaration: String,
    body: Vec<String>,
}

/// Builds the unrouted and routed variant of every method of a service.
///
/// `include` decides per shape whether a method appears at all; bodies are
/// synthesized only when `with_bodies` is set.
fn method_contexts(
    service: &ServiceSchema,
    namespace: &str,
    table: &NamespaceTable,
    mode: CallMode,
    with_bodies: bool,
    include: impl Fn(GenerationShape) -> bool,
) -> Vec<MethodContext> {
    let mut methods = Vec::with_capacity(service.methods.len() * 2);

    for method in &service.methods {
        let shape = GenerationShape::of(method, mode);
        if !include(shape) {
            continue;
        }
        for with_properties in [false, true] {
            let declaration = synthesize_declaration(shape, method, table, with_properties);
            let body = if with_bodies {
                synthesize_body(shape, &service.name, namespace, method, with_properties).lines
            } else {
                Vec::new()
            };
            methods.push(MethodContext {
                declaration: declaration.to_string(),
                body,
            });
        }
    }

    methods
}
