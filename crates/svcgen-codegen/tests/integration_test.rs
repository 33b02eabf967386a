//! End-to-end tests for svcgen-codegen.
//!
//! Builds a realistic multi-file schema set and checks the complete
//! artifact set produced by the pipeline under different options.

use svcgen_codegen::{GeneratedCode, Pipeline};
use svcgen_core::schema::{FileOptions, MessageSchema};
use svcgen_core::{GeneratorOptions, MethodSchema, SchemaFile, ServiceSchema};

/// Common types shared by the services, never generated for directly.
fn common_file() -> SchemaFile {
    SchemaFile::new("th2/common.proto")
        .with_package("th2.common")
        .with_options(FileOptions {
            java_package: Some("com.exactpro.th2.common.grpc".to_string()),
            java_multiple_files: true,
            java_outer_classname: None,
        })
        .with_message("EventID")
        .with_message_schema(
            MessageSchema::new("RequestStatus").with_nested(MessageSchema::new("Details")),
        )
}

/// A service using the common types, packed into an outer class.
fn act_file() -> SchemaFile {
    SchemaFile::new("th2/act_service.proto")
        .with_package("th2.act")
        .with_options(FileOptions {
            java_package: Some("com.exactpro.th2.act.grpc".to_string()),
            java_multiple_files: false,
            java_outer_classname: None,
        })
        .with_message("PlaceOrderRequest")
        .with_message("PlaceOrderResponse")
        .with_service(
            ServiceSchema::new("Act")
                .with_method(MethodSchema::unary(
                    "PlaceOrder",
                    ".th2.act.PlaceOrderRequest",
                    ".th2.act.PlaceOrderResponse",
                ))
                .with_method(MethodSchema::new(
                    "Subscribe",
                    ".th2.common.EventID",
                    ".th2.common.RequestStatus.Details",
                    false,
                    true,
                ))
                .with_method(MethodSchema::new(
                    "Exchange",
                    ".th2.act.PlaceOrderRequest",
                    ".th2.common.RequestStatus",
                    true,
                    true,
                )),
        )
}

fn run(options: &str) -> GeneratedCode {
    Pipeline::from_options(&GeneratorOptions::parse(options))
        .unwrap()
        .run(&[common_file(), act_file()], &["th2/act_service.proto"])
        .unwrap()
}

#[test]
fn test_full_artifact_set() {
    let code = run("");
    let paths: Vec<_> = code.paths().collect();
    assert_eq!(
        paths,
        [
            "com/exactpro/th2/act/grpc/ActService/ActService.java",
            "com/exactpro/th2/act/grpc/ActService/AsyncActService.java",
            "com/exactpro/th2/act/grpc/ActService/ActDefaultBlockingImpl.java",
            "com/exactpro/th2/act/grpc/ActService/ActDefaultAsyncImpl.java",
            "th2/act_service.py",
            "META-INF/services/com.exactpro.th2.act.grpc.ActService.ActService",
            "META-INF/services/com.exactpro.th2.act.grpc.ActService.AsyncActService",
        ]
    );
}

#[test]
fn test_cross_file_and_nested_types_are_qualified() {
    let code = run("");
    let contract = &code
        .find("com/exactpro/th2/act/grpc/ActService/ActService.java")
        .unwrap()
        .content;

    assert!(contract.contains("package com.exactpro.th2.act.grpc.ActService;"));
    assert!(contract.contains(
        "java.util.Iterator<com.exactpro.th2.common.grpc.RequestStatus.Details> subscribe(com.exactpro.th2.common.grpc.EventID input);"
    ));
    assert!(contract.contains(
        "com.exactpro.th2.act.grpc.ActService.PlaceOrderResponse placeOrder(com.exactpro.th2.act.grpc.ActService.PlaceOrderRequest input);"
    ));
}

#[test]
fn test_default_impl_wiring() {
    let code = run("");
    let blocking = &code
        .find("com/exactpro/th2/act/grpc/ActService/ActDefaultBlockingImpl.java")
        .unwrap()
        .content;

    assert!(blocking.contains(
        "com.exactpro.th2.act.grpc.ActService.ActGrpc.ActBlockingStub stub = getStub(input, properties);"
    ));
    assert!(blocking.contains("return createBlockingRequest(() -> stub.subscribe(input));"));
    assert!(!blocking.contains("exchange("));

    let async_impl = &code
        .find("com/exactpro/th2/act/grpc/ActService/ActDefaultAsyncImpl.java")
        .unwrap()
        .content;
    assert!(async_impl.contains(
        "createAsyncRequest(observer, (newObserver) -> stub.placeOrder(input, newObserver));"
    ));
    assert!(async_impl.contains(
        "com.exactpro.th2.act.grpc.ActService.ActGrpc.ActStub stub = getStub(com.google.protobuf.Any.getDefaultInstance(), properties);"
    ));
}

#[test]
fn test_python_binding_lists_every_method() {
    let code = run("");
    let binding = &code.find("th2/act_service.py").unwrap().content;

    assert!(binding.contains("from . import act_service_pb2_grpc as importStub"));
    for method in ["PlaceOrder", "Subscribe", "Exchange"] {
        assert!(binding.contains(&format!("    def {method}(self, request, timeout=None, properties=None):")));
    }
}

#[test]
fn test_path_overrides_only_move_files() {
    let plain = run("");
    let moved = run(
        "javaInterfacesPath=api,javaInterfacesImplPath=impl/,javaMetaInfPath=res,pythonPath=py",
    );

    assert_eq!(plain.file_count(), moved.file_count());
    for (before, after) in plain.files().zip(moved.files()) {
        assert_eq!(before.content, after.content);
        assert!(after.path.ends_with(&before.path), "{} vs {}", after.path, before.path);
    }
    assert!(moved.find("impl/com/exactpro/th2/act/grpc/ActService/ActDefaultAsyncImpl.java").is_some());
    assert!(moved.find("res/META-INF/services/com.exactpro.th2.act.grpc.ActService.ActService").is_some());
    assert!(moved.find("py/th2/act_service.py").is_some());
}

#[test]
fn test_individual_switches() {
    let code = run("enableJavaInterfaces=false,enableJavaMetaInf=false,enablePython=false");
    assert_eq!(code.file_count(), 2);
    assert!(code.paths().all(|p| p.contains("DefaultBlockingImpl") || p.contains("DefaultAsyncImpl")));
}

#[test]
fn test_referenced_only_file_produces_nothing() {
    let code = Pipeline::from_options(&GeneratorOptions::default())
        .unwrap()
        .run(&[common_file(), act_file()], &["th2/common.proto"])
        .unwrap();
    assert_eq!(code.file_count(), 0);
}
