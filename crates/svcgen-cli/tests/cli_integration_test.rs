//! End-to-end tests of the plugin and scan drivers.

use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::{
    DescriptorProto, FileDescriptorProto, FileDescriptorSet, FileOptions, MethodDescriptorProto,
    ServiceDescriptorProto,
};
use std::fs;
use svcgen_cli::commands::{plugin, scan};
use svcgen_core::GeneratorOptions;
use tempfile::TempDir;

fn message(name: &str) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn method(name: &str, input: &str, output: &str, client: bool, server: bool) -> MethodDescriptorProto {
    MethodDescriptorProto {
        name: Some(name.to_string()),
        input_type: Some(input.to_string()),
        output_type: Some(output.to_string()),
        client_streaming: Some(client),
        server_streaming: Some(server),
        ..Default::default()
    }
}

/// Shared message types, never generated for.
fn common() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("th2/common.proto".to_string()),
        package: Some("th2.common".to_string()),
        message_type: vec![message("EventID")],
        options: Some(FileOptions {
            java_package: Some("com.exactpro.th2.common.grpc".to_string()),
            java_multiple_files: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn act() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("th2/act.proto".to_string()),
        package: Some("th2.act".to_string()),
        dependency: vec!["th2/common.proto".to_string()],
        message_type: vec![message("PlaceMessageRequest"), message("PlaceMessageResponse")],
        service: vec![ServiceDescriptorProto {
            name: Some("Act".to_string()),
            method: vec![
                method(
                    "PlaceOrderFIX",
                    ".th2.act.PlaceMessageRequest",
                    ".th2.act.PlaceMessageResponse",
                    false,
                    false,
                ),
                method(
                    "Subscribe",
                    ".th2.common.EventID",
                    ".th2.act.PlaceMessageResponse",
                    false,
                    true,
                ),
            ],
            ..Default::default()
        }],
        options: Some(FileOptions {
            java_package: Some("com.exactpro.th2.act.grpc".to_string()),
            java_multiple_files: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[test]
fn test_plugin_request_over_the_wire() {
    let request = CodeGeneratorRequest {
        file_to_generate: vec!["th2/act.proto".to_string()],
        parameter: Some("enablePython=false".to_string()),
        proto_file: vec![common(), act()],
        ..Default::default()
    };

    let decoded = plugin::decode_request(&request.encode_to_vec()).unwrap();
    let response = plugin::process_request(&decoded);

    assert!(response.error.is_none(), "{:?}", response.error);
    let names: Vec<_> = response.file.iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        [
            "com/exactpro/th2/act/grpc/ActService.java",
            "com/exactpro/th2/act/grpc/AsyncActService.java",
            "com/exactpro/th2/act/grpc/ActDefaultBlockingImpl.java",
            "com/exactpro/th2/act/grpc/ActDefaultAsyncImpl.java",
            "META-INF/services/com.exactpro.th2.act.grpc.ActService",
            "META-INF/services/com.exactpro.th2.act.grpc.AsyncActService",
        ]
    );

    let contract = response.file[0].content();
    assert!(contract.contains(
        "java.util.Iterator<com.exactpro.th2.act.grpc.PlaceMessageResponse> subscribe(com.exactpro.th2.common.grpc.EventID input);"
    ));
    assert!(contract.contains("placeOrderFIX(com.exactpro.th2.act.grpc.PlaceMessageRequest input);"));
}

#[tokio::test]
async fn test_scan_generates_every_file_found() {
    let source = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(
        source.path().join("act.pb"),
        FileDescriptorSet {
            file: vec![common(), act()],
        }
        .encode_to_vec(),
    )
    .unwrap();

    let summary = scan::generate(
        source.path(),
        output.path(),
        &GeneratorOptions::from_args(["--enableJavaDefaultImpl=false", "--pythonPath=py"]),
    )
    .await
    .unwrap();

    assert_eq!(summary.descriptor_sets, 1);
    assert_eq!(summary.schema_files, 2);
    assert_eq!(summary.generated_files, 5);

    let base = output.path();
    assert!(base.join("com/exactpro/th2/act/grpc/ActService.java").is_file());
    assert!(!base.join("com/exactpro/th2/act/grpc/ActDefaultBlockingImpl.java").exists());

    let binding = fs::read_to_string(base.join("py/th2/act_service.py")).unwrap();
    assert!(binding.contains("from . import act_pb2_grpc as importStub"));
    assert!(binding.contains("    def PlaceOrderFIX(self, request, timeout=None, properties=None):"));
}
