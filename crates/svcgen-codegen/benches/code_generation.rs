//! Performance benchmarks for svcgen-codegen.
//!
//! Measures:
//! - Namespace table construction over many schema files
//! - Full pipeline runs for growing service counts
//!
//! Run with: cargo bench --package svcgen-codegen

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use svcgen_codegen::{NamespaceTable, Pipeline};
use svcgen_core::schema::FileOptions;
use svcgen_core::{GeneratorOptions, MethodSchema, SchemaFile, ServiceSchema};

/// Creates a schema file with `services` services of four methods each,
/// one per streaming combination.
fn create_file(index: usize, services: usize) -> SchemaFile {
    let package = format!("bench.p{index}");
    let mut file = SchemaFile::new(format!("bench/file_{index}.proto"))
        .with_package(package.clone())
        .with_options(FileOptions {
            java_package: Some(format!("com.bench.p{index}")),
            java_multiple_files: true,
            java_outer_classname: None,
        })
        .with_message("Request")
        .with_message("Response");

    let input = format!(".{package}.Request");
    let output = format!(".{package}.Response");
    for s in 0..services {
        let mut service = ServiceSchema::new(format!("Service{s}"));
        for (m, (client, server)) in [(false, false), (true, false), (false, true), (true, true)]
            .into_iter()
            .enumerate()
        {
            service = service.with_method(MethodSchema::new(
                format!("Method{m}"),
                &input,
                &output,
                client,
                server,
            ));
        }
        file = file.with_service(service);
    }
    file
}

fn bench_namespace_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("namespace_table");

    for file_count in [1, 10, 100] {
        let files: Vec<_> = (0..file_count).map(|i| create_file(i, 0)).collect();
        group.throughput(Throughput::Elements(file_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(file_count), &files, |b, files| {
            b.iter(|| NamespaceTable::build(black_box(files)));
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let pipeline = Pipeline::from_options(&GeneratorOptions::default()).unwrap();

    for service_count in [1, 10, 50] {
        let files = vec![create_file(0, service_count)];
        let selected = [files[0].name.clone()];
        group.throughput(Throughput::Elements(service_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(service_count),
            &files,
            |b, files| {
                b.iter(|| pipeline.run(black_box(files), &selected).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_namespace_table, bench_pipeline);
criterion_main!(benches);
