//! Performance benchmarks for binding synthesis and signature scanning.
//!
//! - Synthesis: classes of growing member count, with and without overloads
//! - End to end: reading the Doxygen fixtures and writing every binding
//! - Scanning: a frontend source with many backend invocations

use autobind_core::{ClassDescription, EnumDef, Method, Parameter, TypeTable};
use autobind::{BindingGenerator, Config, SignatureTable};
use autobind_generator::GeneratorOptions;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::path::PathBuf;

/// A class with `methods` distinct methods; every fourth name is overloaded.
fn synthetic_class(methods: usize) -> ClassDescription {
    let mut class = ClassDescription::new("Widget")
        .with_include("widget.h")
        .with_constructor(Method::constructor("Widget"))
        .with_constructor(Method::constructor("Widget").with_param(Parameter::new("int").named("v")))
        .with_enum(EnumDef::new("Mode").with_value("Fast").with_value("Slow"));

    for i in 0..methods {
        class = class
            .with_method(Method::new(format!("value{i}"), "int").with_const(true))
            .with_method(
                Method::new(format!("setValue{i}"), "void")
                    .with_param(Parameter::new("int").named("v"))
                    .with_param(Parameter::new("Mode").named("m").with_default("Fast")),
            );
        if i % 4 == 0 {
            class = class
                .with_method(
                    Method::new(format!("setValue{i}"), "void").with_param(Parameter::new("const QString &").named("s")),
                )
                .with_method(
                    Method::new(format!("setValue{i}"), "void").with_param(Parameter::new("QObject *").named("o")),
                );
        }
    }
    class
}

fn synthesis_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator/synthesis");
    let table = TypeTable::builtin();
    let generator = BindingGenerator::new(&table, GeneratorOptions::default());

    for methods in [4, 32, 256] {
        let class = synthetic_class(methods);
        group.throughput(Throughput::Elements(class.methods.len() as u64));
        group.bench_function(format!("{methods}_methods"), |b| {
            b.iter(|| {
                let artifact = generator.generate(black_box(&class));
                black_box(artifact.definition.len())
            });
        });
    }

    group.finish();
}

fn end_to_end_benchmarks(c: &mut Criterion) {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_doxygen");
    let config = Config::default();

    c.bench_function("generator/fixtures_to_disk", |b| {
        let out = tempfile::tempdir().expect("Failed to create output directory");
        b.iter(|| {
            let artifacts = autobind::generate_bindings(&fixtures, out.path(), &config).expect("generation failed");
            black_box(artifacts.len())
        });
    });
}

fn scanner_benchmarks(c: &mut Criterion) {
    let mut source = String::new();
    for i in 0..500 {
        source.push_str(&format!(
            "qint64 Frontend::get{i}() const\n{{\n    qint64 ret;\n    BACKEND_GET(qint64, ret, \"get{i}\");\n    return ret;\n}}\n\
             void Frontend::set{i}(const QString &s)\n{{\n    BACKEND_CALL1(\"set{i}\", const QString &, s);\n}}\n"
        ));
    }

    let mut group = c.benchmark_group("sigscan");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("1000_invocations", |b| {
        b.iter(|| {
            let mut table = SignatureTable::new();
            table.scan_source("frontend.cpp", black_box(&source)).expect("scan failed");
            black_box(table.len())
        });
    });
    group.finish();
}

criterion_group!(benches, synthesis_benchmarks, end_to_end_benchmarks, scanner_benchmarks);
criterion_main!(benches);
